#[macro_export]
macro_rules! group {
    // Empty group
    () => {
        $crate::Container::group()
    };

    // name = value pairs; a later duplicate name overwrites an earlier one
    ( $( $name:ident = $value:expr ),* $(,)? ) => {
        $crate::Container::group_of(vec![
            $( (stringify!($name), $crate::Value::from($value)) ),*
        ])
        .expect("identifier keys satisfy the name grammar")
    };
}

#[macro_export]
macro_rules! list {
    // Empty list
    () => {
        $crate::Container::list()
    };

    ( $( $value:expr ),* $(,)? ) => {
        $crate::Container::list_of(vec![ $( $crate::Value::from($value) ),* ])
    };
}
