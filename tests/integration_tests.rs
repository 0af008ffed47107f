use serde::Serialize;
use tycon::{
    from_str, group, list, to_value, Comment, Config, Container, Error, Node, OnDuplicate, Value,
};

#[test]
fn scalar_round_trip() {
    let source = "TestInt = 42\nTestStr = \"Hello, World!\"\n";
    let config = from_str(source).unwrap();

    assert_eq!(config.size(), 2);
    let first = config.get(0).unwrap();
    assert_eq!(first.name(), Some("TestInt"));
    assert_eq!(first.value(), &Value::Integer(42));
    let second = config.get(1).unwrap();
    assert_eq!(second.name(), Some("TestStr"));
    assert_eq!(second.value(), &Value::String("Hello, World!".to_string()));

    assert_eq!(config.emit(), source);
}

#[test]
fn nested_groups_and_path_lookup() {
    let source = "Group1 = {\n    Group2 = {\n        SubTestInt = 99\n        SubTestStr = \"Sub Hello\"\n    }\n}\n";
    let config = from_str(source).unwrap();

    assert_eq!(
        config.lookup("Group1/Group2/SubTestInt").unwrap().as_integer(),
        Some(99)
    );
    assert_eq!(
        config.lookup("Group1/Group2/SubTestStr").unwrap().as_str(),
        Some("Sub Hello")
    );
}

#[test]
fn commented_group_emits_canonically() {
    let source = "\
# The following is a test integer
test_integer = 666

# Now a group
test_group = { # We can have a comment here!
\t# And also here
\ttest_string = \"# But this is not a comment\"
}
# Ending comment
";
    let expected = "\
# The following is a test integer
test_integer = 666
# Now a group
test_group = {
\t# We can have a comment here!
\t# And also here
\ttest_string = \"# But this is not a comment\"
}
# Ending comment
";
    let config = from_str(source).unwrap();
    assert_eq!(config.emit(), expected);
}

#[test]
fn list_with_embedded_comment() {
    let mut list = Container::list();
    list.add(Node::from(Comment::bash("List comment")), OnDuplicate::Reject)
        .unwrap();
    list.add(Node::anonymous(66), OnDuplicate::Reject).unwrap();
    list.add(Node::anonymous("Test string"), OnDuplicate::Reject)
        .unwrap();

    let mut config = Config::new();
    config.insert(Node::named("testList", list)).unwrap();

    assert_eq!(
        config.emit(),
        "testList = [\n\t#List comment\n\t66\n\t\"Test string\"\n]\n"
    );
    assert_eq!(config.lookup("testList/1").unwrap().as_integer(), Some(66));
}

#[test]
fn collision_policies_on_insert() {
    let mut config = Config::with_policy(OnDuplicate::Keep);
    config.insert(Node::named("testItem", true)).unwrap();
    config.insert(Node::named("testItem", 666)).unwrap();
    assert_eq!(config.lookup("testItem").unwrap().as_bool(), Some(true));

    let mut config = Config::with_policy(OnDuplicate::Overwrite);
    config.insert(Node::named("testItem", true)).unwrap();
    config.insert(Node::named("testItem", 666)).unwrap();
    assert_eq!(config.lookup("testItem").unwrap().as_integer(), Some(666));
}

#[test]
fn parse_error_carries_line() {
    let err = from_str("Invalid = { Unclosed }").unwrap_err();
    match err {
        Error::Parse { line, ref reason } => {
            assert!(line >= 1);
            assert!(reason.contains('}') || reason.contains("EOF"));
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn round_trip_is_idempotent() {
    let source = "\
# header
mode = \"mixed\"
limits = {
\tretries = 3
\twindow = 2.5
\tflags = [ true false ]
}
tags = [ \"a\" \"b\" ]
";
    let first = from_str(source).unwrap();
    let second = from_str(&first.emit()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.emit(), second.emit());
}

#[test]
fn built_trees_survive_emission() {
    let mut config = Config::new();
    config
        .insert(Node::named(
            "backend",
            group! {
                host = "db-1",
                port = 5432,
                timeout = 1.5,
                replicas = list![1, 2, 3],
            },
        ))
        .unwrap();
    config.insert(Node::named("verbose", false)).unwrap();

    let parsed = from_str(&config.emit()).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn exists_matches_lookup() {
    let config = from_str("a = { b = [ 10 ] }\n").unwrap();
    for path in ["a", "a/b", "a/b/0", "a/0", "a/0/0"] {
        assert_eq!(config.exists(path), config.lookup(path).is_ok(), "{path}");
    }
    assert!(!config.exists("a/b/1"));
    assert!(!config.exists("missing"));
}

#[test]
fn size_and_count_through_facade() {
    let config = from_str("# c\na = 1\ng = {\n\tb = 2\n\tl = [ 1 2 ]\n}\n").unwrap();
    assert_eq!(config.size(), 3);
    // comment(1) + a(1) + g(1 + b(1) + l(1 + two elements))
    assert_eq!(config.count(), 7);
}

#[test]
fn remove_by_path_and_index() {
    let mut config = from_str("a = 1\nsub = {\n\tb = 2\n\tc = 3\n}\n").unwrap();

    let removed = config.remove("sub/b").unwrap();
    assert_eq!(removed.as_integer(), Some(2));
    assert!(!config.exists("sub/b"));
    assert!(config.exists("sub/c"));

    config.remove_at(0).unwrap();
    assert!(!config.exists("a"));
    assert_eq!(config.size(), 1);
}

#[test]
fn typed_accessors_fail_with_conversion_error() {
    let config = from_str("number = 42\n").unwrap();
    let node = config.lookup("number").unwrap();

    let as_int = i32::try_from(node).unwrap();
    assert_eq!(as_int, 42);

    let err = bool::try_from(node).unwrap_err();
    assert!(matches!(err, Error::WrongValueTypeConversion { .. }));
    assert_eq!(err.to_string(), "Cannot convert Integer value to Bool");
}

#[test]
fn mutation_through_lookup_mut() {
    let mut config = from_str("server = {\n\tport = 8080\n}\n").unwrap();
    *config.lookup_mut("server/port").unwrap().value_mut() = Value::Integer(9090);

    assert_eq!(config.lookup("server/port").unwrap().as_integer(), Some(9090));
    assert_eq!(config.emit(), "server = {\n\tport = 9090\n}\n");
}

#[test]
fn merge_respects_overwrite() {
    let mut base = from_str("host = \"old\"\nkeep = 1\n").unwrap();
    base.set_policy(OnDuplicate::Overwrite);

    let overlay = from_str("host = \"new\"\nadded = 2\n").unwrap();
    base.merge(&overlay).unwrap();

    assert_eq!(base.lookup("host").unwrap().as_str(), Some("new"));
    assert_eq!(base.lookup("keep").unwrap().as_integer(), Some(1));
    assert_eq!(base.lookup("added").unwrap().as_integer(), Some(2));
}

#[test]
fn to_value_trees_are_parse_compatible() {
    #[derive(Serialize)]
    struct Upstream {
        host: String,
        port: u16,
        weights: Vec<f64>,
    }

    let value = to_value(&Upstream {
        host: "edge-1".into(),
        port: 443,
        weights: vec![0.5, 1.5],
    })
    .unwrap();

    let mut config = Config::new();
    config.insert(Node::named("upstream", value)).unwrap();

    let parsed = from_str(&config.emit()).unwrap();
    assert_eq!(parsed.lookup("upstream/host").unwrap().as_str(), Some("edge-1"));
    assert_eq!(parsed.lookup("upstream/port").unwrap().as_integer(), Some(443));
    assert_eq!(
        parsed.lookup("upstream/weights/1").unwrap().as_double(),
        Some(1.5)
    );
}

#[test]
fn value_survives_the_serde_bridge() {
    // A comment-free tree pushed through its own Serialize impl and rebuilt
    // by the ValueSerializer comes back identical.
    let original = Value::Container(group! {
        name = "alpha",
        size = 3,
        parts = list![1, 2],
    });

    let rebuilt = to_value(&original).unwrap();
    assert_eq!(rebuilt, original);
}

#[test]
fn comments_are_skipped_by_the_serde_bridge() {
    let config = from_str("# note\nx = 1\n").unwrap();
    let rebuilt = to_value(&config).unwrap();

    let group = rebuilt.as_container().unwrap();
    assert_eq!(group.size(), 1);
    assert_eq!(group.lookup("x").unwrap().as_integer(), Some(1));
}
