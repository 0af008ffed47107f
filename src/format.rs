//! The Tycon format, as implemented by this library.
//!
//! # Overview
//!
//! Tycon is a typed, hierarchical configuration language. A document is a
//! sequence of named items; values are scalars or containers; comments are
//! first-class and survive re-emission.
//!
//! # Grammar
//!
//! Whitespace is any run of space, tab, CR, LF between tokens, unless inside
//! a string or comment. Tokens are whitespace-delimited: `name = 1` parses,
//! `name=1` does not.
//!
//! ```text
//! config        := { item } EOF
//! item          := comment | named_item
//! named_item    := name '=' value
//! name          := [A-Za-z][A-Za-z0-9_]*
//! value         := scalar | group | list
//! scalar        := string | integer | double | bool
//! string        := '"' { char | escape } '"'
//! escape        := '\"' | '\\' | '\n' | '\r' | '\t'
//! integer       := [+-]? digit+
//! double        := [+-]? (digit+ ('.' digit*)? | '.' digit+) ([eE][+-]? digit+)?
//! bool          := 'true' | 'false'
//! group         := '{' { item } '}'
//! list          := '[' { list_item } ']'
//! list_item     := comment | value
//! comment       := '#' line_rest
//!                | '//' line_rest
//!                | '/*' text '*/'
//! ```
//!
//! # Scalars
//!
//! | Kind | Syntax | Example |
//! |------|--------|---------|
//! | Integer | signed 32-bit decimal | `port = 8080` |
//! | Double | IEEE-754 binary64, `.` or exponent | `ratio = 0.75` |
//! | Boolean | `true` or `false` | `active = true` |
//! | String | always double-quoted | `host = "db-1"` |
//!
//! The kind of a value is inferred from its first character: `"` starts a
//! string, `{` a group, `[` a list, `t`/`f` a boolean, and a sign or digit a
//! number. A number is an integer unless a `.` appears before the end of the
//! current physical line.
//!
//! Strings are always quoted. Inside the quotes the recognized escapes are
//! `\"`, `\\`, `\n`, `\r`, and `\t`; any other backslash sequence is an
//! error. Raw newlines and tabs are legal inside a string and are preserved.
//!
//! # Containers
//!
//! Groups `{ ... }` hold named items; two non-comment siblings cannot share a
//! name (unless the duplicate policy resolves it at insertion). Lists
//! `[ ... ]` hold anonymous values. Both nest arbitrarily:
//!
//! ```text
//! databases = [
//! 	{
//! 		host = "db-1"
//! 		port = 5432
//! 	}
//! 	{
//! 		host = "db-2"
//! 		port = 5433
//! 	}
//! ]
//! ```
//!
//! # Paths
//!
//! `segment ( '/' segment )*` where a segment is a name or a non-negative
//! decimal index, and the first segment begins with a letter.
//! `databases/1/host` selects the `host` of the second list element. Comments
//! occupy positions: a comment before an item shifts the indices after it.
//!
//! # Comments
//!
//! All three flavors may appear anywhere an item may appear, including inside
//! lists. The text between the delimiters is stored verbatim.
//!
//! # Canonical emission
//!
//! - children emit in insertion order, one item per line;
//! - nesting indents by one tab per level;
//! - comments always occupy their own line (an inline comment after `{`
//!   reappears on the next line, inside the group);
//! - blank lines are not preserved;
//! - doubles always carry a `.` or an exponent, so they re-parse as doubles.
//!
//! Emission never loses information: parsing the emitted text reproduces the
//! tree exactly.

// This module contains only documentation; no implementation code
