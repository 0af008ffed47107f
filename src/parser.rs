//! The Tycon parser.
//!
//! A single-pass, hand-written recursive-descent parser over a character
//! cursor. The kind of every value is inferred from one lookahead character
//! after whitespace; containers recurse; comments are harvested wherever an
//! item could start. Every consumed `\n` advances a 1-based line counter so
//! each [`Error::Parse`](crate::Error::Parse) names the offending line.
//!
//! Most users drive the parser through [`Config`](crate::Config) or
//! [`from_str`](crate::from_str); direct use looks like:
//!
//! ```rust
//! use tycon::{Container, OnDuplicate, Parser};
//!
//! let mut root = Container::group();
//! let mut parser = Parser::new("a = 1\nb = \"two\"\n", OnDuplicate::Reject);
//! parser.parse_into(&mut root).unwrap();
//! assert_eq!(root.size(), 2);
//! ```

use crate::comment::{Comment, CommentFlavor};
use crate::container::{Container, ContainerKind};
use crate::error::{Error, Result};
use crate::options::OnDuplicate;
use crate::path;
use crate::value::{Node, Value};
use regex::Regex;
use std::sync::LazyLock;

static INT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+$").expect("integer pattern compiles"));

static DOUBLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").expect("double pattern compiles")
});

/// Inferred kind of the upcoming value. Inference only dispatches; validity
/// is checked by the per-kind readers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ItemType {
    String,
    Integer,
    Double,
    Bool,
    Container,
}

/// Streaming parser over a borrowed source string.
pub struct Parser<'a> {
    input: &'a str,
    position: usize,
    line: u32,
    depth: u32,
    policy: OnDuplicate,
}

impl<'a> Parser<'a> {
    /// Creates a parser for `input`, inserting under `policy`.
    #[must_use]
    pub fn new(input: &'a str, policy: OnDuplicate) -> Self {
        Parser {
            input,
            position: 0,
            line: 1,
            depth: 0,
            policy,
        }
    }

    /// Parses the whole input into `root`, appending to whatever the
    /// container already holds.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] with the 1-based line of the first offending
    /// character. On error the container keeps everything parsed so far.
    pub fn parse_into(&mut self, root: &mut Container) -> Result<()> {
        self.parse_container(root)
    }

    fn parse_container(&mut self, container: &mut Container) -> Result<()> {
        loop {
            self.harvest_comments(container)?;

            if self.take_container_end(container.kind()) {
                // A closer at nesting depth 0 has no container to close.
                if self.depth == 0 {
                    return Err(Error::parse(self.line, "Unexpected container end symbol"));
                }
                self.depth -= 1;
                return Ok(());
            }

            self.skip_ws();
            if self.at_end() {
                if self.depth > 0 {
                    return Err(Error::parse(self.line, "Unexpected EOF"));
                }
                return Ok(());
            }

            let name = match container.kind() {
                ContainerKind::Group => Some(self.read_item_name()?),
                ContainerKind::List => None,
            };

            let value = self.parse_value()?;
            let mut node = Node::anonymous(value);
            node.set_name(name);

            let line = self.line;
            container
                .add(node, self.policy)
                .map_err(|e| Error::parse(line, e.to_string()))?;
        }
    }

    /// Reads a group item name and the `=` that must follow it.
    fn read_item_name(&mut self) -> Result<String> {
        let name = self.read_token();
        if !path::is_valid_name(&name) {
            return Err(Error::parse(self.line, format!("Invalid item name: {name}")));
        }
        let equal = self.read_token();
        if equal != "=" {
            return Err(Error::parse(
                self.line,
                format!("Expected '=' after item name {name} but got {equal}"),
            ));
        }
        Ok(name)
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.peek_type()? {
            ItemType::String => Ok(Value::String(self.read_quoted_string()?)),
            ItemType::Integer => self.parse_integer(),
            ItemType::Double => self.parse_double(),
            ItemType::Bool => self.parse_bool(),
            ItemType::Container => self.parse_child_container(),
        }
    }

    /// Infers the upcoming value kind from the first character after
    /// whitespace. A leading sign or digit means Integer unless a `.` occurs
    /// anywhere before the end of the current physical line, which promotes
    /// the guess to Double. No validity checking happens here.
    fn peek_type(&mut self) -> Result<ItemType> {
        self.skip_ws();
        let rest = &self.input[self.position..];
        let first = match rest.chars().next() {
            Some(c) => c,
            None => return Err(Error::parse(self.line, "Unexpected EOF")),
        };
        match first {
            '"' => Ok(ItemType::String),
            '{' | '[' => Ok(ItemType::Container),
            '-' | '+' | '0'..='9' => {
                let line_rest = match rest.find('\n') {
                    Some(end) => &rest[..end],
                    None => rest,
                };
                if line_rest.contains('.') {
                    Ok(ItemType::Double)
                } else {
                    Ok(ItemType::Integer)
                }
            }
            't' | 'f' => Ok(ItemType::Bool),
            other => Err(Error::parse(
                self.line,
                format!("Unexpected {other} when parsing item type"),
            )),
        }
    }

    fn parse_child_container(&mut self) -> Result<Value> {
        self.skip_ws();
        let kind = match self.next_char() {
            Some('{') => ContainerKind::Group,
            Some('[') => ContainerKind::List,
            Some(other) => {
                return Err(Error::parse(
                    self.line,
                    format!("Unknown start character {other} for container"),
                ))
            }
            None => return Err(Error::parse(self.line, "Unexpected EOF")),
        };
        self.depth += 1;
        let mut child = Container::new(kind);
        self.parse_container(&mut child)?;
        Ok(Value::Container(child))
    }

    fn parse_integer(&mut self) -> Result<Value> {
        let token = self.read_token();
        if !INT_RE.is_match(&token) {
            return Err(Error::parse(
                self.line,
                format!("Failed to parse integer value '{token}'"),
            ));
        }
        // The pattern already matched, so the only parse failure left is range.
        let parsed = token
            .parse::<i32>()
            .map_err(|_| Error::parse(self.line, format!("Integer value {token} out of range")))?;
        Ok(Value::Integer(parsed))
    }

    fn parse_double(&mut self) -> Result<Value> {
        let token = self.read_token();
        if !DOUBLE_RE.is_match(&token) {
            return Err(Error::parse(
                self.line,
                format!("Failed to parse double value '{token}'"),
            ));
        }
        let parsed = token
            .parse::<f64>()
            .map_err(|_| Error::parse(self.line, format!("Failed to parse double value '{token}'")))?;
        if !parsed.is_finite() {
            return Err(Error::parse(
                self.line,
                format!("Double value {token} out of range"),
            ));
        }
        Ok(Value::Double(parsed))
    }

    fn parse_bool(&mut self) -> Result<Value> {
        let token = self.read_token();
        match token.as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(Error::parse(
                self.line,
                format!("Failed to parse boolean value '{token}'"),
            )),
        }
    }

    /// Reads a quoted string starting at the opening `"` (after whitespace).
    ///
    /// Recognized escapes: `\"`, `\\`, `\n`, `\r`, `\t`. Raw newlines are
    /// legal inside the quotes and advance the line counter.
    fn read_quoted_string(&mut self) -> Result<String> {
        self.skip_ws();
        match self.next_char() {
            Some('"') => {}
            _ => {
                return Err(Error::parse(
                    self.line,
                    "String content was expected but found EOF",
                ))
            }
        }
        let mut accumulator = String::new();
        loop {
            match self.next_char() {
                Some('"') => return Ok(accumulator),
                Some('\\') => match self.next_char() {
                    Some('"') => accumulator.push('"'),
                    Some('\\') => accumulator.push('\\'),
                    Some('n') => accumulator.push('\n'),
                    Some('r') => accumulator.push('\r'),
                    Some('t') => accumulator.push('\t'),
                    Some(other) => {
                        return Err(Error::parse(
                            self.line,
                            format!("Invalid escape sequence: \\{other}"),
                        ))
                    }
                    None => {
                        return Err(Error::parse(self.line, "Expected string closure but got EOF"))
                    }
                },
                Some(other) => accumulator.push(other),
                None => {
                    return Err(Error::parse(self.line, "Expected string closure but got EOF"))
                }
            }
        }
    }

    /// Appends every comment at the cursor to `container`, in order.
    fn harvest_comments(&mut self, container: &mut Container) -> Result<()> {
        while let Some(flavor) = self.probe_comment() {
            let text = match flavor {
                CommentFlavor::SingleLineBash | CommentFlavor::SingleLineC => self.read_line_rest(),
                CommentFlavor::MultiLineC => self.read_multiline_comment()?,
            };
            let line = self.line;
            container
                .add(Node::from(Comment::new(flavor, text)), self.policy)
                .map_err(|e| Error::parse(line, e.to_string()))?;
        }
        Ok(())
    }

    /// Detects a comment opener at the cursor (after whitespace) and consumes
    /// it. Restores the cursor fully when the next characters are not a
    /// comment opener.
    fn probe_comment(&mut self) -> Option<CommentFlavor> {
        self.skip_ws();
        let saved_position = self.position;
        let saved_line = self.line;
        match self.next_char() {
            Some('#') => Some(CommentFlavor::SingleLineBash),
            Some('/') => match self.next_char() {
                Some('/') => Some(CommentFlavor::SingleLineC),
                Some('*') => Some(CommentFlavor::MultiLineC),
                _ => {
                    self.position = saved_position;
                    self.line = saved_line;
                    None
                }
            },
            Some(_) => {
                self.position = saved_position;
                self.line = saved_line;
                None
            }
            None => None,
        }
    }

    /// Consumes the rest of the physical line, newline included; returns the
    /// text without the newline.
    fn read_line_rest(&mut self) -> String {
        let mut text = String::new();
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                self.next_char();
                break;
            }
            text.push(c);
            self.next_char();
        }
        text
    }

    /// Consumes until `*/`, returning the verbatim interior.
    fn read_multiline_comment(&mut self) -> Result<String> {
        let mut text = String::new();
        loop {
            match self.next_char() {
                Some('*') if self.peek_char() == Some('/') => {
                    self.next_char();
                    return Ok(text);
                }
                Some(c) => text.push(c),
                None => return Err(Error::parse(self.line, "Unclosed MultiLineC comment")),
            }
        }
    }

    /// Consumes the matching closer if it is the next non-whitespace
    /// character.
    fn take_container_end(&mut self, kind: ContainerKind) -> bool {
        self.skip_ws();
        if self.peek_char() == Some(kind.closer()) {
            self.next_char();
            true
        } else {
            false
        }
    }

    /// Skips whitespace, then accumulates characters up to (and consuming)
    /// the next whitespace. Empty at end of input.
    fn read_token(&mut self) -> String {
        self.skip_ws();
        let mut token = String::new();
        while let Some(c) = self.next_char() {
            if matches!(c, ' ' | '\t' | '\r' | '\n') {
                break;
            }
            token.push(c);
        }
        token
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek_char() {
            if matches!(c, ' ' | '\t' | '\r' | '\n') {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.input[self.position..].chars().next()?;
        self.position += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser(input: &str) -> Parser<'_> {
        Parser::new(input, OnDuplicate::Reject)
    }

    fn parse(input: &str) -> Result<Container> {
        let mut root = Container::group();
        parser(input).parse_into(&mut root)?;
        Ok(root)
    }

    fn parse_err(input: &str) -> Error {
        parse(input).expect_err("input should not parse")
    }

    #[test]
    fn read_token_counts_lines() {
        let mut p = parser("  one\ntwo");
        assert_eq!(p.read_token(), "one");
        // The terminating newline is consumed with the token.
        assert_eq!(p.line, 2);
        assert_eq!(p.read_token(), "two");
        assert_eq!(p.read_token(), "");
    }

    #[test]
    fn quoted_string_decodes_escapes() {
        let mut p = parser(r#""a\"b\\c\nd\re\tf""#);
        assert_eq!(p.read_quoted_string().unwrap(), "a\"b\\c\nd\re\tf");
    }

    #[test]
    fn quoted_string_keeps_raw_newlines() {
        let mut p = parser("\"line one\nline two\"");
        assert_eq!(p.read_quoted_string().unwrap(), "line one\nline two");
        assert_eq!(p.line, 2);
    }

    #[test]
    fn invalid_escape_is_rejected() {
        let mut p = parser(r#""bad \q escape""#);
        let err = p.read_quoted_string().unwrap_err();
        assert!(err.to_string().contains("Invalid escape sequence: \\q"));
    }

    #[test]
    fn unterminated_string_reports_eof() {
        let mut p = parser("\"no closure");
        let err = p.read_quoted_string().unwrap_err();
        assert!(err
            .to_string()
            .contains("Expected string closure but got EOF"));
    }

    #[test]
    fn probe_comment_restores_cursor() {
        let mut p = parser("/x");
        assert_eq!(p.probe_comment(), None);
        assert_eq!(p.position, 0);
        assert_eq!(p.peek_char(), Some('/'));
    }

    #[test]
    fn probe_comment_detects_all_flavors() {
        assert_eq!(
            parser("# x").probe_comment(),
            Some(CommentFlavor::SingleLineBash)
        );
        assert_eq!(
            parser("// x").probe_comment(),
            Some(CommentFlavor::SingleLineC)
        );
        assert_eq!(
            parser("/* x */").probe_comment(),
            Some(CommentFlavor::MultiLineC)
        );
        assert_eq!(parser("value").probe_comment(), None);
    }

    #[test]
    fn scalar_kinds_are_inferred() {
        let root = parse("i = 42\nd = 4.5\nb = true\ns = \"text\"\n").unwrap();
        assert_eq!(root.lookup("i").unwrap().as_integer(), Some(42));
        assert_eq!(root.lookup("d").unwrap().as_double(), Some(4.5));
        assert_eq!(root.lookup("b").unwrap().as_bool(), Some(true));
        assert_eq!(root.lookup("s").unwrap().as_str(), Some("text"));
    }

    #[test]
    fn signed_numbers() {
        let root = parse("neg = -7\npos = +7\nnegd = -2.5\nexp = 1.5e3\n").unwrap();
        assert_eq!(root.lookup("neg").unwrap().as_integer(), Some(-7));
        assert_eq!(root.lookup("pos").unwrap().as_integer(), Some(7));
        assert_eq!(root.lookup("negd").unwrap().as_double(), Some(-2.5));
        assert_eq!(root.lookup("exp").unwrap().as_double(), Some(1500.0));
    }

    #[test]
    fn empty_containers_parse() {
        let root = parse("g = {\n}\nl = [\n]\n").unwrap();
        assert_eq!(root.lookup("g").unwrap().as_container().unwrap().size(), 0);
        assert_eq!(root.lookup("l").unwrap().as_container().unwrap().size(), 0);
    }

    #[test]
    fn nested_containers_track_depth() {
        let root = parse("a = { b = { c = [ 1 { d = 2 } ] } }\n").unwrap();
        assert_eq!(root.lookup("a/b/c/0").unwrap().as_integer(), Some(1));
        assert_eq!(root.lookup("a/b/c/1/d").unwrap().as_integer(), Some(2));
    }

    #[test]
    fn integer_range_is_checked() {
        let err = parse_err("big = 2147483648\n");
        assert!(err.to_string().contains("out of range"));
        let ok = parse("edge = -2147483648\n").unwrap();
        assert_eq!(ok.lookup("edge").unwrap().as_integer(), Some(i32::MIN));
    }

    #[test]
    fn double_overflow_is_checked() {
        let err = parse_err("big = 1.0e400\n");
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert!(parse_err("x = 12ab\n")
            .to_string()
            .contains("Failed to parse integer value '12ab'"));
        assert!(parse_err("x = 1.2.3\n")
            .to_string()
            .contains("Failed to parse double value '1.2.3'"));
        assert!(parse_err("x = turnip\n")
            .to_string()
            .contains("Failed to parse boolean value 'turnip'"));
    }

    #[test]
    fn name_errors() {
        assert!(parse_err("9lives = 1\n")
            .to_string()
            .contains("Invalid item name: 9lives"));
        assert!(parse_err("a 1\n")
            .to_string()
            .contains("Expected '=' after item name a but got 1"));
    }

    #[test]
    fn unexpected_type_character() {
        let err = parse_err("x = ?\n");
        assert!(err
            .to_string()
            .contains("Unexpected ? when parsing item type"));
    }

    #[test]
    fn stray_closer_at_root() {
        let err = parse_err("}\n");
        assert_eq!(err.line(), Some(1));
        assert!(err.to_string().contains("Unexpected container end symbol"));
    }

    #[test]
    fn unexpected_eof_inside_container() {
        let err = parse_err("a = {\n\tb = 1\n");
        assert!(err.to_string().contains("Unexpected EOF"));
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn unclosed_multiline_comment() {
        let err = parse_err("/* never closed\nx = 1\n");
        assert!(err.to_string().contains("Unclosed MultiLineC comment"));
    }

    #[test]
    fn error_lines_follow_consumed_newlines() {
        let err = parse_err("a = 1\nb = 2\nc = ?\n");
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn multiline_comment_spans_count_lines() {
        let err = parse_err("/* one\ntwo\nthree */\nx = ?\n");
        assert_eq!(err.line(), Some(4));
    }

    #[test]
    fn line_scan_promotes_integer_to_double() {
        // A '.' later on the same physical line flips the inference for the
        // current token too, so the 2 here parses as a double.
        let parsed = parse("l = [ 2 1.5 ]\n").unwrap();
        assert_eq!(parsed.lookup("l/0").unwrap().as_double(), Some(2.0));
        assert_eq!(parsed.lookup("l/1").unwrap().as_double(), Some(1.5));

        // On its own line the same token stays an integer.
        let parsed = parse("l = [\n\t2\n\t1.5\n]\n").unwrap();
        assert_eq!(parsed.lookup("l/0").unwrap().as_integer(), Some(2));
        assert_eq!(parsed.lookup("l/1").unwrap().as_double(), Some(1.5));
    }

    #[test]
    fn collision_under_reject_is_a_parse_error() {
        let err = parse_err("x = 1\nx = 2\n");
        assert!(matches!(err, Error::Parse { .. }));
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn keep_and_overwrite_policies_apply_while_parsing() {
        let mut root = Container::group();
        Parser::new("x = 1\nx = 2\n", OnDuplicate::Keep)
            .parse_into(&mut root)
            .unwrap();
        assert_eq!(root.lookup("x").unwrap().as_integer(), Some(1));

        let mut root = Container::group();
        Parser::new("x = 1\nx = 2\n", OnDuplicate::Overwrite)
            .parse_into(&mut root)
            .unwrap();
        assert_eq!(root.lookup("x").unwrap().as_integer(), Some(2));
        assert_eq!(root.size(), 1);
    }

    #[test]
    fn comments_are_kept_in_order() {
        let root = parse("# first\nx = 1\n// second\n/* third */\n").unwrap();
        assert_eq!(root.size(), 4);
        assert_eq!(
            root.get(0).unwrap().as_comment().unwrap().text(),
            " first"
        );
        assert_eq!(root.get(1).unwrap().name(), Some("x"));
        assert_eq!(
            root.get(2).unwrap().as_comment().unwrap().flavor(),
            CommentFlavor::SingleLineC
        );
        assert_eq!(
            root.get(3).unwrap().as_comment().unwrap().text(),
            " third "
        );
    }

    #[test]
    fn comment_only_input() {
        let root = parse("# nothing else\n").unwrap();
        assert_eq!(root.size(), 1);
    }

    #[test]
    fn empty_input_is_an_empty_group() {
        let root = parse("").unwrap();
        assert_eq!(root.size(), 0);
    }
}
