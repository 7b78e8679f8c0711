//! Relaxed JSON normalization
//!
//! The product file is hand-edited, so it is read leniently: unquoted keys and
//! values, single-quoted strings, `//` and `/* */` comments and trailing commas
//! are accepted. [`normalize`] rewrites such a document into strict JSON that
//! `serde_json` can decode. Newlines are preserved so decoder error positions
//! still point at the right line of the original file.

use std::fmt;

/// Syntax error found while normalizing a relaxed document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LenientError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl fmt::Display for LenientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {} column {}",
            self.message, self.line, self.column
        )
    }
}

impl std::error::Error for LenientError {}

/// Rewrite a relaxed JSON document into strict JSON
pub fn normalize(input: &str) -> Result<String, LenientError> {
    Normalizer::new(input).run()
}

struct Normalizer {
    chars: Vec<char>,
    pos: usize,
    out: String,
    /// A comma that is only emitted if another value follows it
    pending_comma: bool,
    /// Whitespace seen after a pending comma
    pending_ws: String,
}

impl Normalizer {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            out: String::with_capacity(input.len()),
            pending_comma: false,
            pending_ws: String::new(),
        }
    }

    fn run(mut self) -> Result<String, LenientError> {
        while let Some(c) = self.peek(0) {
            match c {
                c if c.is_whitespace() => {
                    self.push_ws(c);
                    self.pos += 1;
                }
                '/' if self.peek(1) == Some('/') => self.skip_line_comment(),
                '/' if self.peek(1) == Some('*') => self.skip_block_comment()?,
                ',' => {
                    if self.pending_comma {
                        return Err(self.error_at(self.pos, "unexpected `,`"));
                    }
                    self.pending_comma = true;
                    self.pos += 1;
                }
                '}' | ']' => {
                    // trailing comma before a closing bracket is dropped
                    self.pending_comma = false;
                    self.out.push_str(&self.pending_ws);
                    self.pending_ws.clear();
                    self.out.push(c);
                    self.pos += 1;
                }
                '{' | '[' | ':' => {
                    self.flush_comma();
                    self.out.push(c);
                    self.pos += 1;
                }
                '"' | '\'' => {
                    self.flush_comma();
                    self.read_string(c)?;
                }
                _ => {
                    self.flush_comma();
                    self.read_bare_token();
                }
            }
        }

        self.flush_comma();
        Ok(self.out)
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn push_ws(&mut self, c: char) {
        if self.pending_comma {
            self.pending_ws.push(c);
        } else {
            self.out.push(c);
        }
    }

    fn flush_comma(&mut self) {
        if self.pending_comma {
            self.out.push(',');
            self.out.push_str(&self.pending_ws);
            self.pending_ws.clear();
            self.pending_comma = false;
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek(0) {
            if c == '\n' {
                break;
            }
            self.pos += 1;
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), LenientError> {
        let start = self.pos;
        self.pos += 2;
        loop {
            match self.peek(0) {
                None => return Err(self.error_at(start, "unterminated block comment")),
                Some('*') if self.peek(1) == Some('/') => {
                    self.pos += 2;
                    return Ok(());
                }
                Some('\n') => {
                    self.push_ws('\n');
                    self.pos += 1;
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn read_string(&mut self, quote: char) -> Result<(), LenientError> {
        let start = self.pos;
        self.pos += 1;
        self.out.push('"');
        loop {
            let Some(c) = self.peek(0) else {
                return Err(self.error_at(start, "unterminated string"));
            };
            self.pos += 1;
            match c {
                '\\' => {
                    let Some(escaped) = self.peek(0) else {
                        return Err(self.error_at(start, "unterminated string"));
                    };
                    self.pos += 1;
                    if escaped == '\'' {
                        self.out.push('\'');
                    } else {
                        self.out.push('\\');
                        self.out.push(escaped);
                    }
                }
                '"' if quote == '\'' => self.out.push_str("\\\""),
                c if c == quote => {
                    self.out.push('"');
                    return Ok(());
                }
                '\n' => return Err(self.error_at(start, "newline in string")),
                c => self.out.push(c),
            }
        }
    }

    fn read_bare_token(&mut self) {
        let start = self.pos;
        while let Some(c) = self.peek(0) {
            let comment = c == '/' && matches!(self.peek(1), Some('/') | Some('*'));
            if c.is_whitespace() || is_delimiter(c) || comment {
                break;
            }
            self.pos += 1;
        }
        let token: String = self.chars[start..self.pos].iter().collect();

        if is_json_literal(&token) {
            self.out.push_str(&token);
        } else {
            self.out.push('"');
            for c in token.chars() {
                match c {
                    '"' => self.out.push_str("\\\""),
                    '\\' => self.out.push_str("\\\\"),
                    c => self.out.push(c),
                }
            }
            self.out.push('"');
        }
    }

    fn error_at(&self, pos: usize, message: &str) -> LenientError {
        let mut line = 1;
        let mut column = 1;
        for &c in &self.chars[..pos.min(self.chars.len())] {
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        LenientError {
            line,
            column,
            message: message.to_string(),
        }
    }
}

fn is_delimiter(c: char) -> bool {
    matches!(c, '{' | '}' | '[' | ']' | ':' | ',' | '"' | '\'')
}

fn is_json_literal(token: &str) -> bool {
    matches!(token, "true" | "false" | "null")
        || serde_json::from_str::<serde_json::Number>(token).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn parse(input: &str) -> Value {
        serde_json::from_str(&normalize(input).unwrap()).unwrap()
    }

    #[test]
    fn strict_json_passes_through() {
        let input = r#"{"products": {"A": {"modules": ["m1"], "class": "Foo"}}}"#;
        assert_eq!(normalize(input).unwrap(), input);
    }

    #[test]
    fn unquoted_keys_and_values() {
        let value = parse("{products: {idea: {modules: [intellij.platform.main], class: com.intellij.Idea}}}");
        assert_eq!(
            value,
            json!({"products": {"idea": {"modules": ["intellij.platform.main"], "class": "com.intellij.Idea"}}})
        );
    }

    #[test]
    fn literals_stay_unquoted() {
        let value = parse("[true, false, null, 12, -3.5e2, truthy]");
        assert_eq!(value, json!([true, false, null, 12, -350.0, "truthy"]));
    }

    #[test]
    fn comments_and_trailing_commas() {
        let input = r#"
            // product list
            {
              "products": {
                /* community */
                "idea": {"modules": ["a", "b",], "class": "Idea",},
              },
            }
        "#;
        let value = parse(input);
        assert_eq!(
            value,
            json!({"products": {"idea": {"modules": ["a", "b"], "class": "Idea"}}})
        );
    }

    #[test]
    fn single_quoted_strings() {
        let value = parse(r#"{'class': 'say "hi" it\'s'}"#);
        assert_eq!(value, json!({"class": "say \"hi\" it's"}));
    }

    #[test]
    fn line_numbers_survive_block_comments() {
        let out = normalize("/* a\nb\n*/{}").unwrap();
        assert_eq!(out.matches('\n').count(), 2);
    }

    #[test]
    fn unterminated_string_reports_position() {
        let err = normalize("{\n  \"class\": \"Foo\n}").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 12);
        assert!(err.to_string().contains("newline in string"));
    }

    #[test]
    fn double_comma_is_rejected() {
        let err = normalize("[1,,2]").unwrap_err();
        assert!(err.message.contains("unexpected `,`"));
    }

    #[test]
    fn unterminated_block_comment() {
        assert!(normalize("{} /* never closed").is_err());
    }
}
