//! Line tokenizer
//!
//! A protocol line is split on `|` once. Fields after the message kind are
//! classified as positional arguments or bracketed tags (`[from] item: Leftovers`,
//! `[silent]`), and the extractors branch on that token list instead of
//! re-scanning the raw text.

use crate::ParseError;

/// One field after the message kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A plain positional field
    Arg(&'a str),
    /// A bracketed field: `[of] p1a: Pikachu` is `name = "of", value = "p1a: Pikachu"`
    Tag { name: &'a str, value: &'a str },
}

impl<'a> Token<'a> {
    pub fn parse(field: &'a str) -> Self {
        let trimmed = field.trim();
        if let Some(inner) = trimmed.strip_prefix('[') {
            if let Some((name, value)) = inner.split_once(']') {
                if !name.is_empty() {
                    return Token::Tag {
                        name,
                        value: value.trim(),
                    };
                }
            }
        }

        Token::Arg(field)
    }

    pub fn is_tag(&self, tag: &str) -> bool {
        matches!(self, Token::Tag { name, .. } if *name == tag)
    }

    pub fn as_arg(&self) -> Option<&'a str> {
        match self {
            Token::Arg(s) => Some(s),
            Token::Tag { .. } => None,
        }
    }
}

/// A protocol line split into its kind and tokenized fields
#[derive(Debug, Clone)]
pub struct Line<'a> {
    pub raw: &'a str,
    /// The message kind tag (`switch`, `-damage`, ...), absent when the line has no `|`
    pub kind: Option<&'a str>,
    fields: Vec<&'a str>,
    tokens: Vec<Token<'a>>,
    args: Vec<&'a str>,
}

impl<'a> Line<'a> {
    pub fn new(raw: &'a str) -> Self {
        let mut parts = raw.split('|');
        // Anything before the first `|` is not part of the message
        parts.next();

        let kind = parts.next();
        let fields: Vec<&str> = parts.collect();
        let tokens: Vec<Token> = fields.iter().copied().map(Token::parse).collect();
        let args = tokens.iter().filter_map(Token::as_arg).collect();

        Line {
            raw,
            kind,
            fields,
            tokens,
            args,
        }
    }

    /// Raw field by index (0 is the first field after the kind)
    pub fn field(&self, index: usize) -> Option<&'a str> {
        self.fields.get(index).copied()
    }

    pub fn fields(&self) -> &[&'a str] {
        &self.fields
    }

    pub fn tokens(&self) -> &[Token<'a>] {
        &self.tokens
    }

    /// Positional (non-bracketed) field by index
    pub fn arg(&self, index: usize) -> Option<&'a str> {
        self.args.get(index).copied()
    }

    /// Positional field by index, treating an empty field as absent
    pub fn opt_arg(&self, index: usize) -> Option<&'a str> {
        self.arg(index).map(str::trim).filter(|s| !s.is_empty())
    }

    /// Positional field that must be present and non-empty
    pub fn require(&self, index: usize, name: &str) -> Result<&'a str, ParseError> {
        self.opt_arg(index)
            .ok_or_else(|| ParseError::MissingField(name.to_string()))
    }

    pub fn args(&self) -> &[&'a str] {
        &self.args
    }

    /// Every raw field from `index` on, rejoined with `|`
    pub fn rest(&self, index: usize) -> String {
        self.fields.get(index..).map(|f| f.join("|")).unwrap_or_default()
    }

    /// Value of the first `[name]` tag
    pub fn tag(&self, name: &str) -> Option<&'a str> {
        self.tokens.iter().find_map(|t| match t {
            Token::Tag { name: n, value } if *n == name => Some(*value),
            _ => None,
        })
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tokens.iter().any(|t| t.is_tag(name))
    }

    /// Index in [`Line::tokens`] of the `index`th positional field
    pub fn arg_position(&self, index: usize) -> Option<usize> {
        self.tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.as_arg().is_some())
            .nth(index)
            .map(|(i, _)| i)
    }
}

/// Returns true when the token has no upper-case letters (`confusion`, `perish3`, `tox`)
pub fn is_lowercase(s: &str) -> bool {
    !s.chars().any(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_kind_and_fields() {
        let line = Line::new("|-damage|p2a: Leavanny|180/281 tox|[from] psn");
        assert_eq!(line.kind, Some("-damage"));
        assert_eq!(line.fields(), &["p2a: Leavanny", "180/281 tox", "[from] psn"]);
        assert_eq!(line.args(), &["p2a: Leavanny", "180/281 tox"]);
        assert_eq!(line.tag("from"), Some("psn"));
        assert_eq!(line.tag("of"), None);
    }

    #[test]
    fn test_tags() {
        let line = Line::new("|-start|p1a: Gengar|Substitute|[silent]|[from]ability: Trace");
        assert!(line.has_tag("silent"));
        assert_eq!(line.tag("silent"), Some(""));
        assert_eq!(line.tag("from"), Some("ability: Trace"));
        assert_eq!(line.args(), &["p1a: Gengar", "Substitute"]);
    }

    #[test]
    fn test_unclosed_bracket_is_arg() {
        let line = Line::new("|-message|[not a tag");
        assert_eq!(line.arg(0), Some("[not a tag"));
        assert_eq!(Token::parse("[]"), Token::Arg("[]"));
    }

    #[test]
    fn test_no_pipe() {
        let line = Line::new("hello world");
        assert_eq!(line.kind, None);
        assert!(line.fields().is_empty());
    }

    #[test]
    fn test_rest() {
        let line = Line::new("|raw|<b>a|b</b>");
        assert_eq!(line.rest(0), "<b>a|b</b>");
        assert_eq!(line.rest(5), "");
    }

    #[test]
    fn test_require_and_opt_arg() {
        let line = Line::new("|move|p1a: Scizor|Bullet Punch|");
        assert_eq!(line.require(1, "move").unwrap(), "Bullet Punch");
        assert_eq!(line.opt_arg(2), None);
        assert!(line.require(2, "target").is_err());
    }

    #[test]
    fn test_arg_position() {
        let line = Line::new("|-activate|p1a: X|[silent]|move: Protect|[of] p2a: Y");
        assert_eq!(line.arg_position(0), Some(0));
        assert_eq!(line.arg_position(1), Some(2));
        assert_eq!(line.arg_position(2), None);
    }

    #[test]
    fn test_is_lowercase() {
        assert!(is_lowercase("confusion"));
        assert!(is_lowercase("perish3"));
        assert!(!is_lowercase("Substitute"));
        assert!(!is_lowercase("move: Yawn"));
    }
}
