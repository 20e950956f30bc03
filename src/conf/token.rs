//! Tokens
//!
//!     The token set is small: one keyword token per command kind, identifiers, numbers, the
//!     four punctuation characters `{ } ; =`, and newline. Newline is a real token because it
//!     terminates statements.
//!
//!     Tokens travel paired with a [Location] (1-based line plus byte range), which is what
//!     the diagnostics report.

use crate::conf::ast::{CommandKind, Number};
use serde::Serialize;
use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Token {
    /// A command keyword at the start of a line.
    Keyword(CommandKind),
    Ident(String),
    Number(Number),
    LBrace,
    RBrace,
    Semi,
    Equals,
    Newline,
}

/// Where a token came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    pub line: usize,
    pub span: Range<usize>,
}

impl Location {
    pub fn new(line: usize, span: Range<usize>) -> Self {
        Self { line, span }
    }
}

/// Token paired with its location.
pub type TokenLocation = (Token, Location);

impl Token {
    pub fn is_newline(&self) -> bool {
        matches!(self, Token::Newline)
    }

    /// Short name of the token kind, for listings.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Keyword(_) => "KEYWORD",
            Token::Ident(_) => "ID",
            Token::Number(_) => "NUMBER",
            Token::LBrace => "LBRACE",
            Token::RBrace => "RBRACE",
            Token::Semi => "SEMI",
            Token::Equals => "EQUALS",
            Token::Newline => "NEWLINE",
        }
    }
}

/// Source text of the token.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Keyword(kind) => f.write_str(kind.keyword()),
            Token::Ident(text) => f.write_str(text),
            Token::Number(number) => write!(f, "{}", number),
            Token::LBrace => f.write_str("{"),
            Token::RBrace => f.write_str("}"),
            Token::Semi => f.write_str(";"),
            Token::Equals => f.write_str("="),
            Token::Newline => f.write_str("\n"),
        }
    }
}

/// Render a token stream back to script text.
///
/// Whitespace is not tokenized, so a single space goes between a line's leading keyword and
/// argument-level tokens; punctuation is written tight. The output re-tokenizes to the same
/// stream.
pub fn detokenize(tokens: &[Token]) -> String {
    let mut result = String::new();
    let mut previous: Option<&Token> = None;

    for token in tokens {
        let needs_space = matches!(
            (previous, token),
            (
                Some(Token::Keyword(_) | Token::Ident(_) | Token::Number(_)),
                Token::Ident(_) | Token::Number(_) | Token::LBrace
            )
        );
        if needs_space {
            result.push(' ');
        }
        result.push_str(&token.to_string());
        previous = Some(token);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_display() {
        assert_eq!(Token::Keyword(CommandKind::PairParam).to_string(), "pair_param");
        assert_eq!(Token::Number(Number::Int(100)).to_string(), "100");
        assert_eq!(Token::Newline.to_string(), "\n");
    }

    #[test]
    fn test_detokenize() {
        let tokens = vec![
            Token::Keyword(CommandKind::PairPotential),
            Token::Ident("vp".into()),
            Token::LBrace,
            Token::Ident("k".into()),
            Token::Equals,
            Token::Number(Number::Int(1)),
            Token::Semi,
            Token::Ident("flag".into()),
            Token::RBrace,
            Token::Newline,
            Token::Keyword(CommandKind::Run),
            Token::Number(Number::Int(10)),
            Token::Newline,
        ];
        assert_eq!(
            detokenize(&tokens),
            "pair_potential vp {k=1;flag}\nrun 10\n"
        );
    }

    #[test]
    fn test_serialize_token() {
        assert_eq!(
            serde_json::to_string(&Token::Ident("vp".into())).unwrap(),
            r#"{"kind":"ident","value":"vp"}"#
        );
        assert_eq!(
            serde_json::to_string(&Token::Semi).unwrap(),
            r#"{"kind":"semi"}"#
        );
    }
}
