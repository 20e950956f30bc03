//! Tokenizer
//!
//!     Raw tokenization is done by logos over a private [RawToken] set. A second, tiny pass
//!     turns identifiers into keywords: a keyword only counts at column 0 of a line, and only
//!     as a whole identifier (`log` is a keyword, `logfile` is not).
//!
//!     Matching rules, from the logos definitions below:
//!         - identifiers: `[A-Za-z0-9_/.-]+`, covering names, paths and file names
//!         - numbers: optionally signed integers and decimals; integral decimals normalize to
//!           integers. On an equal-length match a number beats an identifier, but the longer
//!           match always wins (`10x` is an identifier)
//!         - `{ } ; =` and newline
//!         - spaces, tabs, carriage returns and `#` comments are skipped
//!
//!     Lexing never aborts. A character no rule accepts is reported as a
//!     [Diagnostic::IllegalCharacter], skipped, and scanning resumes after it.

use crate::conf::ast::{CommandKind, Number};
use crate::conf::error::{ConfError, Diagnostic};
use crate::conf::token::{Location, Token, TokenLocation};
use logos::Logos;
use std::fs;
use std::path::Path;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\f]+")]
#[logos(skip r"#[^\n]*")]
enum RawToken {
    #[regex(r"-?([0-9]+\.[0-9]*|[0-9]*\.[0-9]+|[0-9]+)", |lex| Number::parse(lex.slice()), priority = 3)]
    Number(Number),

    #[regex(r"[A-Za-z0-9_/.\-]+", |lex| lex.slice().to_owned(), priority = 1)]
    Ident(String),

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semi,
    #[token("=")]
    Equals,
    #[token("\n")]
    Newline,
}

/// Output of [tokenize]: the token stream plus whatever was skipped on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lexed {
    pub tokens: Vec<TokenLocation>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Lexed {
    /// Tokens without their locations.
    pub fn tokens(&self) -> Vec<Token> {
        self.tokens.iter().map(|(token, _)| token.clone()).collect()
    }
}

/// Tokenize a whole script.
pub fn tokenize(source: &str) -> Lexed {
    let mut lexer = RawToken::lexer(source);
    let mut lexed = Lexed::default();
    let mut line = 1;

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let raw = match result {
            Ok(raw) => raw,
            Err(()) => {
                let character = lexer.slice().chars().next().unwrap_or('\u{fffd}');
                log::warn!("Illegal character '{}' on line {}", character, line);
                lexed
                    .diagnostics
                    .push(Diagnostic::IllegalCharacter { character, line });
                continue;
            }
        };

        let at_line_start = span.start == 0 || source.as_bytes()[span.start - 1] == b'\n';
        let token = match raw {
            RawToken::Ident(text) => match CommandKind::from_keyword(&text) {
                Some(kind) if at_line_start => Token::Keyword(kind),
                _ => Token::Ident(text),
            },
            RawToken::Number(number) => Token::Number(number),
            RawToken::LBrace => Token::LBrace,
            RawToken::RBrace => Token::RBrace,
            RawToken::Semi => Token::Semi,
            RawToken::Equals => Token::Equals,
            RawToken::Newline => Token::Newline,
        };

        let is_newline = token.is_newline();
        lexed.tokens.push((token, Location::new(line, span)));
        if is_newline {
            line += 1;
        }
    }

    lexed
}

/// Read and tokenize a script file.
pub fn tokenize_file(path: impl AsRef<Path>) -> Result<Lexed, ConfError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|e| ConfError::io(path, e))?;
    Ok(tokenize(&source))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).tokens()
    }

    #[test]
    fn test_simple_command() {
        assert_eq!(
            kinds("timestep 0.01\n"),
            vec![
                Token::Keyword(CommandKind::Timestep),
                Token::Number(Number::Float(0.01)),
                Token::Newline
            ]
        );
    }

    #[test]
    fn test_integral_numbers_normalize() {
        assert_eq!(
            kinds("run 100.0\n"),
            vec![
                Token::Keyword(CommandKind::Run),
                Token::Number(Number::Int(100)),
                Token::Newline
            ]
        );
    }

    #[test]
    fn test_option_block() {
        assert_eq!(
            kinds("pair_potential vp {k=1.0;gamma=0.5;lambda=-1.57}"),
            vec![
                Token::Keyword(CommandKind::PairPotential),
                Token::Ident("vp".into()),
                Token::LBrace,
                Token::Ident("k".into()),
                Token::Equals,
                Token::Number(Number::Int(1)),
                Token::Semi,
                Token::Ident("gamma".into()),
                Token::Equals,
                Token::Number(Number::Float(0.5)),
                Token::Semi,
                Token::Ident("lambda".into()),
                Token::Equals,
                Token::Number(Number::Float(-1.57)),
                Token::RBrace,
            ]
        );
    }

    #[test]
    fn test_keywords_only_at_line_start() {
        assert_eq!(
            kinds("dump run {type=full}\n"),
            vec![
                Token::Keyword(CommandKind::Dump),
                Token::Ident("run".into()),
                Token::LBrace,
                Token::Ident("type".into()),
                Token::Equals,
                Token::Ident("full".into()),
                Token::RBrace,
                Token::Newline,
            ]
        );
        // Indented keywords are plain identifiers
        assert_eq!(kinds("  run 5")[0], Token::Ident("run".into()));
        // Keywords are whole identifiers
        assert_eq!(kinds("logfile")[0], Token::Ident("logfile".into()));
    }

    #[test]
    fn test_identifiers_with_paths() {
        assert_eq!(
            kinds("input data/cells_01.dat\n")[1],
            Token::Ident("data/cells_01.dat".into())
        );
        assert_eq!(kinds("x 10x")[1], Token::Ident("10x".into()));
        assert_eq!(kinds("x -")[1], Token::Ident("-".into()));
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let lexed = tokenize("# header\n\nrun 5 # trailing\n");
        assert_eq!(
            lexed.tokens(),
            vec![
                Token::Newline,
                Token::Newline,
                Token::Keyword(CommandKind::Run),
                Token::Number(Number::Int(5)),
                Token::Newline,
            ]
        );
        assert!(lexed.diagnostics.is_empty());
    }

    #[test]
    fn test_line_numbers() {
        let lexed = tokenize("messages m.msg\n\nrun 5\n");
        let run = &lexed.tokens[4];
        assert_eq!(run.0, Token::Keyword(CommandKind::Run));
        assert_eq!(run.1.line, 3);
        assert_eq!(run.1.span, 16..19);
    }

    #[test]
    fn test_illegal_character_is_skipped() {
        let lexed = tokenize("run @5\nrun 6\n");
        assert_eq!(
            lexed.diagnostics,
            vec![Diagnostic::IllegalCharacter {
                character: '@',
                line: 1
            }]
        );
        assert_eq!(
            lexed.tokens(),
            vec![
                Token::Keyword(CommandKind::Run),
                Token::Number(Number::Int(5)),
                Token::Newline,
                Token::Keyword(CommandKind::Run),
                Token::Number(Number::Int(6)),
                Token::Newline,
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize(""), Lexed::default());
    }
}
