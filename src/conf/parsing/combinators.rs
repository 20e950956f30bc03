//! Parser combinators for the script grammar.
//!
//!     program    := statement* EOF
//!     statement  := command NEWLINE | NEWLINE
//!     command    := TEXT-KEYWORD ID
//!                 | NUMERIC-KEYWORD NUMBER
//!                 | DIRECTIVE-KEYWORD ID option-set
//!                 | OPTIONS-KEYWORD option-set
//!     option-set := "{" expr (";" expr)* ";"? "}"
//!     expr       := ID "=" (ID | NUMBER) | ID
//!
//! The keyword's [Shape] picks the argument form, so a malformed argument is reported at the
//! offending token rather than as a shape mismatch of the whole line.

use chumsky::prelude::*;

use crate::conf::ast::{Arguments, Command, CommandKind, Config, Number, OptionSet, Shape, Value};
use crate::conf::token::{Token, TokenLocation};

/// Type alias for parser error
pub(crate) type ParserError = Simple<TokenLocation>;

/// Helper: match a specific token, ignoring its location
pub(crate) fn token(t: Token) -> impl Parser<TokenLocation, (), Error = ParserError> + Clone {
    filter(move |(tok, _): &TokenLocation| tok == &t).ignored()
}

pub(crate) fn ident() -> impl Parser<TokenLocation, String, Error = ParserError> + Clone {
    filter_map(|span, (tok, location): TokenLocation| match tok {
        Token::Ident(text) => Ok(text),
        other => Err(Simple::expected_input_found(
            span,
            Vec::new(),
            Some((other, location)),
        )),
    })
}

pub(crate) fn number() -> impl Parser<TokenLocation, Number, Error = ParserError> + Clone {
    filter_map(|span, (tok, location): TokenLocation| match tok {
        Token::Number(number) => Ok(number),
        other => Err(Simple::expected_input_found(
            span,
            Vec::new(),
            Some((other, location)),
        )),
    })
}

/// `key=value` or a bare `key` flag
pub(crate) fn expr() -> impl Parser<TokenLocation, (String, Value), Error = ParserError> + Clone {
    let value = ident().map(Value::Str).or(number().map(Value::Number));

    ident()
        .then(token(Token::Equals).ignore_then(value).or_not())
        .map(|(key, value)| (key, value.unwrap_or(Value::Flag)))
}

/// Brace-delimited option-set. Repeated keys fold last-write-wins while the set is built.
pub(crate) fn option_set() -> impl Parser<TokenLocation, OptionSet, Error = ParserError> + Clone {
    expr()
        .separated_by(token(Token::Semi))
        .at_least(1)
        .allow_trailing()
        .delimited_by(token(Token::LBrace), token(Token::RBrace))
        .map(|exprs| exprs.into_iter().collect::<OptionSet>())
}

/// A keyword of the given shape
pub(crate) fn keyword_of(
    shape: Shape,
) -> impl Parser<TokenLocation, CommandKind, Error = ParserError> + Clone {
    filter_map(move |span, (tok, location): TokenLocation| match tok {
        Token::Keyword(kind) if kind.shape() == shape => Ok(kind),
        other => Err(Simple::expected_input_found(
            span,
            Vec::new(),
            Some((other, location)),
        )),
    })
}

pub(crate) fn command() -> impl Parser<TokenLocation, Command, Error = ParserError> + Clone {
    choice((
        keyword_of(Shape::Text).then(ident().map(Arguments::Text)),
        keyword_of(Shape::Numeric).then(number().map(Arguments::Number)),
        keyword_of(Shape::Directive).then(
            ident()
                .then(option_set())
                .map(|(name, options)| Arguments::Directive(name, options)),
        ),
        keyword_of(Shape::OptionsOnly).then(option_set().map(Arguments::Options)),
    ))
    .try_map(|(kind, arguments), span| {
        Command::from_parts(kind, arguments).map_err(|e| Simple::custom(span, e.to_string()))
    })
}

/// A command line yields its command, a blank line yields nothing
pub(crate) fn statement(
) -> impl Parser<TokenLocation, Option<Command>, Error = ParserError> + Clone {
    command()
        .then_ignore(token(Token::Newline))
        .map(Some)
        .or(token(Token::Newline).to(None))
}

pub(crate) fn program() -> impl Parser<TokenLocation, Config, Error = ParserError> + Clone {
    statement()
        .repeated()
        .then_ignore(end())
        .map(|statements| statements.into_iter().flatten().collect::<Config>())
}
