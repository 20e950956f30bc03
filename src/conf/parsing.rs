//! Parser
//!
//!     Token stream to [Config], all or nothing. The grammar lives in [combinators]; this
//!     module owns the [ScriptParser] value built from it and the translation of chumsky's
//!     errors into [Diagnostic]s.
//!
//!     A script that fails to parse yields an empty Config. The reasons travel alongside it in
//!     [Parsed::diagnostics], together with any lexical diagnostics, which never fail a parse
//!     on their own: an illegal character is skipped and the remaining tokens are parsed.
//!
//!     Every statement is newline-terminated, including the last one.

pub mod combinators;

use crate::conf::ast::Config;
use crate::conf::error::{ConfError, Diagnostic};
use crate::conf::lexing::tokenize;
use crate::conf::token::{Token, TokenLocation};
use chumsky::error::SimpleReason;
use chumsky::{BoxedParser, Parser};
use combinators::ParserError;
use std::fmt;
use std::fs;
use std::path::Path;

/// Result of a parse: the Config (empty on failure) and everything reported along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub config: Config,
    pub diagnostics: Vec<Diagnostic>,
}

impl Parsed {
    /// True unless the grammar rejected the script.
    pub fn is_ok(&self) -> bool {
        self.diagnostics.iter().all(Diagnostic::is_lexical)
    }

    /// Turn a rejected script into [ConfError::Syntax]; lexical findings alone are tolerated.
    pub fn into_result(self) -> Result<Config, ConfError> {
        if self.is_ok() {
            Ok(self.config)
        } else {
            let syntax = self
                .diagnostics
                .into_iter()
                .filter(|d| !d.is_lexical())
                .collect();
            Err(ConfError::Syntax(syntax))
        }
    }
}

/// Reusable script parser.
#[derive(Clone)]
pub struct ScriptParser {
    grammar: BoxedParser<'static, TokenLocation, Config, ParserError>,
}

impl ScriptParser {
    pub fn new() -> Self {
        Self {
            grammar: combinators::program().boxed(),
        }
    }

    pub fn parse(&self, source: &str) -> Parsed {
        let lexed = tokenize(source);
        let mut diagnostics = lexed.diagnostics;

        match self.grammar.parse(lexed.tokens.clone()) {
            Ok(config) => {
                log::debug!(
                    "Parsed {} commands from {} tokens",
                    config.len(),
                    lexed.tokens.len()
                );
                Parsed {
                    config,
                    diagnostics,
                }
            }
            Err(errors) => {
                for error in &errors {
                    let diagnostic = to_diagnostic(error, &lexed.tokens);
                    log::error!("{}", diagnostic);
                    diagnostics.push(diagnostic);
                }
                Parsed {
                    config: Config::empty(),
                    diagnostics,
                }
            }
        }
    }

    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Parsed, ConfError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| ConfError::io(path, e))?;
        log::debug!("Parsing {}", path.display());
        Ok(self.parse(&source))
    }
}

impl Default for ScriptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ScriptParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptParser").finish_non_exhaustive()
    }
}

/// Parse script text with a fresh parser. Failures give an empty Config.
pub fn parse(source: &str) -> Config {
    ScriptParser::new().parse(source).config
}

/// Read and parse a script file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Parsed, ConfError> {
    ScriptParser::new().parse_file(path)
}

/// Spans of a token-vector parse are token indices.
fn to_diagnostic(error: &ParserError, tokens: &[TokenLocation]) -> Diagnostic {
    if let SimpleReason::Custom(message) = error.reason() {
        let line = tokens
            .get(error.span().start)
            .or_else(|| tokens.last())
            .map(|(_, location)| location.line)
            .unwrap_or(1);
        return Diagnostic::InvalidCommand {
            line,
            message: message.clone(),
        };
    }

    match error.found() {
        Some((token, location)) => Diagnostic::UnexpectedToken {
            found: describe(token),
            line: location.line,
        },
        None => Diagnostic::UnexpectedEnd,
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Newline => "newline".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conf::ast::{Command, CommandKind, Number, OptionSet, Value};

    #[test]
    fn test_parse_timestep() {
        let config = parse("timestep 0.01\n");
        assert_eq!(config.commands(), &[Command::Timestep(Number::Float(0.01))]);
    }

    #[test]
    fn test_parse_normalizes_integral_option() {
        let config = parse("pair_potential vp {k=1.0;gamma=0.5}\n");
        let potentials = config.pair_potentials();
        assert_eq!(
            potentials["vp"],
            OptionSet::new().with("k", 1).with("gamma", 0.5)
        );
    }

    #[test]
    fn test_parse_full_script() {
        let source = "\
# cell monolayer
messages messages.msg
input cells.dat
box fixed {lx=100;ly=100;lz=10}

nlist {rcut=2.4;pad=0.5;build_contacts}
pair_potential vp {K=1.0;gamma=1.0;lambda=-5.0}
integrator brownian {dt=0.001;seed=17;nu=0.002}
run 10000
";
        let parsed = ScriptParser::new().parse(source);
        assert!(parsed.is_ok());
        assert!(parsed.diagnostics.is_empty());
        let kinds: Vec<CommandKind> = parsed.config.iter().map(Command::kind).collect();
        assert_eq!(
            kinds,
            vec![
                CommandKind::Messages,
                CommandKind::Input,
                CommandKind::Box,
                CommandKind::Nlist,
                CommandKind::PairPotential,
                CommandKind::Integrator,
                CommandKind::Run,
            ]
        );
        assert_eq!(
            parsed.config.get(3).and_then(Command::options).and_then(|o| o.get("build_contacts")),
            Some(&Value::Flag)
        );
    }

    #[test]
    fn test_syntax_error_empties_config() {
        let parsed = ScriptParser::new().parse("run 10\nrun {a=1}\nrun 20\n");
        assert!(parsed.config.is_empty());
        assert!(!parsed.is_ok());
        assert!(!parsed.diagnostics.is_empty());
        assert!(parsed.diagnostics.iter().all(|d| !d.is_lexical()));
    }

    #[test]
    fn test_unexpected_token_reports_line() {
        let parsed = ScriptParser::new().parse("run 10\nrun 20 30\n");
        assert_eq!(parsed.diagnostics.len(), 1);
        assert!(matches!(
            parsed.diagnostics[0],
            Diagnostic::UnexpectedToken { line: 2, .. }
        ));
    }

    #[test]
    fn test_broken_option_set_names_the_token() {
        let parsed = ScriptParser::new().parse("run 10\npair_potential vp {k=1;;b=2}\n");
        assert_eq!(
            parsed.diagnostics,
            vec![Diagnostic::UnexpectedToken {
                found: ";".to_string(),
                line: 2,
            }]
        );

        let parsed = ScriptParser::new().parse("dump cells {type=full\n");
        assert_eq!(
            parsed.diagnostics,
            vec![Diagnostic::UnexpectedToken {
                found: "newline".to_string(),
                line: 1,
            }]
        );
    }

    #[test]
    fn test_truncated_option_set_at_end_of_input() {
        let parsed = ScriptParser::new().parse("dump cells {type=full");
        assert!(parsed.config.is_empty());
        assert_eq!(parsed.diagnostics, vec![Diagnostic::UnexpectedEnd]);
    }

    #[test]
    fn test_wrong_argument_kind_names_the_token() {
        let parsed = ScriptParser::new().parse("run fast\n");
        assert_eq!(
            parsed.diagnostics,
            vec![Diagnostic::UnexpectedToken {
                found: "fast".to_string(),
                line: 1,
            }]
        );
    }

    #[test]
    fn test_missing_final_newline_fails() {
        let parsed = ScriptParser::new().parse("run 100");
        assert!(parsed.config.is_empty());
        assert!(!parsed.is_ok());
    }

    #[test]
    fn test_illegal_character_does_not_fail_parse() {
        let parsed = ScriptParser::new().parse("run 100 $\n");
        assert!(parsed.is_ok());
        assert_eq!(parsed.config.runs(), vec![Number::Int(100)]);
        assert_eq!(parsed.diagnostics.len(), 1);
        assert!(parsed.diagnostics[0].is_lexical());
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(parse("").is_empty());
        let parsed = ScriptParser::new().parse("\n# only a comment\n\n");
        assert!(parsed.is_ok());
        assert!(parsed.config.is_empty());
    }

    #[test]
    fn test_parser_is_reusable() {
        let parser = ScriptParser::new();
        let first = parser.parse("run 1\n");
        let failed = parser.parse("run\n");
        let second = parser.parse("run 1\n");
        assert!(!failed.is_ok());
        assert_eq!(first, second);
    }

    #[test]
    fn test_into_result() {
        let err = ScriptParser::new()
            .parse("input {a=1}\n")
            .into_result()
            .unwrap_err();
        assert!(matches!(err, ConfError::Syntax(ref d) if !d.is_empty()));
        assert!(ScriptParser::new().parse("run 1\n").into_result().is_ok());
    }
}
