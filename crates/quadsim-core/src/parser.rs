//! Text protocol parsing.
//!
//! A raw command line is whitespace-delimited: the first token names the
//! command, the rest are its arguments. Numeric validation is not the
//! parser's job; argument tokens stay as text until the operation applies.

use thiserror::Error;

use crate::command::{lookup, Operation};

/// A resolved command ready for the queue. Consumed exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCommand {
    pub operation: Operation,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Invalid Command")]
    UnknownCommand { name: String },
    #[error("'{name}' expects {expected} argument(s), got {got}")]
    ArgumentCountMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
}

/// Parse one raw protocol line into an executable command.
///
/// Extra trailing tokens beyond the required count are ignored on
/// purpose: the protocol is permissive, a command with surplus arguments
/// still runs on the first `arg_count` of them.
pub fn parse(raw: &str) -> Result<ParsedCommand, ParseError> {
    let mut tokens = raw.split_ascii_whitespace();
    let name = tokens.next().unwrap_or("");

    let spec = lookup(name).ok_or_else(|| ParseError::UnknownCommand {
        name: name.to_string(),
    })?;

    let args: Vec<String> = tokens.take(spec.arg_count).map(str::to_string).collect();
    if args.len() < spec.arg_count {
        return Err(ParseError::ArgumentCountMismatch {
            name: spec.name.to_string(),
            expected: spec.arg_count,
            got: args.len(),
        });
    }

    Ok(ParsedCommand {
        operation: spec.effect,
        args,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_command() {
        let cmd = parse("up 50").unwrap();
        assert_eq!(cmd.operation, Operation::Up);
        assert_eq!(cmd.args, vec!["50".to_string()]);
    }

    #[test]
    fn test_parse_no_argument_command() {
        let cmd = parse("land").unwrap();
        assert_eq!(cmd.operation, Operation::Land);
        assert!(cmd.args.is_empty());
    }

    #[test]
    fn test_unknown_command() {
        let err = parse("flyaway 10").unwrap_err();
        assert_eq!(err, ParseError::UnknownCommand { name: "flyaway".to_string() });
    }

    #[test]
    fn test_empty_input_is_unknown() {
        assert!(matches!(parse(""), Err(ParseError::UnknownCommand { .. })));
        assert!(matches!(parse("   "), Err(ParseError::UnknownCommand { .. })));
    }

    #[test]
    fn test_too_few_arguments() {
        let err = parse("up").unwrap_err();
        assert_eq!(
            err,
            ParseError::ArgumentCountMismatch {
                name: "up".to_string(),
                expected: 1,
                got: 0,
            }
        );
        let err = parse("go 1 2").unwrap_err();
        assert_eq!(
            err,
            ParseError::ArgumentCountMismatch {
                name: "go".to_string(),
                expected: 4,
                got: 2,
            }
        );
    }

    #[test]
    fn test_extra_tokens_are_ignored() {
        let cmd = parse("speed 10 extra tokens").unwrap();
        assert_eq!(cmd.operation, Operation::SetSpeed);
        assert_eq!(cmd.args, vec!["10".to_string()]);
    }

    #[test]
    fn test_arbitrary_whitespace_between_tokens() {
        let cmd = parse("  go\t1 2   3  40 ").unwrap();
        assert_eq!(cmd.operation, Operation::GoTo);
        assert_eq!(cmd.args, vec!["1", "2", "3", "40"]);
    }

    #[test]
    fn test_case_sensitive_names() {
        assert!(matches!(parse("UP 50"), Err(ParseError::UnknownCommand { .. })));
    }
}
