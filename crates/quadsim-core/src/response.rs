//! Response codes sent back over the transport.

use serde::{Deserialize, Serialize};

use crate::command::ValidationError;
use crate::parser::ParseError;

/// Exactly one of these goes back to the client per received command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Response {
    Ok,
    Error(String),
}

impl Response {
    /// The wire token: `"ok"` or a short error message.
    pub fn wire(&self) -> &str {
        match self {
            Response::Ok => "ok",
            Response::Error(msg) if msg.is_empty() => "error",
            Response::Error(msg) => msg,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Response::Ok)
    }
}

impl From<ParseError> for Response {
    fn from(err: ParseError) -> Self {
        Response::Error(err.to_string())
    }
}

impl From<ValidationError> for Response {
    fn from(err: ValidationError) -> Self {
        Response::Error(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_tokens() {
        assert_eq!(Response::Ok.wire(), "ok");
        assert_eq!(Response::Error(String::new()).wire(), "error");
        assert_eq!(Response::Error("Invalid Command".into()).wire(), "Invalid Command");
    }

    #[test]
    fn test_parse_error_becomes_invalid_command() {
        let err = ParseError::UnknownCommand { name: "flyaway".into() };
        assert_eq!(Response::from(err).wire(), "Invalid Command");
    }

    #[test]
    fn test_validation_error_carries_range_message() {
        let err = ValidationError::OutOfRange {
            command: "up",
            param: "Distance",
            value: 10.0,
            min: 20.0,
            max: 500.0,
        };
        let resp = Response::from(err);
        assert_eq!(resp.wire(), "Distance parameter for 'up' must be between 20 and 500.");
    }
}
