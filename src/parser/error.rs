use thiserror::Error;

use crate::token::SourcePosition;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("expected {expected}, found '{found}' at line {}, col {}", .position.line, .position.column)]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        position: SourcePosition,
    },
    #[error("invalid integer literal '{text}' at line {}, col {}", .position.line, .position.column)]
    InvalidInteger { text: String, position: SourcePosition },
    #[error("division by zero at line {}, col {}", .position.line, .position.column)]
    DivisionByZero { position: SourcePosition },
    #[error("integer overflow in '{op}' at line {}, col {}", .position.line, .position.column)]
    Overflow { op: String, position: SourcePosition },
    #[error("expression nested too deeply at line {}, col {}", .position.line, .position.column)]
    TooDeep { position: SourcePosition },
}

impl EvalError {
    pub fn position(&self) -> SourcePosition {
        match self {
            EvalError::UnexpectedToken { position, .. }
            | EvalError::InvalidInteger { position, .. }
            | EvalError::DivisionByZero { position }
            | EvalError::TooDeep { position }
            | EvalError::Overflow { position, .. } => *position,
        }
    }
}
