use serde::Serialize;
use thiserror::Error;

use crate::token::SourcePosition;

/// Structured diagnostics reported by the front end.
///
/// Every kind carries a message and the position it refers to. The parser
/// produces `UnexpectedToken` and `Syntax`; the remaining kinds exist for
/// later passes and for tooling that validates inputs before parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    #[error("error at line {}, column {}: {message}", .position.line, .position.column)]
    Parsing {
        message: String,
        position: SourcePosition,
    },
    #[error("unexpected token '{token}' at line {}, column {}: {message}", .position.line, .position.column)]
    UnexpectedToken {
        message: String,
        token: String,
        position: SourcePosition,
    },
    #[error("syntax error at line {}, column {}: {message}", .position.line, .position.column)]
    Syntax {
        message: String,
        position: SourcePosition,
    },
    #[error("semantic error at line {}, column {}: {message}", .position.line, .position.column)]
    Semantic {
        message: String,
        position: SourcePosition,
    },
    #[error("invalid input '{path}' at line {}, column {}: {message}", .position.line, .position.column)]
    IoValidation {
        message: String,
        path: String,
        position: SourcePosition,
    },
}

impl Diagnostic {
    pub fn parsing(message: impl Into<String>, position: SourcePosition) -> Self {
        Diagnostic::Parsing {
            message: message.into(),
            position,
        }
    }

    pub fn unexpected_token(message: impl Into<String>, token: impl Into<String>, position: SourcePosition) -> Self {
        Diagnostic::UnexpectedToken {
            message: message.into(),
            token: token.into(),
            position,
        }
    }

    pub fn syntax(message: impl Into<String>, position: SourcePosition) -> Self {
        Diagnostic::Syntax {
            message: message.into(),
            position,
        }
    }

    pub fn semantic(message: impl Into<String>, position: SourcePosition) -> Self {
        Diagnostic::Semantic {
            message: message.into(),
            position,
        }
    }

    pub fn io_validation(message: impl Into<String>, path: impl Into<String>, position: SourcePosition) -> Self {
        Diagnostic::IoValidation {
            message: message.into(),
            path: path.into(),
            position,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Diagnostic::Parsing { message, .. }
            | Diagnostic::UnexpectedToken { message, .. }
            | Diagnostic::Syntax { message, .. }
            | Diagnostic::Semantic { message, .. }
            | Diagnostic::IoValidation { message, .. } => message,
        }
    }

    pub fn position(&self) -> SourcePosition {
        match self {
            Diagnostic::Parsing { position, .. }
            | Diagnostic::UnexpectedToken { position, .. }
            | Diagnostic::Syntax { position, .. }
            | Diagnostic::Semantic { position, .. }
            | Diagnostic::IoValidation { position, .. } => *position,
        }
    }
}

/// Renders a diagnostic with the offending source line and a caret under its column.
pub fn format_diagnostic(src: &str, diag: &Diagnostic, filename: &str) -> String {
    let pos = diag.position();
    let line_idx = (pos.line as usize).saturating_sub(1);
    let line_text = src.lines().nth(line_idx).unwrap_or("");
    let caret = format!("{}^", " ".repeat((pos.column as usize).saturating_sub(1)));
    format!(
        "{}\n --> {}:{}:{}\n {}\n {}",
        diag, filename, pos.line, pos.column, line_text, caret
    )
}
