pub mod error;
pub mod eval;
pub mod outcome;
pub mod parser;

pub use error::EvalError;
pub use eval::{evaluate_expression, Evaluator};
pub use outcome::ParseOutcome;
pub use parser::Parser;

use crate::ast::Node;
use crate::config::FrontendConfig;
use crate::error::{format_diagnostic, Diagnostic};
use crate::lexer::Lexer;

/// A `Program` tree plus every diagnostic raised while building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedProgram {
    pub program: Node,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedProgram {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// One caret snippet per diagnostic, separated by blank lines.
    pub fn render_diagnostics(&self, src: &str, filename: &str) -> String {
        self.diagnostics
            .iter()
            .map(|d| format_diagnostic(src, d, filename))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

pub fn parse(src: &str) -> ParsedProgram {
    parse_with_config(src, &FrontendConfig::default())
}

pub fn parse_with_config(src: &str, config: &FrontendConfig) -> ParsedProgram {
    let mut parser = Parser::with_config(Lexer::new(src), config);
    let program = parser.parse_program();
    ParsedProgram {
        program,
        diagnostics: parser.into_diagnostics(),
    }
}
