pub mod ast;
pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{Node, NodeKind};
pub use config::FrontendConfig;
pub use error::{format_diagnostic, Diagnostic};
pub use lexer::{tokenize, Lexer};
pub use parser::{evaluate_expression, parse, EvalError, ParseOutcome, ParsedProgram, Parser};
pub use token::{SourcePosition, Token, TokenKind};
