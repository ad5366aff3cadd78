use tracing::debug;

use crate::lexer::Lexer;
use crate::parser::error::EvalError;
use crate::token::{SourcePosition, Token, TokenKind};

/// Deepest parenthesis nesting the evaluator accepts.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Evaluates an arithmetic expression in a single pass, without building a tree.
///
/// Same precedence as the parser, plus parenthesized sub-expressions. Unlike
/// the parser it is strict: the first mismatch ends evaluation with an error.
pub struct Evaluator {
    lexer: Lexer,
    current: Token,
    depth: usize,
}

impl Evaluator {
    pub fn new(lexer: Lexer) -> Self {
        let mut eval = Self {
            lexer,
            current: Token::end_of_input(SourcePosition::default()),
            depth: 0,
        };
        eval.advance();
        eval
    }

    /// Evaluates one expression and requires that nothing follows it.
    pub fn evaluate(&mut self) -> Result<i64, EvalError> {
        let value = self.expression()?;
        if !self.current.is_end() {
            return Err(self.unexpected("end of input"));
        }
        debug!(value, "evaluated expression");
        Ok(value)
    }

    pub fn expression(&mut self) -> Result<i64, EvalError> {
        let mut acc = self.term()?;
        while self.current.is_operator(&["+", "-"]) {
            let op = self.consume(TokenKind::Operator, "operator")?;
            let rhs = self.term()?;
            acc = apply(&op, acc, rhs)?;
        }
        Ok(acc)
    }

    pub fn term(&mut self) -> Result<i64, EvalError> {
        let mut acc = self.factor()?;
        while self.current.is_operator(&["*", "/"]) {
            let op = self.consume(TokenKind::Operator, "operator")?;
            let rhs = self.factor()?;
            acc = apply(&op, acc, rhs)?;
        }
        Ok(acc)
    }

    pub fn factor(&mut self) -> Result<i64, EvalError> {
        if self.current.is(TokenKind::Punctuation, "(") {
            if self.depth >= MAX_NESTING_DEPTH {
                return Err(EvalError::TooDeep {
                    position: self.current.position,
                });
            }
            self.advance();
            self.depth += 1;
            let value = self.expression();
            self.depth -= 1;
            let value = value?;
            if !self.current.is(TokenKind::Punctuation, ")") {
                return Err(self.unexpected("')'"));
            }
            self.advance();
            return Ok(value);
        }
        let tok = self.consume(TokenKind::Integer, "integer literal")?;
        tok.text.parse::<i64>().map_err(|_| EvalError::InvalidInteger {
            text: tok.text.clone(),
            position: tok.position,
        })
    }

    // Consume-and-check: the current token must be of `kind`.
    fn consume(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token, EvalError> {
        if self.current.kind != kind {
            return Err(self.unexpected(expected));
        }
        let tok = self.current.clone();
        self.advance();
        Ok(tok)
    }

    fn advance(&mut self) {
        loop {
            let token = self.lexer.next_token();
            if token.kind != TokenKind::Comment {
                self.current = token;
                return;
            }
        }
    }

    fn unexpected(&self, expected: &'static str) -> EvalError {
        EvalError::UnexpectedToken {
            expected,
            found: self.current.text.clone(),
            position: self.current.position,
        }
    }
}

fn apply(op: &Token, lhs: i64, rhs: i64) -> Result<i64, EvalError> {
    let result = match op.text.as_str() {
        "+" => lhs.checked_add(rhs),
        "-" => lhs.checked_sub(rhs),
        "*" => lhs.checked_mul(rhs),
        "/" => {
            if rhs == 0 {
                return Err(EvalError::DivisionByZero { position: op.position });
            }
            lhs.checked_div(rhs)
        }
        _ => {
            return Err(EvalError::UnexpectedToken {
                expected: "arithmetic operator",
                found: op.text.clone(),
                position: op.position,
            })
        }
    };
    result.ok_or_else(|| EvalError::Overflow {
        op: op.text.clone(),
        position: op.position,
    })
}

pub fn evaluate_expression(source: &str) -> Result<i64, EvalError> {
    Evaluator::new(Lexer::new(source)).evaluate()
}
