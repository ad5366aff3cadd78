use tracing::{debug, trace};

use crate::ast::{Node, NodeKind, UNSUPPORTED_FUNCTION, UNSUPPORTED_PARAMETER, UNSUPPORTED_STATEMENT};
use crate::config::FrontendConfig;
use crate::error::Diagnostic;
use crate::lexer::Lexer;
use crate::parser::outcome::ParseOutcome;
use crate::token::{SourcePosition, Token, TokenKind};

/// Deepest `func` nesting the parser descends into; deeper declarations degrade to placeholders.
pub const MAX_FUNCTION_DEPTH: usize = 128;

/// Recursive-descent parser with one token of lookahead.
///
/// Grammar mismatches never abort the parse: each rule returns a
/// [`ParseOutcome`], and every diagnostic raised along the way is also kept
/// on the parser in source order.
pub struct Parser {
    lexer: Lexer,
    current: Token,
    diagnostics: Vec<Diagnostic>,
    diagnostic_limit: usize,
    depth: usize,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        Self::with_config(lexer, &FrontendConfig::default())
    }

    pub fn with_config(lexer: Lexer, config: &FrontendConfig) -> Self {
        let mut parser = Self {
            lexer,
            current: Token::end_of_input(SourcePosition::default()),
            diagnostics: Vec::new(),
            diagnostic_limit: config.diagnostics.limit,
            depth: 0,
        };
        parser.advance();
        parser
    }

    pub fn current(&self) -> &Token {
        &self.current
    }

    /// True while the lookahead token is not `EndOfInput`.
    pub fn has_next(&self) -> bool {
        !self.current.is_end()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn parse_program(&mut self) -> Node {
        let mut program = Node::program();
        while self.has_next() {
            let statement = self.parse_statement().into_node();
            // Sentinels are only dropped at the top level.
            if !statement.is_missing() {
                program.add_child(statement);
            }
        }
        debug!(
            statements = program.children.len(),
            diagnostics = self.diagnostics.len(),
            "parsed program"
        );
        program
    }

    pub fn parse_statement(&mut self) -> ParseOutcome {
        if self.current.is_keyword("return") {
            self.advance();
            let (expr, diag) = self.parse_expression().into_parts();
            let stmt = Node::new(NodeKind::ReturnStatement, "").with_child(expr);
            return ParseOutcome::from_parts(stmt, diag);
        }
        if self.current.is_keyword("func") {
            return self.parse_function_declaration();
        }

        let token = self.current.clone();
        self.advance();
        let diag = match token.kind {
            TokenKind::EndOfInput => Diagnostic::syntax("unexpected end of input", token.position),
            TokenKind::Unknown => Diagnostic::unexpected_token("unrecognized character", token.text, token.position),
            _ => Diagnostic::unexpected_token("unsupported statement", token.text, token.position),
        };
        self.recover(Node::new(NodeKind::ReturnStatement, UNSUPPORTED_STATEMENT), diag)
    }

    pub fn parse_function_declaration(&mut self) -> ParseOutcome {
        if !self.current.is_keyword("func") {
            let diag = self.unexpected("expected 'func'");
            return self.recover(Node::new(NodeKind::FunctionDeclaration, UNSUPPORTED_FUNCTION), diag);
        }
        if self.depth >= MAX_FUNCTION_DEPTH {
            let diag = Diagnostic::syntax("function nesting too deep", self.current.position);
            self.advance();
            return self.recover(Node::new(NodeKind::FunctionDeclaration, UNSUPPORTED_FUNCTION), diag);
        }
        self.advance();

        let mut first = None;
        let name = if self.current.kind == TokenKind::Identifier {
            let name = self.current.text.clone();
            self.advance();
            name
        } else {
            let diag = self.unexpected("expected function name");
            self.flag(&mut first, diag);
            String::new()
        };
        trace!(name = %name, "function declaration");
        let mut decl = Node::new(NodeKind::FunctionDeclaration, name);

        if self.eat(TokenKind::Punctuation, "(") {
            if !self.eat(TokenKind::Punctuation, ")") {
                self.parse_parameter_list(&mut decl, &mut first);
            }
        } else {
            let diag = self.unexpected("expected '(' after function name");
            self.flag(&mut first, diag);
        }

        if !self.eat_keyword("do") {
            let diag = self.unexpected("expected 'do' before function body");
            self.flag(&mut first, diag);
        }

        let mut body = Node::new(NodeKind::FunctionBody, "");
        self.depth += 1;
        while !self.current.is_keyword("endfunc") && self.has_next() {
            let stmt = self.parse_statement();
            body.add_child(stmt.absorb(&mut first));
        }
        self.depth -= 1;
        if !self.eat_keyword("endfunc") {
            let diag = Diagnostic::syntax("missing 'endfunc'", self.current.position);
            self.flag(&mut first, diag);
        }
        decl.add_child(body);

        ParseOutcome::from_parts(decl, first)
    }

    pub fn parse_parameter(&mut self) -> ParseOutcome {
        if self.current.kind == TokenKind::Identifier {
            let param = Node::new(NodeKind::Parameter, self.current.text.clone());
            self.advance();
            return ParseOutcome::Ok(param);
        }
        let diag = self.unexpected("expected parameter name");
        self.recover(Node::new(NodeKind::Parameter, UNSUPPORTED_PARAMETER), diag)
    }

    pub fn parse_expression(&mut self) -> ParseOutcome {
        self.parse_additive()
    }

    pub fn parse_additive(&mut self) -> ParseOutcome {
        let mut first = None;
        let mut left = self.parse_multiplicative().absorb(&mut first);
        while self.current.is_operator(&["+", "-"]) {
            let op = self.current.text.clone();
            self.advance();
            let right = self.parse_multiplicative().absorb(&mut first);
            left = Node::binary(op, left, right);
        }
        ParseOutcome::from_parts(left, first)
    }

    pub fn parse_multiplicative(&mut self) -> ParseOutcome {
        let mut first = None;
        let mut left = self.parse_primary().absorb(&mut first);
        while self.current.is_operator(&["*", "/"]) {
            let op = self.current.text.clone();
            self.advance();
            let right = self.parse_primary().absorb(&mut first);
            left = Node::binary(op, left, right);
        }
        ParseOutcome::from_parts(left, first)
    }

    /// Only integer literals are primaries; anything else is left unconsumed.
    pub fn parse_primary(&mut self) -> ParseOutcome {
        if self.current.kind == TokenKind::Integer {
            let int = Node::new(NodeKind::Integer, self.current.text.clone());
            self.advance();
            return ParseOutcome::Ok(int);
        }
        let diag = if self.current.is_end() {
            Diagnostic::syntax("expected expression, found end of input", self.current.position)
        } else {
            self.unexpected("expected integer literal")
        };
        self.recover(Node::missing_expression(), diag)
    }

    // Called after the first parameter; the opening '(' is already consumed.
    fn parse_parameter_list(&mut self, decl: &mut Node, first: &mut Option<Diagnostic>) {
        loop {
            let param = self.parse_parameter();
            let recovered = param.is_recovered();
            decl.add_child(param.absorb(first));
            if recovered {
                self.skip_parameter_list();
                return;
            }
            if self.eat(TokenKind::Punctuation, ",") {
                continue;
            }
            if self.eat(TokenKind::Punctuation, ")") {
                return;
            }
            let diag = self.unexpected("expected ',' or ')' in parameter list");
            self.flag(first, diag);
            self.skip_parameter_list();
            return;
        }
    }

    // Skips to just past the closing ')', or stops at 'do'/'endfunc'/end of input.
    fn skip_parameter_list(&mut self) {
        while self.has_next() && !self.current.is_keyword("do") && !self.current.is_keyword("endfunc") {
            if self.eat(TokenKind::Punctuation, ")") {
                return;
            }
            self.advance();
        }
    }

    fn advance(&mut self) {
        loop {
            let token = self.lexer.next_token();
            if token.kind != TokenKind::Comment {
                self.current = token;
                return;
            }
            trace!(line = token.position.line, "skipping comment");
        }
    }

    fn eat(&mut self, kind: TokenKind, text: &str) -> bool {
        if self.current.is(kind, text) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, word: &str) -> bool {
        if self.current.is_keyword(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn unexpected(&self, message: &str) -> Diagnostic {
        Diagnostic::unexpected_token(message, self.current.text.clone(), self.current.position)
    }

    fn recover(&mut self, node: Node, diag: Diagnostic) -> ParseOutcome {
        self.record(&diag);
        ParseOutcome::Recovered(node, diag)
    }

    fn flag(&mut self, first: &mut Option<Diagnostic>, diag: Diagnostic) {
        self.record(&diag);
        if first.is_none() {
            *first = Some(diag);
        }
    }

    fn record(&mut self, diag: &Diagnostic) {
        debug!(%diag, "recovered");
        if self.diagnostics.len() < self.diagnostic_limit {
            self.diagnostics.push(diag.clone());
        }
    }
}
