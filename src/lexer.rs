use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::token::{SourcePosition, Token, TokenKind};

pub const KEYWORDS: [&str; 9] = ["func", "do", "end", "endfunc", "return", "fn", "when", "else", "if"];

static KEYWORD_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| KEYWORDS.into_iter().collect());

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[A-Za-z_][A-Za-z0-9_]*"));
static INTEGER: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[0-9]+"));
static STRING: LazyLock<Regex> = LazyLock::new(|| pattern(r#"^"(.*?)""#));
static OPERATOR: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[-+*/]"));
static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[(){}\[\],;.]"));
static COMMENT: LazyLock<Regex> = LazyLock::new(|| pattern(r"^#[^\n]*"));

/// Pull-based tokenizer over a single source string.
///
/// The source is trimmed and padded with one trailing `\n`, so every line,
/// including the last, ends in a terminator. Positions still refer to the
/// untrimmed source: the cursor starts after the stripped leading blanks. Unrecognized characters come out
/// as [`TokenKind::Unknown`]; the lexer itself never fails.
pub struct Lexer {
    input: String,
    pos: usize, // byte offset
    line: u32,
    col: u32,
    current: Token,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        let mut input = source.trim().to_string();
        input.push('\n');
        let lead = &source[..source.len() - source.trim_start().len()];
        let line = 1 + lead.matches('\n').count() as u32;
        let col = 1 + lead.rsplit('\n').next().map_or(0, |tail| tail.chars().count()) as u32;
        Self {
            input,
            pos: 0,
            line,
            col,
            current: Token::end_of_input(SourcePosition::default()),
        }
    }

    /// Produces the next token, skipping blanks and line terminators.
    ///
    /// Once the input is exhausted every call returns `EndOfInput`.
    pub fn next_token(&mut self) -> Token {
        while let Some(ch) = self.peek_char() {
            if ch == ' ' || ch == '\t' || ch == '\r' || ch == '\n' {
                self.advance_char();
                continue;
            }

            let position = self.source_position();
            let (kind, text, len) = self.scan_token();
            if kind == TokenKind::Unknown {
                trace!(text = %text, line = position.line, column = position.column, "unknown character");
            }
            self.advance_bytes(len);
            self.current = Token::new(kind, text, position);
            return self.current.clone();
        }

        self.current = Token::end_of_input(self.source_position());
        self.current.clone()
    }

    /// The most recently produced token.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// True once the cursor has consumed the whole padded input, terminator included.
    ///
    /// This tracks consumption, not lookahead: after the last real token has
    /// been pulled the trailing `\n` is still pending, so this stays false until
    /// `EndOfInput` has been produced. Use [`Lexer::has_next`] to ask whether
    /// another real token is coming.
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// True if the next pull would produce something other than `EndOfInput`.
    pub fn has_next(&self) -> bool {
        !self.input[self.pos..]
            .trim_start_matches([' ', '\t', '\r', '\n'])
            .is_empty()
    }

    pub fn source_position(&self) -> SourcePosition {
        SourcePosition::new(self.line, self.col)
    }

    // Tries every category in priority order against the remaining input.
    fn scan_token(&self) -> (TokenKind, String, usize) {
        let rest = &self.input[self.pos..];

        if let Some(m) = IDENTIFIER.find(rest) {
            let word = m.as_str();
            let kind = if is_keyword(word) {
                TokenKind::Keyword
            } else {
                TokenKind::Identifier
            };
            return (kind, word.to_string(), m.end());
        }
        if let Some(m) = INTEGER.find(rest) {
            return (TokenKind::Integer, m.as_str().to_string(), m.end());
        }
        if let Some(caps) = STRING.captures(rest) {
            let whole = caps.get(0).map_or(0, |m| m.end());
            let body = caps.get(1).map_or("", |m| m.as_str());
            return (TokenKind::StringLiteral, body.to_string(), whole);
        }
        if let Some(m) = OPERATOR.find(rest) {
            return (TokenKind::Operator, m.as_str().to_string(), m.end());
        }
        if let Some(m) = PUNCTUATION.find(rest) {
            return (TokenKind::Punctuation, m.as_str().to_string(), m.end());
        }
        if let Some(m) = COMMENT.find(rest) {
            return (TokenKind::Comment, m.as_str().to_string(), m.end());
        }

        let ch = rest.chars().next().unwrap_or('\0');
        (TokenKind::Unknown, ch.to_string(), ch.len_utf8())
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn advance_bytes(&mut self, len: usize) {
        let target = self.pos + len;
        while self.pos < target {
            if self.advance_char().is_none() {
                break;
            }
        }
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (!token.is_end()).then_some(token)
    }
}

/// Tokenizes the whole source, including the trailing `EndOfInput`.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.is_end();
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

pub fn is_keyword(word: &str) -> bool {
    KEYWORD_SET.contains(word.to_ascii_lowercase().as_str())
}

fn pattern(src: &str) -> Regex {
    Regex::new(src).expect("lexer patterns are valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_is_trimmed_and_padded() {
        let lexer = Lexer::new("  \n return 1 \n\n ");
        assert_eq!(lexer.input, "return 1\n");
    }

    #[test]
    fn keyword_lookup_ignores_case() {
        assert!(is_keyword("ENDFUNC"));
        assert!(is_keyword("Return"));
        assert!(!is_keyword("returns"));
    }

    #[test]
    fn multibyte_unknown_advances_one_column() {
        let mut lexer = Lexer::new("é1");
        let unknown = lexer.next_token();
        assert_eq!(unknown.kind, TokenKind::Unknown);
        assert_eq!(unknown.text, "é");
        let int = lexer.next_token();
        assert_eq!(int.position, SourcePosition::new(1, 2));
    }

    #[test]
    fn start_position_skips_trimmed_lead() {
        let lexer = Lexer::new("\n\n   x");
        assert_eq!(lexer.source_position(), SourcePosition::new(3, 4));
        assert_eq!(Lexer::new("x").source_position(), SourcePosition::new(1, 1));
    }
}
