use std::collections::HashMap;
use std::io::Write;
use std::iter::FusedIterator;

use lazy_static::lazy_static;

use crate::diagnostics::Diagnostics;
use crate::error::{Diagnostic, LexError};
use crate::token::{Literal, Token, TokenType};

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, TokenType> = HashMap::from([
        ("and", TokenType::And),
        ("class", TokenType::Class),
        ("else", TokenType::Else),
        ("false", TokenType::False),
        ("for", TokenType::For),
        ("fun", TokenType::Fun),
        ("if", TokenType::If),
        ("nil", TokenType::Nil),
        ("or", TokenType::Or),
        ("print", TokenType::Print),
        ("return", TokenType::Return),
        ("super", TokenType::Super),
        ("this", TokenType::This),
        ("true", TokenType::True),
        ("var", TokenType::Var),
        ("while", TokenType::While),
    ]);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Recognise identifiers and reserved words. Off by default, in which case
    /// letters are reported as unexpected characters.
    pub identifiers: bool,
}

pub struct Scanner<'src> {
    source: &'src str,
    start: usize,
    current: usize,
    line: u32,
    start_line: u32,
    options: ScanOptions,
    finished: bool,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self::with_options(source, ScanOptions::default())
    }

    pub fn with_options(source: &'src str, options: ScanOptions) -> Self {
        Self {
            source,
            start: 0,
            current: 0,
            line: 1,
            start_line: 1,
            options,
            finished: false,
        }
    }

    /// Scans the whole source, forwarding every error to `diagnostics` as it
    /// is found. The returned tokens always end with a single EOF token.
    pub fn scan_tokens<W: Write>(self, diagnostics: &mut Diagnostics<W>) -> Vec<Token<'src>> {
        let mut tokens = Vec::new();
        for scanned in self {
            match scanned {
                Ok(token) => tokens.push(token),
                Err(diagnostic) => diagnostics.report(diagnostic),
            }
        }

        log::debug!(
            "scanned {} tokens with {} errors",
            tokens.len(),
            diagnostics.reported().len()
        );
        tokens
    }

    pub fn next_token(&mut self) -> Option<Result<Token<'src>, Diagnostic>> {
        if self.finished {
            return None;
        }

        self.skip_whitespace();
        self.start = self.current;
        self.start_line = self.line;

        if self.is_end() {
            self.finished = true;
            return Some(Ok(Token::eof(self.line, self.current)));
        }

        let scanned = match self.next_char() {
            '(' => self.make_token(TokenType::LeftParen),
            ')' => self.make_token(TokenType::RightParen),
            '{' => self.make_token(TokenType::LeftBrace),
            '}' => self.make_token(TokenType::RightBrace),
            ';' => self.make_token(TokenType::Semicolon),
            ',' => self.make_token(TokenType::Comma),
            '.' => self.make_token(TokenType::Dot),
            '-' => self.make_token(TokenType::Minus),
            '+' => self.make_token(TokenType::Plus),
            '/' => self.make_token(TokenType::Slash),
            '*' => self.make_token(TokenType::Star),
            '!' => {
                if self.match_next('=') {
                    self.make_token(TokenType::BangEqual)
                } else {
                    self.make_token(TokenType::Bang)
                }
            }
            '=' => {
                if self.match_next('=') {
                    self.make_token(TokenType::EqualEqual)
                } else {
                    self.make_token(TokenType::Equal)
                }
            }
            '<' => {
                if self.match_next('=') {
                    self.make_token(TokenType::LessEqual)
                } else {
                    self.make_token(TokenType::Less)
                }
            }
            '>' => {
                if self.match_next('=') {
                    self.make_token(TokenType::GreaterEqual)
                } else {
                    self.make_token(TokenType::Greater)
                }
            }
            '"' => self.string(),
            '0'..='9' => self.number(),
            'a'..='z' | 'A'..='Z' | '_' if self.options.identifiers => self.identifier(),
            c => self.error(LexError::UnexpectedCharacter(c)),
        };

        Some(scanned)
    }

    fn skip_whitespace(&mut self) {
        loop {
            match self.peek_char() {
                ' ' | '\r' | '\t' => {
                    let _ = self.next_char();
                }
                '\n' => {
                    self.line += 1;
                    let _ = self.next_char();
                }
                '/' => {
                    if self.peek_next_char() == '/' {
                        while self.peek_char() != '\n' && !self.is_end() {
                            let _ = self.next_char();
                        }
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
    }

    fn is_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn next_char(&mut self) -> char {
        if self.is_end() {
            return '\0';
        }
        let c = self.peek_char();
        self.current += c.len_utf8();
        c
    }

    fn peek_char(&self) -> char {
        self.source[self.current..].chars().next().unwrap_or('\0')
    }

    fn peek_next_char(&self) -> char {
        self.source[self.current..].chars().nth(1).unwrap_or('\0')
    }

    fn match_next(&mut self, expected: char) -> bool {
        if self.is_end() || self.peek_char() != expected {
            return false;
        }
        self.current += expected.len_utf8();
        true
    }

    fn lexeme(&self) -> &'src str {
        &self.source[self.start..self.current]
    }

    fn make_token(&self, token_type: TokenType) -> Result<Token<'src>, Diagnostic> {
        self.make_literal(token_type, Literal::Null)
    }

    fn make_literal(
        &self,
        token_type: TokenType,
        literal: Literal<'src>,
    ) -> Result<Token<'src>, Diagnostic> {
        let token = Token::new(token_type, self.lexeme(), literal, self.start_line, self.start);
        log::trace!("line {} {:?}: {}", token.line, token.span(), token);
        Ok(token)
    }

    fn error(&self, error: LexError) -> Result<Token<'src>, Diagnostic> {
        Err(Diagnostic::new(self.line, error))
    }

    fn string(&mut self) -> Result<Token<'src>, Diagnostic> {
        while self.peek_char() != '"' && !self.is_end() {
            let next_char = self.next_char();
            if next_char == '\n' {
                self.line += 1;
            }
        }

        if self.is_end() {
            return self.error(LexError::UnterminatedString);
        }

        // Consume the closing quote.
        let _ = self.next_char();
        let value = &self.source[self.start + 1..self.current - 1];
        self.make_literal(TokenType::String, Literal::String(value))
    }

    fn number(&mut self) -> Result<Token<'src>, Diagnostic> {
        while self.peek_char().is_ascii_digit() {
            let _ = self.next_char();
        }

        if self.peek_char() == '.' && self.peek_next_char().is_ascii_digit() {
            let _ = self.next_char();

            while self.peek_char().is_ascii_digit() {
                let _ = self.next_char();
            }
        }

        // Digit runs past f64::MAX parse as infinity.
        match self.lexeme().parse::<f64>() {
            Ok(value) if value.is_finite() => {
                self.make_literal(TokenType::Number, Literal::Number(value))
            }
            _ => self.error(LexError::InvalidNumber(self.lexeme().to_string())),
        }
    }

    fn identifier(&mut self) -> Result<Token<'src>, Diagnostic> {
        while self.peek_char().is_ascii_alphanumeric() || self.peek_char() == '_' {
            let _ = self.next_char();
        }

        let token_type = KEYWORDS
            .get(self.lexeme())
            .copied()
            .unwrap_or(TokenType::Identifier);
        self.make_token(token_type)
    }
}

impl<'src> Iterator for Scanner<'src> {
    type Item = Result<Token<'src>, Diagnostic>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

impl FusedIterator for Scanner<'_> {}
