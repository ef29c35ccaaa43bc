//! Lexical analyzer

use crate::token::{lookup_ident, Token, TokenKind};

/// Turn a byte string into a sequence of tokens.
///
/// The lexer never fails: bytes it does not recognize come back as
/// `ILLEGAL` tokens for the parser to reject, and once the input is
/// exhausted `next_token` returns `EOF` forever.
#[derive(Debug)]
pub struct Lexer {
    input: Vec<u8>,
    pos: usize,
}

impl Lexer {
    /// Creates a new lexer operating on `input`.
    pub fn new(input: &str) -> Lexer {
        Lexer {
            input: input.as_bytes().to_vec(),
            pos: 0,
        }
    }

    /// Scan the next token and return it.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let ch = match self.current() {
            None => return Token::eof(),
            Some(ch) => ch,
        };

        let token = match ch {
            b'=' => {
                if self.peek() == Some(b'=') {
                    self.pos += 1;
                    Token::new(TokenKind::Eq, "==")
                } else {
                    Token::new(TokenKind::Assign, "=")
                }
            }
            b'!' => {
                if self.peek() == Some(b'=') {
                    self.pos += 1;
                    Token::new(TokenKind::NotEq, "!=")
                } else {
                    Token::new(TokenKind::Bang, "!")
                }
            }
            b'+' => Token::new(TokenKind::Plus, "+"),
            b'-' => Token::new(TokenKind::Minus, "-"),
            b'*' => Token::new(TokenKind::Asterisk, "*"),
            b'/' => Token::new(TokenKind::Slash, "/"),
            b'<' => Token::new(TokenKind::Lt, "<"),
            b'>' => Token::new(TokenKind::Gt, ">"),
            b':' => Token::new(TokenKind::Colon, ":"),
            b',' => Token::new(TokenKind::Comma, ","),
            b';' => Token::new(TokenKind::Semicolon, ";"),
            b'(' => Token::new(TokenKind::LParen, "("),
            b')' => Token::new(TokenKind::RParen, ")"),
            b'{' => Token::new(TokenKind::LBrace, "{"),
            b'}' => Token::new(TokenKind::RBrace, "}"),
            b'[' => Token::new(TokenKind::LBracket, "["),
            b']' => Token::new(TokenKind::RBracket, "]"),
            b'"' => return self.scan_string(),
            _ if is_letter(ch) => return self.scan_identifier(),
            _ if ch.is_ascii_digit() => return self.scan_number(),
            _ => Token::new(TokenKind::Illegal, (ch as char).to_string()),
        };

        self.pos += 1;
        token
    }

    fn current(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos + 1).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.current() {
            self.pos += 1;
        }
    }

    /// Maximal run of letter-or-underscore bytes, classified through the
    /// keyword table. A digit terminates an identifier.
    fn scan_identifier(&mut self) -> Token {
        let start = self.pos;
        while self.current().is_some_and(is_letter) {
            self.pos += 1;
        }
        let literal = self.slice(start, self.pos);
        Token::new(lookup_ident(&literal), literal)
    }

    fn scan_number(&mut self) -> Token {
        let start = self.pos;
        while self.current().is_some_and(|ch| ch.is_ascii_digit()) {
            self.pos += 1;
        }
        Token::new(TokenKind::Int, self.slice(start, self.pos))
    }

    /// Everything between the opening `"` and the next `"` (or end of
    /// input), with no escape processing.
    fn scan_string(&mut self) -> Token {
        let start = self.pos + 1;
        self.pos = start;
        while self.current().is_some_and(|ch| ch != b'"') {
            self.pos += 1;
        }
        let literal = self.slice(start, self.pos);
        if self.current().is_some() {
            self.pos += 1; // closing quote
        }
        Token::new(TokenKind::Str, literal)
    }

    fn slice(&self, start: usize, end: usize) -> String {
        String::from_utf8_lossy(&self.input[start..end]).into_owned()
    }
}

fn is_letter(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Token {
                kind: TokenKind::Eof,
                ..
            } => None,
            t => Some(t),
        }
    }
}
