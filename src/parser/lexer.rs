//! Lexer for tokenizing custom format strings.
//!
//! The lexer is a single pass over the input and never fails:
//! - Quoted strings ('text' or "text") become QuotedString tokens, so a `;`
//!   inside quotes is never a section separator
//! - Escaped characters (\;) become EscapedChar tokens
//! - `e`/`E` is an exponent only when followed by an optional sign and a run
//!   of `0`s; otherwise it is a literal
//! - A trailing backslash is a literal backslash

use crate::parser::tokens::{SpannedToken, Token};

/// A lexer for format strings.
#[derive(Debug)]
pub struct Lexer<'a> {
    /// The input string being tokenized.
    pub(crate) input: &'a str,
    /// The current byte position in the input.
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input string.
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Returns the next token from the input.
    pub fn next_token(&mut self) -> SpannedToken {
        let start = self.position;
        let Some(ch) = self.current_char() else {
            return SpannedToken {
                token: Token::Eof,
                start,
                end: start,
            };
        };

        let token = match ch {
            '"' | '\'' => self.lex_quoted_string(ch),
            '\\' => self.lex_escaped_char(),
            'e' | 'E' => self.lex_exponent(ch),
            _ => {
                self.advance();
                match ch {
                    '0' => Token::Zero,
                    '#' => Token::Hash,
                    '.' => Token::DecimalPoint,
                    ',' => Token::GroupSep,
                    ';' => Token::SectionSep,
                    '%' => Token::Percent,
                    '‰' => Token::Permille,
                    _ => Token::Literal(ch),
                }
            }
        };

        SpannedToken {
            token,
            start,
            end: self.position,
        }
    }

    /// Returns the character at the current position, if any.
    fn current_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Returns the remaining input as a string slice.
    fn remaining(&self) -> &str {
        &self.input[self.position..]
    }

    /// Advances the position by one character.
    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += ch.len_utf8();
        }
    }

    /// Lexes a quoted string. Both quote styles close only on the same quote.
    fn lex_quoted_string(&mut self, quote: char) -> Token {
        self.advance(); // Skip the opening quote

        let mut content = String::new();
        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == quote {
                return Token::QuotedString(content);
            }
            content.push(ch);
        }
        Token::QuotedString(content)
    }

    /// Lexes an escaped character (\x).
    fn lex_escaped_char(&mut self) -> Token {
        self.advance(); // Skip the backslash

        match self.current_char() {
            Some(ch) => {
                self.advance();
                Token::EscapedChar(ch)
            }
            None => Token::Literal('\\'),
        }
    }

    /// Lexes `e`, `E`, `e+00`, `E-0`, `E000`, ...
    fn lex_exponent(&mut self, ch: char) -> Token {
        let rest = &self.remaining()[ch.len_utf8()..];
        let (show_plus, sign_len) = match rest.chars().next() {
            Some('+') => (true, 1),
            Some('-') => (false, 1),
            _ => (false, 0),
        };
        let min_digits = rest[sign_len..].chars().take_while(|&c| c == '0').count();

        if min_digits == 0 {
            self.advance();
            return Token::Literal(ch);
        }

        self.position += ch.len_utf8() + sign_len + min_digits;
        Token::Exponent {
            upper: ch == 'E',
            show_plus,
            min_digits,
        }
    }

    /// Returns all remaining tokens, ending with `Eof`.
    /// This consumes the lexer.
    pub fn tokenize(mut self) -> Vec<SpannedToken> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = matches!(token.token, Token::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}
