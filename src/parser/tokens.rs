//! Token types for the format string lexer.

/// A token in a custom format string.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    Literal(char),
    EscapedChar(char),
    /// `'text'` or `"text"`; an unterminated quote runs to the end of input.
    QuotedString(String),

    // Digit placeholders
    Zero, // 0
    Hash, // #

    // Separators
    DecimalPoint, // .
    GroupSep,     // ,
    SectionSep,   // ;

    // Scale multipliers
    Percent,  // %
    Permille, // ‰

    /// `e`/`E`, an optional sign and one or more `0`s.
    Exponent {
        upper: bool,
        show_plus: bool,
        min_digits: usize,
    },

    // End of input
    Eof,
}

impl Token {
    /// Returns true for `0` and `#`.
    pub fn is_digit_placeholder(&self) -> bool {
        matches!(self, Token::Zero | Token::Hash)
    }
}

/// A token with its byte span in the source.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub start: usize,
    pub end: usize,
}
