use std::fmt;

/// Lexical category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    // Literals
    /// Field name
    ///
    /// # Examples
    /// ```text
    /// status
    /// duration
    /// _internal
    /// ```
    Identifier,

    /// Double-quoted string, escapes left undecoded
    ///
    /// # Examples
    /// ```text
    /// "passed"
    /// "line\nbreak"
    /// ```
    String,

    /// Signed integer or decimal
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -1.5
    /// ```
    Number,

    /// `true` / `false`, any case
    Boolean,

    /// `null`, any case
    Null,

    /// Context placeholder, a bare identifier followed by `()`
    ///
    /// # Examples
    /// ```text
    /// now()
    /// currentUser()
    /// ```
    Function,

    // Logical
    And,
    Or,
    Not,

    // Operations
    /// Array membership keyword
    In,
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Neq,
    /// Substring / element membership keyword
    Contains,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,

    /// End of input sentinel, always the last token
    Eol,
}

impl TokenType {
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::Identifier => "IDENTIFIER",
            TokenType::String => "STRING",
            TokenType::Number => "NUMBER",
            TokenType::Boolean => "BOOLEAN",
            TokenType::Null => "NULL",
            TokenType::Function => "FUNCTION",
            TokenType::And => "AND",
            TokenType::Or => "OR",
            TokenType::Not => "NOT",
            TokenType::In => "IN",
            TokenType::Gt => "GT",
            TokenType::Ge => "GE",
            TokenType::Lt => "LT",
            TokenType::Le => "LE",
            TokenType::Eq => "EQ",
            TokenType::Neq => "NEQ",
            TokenType::Contains => "CONTAINS",
            TokenType::LParen => "LPAREN",
            TokenType::RParen => "RPAREN",
            TokenType::LBracket => "LBRACKET",
            TokenType::RBracket => "RBRACKET",
            TokenType::Comma => "COMMA",
            TokenType::Eol => "EOL",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single lexical token.
///
/// `position` is the token's index in the token list, not a character
/// offset. Every token except [`TokenType::Eol`] carries its source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub value: Option<String>,
    pub position: usize,
}

impl Token {
    pub fn new(token_type: TokenType, value: impl Into<String>, position: usize) -> Self {
        Token {
            token_type,
            value: Some(value.into()),
            position,
        }
    }

    pub fn eol(position: usize) -> Self {
        Token {
            token_type: TokenType::Eol,
            value: None,
            position,
        }
    }

    /// Source text, or the type name for tokens without one.
    pub fn text(&self) -> &str {
        self.value.as_deref().unwrap_or(self.token_type.name())
    }
}
