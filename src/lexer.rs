use std::sync::LazyLock;

use regex::Regex;

use crate::{
    ast::{Token, TokenType},
    error::{ParseError, ParseErrorKind},
};

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+").expect("whitespace pattern"));

static STRING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(?s)"(?:[^"\\]|\\.)*""#).expect("string pattern"));

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?[0-9]+(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?").expect("number pattern")
});

static FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}_][\p{L}\p{N}_]*\(\)").expect("function pattern"));

// Words are lexed leniently; the Latin-only rule is checked by the parser.
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}_][\p{L}\p{N}_]*").expect("word pattern"));

static OPERATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:>=|<=|!=|=|>|<)").expect("operator pattern"));

/// Splits AQL text into tokens.
///
/// Token positions are indices into the produced list, so the lexer counts
/// the tokens it has handed out.
pub struct Lexer<'a> {
    input: &'a str,
    offset: usize,
    emitted: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            offset: 0,
            emitted: 0,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.offset..]
    }

    fn char_offset(&self) -> usize {
        self.input[..self.offset].chars().count()
    }

    fn skip_whitespace(&mut self) {
        if let Some(m) = WHITESPACE.find(self.rest()) {
            self.offset += m.end();
        }
    }

    fn take(&mut self, len: usize) -> &'a str {
        let text = &self.input[self.offset..self.offset + len];
        self.offset += len;
        text
    }

    fn emit(&mut self, token_type: TokenType, text: &str) -> Token {
        let token = Token::new(token_type, text, self.emitted);
        self.emitted += 1;
        token
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.emitted)
    }

    fn keyword_or_identifier(word: &str) -> TokenType {
        match word.to_ascii_uppercase().as_str() {
            "AND" => TokenType::And,
            "OR" => TokenType::Or,
            "NOT" => TokenType::Not,
            "IN" => TokenType::In,
            "CONTAINS" => TokenType::Contains,
            "TRUE" | "FALSE" => TokenType::Boolean,
            "NULL" => TokenType::Null,
            _ => TokenType::Identifier,
        }
    }

    fn operator(symbol: &str) -> TokenType {
        match symbol {
            ">=" => TokenType::Ge,
            "<=" => TokenType::Le,
            "!=" => TokenType::Neq,
            "=" => TokenType::Eq,
            ">" => TokenType::Gt,
            _ => TokenType::Lt,
        }
    }

    /// Produces the next token, or the `EOL` sentinel once input is exhausted.
    ///
    /// Calling this again after `EOL` keeps returning `EOL` at the same position.
    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_whitespace();

        let rest = self.rest();
        let Some(ch) = rest.chars().next() else {
            return Ok(Token::eol(self.emitted));
        };

        if ch == '"' {
            return match STRING.find(rest) {
                Some(m) => {
                    let text = self.take(m.end());
                    Ok(self.emit(TokenType::String, text))
                }
                None => Err(self.error(ParseErrorKind::UnterminatedString {
                    offset: self.char_offset(),
                })),
            };
        }

        if let Some(m) = NUMBER.find(rest) {
            // A number must not run straight into a word: `1abc`, `2e`
            if let Some(next) = rest[m.end()..]
                .chars()
                .next()
                .filter(|c| c.is_alphanumeric() || *c == '_')
            {
                return Err(self.error(ParseErrorKind::UnexpectedCharacter {
                    character: next,
                    offset: self.char_offset() + m.as_str().chars().count(),
                }));
            }
            let text = self.take(m.end());
            return Ok(self.emit(TokenType::Number, text));
        }

        if let Some(m) = FUNCTION.find(rest) {
            let text = self.take(m.end());
            return Ok(self.emit(TokenType::Function, text));
        }

        if let Some(m) = WORD.find(rest) {
            let text = self.take(m.end());
            return Ok(self.emit(Self::keyword_or_identifier(text), text));
        }

        if let Some(m) = OPERATOR.find(rest) {
            let text = self.take(m.end());
            return Ok(self.emit(Self::operator(text), text));
        }

        let token_type = match ch {
            '(' => TokenType::LParen,
            ')' => TokenType::RParen,
            '[' => TokenType::LBracket,
            ']' => TokenType::RBracket,
            ',' => TokenType::Comma,
            _ => {
                return Err(self.error(ParseErrorKind::UnexpectedCharacter {
                    character: ch,
                    offset: self.char_offset(),
                }));
            }
        };
        let text = self.take(ch.len_utf8());
        Ok(self.emit(token_type, text))
    }

    /// Tokenizes the whole input. The last token is always `EOL`.
    pub fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            match self.next_token() {
                Ok(token) => {
                    let is_eol = token.token_type == TokenType::Eol;
                    tokens.push(token);
                    if is_eol {
                        return Ok(tokens);
                    }
                }
                Err(err) => return Err(err.with_tokens(&tokens)),
            }
        }
    }
}

/// Convenience wrapper around [`Lexer::tokenize`].
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    Lexer::new(input).tokenize()
}
