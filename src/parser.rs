use thiserror::Error;

use crate::lexer::{Token, TokenKind};
use crate::model::{
    BindingFile, ExposedField, ExposedMember, ExposedProperty, ExposedType, QualifiedIdentifier,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected}, got {actual} at token {position}")]
    UnexpectedToken {
        expected: TokenKind,
        actual: TokenKind,
        position: usize,
    },
    #[error("unexpected end of token stream (expected {expected})")]
    UnexpectedEnd { expected: TokenKind },
    #[error("did not expect {actual} at token {position}")]
    UnexpectedDeclaration { actual: TokenKind, position: usize },
}

/// Single-pass top-down parser with one token of lookahead.
///
/// A malformed declaration aborts the whole compilation unit; there is no
/// recovery across declaration boundaries.
pub struct Parser {
    tokens: Vec<Token>,
    idx: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, idx: 0 }
    }

    pub fn parse(mut self) -> Result<BindingFile, ParseError> {
        let mut file = BindingFile::default();

        while let Some(token) = self.peek() {
            match token.kind() {
                TokenKind::Include => {
                    self.idx += 1;
                    let location = self.consume_string_literal()?;
                    self.consume(TokenKind::Semicolon)?;
                    file.includes.push(location);
                }
                TokenKind::NativeType => {
                    self.idx += 1;
                    file.types.push(self.parse_native_type(false)?);
                }
                TokenKind::NativeComponent => {
                    self.idx += 1;
                    file.types.push(self.parse_native_type(true)?);
                }
                actual => {
                    return Err(ParseError::UnexpectedDeclaration {
                        actual,
                        position: self.idx,
                    })
                }
            }
        }

        Ok(file)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.idx)
    }

    fn consume(&mut self, expected: TokenKind) -> Result<Token, ParseError> {
        let token = self
            .peek()
            .cloned()
            .ok_or(ParseError::UnexpectedEnd { expected })?;
        if token.kind() != expected {
            return Err(ParseError::UnexpectedToken {
                expected,
                actual: token.kind(),
                position: self.idx,
            });
        }
        self.idx += 1;
        Ok(token)
    }

    fn consume_identifier(&mut self) -> Result<String, ParseError> {
        match self.consume(TokenKind::Identifier)? {
            Token::Identifier(name) => Ok(name),
            _ => unreachable!("consume checked the kind"),
        }
    }

    fn consume_string_literal(&mut self) -> Result<String, ParseError> {
        match self.consume(TokenKind::StringLiteral)? {
            Token::StringLiteral(content) => Ok(content),
            _ => unreachable!("consume checked the kind"),
        }
    }

    /// Consumes `Identifier { "::" Identifier }`.
    ///
    /// Alternates between expecting a name segment and expecting a
    /// separator-or-stop, and stops at the first token that does not fit. If
    /// it stops right after a separator, the separator is un-consumed so the
    /// caller's grammar sees it instead of silently losing it.
    fn consume_qualified_identifier(&mut self) -> Result<QualifiedIdentifier, ParseError> {
        let mut segments = Vec::new();
        let mut expect_segment = true;

        loop {
            match self.peek() {
                Some(Token::Identifier(name)) if expect_segment => {
                    segments.push(name.clone());
                    self.idx += 1;
                    expect_segment = false;
                }
                Some(Token::NamespaceSeparator) if !expect_segment => {
                    self.idx += 1;
                    expect_segment = true;
                }
                _ => break,
            }
        }

        if segments.is_empty() {
            return match self.peek() {
                Some(token) => Err(ParseError::UnexpectedToken {
                    expected: TokenKind::Identifier,
                    actual: token.kind(),
                    position: self.idx,
                }),
                None => Err(ParseError::UnexpectedEnd {
                    expected: TokenKind::Identifier,
                }),
            };
        }
        if expect_segment {
            // Stopped on a dangling separator; back up over it.
            self.idx -= 1;
        }

        Ok(QualifiedIdentifier::new(segments))
    }

    /// Accepts `[Param { "," Param }]` up to the closing parenthesis.
    ///
    /// Parameters are validated syntactically and then discarded: exposed
    /// accessors never take caller arguments.
    fn consume_parameter_list(&mut self) -> Result<(), ParseError> {
        loop {
            match self.peek() {
                Some(Token::CloseParen) => return Ok(()),
                Some(_) => {
                    self.consume_qualified_identifier()?;
                    self.consume_identifier()?;
                    if let Some(Token::Comma) = self.peek() {
                        self.idx += 1;
                    }
                }
                None => {
                    return Err(ParseError::UnexpectedEnd {
                        expected: TokenKind::CloseParen,
                    })
                }
            }
        }
    }

    fn parse_method(&mut self) -> Result<ExposedMember, ParseError> {
        self.consume(TokenKind::Method)?;
        let native_type = self.consume_qualified_identifier()?;
        let native_method_name = self.consume_identifier()?;

        self.consume(TokenKind::OpenParen)?;
        self.consume_parameter_list()?;
        self.consume(TokenKind::CloseParen)?;

        self.consume(TokenKind::Arrow)?;
        self.consume(TokenKind::Property)?;
        let exposed_name = self.consume_identifier()?;
        self.consume(TokenKind::Semicolon)?;

        Ok(ExposedMember::Property(ExposedProperty {
            exposed_name,
            native_method_name,
            native_type: native_type.to_string(),
        }))
    }

    fn parse_field(&mut self) -> Result<ExposedMember, ParseError> {
        self.consume(TokenKind::Field)?;
        let native_type = self.consume_qualified_identifier()?;
        let native_field_name = self.consume_identifier()?;

        self.consume(TokenKind::Arrow)?;
        self.consume(TokenKind::Property)?;
        let exposed_name = self.consume_identifier()?;
        self.consume(TokenKind::Semicolon)?;

        Ok(ExposedMember::Field(ExposedField {
            exposed_name,
            native_field_name,
            native_type: native_type.to_string(),
        }))
    }

    fn parse_native_type(&mut self, is_component: bool) -> Result<ExposedType, ParseError> {
        let identifier = self.consume_qualified_identifier()?;
        self.consume(TokenKind::OpenBrace)?;

        let mut members = Vec::new();
        loop {
            match self.peek().map(Token::kind) {
                Some(TokenKind::CloseBrace) => break,
                Some(TokenKind::Method) => members.push(self.parse_method()?),
                Some(TokenKind::Field) => members.push(self.parse_field()?),
                Some(actual) => {
                    return Err(ParseError::UnexpectedDeclaration {
                        actual,
                        position: self.idx,
                    })
                }
                None => {
                    return Err(ParseError::UnexpectedEnd {
                        expected: TokenKind::CloseBrace,
                    })
                }
            }
        }
        self.consume(TokenKind::CloseBrace)?;

        Ok(ExposedType {
            identifier,
            is_component,
            members,
        })
    }
}
