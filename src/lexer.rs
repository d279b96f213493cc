use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// A classified lexeme. String literals and identifiers carry their text;
/// every other token carries only its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Include,
    NativeType,
    NativeComponent,
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    Comma,
    Arrow,
    Semicolon,
    NamespaceSeparator,
    Method,
    Field,
    Property,
    Period,
    StringLiteral(String),
    Identifier(String),
}

/// The kind of a [`Token`], without any carried text. Used when a parse error
/// has to name what it expected.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Include,
    NativeType,
    NativeComponent,
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    Comma,
    Arrow,
    Semicolon,
    NamespaceSeparator,
    Method,
    Field,
    Property,
    Period,
    StringLiteral,
    Identifier,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Include => TokenKind::Include,
            Token::NativeType => TokenKind::NativeType,
            Token::NativeComponent => TokenKind::NativeComponent,
            Token::OpenParen => TokenKind::OpenParen,
            Token::CloseParen => TokenKind::CloseParen,
            Token::OpenBrace => TokenKind::OpenBrace,
            Token::CloseBrace => TokenKind::CloseBrace,
            Token::Comma => TokenKind::Comma,
            Token::Arrow => TokenKind::Arrow,
            Token::Semicolon => TokenKind::Semicolon,
            Token::NamespaceSeparator => TokenKind::NamespaceSeparator,
            Token::Method => TokenKind::Method,
            Token::Field => TokenKind::Field,
            Token::Property => TokenKind::Property,
            Token::Period => TokenKind::Period,
            Token::StringLiteral(_) => TokenKind::StringLiteral,
            Token::Identifier(_) => TokenKind::Identifier,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Include => "`include`",
            TokenKind::NativeType => "`nativetype`",
            TokenKind::NativeComponent => "`nativecomponent`",
            TokenKind::OpenParen => "`(`",
            TokenKind::CloseParen => "`)`",
            TokenKind::OpenBrace => "`{`",
            TokenKind::CloseBrace => "`}`",
            TokenKind::Comma => "`,`",
            TokenKind::Arrow => "`->`",
            TokenKind::Semicolon => "`;`",
            TokenKind::NamespaceSeparator => "`::`",
            TokenKind::Method => "`method`",
            TokenKind::Field => "`field`",
            TokenKind::Property => "`property`",
            TokenKind::Period => "`.`",
            TokenKind::StringLiteral => "a string literal",
            TokenKind::Identifier => "an identifier",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no token rule matches the input at offset {offset}: {remaining:?}")]
pub struct LexError {
    /// Byte offset of the first unconsumable character.
    pub offset: usize,
    /// The exact suffix of the source that could not be classified.
    pub remaining: String,
}

struct TokenDef {
    regex: Regex,
    token: Token,
}

impl TokenDef {
    fn new(pattern: &str, token: Token) -> Self {
        Self {
            regex: Regex::new(pattern).unwrap(),
            token,
        }
    }
}

lazy_static! {
    // Tried in order; the first match wins. Fixed keywords have to come
    // before the generic identifier rule or they would never be produced.
    static ref TOKEN_DEFS: Vec<TokenDef> = vec![
        TokenDef::new("^include", Token::Include),
        TokenDef::new("^nativetype", Token::NativeType),
        TokenDef::new("^nativecomponent", Token::NativeComponent),
        TokenDef::new(r"^\(", Token::OpenParen),
        TokenDef::new(r"^\)", Token::CloseParen),
        TokenDef::new(r"^\{", Token::OpenBrace),
        TokenDef::new(r"^\}", Token::CloseBrace),
        TokenDef::new("^,", Token::Comma),
        TokenDef::new("^->", Token::Arrow),
        TokenDef::new("^;", Token::Semicolon),
        TokenDef::new("^::", Token::NamespaceSeparator),
        TokenDef::new("^method", Token::Method),
        TokenDef::new("^field", Token::Field),
        TokenDef::new("^property", Token::Property),
        TokenDef::new(r"^\.", Token::Period),
    ];
    static ref STRING_LITERAL: Regex = Regex::new(r#"^"([^"]*)""#).unwrap();
    static ref IDENTIFIER: Regex = Regex::new("^[A-Za-z_][A-Za-z0-9_]*").unwrap();
    static ref SKIP: Regex = Regex::new(r"^(?:\s+|//[^\n]*)").unwrap();
}

/// Turns a binding definition source into a flat token stream.
///
/// Whitespace and `//` line comments are consumed without producing tokens.
/// Fails at the first position where no rule matches, naming the exact
/// unconsumed remainder.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut rest = source;

    'outer: while !rest.is_empty() {
        for def in TOKEN_DEFS.iter() {
            if let Some(m) = def.regex.find(rest) {
                tokens.push(def.token.clone());
                rest = &rest[m.end()..];
                continue 'outer;
            }
        }

        if let Some(captures) = STRING_LITERAL.captures(rest) {
            tokens.push(Token::StringLiteral(captures[1].to_owned()));
            rest = &rest[captures[0].len()..];
        } else if let Some(m) = IDENTIFIER.find(rest) {
            tokens.push(Token::Identifier(m.as_str().to_owned()));
            rest = &rest[m.end()..];
        } else if let Some(m) = SKIP.find(rest) {
            rest = &rest[m.end()..];
        } else {
            return Err(LexError {
                offset: source.len() - rest.len(),
                remaining: rest.to_owned(),
            });
        }
    }

    Ok(tokens)
}
