//! Token stream → query AST.
//!
//! Recursive-descent parser for the grammar in spec.md §4.5, with
//! precedence `OR < AND < NOT < primary` and left-associative `AND`/`OR`.
//! Two adjacent primaries with no explicit operator between them (`fox
//! dog`) are *not* an implicit `AND` — the grammar requires an explicit
//! `AND`/`OR`/`+` between primaries, so a bare juxtaposition like that
//! leaves a trailing token and fails with [`ParseError::TrailingTokens`].

use thiserror::Error;

use super::ast::QueryNode;
use super::lexer::Token;

/// A failure building a [`QueryNode`] from a token stream.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A term, phrase, `(`, or `NOT` was expected but the token stream ended.
    #[error("expected a term, phrase, '(' or NOT, found end of query")]
    UnexpectedEof,

    /// A token appeared where no primary expression could start.
    #[error("unexpected token: {found:?}")]
    UnexpectedToken { found: Token },

    /// A `(` was never closed by a matching `)`.
    #[error("unmatched '('")]
    UnmatchedLeftParen,

    /// Tokens remained after a complete query was parsed.
    #[error("unexpected trailing input: {found:?}")]
    TrailingTokens { found: Token },
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// `or_expr := and_expr (OR and_expr)*`
    fn parse_or(&mut self) -> Result<QueryNode, ParseError> {
        let mut left = self.parse_and()?;
        while matches!(self.peek(), Token::Or) {
            self.advance();
            let right = self.parse_and()?;
            left = QueryNode::or(left, right);
        }
        Ok(left)
    }

    /// `and_expr := not_expr ("AND" not_expr)*`
    fn parse_and(&mut self) -> Result<QueryNode, ParseError> {
        let mut left = self.parse_not()?;
        while matches!(self.peek(), Token::And) {
            self.advance();
            let right = self.parse_not()?;
            left = QueryNode::and(left, right);
        }
        Ok(left)
    }

    /// `not_expr := NOT not_expr | primary`
    fn parse_not(&mut self) -> Result<QueryNode, ParseError> {
        if matches!(self.peek(), Token::Not) {
            self.advance();
            let operand = self.parse_not()?;
            Ok(QueryNode::not(operand))
        } else {
            self.parse_primary()
        }
    }

    /// `primary := KEYWORD | PHRASE | '(' or_expr ')'`
    fn parse_primary(&mut self) -> Result<QueryNode, ParseError> {
        match self.advance() {
            Token::Keyword(word) => Ok(QueryNode::Term(word)),
            Token::Phrase(text) => Ok(QueryNode::Phrase(text)),
            Token::LeftParen => {
                let inner = self.parse_or()?;
                match self.peek() {
                    Token::RightParen => {
                        self.advance();
                        Ok(inner)
                    }
                    _ => Err(ParseError::UnmatchedLeftParen),
                }
            }
            Token::Eof => Err(ParseError::UnexpectedEof),
            other => Err(ParseError::UnexpectedToken { found: other }),
        }
    }
}

/// Parses a complete token stream (as produced by [`super::lexer::lex`])
/// into a [`QueryNode`].
pub fn parse(tokens: Vec<Token>) -> Result<QueryNode, ParseError> {
    let mut parser = Parser { tokens, pos: 0 };
    let node = parser.parse_or()?;
    match parser.peek() {
        Token::Eof => Ok(node),
        _ => Err(ParseError::TrailingTokens {
            found: parser.advance(),
        }),
    }
}
