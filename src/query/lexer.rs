//! Query string → token stream.
//!
//! Recognizes parentheses, quoted phrases, the `AND`/`OR`/`NOT` keywords
//! (case-insensitive), their `+`/`-` shorthand, and bare terms. Per spec.md
//! §9 Open Question 4, stopword filtering — the same closed list the
//! document [`crate::tokenizer::Tokenizer`] uses — is applied to
//! [`Token::Keyword`] tokens only; operators, parentheses, and phrase
//! contents are never filtered.

use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

use crate::tokenizer::is_stopword;

/// A single query token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A bare, unquoted term.
    Keyword(String),
    /// The verbatim text between a pair of double quotes.
    Phrase(String),
    And,
    Or,
    Not,
    LeftParen,
    RightParen,
    /// End of input. Terminates every token stream produced by [`lex`].
    Eof,
}

/// A failure tokenizing a query string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LexError {
    /// A `"` was opened but the input ended before a matching `"`.
    #[error("unterminated phrase starting at byte offset {at}")]
    UnterminatedPhrase { at: usize },
}

/// Returns true for characters that may appear inside a bare term: the same
/// alphabet the document tokenizer extracts, plus uppercase (folded to
/// lowercase by the caller before stopword comparison — the lexer itself
/// preserves case in the returned text only for phrases).
fn is_term_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '\'' || c == '-'
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    /// Byte offset of the next character, for error reporting.
    offset: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            offset: 0,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.offset += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.chars.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn scan_phrase(&mut self) -> Result<Token, LexError> {
        let start = self.offset;
        self.bump(); // opening quote
        let mut text = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(Token::Phrase(text)),
                Some(c) => text.push(c),
                None => return Err(LexError::UnterminatedPhrase { at: start }),
            }
        }
    }

    fn scan_word(&mut self) -> String {
        let mut word = String::new();
        while matches!(self.chars.peek(), Some(&c) if is_term_char(c)) {
            word.push(self.bump().expect("peeked"));
        }
        word
    }

    /// Scans the entire input into a token stream, terminated by `Eof`.
    fn lex(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            match self.chars.peek() {
                None => {
                    tokens.push(Token::Eof);
                    return Ok(tokens);
                }
                Some('(') => {
                    self.bump();
                    tokens.push(Token::LeftParen);
                }
                Some(')') => {
                    self.bump();
                    tokens.push(Token::RightParen);
                }
                Some('"') => {
                    tokens.push(self.scan_phrase()?);
                }
                Some('+') => {
                    self.bump();
                    tokens.push(Token::And);
                }
                Some('-') => {
                    self.bump();
                    tokens.push(Token::Not);
                }
                Some(&c) if is_term_char(c) => {
                    let word = self.scan_word();
                    let lower = word.to_lowercase();
                    match lower.as_str() {
                        "and" => tokens.push(Token::And),
                        "or" => tokens.push(Token::Or),
                        "not" => tokens.push(Token::Not),
                        _ if is_stopword(&lower) => {}
                        _ => tokens.push(Token::Keyword(word)),
                    }
                }
                Some(_) => {
                    // Unrecognized punctuation is silently skipped rather
                    // than rejected — a bare "!" or "," between terms is
                    // common in copy-pasted queries and carries no meaning.
                    self.bump();
                }
            }
        }
    }
}

/// Tokenizes `input` per the grammar in spec.md §4.4.
pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).lex()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_terms() {
        let tokens = lex("fox dog").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Keyword("fox".into()),
                Token::Keyword("dog".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn bare_keyword_preserves_original_case() {
        let tokens = lex("Fox DOG").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Keyword("Fox".into()),
                Token::Keyword("DOG".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn keyword_operators_case_insensitive() {
        let tokens = lex("fox AND dog or NOT cat").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Keyword("fox".into()),
                Token::And,
                Token::Keyword("dog".into()),
                Token::Or,
                Token::Not,
                Token::Keyword("cat".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn shorthand_operators() {
        let tokens = lex("+cat -dog").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::And,
                Token::Keyword("cat".into()),
                Token::Not,
                Token::Keyword("dog".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn shorthand_not_recognized_mid_word() {
        let tokens = lex("well-known e-mail").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Keyword("well-known".into()),
                Token::Keyword("e-mail".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn quoted_phrase_is_verbatim() {
        let tokens = lex(r#""Quick Brown Fox""#).unwrap();
        assert_eq!(
            tokens,
            vec![Token::Phrase("Quick Brown Fox".into()), Token::Eof]
        );
    }

    #[test]
    fn unterminated_phrase_is_an_error() {
        let err = lex(r#"fox "unterminated"#).unwrap_err();
        assert_eq!(err, LexError::UnterminatedPhrase { at: 4 });
    }

    #[test]
    fn parens() {
        let tokens = lex("(fox or dog)").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LeftParen,
                Token::Keyword("fox".into()),
                Token::Or,
                Token::Keyword("dog".into()),
                Token::RightParen,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn stopwords_are_dropped_from_keyword_stream() {
        let tokens = lex("the fox and the dog").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Keyword("fox".into()),
                Token::And,
                Token::Keyword("dog".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn stopword_only_query_lexes_to_just_eof() {
        let tokens = lex("the a of").unwrap();
        assert_eq!(tokens, vec![Token::Eof]);
    }

    #[test]
    fn empty_query_lexes_to_just_eof() {
        assert_eq!(lex("").unwrap(), vec![Token::Eof]);
        assert_eq!(lex("   ").unwrap(), vec![Token::Eof]);
    }
}
