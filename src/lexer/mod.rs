//! Converts ASN.1 module source text into a flat stream of [`Token`]s.
//!
//! A cursor-driven, longest-match-per-position lexer, shaped for ASN.1's
//! lexical quirks:
//! quoted bit/hex strings that must be matched before the bare `'`
//! punctuation, `--` comments instead of `#`, and multi-character operators
//! (`::=`, `...`, `..`, `[[`, `]]`) that must be tried before their
//! single-character prefixes.

mod cursor;
mod lookup;

use crate::error::ParseError;
use crate::limit::LimitTracker;
use crate::token::{Token, TokenKind};
use cursor::Cursor;

/// Tokenizes `source`, stopping early with a [`ParseError::Limit`] if more
/// than `token_limit` tokens would be produced.
pub(crate) fn tokenize(source: &str, token_limit: usize) -> Result<Vec<Token<'_>>, ParseError> {
    let mut tokens = Vec::new();
    let mut cursor = Cursor::new(source);
    let mut limit = LimitTracker::new(token_limit);

    loop {
        cursor.skip_trivia();
        if cursor.is_eof() {
            break;
        }
        limit.consume();
        if limit.limited() {
            return Err(ParseError::limit(
                "token limit exceeded while lexing",
                cursor.line(),
                cursor.column(),
            ));
        }
        tokens.push(cursor.next_token());
    }

    tokens.push(Token::new(TokenKind::Eof, "", cursor.line(), cursor.column(), cursor.offset()));
    Ok(tokens)
}

impl<'a> Cursor<'a> {
    /// Skips whitespace and `--` comments. Comments run to the next `--` or
    /// to end-of-line, whichever comes first; both are simply dropped
    /// ASN.1 comments never need to survive into the token stream, so
    /// positions are tracked but no token is emitted.
    fn skip_trivia(&mut self) {
        loop {
            let before = self.offset();
            self.bump_while(is_whitespace);
            if self.first() == Some('-') && self.second() == Some('-') {
                self.bump();
                self.bump();
                loop {
                    match self.first() {
                        None => break,
                        Some('\n') => break,
                        Some('-') if self.second() == Some('-') => {
                            self.bump();
                            self.bump();
                            break;
                        }
                        Some(_) => {
                            self.bump();
                        }
                    }
                }
            }
            if self.offset() == before {
                break;
            }
        }
    }

    fn next_token(&mut self) -> Token<'a> {
        let start = self.offset();
        let line = self.line();
        let column = self.column();
        let c = self.first().expect("next_token called at EOF");

        let kind = match c {
            '\'' => {
                if let Some(kind) = self.quoted_string() {
                    kind
                } else {
                    self.bump();
                    TokenKind::Unknown
                }
            }
            '"' => self.cstring(),
            c if c.is_ascii_digit() => self.number(),
            c if c.is_ascii_alphabetic() => self.identifier_or_reference(c),
            ':' => {
                self.bump();
                if self.first() == Some(':') && self.second() == Some('=') {
                    self.bump();
                    self.bump();
                    TokenKind::Assign
                } else {
                    TokenKind::Colon
                }
            }
            '.' => {
                self.bump();
                if self.first() == Some('.') {
                    self.bump();
                    if self.first() == Some('.') {
                        self.bump();
                        TokenKind::Ellipsis
                    } else {
                        TokenKind::Range
                    }
                } else {
                    TokenKind::Dot
                }
            }
            '[' => {
                self.bump();
                if self.first() == Some('[') {
                    self.bump();
                    TokenKind::VersionOpen
                } else {
                    TokenKind::LBracket
                }
            }
            ']' => {
                self.bump();
                if self.first() == Some(']') {
                    self.bump();
                    TokenKind::VersionClose
                } else {
                    TokenKind::RBracket
                }
            }
            c => {
                self.bump();
                match lookup::punctuation_kind(c) {
                    Some(kind) => kind,
                    None => TokenKind::Unknown,
                }
            }
        };

        Token::new(kind, self.text_from(start), line, column, start)
    }

    /// Attempts to consume a `'…'B` or `'…'H` literal starting at the
    /// current `'`. Returns `None` (without consuming anything beyond the
    /// opening quote check) if the content doesn't end in `B` or `H`, in
    /// which case the caller treats the quote as an unrecognized character —
    /// ASN.1 has no other use for a bare `'`.
    fn quoted_string(&mut self) -> Option<TokenKind> {
        let mut lookahead = self.clone();
        lookahead.bump(); // opening quote
        lookahead.bump_while(|c| matches!(c, '0' | '1' | ' ' | '\t' | '\r' | '\n'));
        if lookahead.first() == Some('\'') {
            let mut probe = lookahead.clone();
            probe.bump();
            if probe.first() == Some('B') {
                probe.bump();
                *self = probe;
                return Some(TokenKind::BString);
            }
        }

        let mut lookahead = self.clone();
        lookahead.bump();
        lookahead.bump_while(|c| c.is_ascii_hexdigit() || matches!(c, ' ' | '\t' | '\r' | '\n'));
        if lookahead.first() == Some('\'') {
            let mut probe = lookahead.clone();
            probe.bump();
            if probe.first() == Some('H') {
                probe.bump();
                *self = probe;
                return Some(TokenKind::HString);
            }
        }

        None
    }

    fn cstring(&mut self) -> TokenKind {
        self.bump(); // opening quote
        loop {
            match self.first() {
                None => break,
                Some('"') => {
                    self.bump();
                    // a doubled quote is an escaped quote inside the string
                    if self.first() == Some('"') {
                        self.bump();
                        continue;
                    }
                    break;
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
        TokenKind::CString
    }

    fn number(&mut self) -> TokenKind {
        self.bump_while(|c| c.is_ascii_digit());
        TokenKind::Number
    }

    fn identifier_or_reference(&mut self, first: char) -> TokenKind {
        self.bump();
        self.bump_while(is_identifier_continue);
        if first.is_ascii_uppercase() {
            TokenKind::TypeReference
        } else {
            TokenKind::Identifier
        }
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// ASN.1 identifiers and references allow internal hyphens but not a
/// trailing one or two consecutive ones; the lexer is permissive here and
/// leaves that refinement to the grammar layer, keeping the lexer dumb
/// and pushing shape validation upward.
fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src, 10_000)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lexes_module_header() {
        use TokenKind::*;
        assert_eq!(
            kinds("M DEFINITIONS ::= BEGIN END"),
            vec![
                TypeReference,
                TypeReference,
                Assign,
                TypeReference,
                TypeReference,
                Eof
            ]
        );
    }

    #[test]
    fn lexes_bstring_before_punctuation() {
        let tokens = tokenize("'0101'B", 100).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::BString);
        assert_eq!(tokens[0].text, "'0101'B");
    }

    #[test]
    fn lexes_hstring() {
        let tokens = tokenize("'DE AD'H", 100).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::HString);
        assert_eq!(tokens[0].text, "'DE AD'H");
    }

    #[test]
    fn comment_preserves_positions() {
        let tokens = tokenize("A -- a comment\n ::= INTEGER", 100).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::TypeReference);
        assert_eq!(tokens[1].kind, TokenKind::Assign);
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn dotted_operators_are_greedy() {
        assert_eq!(kinds("...").as_slice(), [TokenKind::Ellipsis, TokenKind::Eof]);
        assert_eq!(kinds("..").as_slice(), [TokenKind::Range, TokenKind::Eof]);
        assert_eq!(kinds(".").as_slice(), [TokenKind::Dot, TokenKind::Eof]);
        assert_eq!(
            kinds("[[").as_slice(),
            [TokenKind::VersionOpen, TokenKind::Eof]
        );
        assert_eq!(
            kinds("]]").as_slice(),
            [TokenKind::VersionClose, TokenKind::Eof]
        );
    }

    #[test]
    fn identifier_case_determines_kind() {
        assert_eq!(
            kinds("lowerCamel UpperCamel"),
            vec![
                TokenKind::Identifier,
                TokenKind::TypeReference,
                TokenKind::Eof
            ]
        );
    }
}
