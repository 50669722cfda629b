//! SQL tokenizer.

use super::QueryError;

/// A token with the byte offset where it starts.
#[derive(Debug, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub offset: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Token {
    /// A bare word. Keywords are bare words too; the parser matches them
    /// case-insensitively.
    Word(String),
    /// A `"double quoted"` identifier. `""` inside the quotes is a literal `"`.
    QuotedIdent(String),
    Integer(u64),
    Star,
    Comma,
    Semicolon,
}

impl Token {
    /// Returns `true` if this is the given keyword, ignoring case.
    #[must_use]
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, Self::Word(w) if w.eq_ignore_ascii_case(keyword))
    }
}

/// Split a statement into tokens.
///
/// # Errors
///
/// Returns `QueryError::Syntax` on an unterminated quoted identifier, an
/// integer that does not fit in `u64`, or an unexpected character.
pub fn tokenize(sql: &str) -> Result<Vec<Spanned>, QueryError> {
    let mut tokens = Vec::new();
    let mut chars = sql.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let token = match c {
            '*' => {
                chars.next();
                Token::Star
            }
            ',' => {
                chars.next();
                Token::Comma
            }
            ';' => {
                chars.next();
                Token::Semicolon
            }
            '"' => {
                chars.next();
                let mut ident = String::new();
                loop {
                    match chars.next() {
                        Some((_, '"')) => {
                            if matches!(chars.peek(), Some((_, '"'))) {
                                chars.next();
                                ident.push('"');
                            } else {
                                break;
                            }
                        }
                        Some((_, ch)) => ident.push(ch),
                        None => {
                            return Err(QueryError::Syntax {
                                offset,
                                message: "unterminated quoted identifier".to_string(),
                            });
                        }
                    }
                }
                Token::QuotedIdent(ident)
            }
            c if c.is_ascii_digit() => {
                let mut digits = String::new();
                while let Some(&(_, ch)) = chars.peek() {
                    if !ch.is_ascii_digit() {
                        break;
                    }
                    digits.push(ch);
                    chars.next();
                }
                let value = digits.parse::<u64>().map_err(|_| QueryError::Syntax {
                    offset,
                    message: format!("integer '{digits}' is out of range"),
                })?;
                Token::Integer(value)
            }
            c if is_word_start(c) => {
                let mut word = String::new();
                while let Some(&(_, ch)) = chars.peek() {
                    if !is_word_char(ch) {
                        break;
                    }
                    word.push(ch);
                    chars.next();
                }
                Token::Word(word)
            }
            other => {
                return Err(QueryError::Syntax {
                    offset,
                    message: format!("unexpected character {other:?}"),
                });
            }
        };

        tokens.push(Spanned { token, offset });
    }

    Ok(tokens)
}

const fn is_word_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

const fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(sql: &str) -> Vec<Token> {
        tokenize(sql).unwrap().into_iter().map(|s| s.token).collect()
    }

    fn word(w: &str) -> Token {
        Token::Word(w.to_string())
    }

    #[test]
    fn test_single_line() {
        assert_eq!(
            tokens("select * from x"),
            vec![word("select"), Token::Star, word("from"), word("x")]
        );
    }

    #[test]
    fn test_newline_separates_tokens() {
        assert_eq!(tokens("select *\nfrom x"), tokens("select * from x"));
        assert_eq!(tokens("select\r\n*\r\nfrom\r\nx"), tokens("select * from x"));
        assert_eq!(tokens("\n\tselect\t*\n\n from  x\n"), tokens("select * from x"));
    }

    #[test]
    fn test_newline_ends_word() {
        // A newline directly after a word must not be glued onto it.
        assert_eq!(tokens("select a\nfrom x")[1], word("a"));
    }

    #[test]
    fn test_offsets() {
        let spanned = tokenize("select *\nfrom x").unwrap();
        let offsets: Vec<usize> = spanned.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0, 7, 9, 14]);
    }

    #[test]
    fn test_quoted_identifier() {
        assert_eq!(
            tokens(r#"select "my col", "a""b" from x"#),
            vec![
                word("select"),
                Token::QuotedIdent("my col".to_string()),
                Token::Comma,
                Token::QuotedIdent("a\"b".to_string()),
                word("from"),
                word("x"),
            ]
        );
    }

    #[test]
    fn test_quoted_identifier_keeps_newline() {
        assert_eq!(
            tokens("\"a\nb\""),
            vec![Token::QuotedIdent("a\nb".to_string())]
        );
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(
            tokenize("select \"abc").unwrap_err(),
            QueryError::Syntax {
                offset: 7,
                message: "unterminated quoted identifier".to_string()
            }
        );
    }

    #[test]
    fn test_unexpected_character() {
        assert!(matches!(
            tokenize("select * from x where a = 1"),
            Err(QueryError::Syntax { offset: 24, .. })
        ));
    }

    #[test]
    fn test_integer_and_semicolon() {
        assert_eq!(
            tokens("limit 10;"),
            vec![word("limit"), Token::Integer(10), Token::Semicolon]
        );
    }

    #[test]
    fn test_keyword_case_insensitive() {
        assert!(word("SeLeCt").is_keyword("select"));
        assert!(!Token::QuotedIdent("select".to_string()).is_keyword("select"));
    }
}
