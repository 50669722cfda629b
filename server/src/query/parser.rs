//! Parser for the supported `SELECT` statement.

use super::QueryError;
use super::lexer::{Spanned, Token, tokenize};

/// What a `SELECT` returns for each row.
#[derive(Debug, PartialEq, Eq)]
pub enum Projection {
    /// `*`: every cell.
    All,
    /// Only these columns, in this order.
    Columns(Vec<String>),
}

/// A parsed `SELECT` statement.
#[derive(Debug, PartialEq, Eq)]
pub struct Select {
    pub projection: Projection,
    pub from: String,
    pub limit: Option<u64>,
}

/// Parse a SQL statement.
///
/// # Errors
///
/// Returns `QueryError::Syntax` if the statement is not a supported `SELECT`.
pub fn parse(sql: &str) -> Result<Select, QueryError> {
    let tokens = tokenize(sql)?;
    Parser {
        tokens: &tokens,
        position: 0,
        end: sql.len(),
    }
    .select()
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    position: usize,
    /// Offset reported for errors at end of input.
    end: usize,
}

impl Parser<'_> {
    fn select(mut self) -> Result<Select, QueryError> {
        self.expect_keyword("select")?;
        let projection = self.projection()?;
        self.expect_keyword("from")?;
        let from = self.identifier("dataset name")?;

        let limit = if self.peek().is_some_and(|t| t.is_keyword("limit")) {
            self.position += 1;
            Some(self.integer()?)
        } else {
            None
        };

        if matches!(self.peek(), Some(Token::Semicolon)) {
            self.position += 1;
        }

        if let Some(extra) = self.tokens.get(self.position) {
            return Err(QueryError::Syntax {
                offset: extra.offset,
                message: format!("unexpected {:?} after end of statement", extra.token),
            });
        }

        Ok(Select {
            projection,
            from,
            limit,
        })
    }

    fn projection(&mut self) -> Result<Projection, QueryError> {
        if matches!(self.peek(), Some(Token::Star)) {
            self.position += 1;
            return Ok(Projection::All);
        }

        let mut columns = vec![self.identifier("column name or '*'")?];
        while matches!(self.peek(), Some(Token::Comma)) {
            self.position += 1;
            columns.push(self.identifier("column name")?);
        }
        Ok(Projection::Columns(columns))
    }

    fn identifier(&mut self, what: &str) -> Result<String, QueryError> {
        match self.tokens.get(self.position) {
            Some(Spanned {
                token: Token::Word(w),
                offset,
            }) => {
                if is_reserved(w) {
                    return Err(QueryError::Syntax {
                        offset: *offset,
                        message: format!("expected {what}, found keyword '{w}'"),
                    });
                }
                self.position += 1;
                Ok(w.to_owned())
            }
            Some(Spanned {
                token: Token::QuotedIdent(ident),
                ..
            }) => {
                self.position += 1;
                Ok(ident.to_owned())
            }
            other => Err(self.unexpected(other, what)),
        }
    }

    fn integer(&mut self) -> Result<u64, QueryError> {
        match self.tokens.get(self.position) {
            Some(Spanned {
                token: Token::Integer(n),
                ..
            }) => {
                self.position += 1;
                Ok(*n)
            }
            other => Err(self.unexpected(other, "integer")),
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<(), QueryError> {
        let current = self.tokens.get(self.position);
        if current.is_some_and(|s| s.token.is_keyword(keyword)) {
            self.position += 1;
            Ok(())
        } else {
            Err(self.unexpected(current, &keyword.to_ascii_uppercase()))
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position).map(|s| &s.token)
    }

    fn unexpected(&self, found: Option<&Spanned>, expected: &str) -> QueryError {
        match found {
            Some(spanned) => QueryError::Syntax {
                offset: spanned.offset,
                message: format!("expected {expected}, found {:?}", spanned.token),
            },
            None => QueryError::Syntax {
                offset: self.end,
                message: format!("expected {expected}, found end of statement"),
            },
        }
    }
}

fn is_reserved(word: &str) -> bool {
    ["select", "from", "limit"]
        .iter()
        .any(|k| word.eq_ignore_ascii_case(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_star() {
        assert_eq!(
            parse("select * from x").unwrap(),
            Select {
                projection: Projection::All,
                from: "x".to_string(),
                limit: None,
            }
        );
    }

    #[test]
    fn test_newline_variants_parse_identically() {
        let single = parse("select * from x").unwrap();
        for sql in [
            "select *\nfrom x",
            "select\n*\nfrom\nx",
            "SELECT *\r\nFROM x",
            "select\t*\tfrom\tx\n",
            "\nselect * from x;\n",
        ] {
            assert_eq!(parse(sql).unwrap(), single, "{sql:?}");
        }
    }

    #[test]
    fn test_column_list_and_limit() {
        assert_eq!(
            parse("select a,\n \"b c\" from data.v2 limit 5").unwrap(),
            Select {
                projection: Projection::Columns(vec!["a".to_string(), "b c".to_string()]),
                from: "data.v2".to_string(),
                limit: Some(5),
            }
        );
    }

    #[test]
    fn test_missing_from() {
        assert_eq!(
            parse("select *").unwrap_err(),
            QueryError::Syntax {
                offset: 8,
                message: "expected FROM, found end of statement".to_string()
            }
        );
    }

    #[test]
    fn test_keyword_as_dataset_name() {
        assert!(matches!(
            parse("select * from from"),
            Err(QueryError::Syntax { offset: 14, .. })
        ));
    }

    #[test]
    fn test_trailing_tokens() {
        assert!(matches!(
            parse("select * from x y"),
            Err(QueryError::Syntax { offset: 16, .. })
        ));
    }

    #[test]
    fn test_limit_requires_integer() {
        assert!(matches!(
            parse("select * from x limit all"),
            Err(QueryError::Syntax { offset: 22, .. })
        ));
    }

    #[test]
    fn test_empty_statement() {
        assert!(matches!(parse(""), Err(QueryError::Syntax { offset: 0, .. })));
        assert!(matches!(parse(" \n "), Err(QueryError::Syntax { offset: 3, .. })));
    }
}
