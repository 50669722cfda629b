//! SQL query support for datasets.
//!
//! Only the subset needed to read a dataset back is supported:
//!
//! ```text
//! SELECT ( '*' | ident (',' ident)* ) FROM ident [LIMIT int] [';']
//! ```
//!
//! Tokens may be separated by any whitespace, including newlines, tabs and
//! carriage returns. Two statements with the same tokens always produce the
//! same result.
//!
//! # Example
//!
//! ```ignore
//! let select = query::parse("select *\nfrom x")?;
//! let rows = query::execute(&select, &registry)?;
//! ```

pub mod executor;
pub mod lexer;
pub mod parser;

pub use executor::execute;
pub use lexer::{Token, tokenize};
pub use parser::{Projection, Select, parse};

/// Errors produced while parsing or running a query.
#[derive(Debug, PartialEq, Eq)]
pub enum QueryError {
    /// The statement is not valid SQL for this server.
    Syntax { offset: usize, message: String },
    /// The statement names a dataset that does not exist.
    DatasetNotFound(String),
    /// The dataset lock was poisoned.
    LockPoisoned,
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax { offset, message } => {
                write!(f, "syntax error at offset {offset}: {message}")
            }
            Self::DatasetNotFound(id) => write!(f, "dataset '{id}' not found"),
            Self::LockPoisoned => write!(f, "dataset lock poisoned"),
        }
    }
}

impl std::error::Error for QueryError {}
