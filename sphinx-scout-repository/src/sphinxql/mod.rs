//! SphinxQL statements and the MySQL-protocol client that executes them.
//!
//! Statements are plain values rendered to SphinxQL text; the client sends
//! that text to the daemon and decodes result rows.

mod client;
mod escape;
mod statement;

pub use client::{MySqlSphinxClient, DEFAULT_PORT};
pub use escape::{escape_match, quote_identifier, quote_string};
pub use statement::{
    DeleteStatement, MatchClause, OrderClause, ReplaceStatement, SelectStatement, Statement,
    TruncateStatement,
};
