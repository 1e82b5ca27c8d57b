//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use serde_json::{Map, Value};

use sphinx_scout_shared::{FieldValue, Filter, RawResultRow, SearchQuery};

#[derive(Parser, Debug)]
#[command(name = "sphinx-scout")]
#[command(about = "Query and maintain Sphinx/Manticore indexes over SphinxQL", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// SphinxQL listener URL (overrides SPHINX_URL)
    #[arg(long, global = true)]
    pub url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a full-text search and print the raw rows as JSON lines
    Search {
        /// Full-text query, sent as-is
        query: String,

        /// Index to search
        #[arg(long)]
        index: String,

        /// Equality filter as field=value (repeatable)
        #[arg(long = "where", value_parser = parse_filter)]
        filters: Vec<Filter>,

        /// Maximum number of rows
        #[arg(long)]
        limit: Option<usize>,

        /// Rows to skip
        #[arg(long, default_value = "0")]
        offset: usize,

        /// 1-based page number; overrides --offset and --limit
        #[arg(long, requires = "per_page")]
        page: Option<usize>,

        /// Page size used with --page
        #[arg(long, requires = "page")]
        per_page: Option<usize>,
    },

    /// Remove every document from a real-time index
    Flush {
        /// Index to truncate
        #[arg(long)]
        index: String,
    },

    /// Check that the daemon answers
    Health,
}

/// Build the search query described by the `search` arguments.
pub fn build_query(
    index: &str,
    text: &str,
    filters: &[Filter],
    limit: Option<usize>,
    offset: usize,
) -> SearchQuery {
    let mut query = SearchQuery::new(index, text).offset(offset);
    if let Some(limit) = limit {
        query = query.limit(limit);
    }
    for filter in filters {
        query = query.filter(filter.clone());
    }
    query
}

/// Parse `field=value` into an equality filter.
pub fn parse_filter(raw: &str) -> Result<Filter, String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected field=value, got '{}'", raw))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{}'", raw));
    }
    Ok(Filter::eq(field, parse_value(value.trim())))
}

/// Interpret a command-line literal as the narrowest matching value.
pub fn parse_value(raw: &str) -> FieldValue {
    if let Ok(v) = raw.parse::<i64>() {
        return FieldValue::Int(v);
    }
    if let Ok(v) = raw.parse::<u64>() {
        return FieldValue::UInt(v);
    }
    if let Ok(v) = raw.parse::<f64>() {
        if v.is_finite() {
            return FieldValue::Float(v);
        }
    }
    FieldValue::Text(raw.to_string())
}

/// Render a raw row as a JSON object.
pub fn row_to_json(row: &RawResultRow) -> Result<Value, serde_json::Error> {
    let mut object = Map::new();
    for (name, value) in row.fields().iter() {
        object.insert(name.to_string(), serde_json::to_value(value)?);
    }
    Ok(Value::Object(object))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use sphinx_scout_shared::FieldMap;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search_command() {
        let cli = Cli::try_parse_from([
            "sphinx-scout",
            "search",
            "search query",
            "--index",
            "table",
            "--where",
            "foo=1",
            "--limit",
            "5",
        ])
        .unwrap();

        match cli.command {
            Commands::Search {
                query,
                index,
                filters,
                limit,
                offset,
                page,
                ..
            } => {
                assert_eq!(query, "search query");
                assert_eq!(index, "table");
                assert_eq!(filters, vec![Filter::eq("foo", 1i64)]);
                assert_eq!(limit, Some(5));
                assert_eq!(offset, 0);
                assert!(page.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_page_and_per_page_go_together() {
        let per_page_only = Cli::try_parse_from([
            "sphinx-scout", "search", "q", "--index", "table", "--per-page", "10",
        ]);
        assert!(per_page_only.is_err());

        let page_only =
            Cli::try_parse_from(["sphinx-scout", "search", "q", "--index", "table", "--page", "2"]);
        assert!(page_only.is_err());

        let cli = Cli::try_parse_from([
            "sphinx-scout", "search", "q", "--index", "table", "--page", "2", "--per-page", "10",
        ])
        .unwrap();
        match cli.command {
            Commands::Search { page, per_page, .. } => {
                assert_eq!(page, Some(2));
                assert_eq!(per_page, Some(10));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!(parse_filter("foo=1").unwrap(), Filter::eq("foo", 1i64));
        assert_eq!(
            parse_filter("title = hello").unwrap(),
            Filter::eq("title", "hello")
        );
        assert!(parse_filter("novalue").is_err());
        assert!(parse_filter("=3").is_err());
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("-4"), FieldValue::Int(-4));
        assert_eq!(parse_value("18446744073709551615"), FieldValue::UInt(u64::MAX));
        assert_eq!(parse_value("2.5"), FieldValue::Float(2.5));
        assert_eq!(parse_value("NaN"), FieldValue::Text("NaN".to_string()));
        assert_eq!(parse_value("abc"), FieldValue::Text("abc".to_string()));
    }

    #[test]
    fn test_build_query() {
        let query = build_query("table", "q", &[Filter::eq("foo", 1)], Some(10), 30);
        assert_eq!(query.index(), "table");
        assert_eq!(query.filters().len(), 1);
        assert_eq!(query.get_limit(), Some(10));
        assert_eq!(query.get_offset(), 30);
    }

    #[test]
    fn test_row_to_json() {
        let row = RawResultRow::new(FieldMap::new().with("id", 1u64).with("title", "Some text"));
        let json = row_to_json(&row).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Some text");
    }
}
