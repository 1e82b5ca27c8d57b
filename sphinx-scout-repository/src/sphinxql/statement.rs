//! SphinxQL statement values.
//!
//! Each statement is built with consuming builder methods and rendered once by
//! the executor. Rendering validates what the daemon would otherwise reject
//! with a less useful message.

use crate::errors::SphinxError;
use crate::sphinxql::escape::{quote_identifier, quote_string, render_column, render_value};
use sphinx_scout_shared::{Condition, FieldValue, Filter, OrderDirection};

/// A statement that changes an index.
///
/// Selects are a separate type and only go through
/// `SphinxQlExecutor::query`, which returns their rows.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Replace(ReplaceStatement),
    Delete(DeleteStatement),
    Truncate(TruncateStatement),
}

impl Statement {
    /// Render the statement as SphinxQL text.
    pub fn to_sql(&self) -> Result<String, SphinxError> {
        match self {
            Statement::Replace(s) => s.to_sql(),
            Statement::Delete(s) => s.to_sql(),
            Statement::Truncate(s) => Ok(s.to_sql()),
        }
    }

    /// The index the statement targets.
    pub fn index(&self) -> &str {
        match self {
            Statement::Replace(s) => &s.index,
            Statement::Delete(s) => &s.index,
            Statement::Truncate(s) => &s.index,
        }
    }

    /// Short verb used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::Replace(_) => "replace",
            Statement::Delete(_) => "delete",
            Statement::Truncate(_) => "truncate",
        }
    }
}

impl From<ReplaceStatement> for Statement {
    fn from(s: ReplaceStatement) -> Self {
        Statement::Replace(s)
    }
}

impl From<DeleteStatement> for Statement {
    fn from(s: DeleteStatement) -> Self {
        Statement::Delete(s)
    }
}

impl From<TruncateStatement> for Statement {
    fn from(s: TruncateStatement) -> Self {
        Statement::Truncate(s)
    }
}

/// `REPLACE INTO index (columns) VALUES (row), (row), ...`
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceStatement {
    index: String,
    columns: Vec<String>,
    rows: Vec<Vec<FieldValue>>,
}

impl ReplaceStatement {
    /// Start a replace into `index`.
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Set the column list shared by every row.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Append one value row, in column order.
    pub fn values(mut self, row: Vec<FieldValue>) -> Self {
        self.rows.push(row);
        self
    }

    /// The target index.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// The column list.
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// The value rows, in insertion order.
    pub fn rows(&self) -> &[Vec<FieldValue>] {
        &self.rows
    }

    /// Render as SphinxQL, rejecting empty or ragged statements.
    pub fn to_sql(&self) -> Result<String, SphinxError> {
        if self.columns.is_empty() {
            return Err(SphinxError::invalid_statement("REPLACE without columns"));
        }
        if self.rows.is_empty() {
            return Err(SphinxError::invalid_statement("REPLACE without values"));
        }

        let columns: Vec<String> = self.columns.iter().map(|c| quote_identifier(c)).collect();
        let mut rows = Vec::with_capacity(self.rows.len());
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != self.columns.len() {
                return Err(SphinxError::invalid_statement(format!(
                    "row {} has {} values for {} columns",
                    i,
                    row.len(),
                    self.columns.len()
                )));
            }
            let values = row
                .iter()
                .map(render_value)
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(format!("({})", values.join(", ")));
        }

        Ok(format!(
            "REPLACE INTO {} ({}) VALUES {}",
            quote_identifier(&self.index),
            columns.join(", "),
            rows.join(", ")
        ))
    }
}

/// `DELETE FROM index WHERE ...`
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    index: String,
    filters: Vec<Filter>,
}

impl DeleteStatement {
    /// Start a delete from `index`.
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            filters: Vec::new(),
        }
    }

    /// Add a condition; conditions are joined with AND.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// The target index.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// The delete conditions.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Render as SphinxQL. A delete without a filter is rejected.
    pub fn to_sql(&self) -> Result<String, SphinxError> {
        if self.filters.is_empty() {
            return Err(SphinxError::invalid_statement("DELETE without a filter"));
        }
        Ok(format!(
            "DELETE FROM {} WHERE {}",
            quote_identifier(&self.index),
            render_filters(&self.filters)?
        ))
    }
}

/// A full-text match against a field set.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchClause {
    /// Field set token; `*` means every full-text field.
    pub field_set: String,
    /// Full-text expression, sent as-is.
    pub expression: String,
}

impl MatchClause {
    fn to_sql(&self) -> String {
        let inner = format!("(@{} {})", self.field_set, self.expression);
        format!("MATCH({})", quote_string(&inner))
    }
}

/// An `ORDER BY` item.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderClause {
    pub column: String,
    pub direction: OrderDirection,
}

/// `SELECT ... FROM index WHERE MATCH(...) AND ... ORDER BY ... LIMIT ... OPTION ...`
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    index: String,
    columns: Vec<String>,
    matches: Option<MatchClause>,
    filters: Vec<Filter>,
    orders: Vec<OrderClause>,
    offset: usize,
    limit: Option<usize>,
    options: Vec<(String, String)>,
}

impl SelectStatement {
    /// Start a select of every column from `index`.
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            columns: Vec::new(),
            matches: None,
            filters: Vec::new(),
            orders: Vec::new(),
            offset: 0,
            limit: None,
            options: Vec::new(),
        }
    }

    /// Select specific columns instead of `*`.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict rows to a full-text match on `field_set`.
    pub fn match_expression(
        mut self,
        field_set: impl Into<String>,
        expression: impl Into<String>,
    ) -> Self {
        self.matches = Some(MatchClause {
            field_set: field_set.into(),
            expression: expression.into(),
        });
        self
    }

    /// Add an attribute filter, joined with AND.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Append an ordering column or expression.
    pub fn order_by(mut self, column: impl Into<String>, direction: OrderDirection) -> Self {
        self.orders.push(OrderClause {
            column: column.into(),
            direction,
        });
        self
    }

    /// Set the `LIMIT offset, limit` window.
    pub fn limit(mut self, offset: usize, limit: usize) -> Self {
        self.offset = offset;
        self.limit = Some(limit);
        self
    }

    /// Append an `OPTION name=value` pair.
    pub fn option(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.options.push((name.into(), value.to_string()));
        self
    }

    /// The index being searched.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// The full-text match, if any.
    pub fn match_clause(&self) -> Option<&MatchClause> {
        self.matches.as_ref()
    }

    /// Attribute filters.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Ordering items, in priority order.
    pub fn orders(&self) -> &[OrderClause] {
        &self.orders
    }

    /// Rows skipped before the first returned row.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Maximum number of rows, if set.
    pub fn get_limit(&self) -> Option<usize> {
        self.limit
    }

    /// Query options as name/value pairs.
    pub fn options(&self) -> &[(String, String)] {
        &self.options
    }

    /// Render as SphinxQL.
    pub fn to_sql(&self) -> Result<String, SphinxError> {
        let columns = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns
                .iter()
                .map(|c| render_column(c))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let mut sql = format!("SELECT {} FROM {}", columns, quote_identifier(&self.index));

        let mut conditions = Vec::new();
        if let Some(m) = &self.matches {
            conditions.push(m.to_sql());
        }
        if !self.filters.is_empty() {
            conditions.push(render_filters(&self.filters)?);
        }
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        if !self.orders.is_empty() {
            let orders: Vec<String> = self
                .orders
                .iter()
                .map(|o| format!("{} {}", render_column(&o.column), o.direction.as_sql()))
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&orders.join(", "));
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}, {}", self.offset, limit));
        }

        if !self.options.is_empty() {
            let options: Vec<String> = self
                .options
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            sql.push_str(" OPTION ");
            sql.push_str(&options.join(", "));
        }

        Ok(sql)
    }
}

/// `TRUNCATE RTINDEX index`
#[derive(Debug, Clone, PartialEq)]
pub struct TruncateStatement {
    index: String,
}

impl TruncateStatement {
    /// Truncate the real-time index `index`.
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
        }
    }

    /// The target index.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Render as SphinxQL.
    pub fn to_sql(&self) -> String {
        format!("TRUNCATE RTINDEX {}", quote_identifier(&self.index))
    }
}

fn render_filters(filters: &[Filter]) -> Result<String, SphinxError> {
    let rendered = filters
        .iter()
        .map(render_filter)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rendered.join(" AND "))
}

fn render_filter(filter: &Filter) -> Result<String, SphinxError> {
    let column = quote_identifier(&filter.field);
    let op = filter.condition.operator();
    let operand = match &filter.condition {
        Condition::Eq(v)
        | Condition::NotEq(v)
        | Condition::Lt(v)
        | Condition::Lte(v)
        | Condition::Gt(v)
        | Condition::Gte(v) => render_value(v)?,
        Condition::In(values) | Condition::NotIn(values) => {
            if values.is_empty() {
                return Err(SphinxError::invalid_statement(format!(
                    "empty {} list for {}",
                    op, filter.field
                )));
            }
            let items = values
                .iter()
                .map(render_value)
                .collect::<Result<Vec<_>, _>>()?;
            format!("({})", items.join(", "))
        }
        Condition::Between(low, high) => {
            format!("{} AND {}", render_value(low)?, render_value(high)?)
        }
    };
    Ok(format!("{} {} {}", column, op, operand))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_sql() {
        let stmt = ReplaceStatement::new("table")
            .columns(["id", "title"])
            .values(vec![FieldValue::UInt(1), "Some text".into()])
            .values(vec![FieldValue::UInt(2), "It's here".into()]);

        assert_eq!(
            stmt.to_sql().unwrap(),
            "REPLACE INTO `table` (`id`, `title`) VALUES (1, 'Some text'), (2, 'It\\'s here')"
        );
    }

    #[test]
    fn test_replace_rejects_ragged_rows() {
        let stmt = ReplaceStatement::new("table")
            .columns(["id", "title"])
            .values(vec![FieldValue::UInt(1)]);

        assert!(matches!(
            stmt.to_sql(),
            Err(SphinxError::InvalidStatement(_))
        ));
    }

    #[test]
    fn test_replace_rejects_empty() {
        assert!(ReplaceStatement::new("table").to_sql().is_err());
        assert!(ReplaceStatement::new("table")
            .columns(["id"])
            .to_sql()
            .is_err());
    }

    #[test]
    fn test_delete_single_key() {
        let stmt = DeleteStatement::new("table").filter(Filter::eq("id", 1u64));
        assert_eq!(stmt.to_sql().unwrap(), "DELETE FROM `table` WHERE `id` = 1");
    }

    #[test]
    fn test_delete_many_keys() {
        let stmt = DeleteStatement::new("table").filter(Filter::is_in("id", [3u64, 1, 2]));
        assert_eq!(
            stmt.to_sql().unwrap(),
            "DELETE FROM `table` WHERE `id` IN (3, 1, 2)"
        );
    }

    #[test]
    fn test_delete_requires_filter() {
        assert!(DeleteStatement::new("table").to_sql().is_err());
    }

    #[test]
    fn test_select_sql() {
        let stmt = SelectStatement::new("table")
            .match_expression("*", "\"search query\"/1")
            .filter(Filter::eq("foo", 1))
            .filter(Filter::between("price", 10, 20))
            .order_by("WEIGHT()", OrderDirection::Desc)
            .order_by("id", OrderDirection::Asc)
            .limit(0, 20);

        assert_eq!(
            stmt.to_sql().unwrap(),
            "SELECT * FROM `table` WHERE MATCH('(@* \"search query\"/1)') AND `foo` = 1 \
             AND `price` BETWEEN 10 AND 20 ORDER BY WEIGHT() DESC, `id` ASC LIMIT 0, 20"
        );
    }

    #[test]
    fn test_select_escapes_match_literal() {
        let stmt = SelectStatement::new("table").match_expression("*", "\"o'neil\"/1");
        assert_eq!(
            stmt.to_sql().unwrap(),
            "SELECT * FROM `table` WHERE MATCH('(@* \"o\\'neil\"/1)')"
        );
    }

    #[test]
    fn test_select_options_and_columns() {
        let stmt = SelectStatement::new("table")
            .columns(["id", "WEIGHT()"])
            .filter(Filter::not_in("status", [0, 2]))
            .limit(1000, 50)
            .option("max_matches", 1050);

        assert_eq!(
            stmt.to_sql().unwrap(),
            "SELECT `id`, WEIGHT() FROM `table` WHERE `status` NOT IN (0, 2) \
             LIMIT 1000, 50 OPTION max_matches=1050"
        );
    }

    #[test]
    fn test_select_rejects_empty_in_list() {
        let stmt = SelectStatement::new("table").filter(Filter::is_in("id", Vec::<u64>::new()));
        assert!(matches!(
            stmt.to_sql(),
            Err(SphinxError::InvalidStatement(_))
        ));
    }

    #[test]
    fn test_null_values_are_rejected() {
        let replace = ReplaceStatement::new("table")
            .columns(["id", "title"])
            .values(vec![FieldValue::UInt(1), FieldValue::Null]);
        assert!(matches!(
            replace.to_sql(),
            Err(SphinxError::InvalidStatement(_))
        ));

        let select = SelectStatement::new("table").filter(Filter::eq("title", FieldValue::Null));
        assert!(matches!(
            select.to_sql(),
            Err(SphinxError::InvalidStatement(_))
        ));
    }

    #[test]
    fn test_order_by_quotes_unknown_expressions() {
        let stmt = SelectStatement::new("table")
            .order_by("id DESC, (SELECT 1)", OrderDirection::Asc)
            .limit(0, 20);
        assert_eq!(
            stmt.to_sql().unwrap(),
            "SELECT * FROM `table` ORDER BY `id DESC, (SELECT 1)` ASC LIMIT 0, 20"
        );
    }

    #[test]
    fn test_statement_kinds() {
        let replace: Statement = ReplaceStatement::new("a")
            .columns(["id"])
            .values(vec![FieldValue::UInt(1)])
            .into();
        let delete: Statement = DeleteStatement::new("b").filter(Filter::eq("id", 1u64)).into();

        assert_eq!(replace.kind(), "replace");
        assert_eq!(replace.index(), "a");
        assert_eq!(delete.kind(), "delete");
        assert_eq!(delete.index(), "b");
    }

    #[test]
    fn test_truncate_sql() {
        let stmt: Statement = TruncateStatement::new("table").into();
        assert_eq!(stmt.to_sql().unwrap(), "TRUNCATE RTINDEX `table`");
        assert_eq!(stmt.kind(), "truncate");
        assert_eq!(stmt.index(), "table");
    }
}
