//! Row filters over trade tables.
//!
//! A filter is anything implementing [`TradePredicate`]: plain closures
//! over [`TradeRecord`] work, and [`TradeFilter`] covers the column
//! equality, membership and range predicates offered to users. Predicates
//! declare the columns they read so that [`filter_table`] can reject a
//! filter on a column the table does not carry, instead of silently
//! matching nothing.

use std::str::FromStr;

use risk_core::types::{Date, RiskError, RiskResult, TradeAction, TradeStatus};

use super::column::{Column, ColumnKind};
use super::record::TradeRecord;
use super::table::TradeTable;

/// A row predicate over trade records.
pub trait TradePredicate {
    /// Returns true when the record passes the filter.
    fn matches(&self, record: &TradeRecord) -> bool;

    /// Columns the predicate reads; all must be present in a filtered table.
    fn required_columns(&self) -> Vec<Column> {
        Vec::new()
    }
}

impl<F> TradePredicate for F
where
    F: Fn(&TradeRecord) -> bool,
{
    fn matches(&self, record: &TradeRecord) -> bool {
        self(record)
    }
}

/// Bound of a range filter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FilterBound {
    /// Bound on a numeric column
    Number(f64),
    /// Bound on the trade date
    Date(Date),
}

/// Column-based filter.
///
/// Text comparisons ignore case and surrounding whitespace. Trade action
/// and status values accept the same synonyms as ingestion ("long",
/// "squared off"). Records with no value in the filtered column never match.
///
/// # Examples
///
/// ```
/// use risk_engine::portfolio::{filter_table, Column, TradeFilter, TradeRecord, TradeTable};
///
/// let table = TradeTable::from_records(vec![
///     TradeRecord::new("T1", 100.0, 50.0, 55.0).with_commodity("Gold"),
///     TradeRecord::new("T2", 10.0, 20.0, 18.0).with_commodity("Silver"),
/// ]);
///
/// let gold: TradeFilter = "commodity=gold".parse().unwrap();
/// assert_eq!(filter_table(&table, &gold).unwrap().len(), 1);
///
/// let large = TradeFilter::at_least(Column::Quantity, 50.0);
/// assert_eq!(filter_table(&table, &large).unwrap().len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum TradeFilter {
    /// Column equals the value
    Equals {
        /// Filtered column
        column: Column,
        /// Expected value
        value: String,
    },
    /// Column equals any of the values
    OneOf {
        /// Filtered column
        column: Column,
        /// Accepted values
        values: Vec<String>,
    },
    /// Column is greater than or equal to the bound
    AtLeast {
        /// Filtered column
        column: Column,
        /// Inclusive lower bound
        bound: FilterBound,
    },
    /// Column is less than or equal to the bound
    AtMost {
        /// Filtered column
        column: Column,
        /// Inclusive upper bound
        bound: FilterBound,
    },
    /// Every inner filter matches; an empty list matches everything
    All(Vec<TradeFilter>),
}

impl TradeFilter {
    /// Filter that matches every record.
    pub fn always() -> Self {
        Self::All(Vec::new())
    }

    /// Column equals `value`.
    pub fn equals(column: Column, value: impl Into<String>) -> Self {
        Self::Equals {
            column,
            value: value.into(),
        }
    }

    /// Column equals one of `values`.
    pub fn one_of<I, S>(column: Column, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::OneOf {
            column,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Numeric column is at least `bound`.
    pub fn at_least(column: Column, bound: f64) -> Self {
        Self::AtLeast {
            column,
            bound: FilterBound::Number(bound),
        }
    }

    /// Numeric column is at most `bound`.
    pub fn at_most(column: Column, bound: f64) -> Self {
        Self::AtMost {
            column,
            bound: FilterBound::Number(bound),
        }
    }

    /// Trade date on or after `date`.
    pub fn date_from(date: Date) -> Self {
        Self::AtLeast {
            column: Column::TradeDate,
            bound: FilterBound::Date(date),
        }
    }

    /// Trade date on or before `date`.
    pub fn date_to(date: Date) -> Self {
        Self::AtMost {
            column: Column::TradeDate,
            bound: FilterBound::Date(date),
        }
    }

    /// Conjunction of filters.
    pub fn all(filters: Vec<TradeFilter>) -> Self {
        Self::All(filters)
    }
}

/// Compares a record's value in `column` against `expected`.
fn value_equals(record: &TradeRecord, column: Column, expected: &str) -> bool {
    match column.kind() {
        ColumnKind::Numeric => match (record.numeric_value(column), expected.trim().parse::<f64>()) {
            (Some(actual), Ok(expected)) => actual == expected,
            _ => false,
        },
        ColumnKind::Date => match (record.trade_date(), Date::parse_lenient(expected)) {
            (Some(actual), Ok(expected)) => actual == expected,
            _ => false,
        },
        ColumnKind::Categorical => {
            let canonical = canonical_category(column, expected);
            record
                .text_value(column)
                .map(|actual| actual.eq_ignore_ascii_case(canonical.trim()))
                .unwrap_or(false)
        }
        ColumnKind::Text => record
            .text_value(column)
            .map(|actual| actual.trim().to_lowercase() == expected.trim().to_lowercase())
            .unwrap_or(false),
    }
}

/// Maps action/status synonyms to their canonical name; other text is
/// returned unchanged.
fn canonical_category(column: Column, value: &str) -> String {
    match column {
        Column::TradeAction => value
            .parse::<TradeAction>()
            .map(|a| a.name().to_string())
            .unwrap_or_else(|_| value.to_string()),
        Column::TradeStatus => value
            .parse::<TradeStatus>()
            .map(|s| s.name().to_string())
            .unwrap_or_else(|_| value.to_string()),
        _ => value.to_string(),
    }
}

/// Orders a record's value in `column` against a bound.
fn compare_bound(record: &TradeRecord, column: Column, bound: FilterBound) -> Option<std::cmp::Ordering> {
    match bound {
        FilterBound::Number(b) => record.numeric_value(column)?.partial_cmp(&b),
        FilterBound::Date(b) if column == Column::TradeDate => Some(record.trade_date()?.cmp(&b)),
        FilterBound::Date(_) => None,
    }
}

impl TradePredicate for TradeFilter {
    fn matches(&self, record: &TradeRecord) -> bool {
        match self {
            Self::Equals { column, value } => value_equals(record, *column, value),
            Self::OneOf { column, values } => values.iter().any(|v| value_equals(record, *column, v)),
            Self::AtLeast { column, bound } => compare_bound(record, *column, *bound)
                .map(|o| o != std::cmp::Ordering::Less)
                .unwrap_or(false),
            Self::AtMost { column, bound } => compare_bound(record, *column, *bound)
                .map(|o| o != std::cmp::Ordering::Greater)
                .unwrap_or(false),
            Self::All(filters) => filters.iter().all(|f| f.matches(record)),
        }
    }

    fn required_columns(&self) -> Vec<Column> {
        match self {
            Self::Equals { column, .. }
            | Self::OneOf { column, .. }
            | Self::AtLeast { column, .. }
            | Self::AtMost { column, .. } => vec![*column],
            Self::All(filters) => {
                let mut columns: Vec<Column> =
                    filters.iter().flat_map(|f| f.required_columns()).collect();
                columns.sort();
                columns.dedup();
                columns
            }
        }
    }
}

fn parse_bound(column: Column, text: &str) -> RiskResult<FilterBound> {
    match column.kind() {
        ColumnKind::Numeric => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|x| x.is_finite())
            .map(FilterBound::Number)
            .ok_or_else(|| {
                RiskError::invalid_parameter(
                    "filter",
                    format!("'{}' is not a number for {}", text.trim(), column.label()),
                )
            }),
        ColumnKind::Date => Date::parse_lenient(text)
            .map(FilterBound::Date)
            .map_err(|e| RiskError::invalid_parameter("filter", e.to_string())),
        _ => Err(RiskError::invalid_parameter(
            "filter",
            format!("range filters need a numeric or date column, got {}", column.label()),
        )),
    }
}

impl FromStr for TradeFilter {
    type Err = RiskError;

    /// Parses `column=value`, `column=a|b`, `column>=x` or `column<=x`.
    fn from_str(s: &str) -> RiskResult<Self> {
        let (name, op, value) = if let Some((name, value)) = s.split_once(">=") {
            (name, ">=", value)
        } else if let Some((name, value)) = s.split_once("<=") {
            (name, "<=", value)
        } else if let Some((name, value)) = s.split_once('=') {
            (name, "=", value)
        } else {
            return Err(RiskError::invalid_parameter(
                "filter",
                format!("expected column=value, column>=x or column<=x, got '{}'", s),
            ));
        };

        let column: Column = name.parse()?;
        if value.trim().is_empty() {
            return Err(RiskError::invalid_parameter(
                "filter",
                format!("empty value for {}", column.label()),
            ));
        }

        match op {
            ">=" => Ok(Self::AtLeast {
                column,
                bound: parse_bound(column, value)?,
            }),
            "<=" => Ok(Self::AtMost {
                column,
                bound: parse_bound(column, value)?,
            }),
            _ if value.contains('|') => Ok(Self::one_of(
                column,
                value.split('|').map(str::trim).filter(|v| !v.is_empty()),
            )),
            _ => Ok(Self::equals(column, value.trim())),
        }
    }
}

/// Returns a new table holding the records that match `predicate`.
///
/// Fails with `InvalidParameter` when the predicate reads a column the
/// table does not carry.
pub fn filter_table<P>(table: &TradeTable, predicate: &P) -> RiskResult<TradeTable>
where
    P: TradePredicate + ?Sized,
{
    table
        .capabilities()
        .require(&predicate.required_columns(), "filter")?;
    let records = table
        .iter()
        .filter(|record| predicate.matches(record))
        .cloned()
        .collect();
    Ok(table.derive(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TradeTable {
        TradeTable::from_records(vec![
            TradeRecord::new("T1", 100.0, 50.0, 55.0)
                .with_commodity("Gold")
                .with_action(TradeAction::Buy)
                .with_trade_date(Date::from_ymd(2024, 1, 2).unwrap()),
            TradeRecord::new("T2", 10.0, 20.0, 18.0)
                .with_commodity("Silver")
                .with_action(TradeAction::Sell)
                .with_trade_date(Date::from_ymd(2024, 1, 3).unwrap()),
            TradeRecord::new("T3", 5.0, 70.0, 72.0)
                .with_commodity(" crude ")
                .with_trade_date(Date::from_ymd(2024, 1, 4).unwrap()),
        ])
    }

    fn ids(table: &TradeTable) -> Vec<&str> {
        table.iter().map(|r| r.trade_id().as_str()).collect()
    }

    #[test]
    fn test_always_keeps_everything() {
        let table = sample();
        let filtered = filter_table(&table, &TradeFilter::always()).unwrap();
        assert_eq!(filtered, table);
    }

    #[test]
    fn test_closure_predicate() {
        let table = sample();
        let filtered = filter_table(&table, &|r: &TradeRecord| r.quantity() < 50.0).unwrap();
        assert_eq!(ids(&filtered), vec!["T2", "T3"]);
    }

    #[test]
    fn test_text_equality_ignores_case_and_whitespace() {
        let table = sample();
        let filtered = filter_table(&table, &TradeFilter::equals(Column::Commodity, "CRUDE")).unwrap();
        assert_eq!(ids(&filtered), vec!["T3"]);
    }

    #[test]
    fn test_action_synonyms() {
        let table = sample();
        let filtered = filter_table(&table, &TradeFilter::equals(Column::TradeAction, "short")).unwrap();
        assert_eq!(ids(&filtered), vec!["T2"]);
    }

    #[test]
    fn test_one_of_parsed() {
        let table = sample();
        let filter: TradeFilter = "Commodity = gold|silver".parse().unwrap();
        assert_eq!(ids(&filter_table(&table, &filter).unwrap()), vec!["T1", "T2"]);
    }

    #[test]
    fn test_date_range_parsed() {
        let table = sample();
        let filter = TradeFilter::all(vec![
            "trade date>=2024-01-03".parse().unwrap(),
            "Trade Date<=04/01/2024".parse().unwrap(),
        ]);
        assert_eq!(ids(&filter_table(&table, &filter).unwrap()), vec!["T2", "T3"]);
    }

    #[test]
    fn test_numeric_range_is_inclusive() {
        let table = sample();
        let filter: TradeFilter = "market_price<=55".parse().unwrap();
        assert_eq!(ids(&filter_table(&table, &filter).unwrap()), vec!["T1", "T2"]);
    }

    #[test]
    fn test_filter_on_absent_column_rejected() {
        let table = sample();
        let err = filter_table(&table, &TradeFilter::equals(Column::Counterparty, "ACME")).unwrap_err();
        assert!(err.is_invalid_parameter());
        assert!(err.to_string().contains("Counterparty"));
    }

    #[test]
    fn test_parse_errors() {
        assert!("commodity".parse::<TradeFilter>().is_err());
        assert!("nonsense=1".parse::<TradeFilter>().is_err());
        assert!("commodity=".parse::<TradeFilter>().is_err());
        assert!("commodity>=5".parse::<TradeFilter>().is_err());
        assert!("quantity>=lots".parse::<TradeFilter>().is_err());
    }

    #[test]
    fn test_records_without_value_never_match() {
        let table = sample();
        let filter = TradeFilter::equals(Column::TradeAction, "Buy");
        assert_eq!(ids(&filter_table(&table, &filter).unwrap()), vec!["T1"]);
    }
}
