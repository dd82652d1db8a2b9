//! Typed filter predicates shared by every list endpoint.
//!
//! Query-string filters are parsed into `FilterParam`s and applied onto a
//! SeaORM `Condition` (see `db::filter_utils`). Values are always bound
//! through the ORM; nothing user-supplied is concatenated into SQL.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(DateTime<Utc>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
}

/// A single column predicate: `column <op> value`.
#[derive(Debug, Clone)]
pub struct FilterParam {
    pub column: String,
    pub operator: CompareOp,
    pub value: FilterValue,
}

pub trait IntoFilterValue {
    fn into_filter_value(self) -> FilterValue;
}

impl IntoFilterValue for String {
    fn into_filter_value(self) -> FilterValue {
        FilterValue::String(self)
    }
}

impl IntoFilterValue for &str {
    fn into_filter_value(self) -> FilterValue {
        FilterValue::String(self.to_string())
    }
}

impl IntoFilterValue for i64 {
    fn into_filter_value(self) -> FilterValue {
        FilterValue::Int(self)
    }
}

impl IntoFilterValue for f64 {
    fn into_filter_value(self) -> FilterValue {
        FilterValue::Float(self)
    }
}

impl IntoFilterValue for bool {
    fn into_filter_value(self) -> FilterValue {
        FilterValue::Bool(self)
    }
}

impl IntoFilterValue for DateTime<Utc> {
    fn into_filter_value(self) -> FilterValue {
        FilterValue::DateTime(self)
    }
}

impl FilterParam {
    fn new(column: &str, operator: CompareOp, value: impl IntoFilterValue) -> Self {
        Self {
            column: column.to_string(),
            operator,
            value: value.into_filter_value(),
        }
    }

    pub fn eq(column: &str, value: impl IntoFilterValue) -> Self {
        Self::new(column, CompareOp::Eq, value)
    }

    pub fn ne(column: &str, value: impl IntoFilterValue) -> Self {
        Self::new(column, CompareOp::Ne, value)
    }

    pub fn like(column: &str, value: impl IntoFilterValue) -> Self {
        Self::new(column, CompareOp::Like, value)
    }

    pub fn gt(column: &str, value: impl IntoFilterValue) -> Self {
        Self::new(column, CompareOp::Gt, value)
    }

    pub fn gte(column: &str, value: impl IntoFilterValue) -> Self {
        Self::new(column, CompareOp::Gte, value)
    }

    pub fn lt(column: &str, value: impl IntoFilterValue) -> Self {
        Self::new(column, CompareOp::Lt, value)
    }

    pub fn lte(column: &str, value: impl IntoFilterValue) -> Self {
        Self::new(column, CompareOp::Lte, value)
    }
}

/// Builds the `from`/`to` predicates for a `YYYY-MM-DD` date-range filter on
/// a timestamp column. Date-only input compares against day bounds, so the
/// time-of-day of stored rows never excludes them from their own day.
///
/// Invalid date strings are skipped rather than failing the request.
pub fn date_range_params(
    column: &str,
    from: Option<&str>,
    to: Option<&str>,
) -> Vec<FilterParam> {
    let mut params = Vec::new();
    if let Some(from) = from.and_then(parse_day) {
        params.push(FilterParam::gte(column, day_start(from)));
    }
    if let Some(to) = to.and_then(parse_day) {
        params.push(FilterParam::lt(column, day_start(to) + chrono::Duration::days(1)));
    }
    params
}

fn parse_day(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

fn day_start(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0).unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_range_spans_whole_days() {
        let params = date_range_params("recorded_at", Some("2024-01-01"), Some("2024-01-01"));
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].operator, CompareOp::Gte);
        assert_eq!(
            params[0].value,
            FilterValue::DateTime(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
        // `to` is exclusive of the following midnight, so 23:59:59 rows match.
        assert_eq!(params[1].operator, CompareOp::Lt);
        assert_eq!(
            params[1].value,
            FilterValue::DateTime(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn invalid_dates_are_skipped() {
        let params = date_range_params("recorded_at", Some("not-a-date"), None);
        assert!(params.is_empty());
    }
}
