//! Transaction records and the filter/sort/paginate pipeline behind the
//! transactions listing.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    EngineError, ResultEngine, date_range,
    util::{category_key, non_blank},
};

pub const DEFAULT_LIMIT: usize = 20;
pub const MAX_LIMIT: usize = 100;

/// A single card/account movement, immutable once loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    /// Timestamp with the offset it was recorded with.
    pub date: DateTime<FixedOffset>,
    pub merchant: String,
    pub category: String,
    pub amount: Decimal,
    pub description: String,
    pub payment_method: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub category_color: String,
}

impl Transaction {
    pub fn utc_date(&self) -> DateTime<Utc> {
        self.date.with_timezone(&Utc)
    }

    /// Case-insensitive exact match on the category name.
    pub fn in_category(&self, category: &str) -> bool {
        category_key(&self.category) == category_key(category)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortBy {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
}

impl SortBy {
    pub fn parse_or_default(raw: Option<&str>) -> ResultEngine<Self> {
        match non_blank(raw) {
            Some(token) => token.parse(),
            None => Ok(Self::default()),
        }
    }

    /// Stable sort: ties keep their storage order.
    fn apply(self, txs: &mut [&Transaction]) {
        match self {
            Self::DateDesc => txs.sort_by(|a, b| b.date.cmp(&a.date)),
            Self::DateAsc => txs.sort_by(|a, b| a.date.cmp(&b.date)),
            Self::AmountDesc => txs.sort_by(|a, b| b.amount.cmp(&a.amount)),
            Self::AmountAsc => txs.sort_by(|a, b| a.amount.cmp(&b.amount)),
        }
    }
}

impl FromStr for SortBy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date_desc" => Ok(Self::DateDesc),
            "date_asc" => Ok(Self::DateAsc),
            "amount_desc" => Ok(Self::AmountDesc),
            "amount_asc" => Ok(Self::AmountAsc),
            _ => Err(EngineError::invalid(
                "Invalid sortBy. Allowed: date_desc, date_asc, amount_desc, amount_asc",
            )),
        }
    }
}

/// Raw listing parameters, validated by [`list`].
///
/// `limit <= 0` means the default page size; negative offsets are clamped
/// to zero.
#[derive(Clone, Debug, Default)]
pub struct TransactionQuery {
    pub limit: i64,
    pub offset: i64,
    pub category: Option<String>,
    pub period: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub sort_by: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// Matches after filtering, before slicing.
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    pub pagination: Pagination,
}

/// Filters `all` by date window and category, sorts, then slices one page.
///
/// Without a period or custom dates the window is still the default 30 days
/// ending at `reference_now`, never "all time".
pub fn list(
    all: &[Transaction],
    query: &TransactionQuery,
    reference_now: DateTime<Utc>,
) -> ResultEngine<TransactionPage> {
    let limit = effective_limit(query.limit)?;
    let offset = usize::try_from(query.offset.max(0)).unwrap_or(usize::MAX);
    let sort = SortBy::parse_or_default(query.sort_by.as_deref())?;

    let range = date_range::resolve(
        query.period.as_deref(),
        query.start_date.as_deref(),
        query.end_date.as_deref(),
        reference_now,
    )?;
    let category = non_blank(query.category.as_deref());

    let mut matching: Vec<&Transaction> = all
        .iter()
        .filter(|tx| range.contains(tx.utc_date()))
        .filter(|tx| category.is_none_or(|c| tx.in_category(c)))
        .collect();
    sort.apply(&mut matching);

    let total = matching.len();
    let transactions = matching
        .into_iter()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect();

    Ok(TransactionPage {
        transactions,
        pagination: Pagination {
            total,
            limit,
            offset,
            has_more: offset.saturating_add(limit) < total,
        },
    })
}

fn effective_limit(raw: i64) -> ResultEngine<usize> {
    if raw <= 0 {
        return Ok(DEFAULT_LIMIT);
    }
    match usize::try_from(raw) {
        Ok(limit) if limit <= MAX_LIMIT => Ok(limit),
        _ => Err(EngineError::invalid("limit must be between 1 and 100")),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::{TimeDelta, TimeZone};

    use super::*;

    /// Test transaction with the given RFC3339 timestamp.
    pub(crate) fn tx(id: &str, date: &str, category: &str, amount: i64) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: DateTime::parse_from_rfc3339(date).unwrap(),
            merchant: "M".to_string(),
            category: category.to_string(),
            amount: Decimal::from(amount),
            description: "x".to_string(),
            payment_method: "Card".to_string(),
            icon: "shopping-cart".to_string(),
            category_color: "#FF6B6B".to_string(),
        }
    }

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 16, 12, 0, 0).unwrap()
    }

    /// One transaction per day ending on 2024-09-16, amounts `1..=count`.
    fn daily(count: i64) -> Vec<Transaction> {
        let base = DateTime::parse_from_rfc3339("2024-09-16T00:00:00Z").unwrap();
        (0..count)
            .map(|i| Transaction {
                date: base - TimeDelta::days(i),
                amount: Decimal::from(i + 1),
                ..tx(&format!("txn_{i}"), "2024-09-16T00:00:00Z", "Groceries", 0)
            })
            .collect()
    }

    fn ids(page: &TransactionPage) -> Vec<&str> {
        page.transactions.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn no_filters_default_to_30_day_window() {
        let query = TransactionQuery {
            limit: 100,
            ..Default::default()
        };
        let page = list(&daily(40), &query, reference()).unwrap();

        assert_eq!(page.transactions.len(), 30);
        assert_eq!(page.pagination.total, 30);
        assert_eq!(page.transactions[0].id, "txn_0");
        assert_eq!(page.transactions[29].id, "txn_29");
    }

    #[test]
    fn custom_range_overrides_period() {
        let txs = vec![
            tx("old", "2024-08-01T00:00:00Z", "Groceries", 10),
            tx("inrange", "2024-09-05T00:00:00Z", "Groceries", 10),
        ];
        let query = TransactionQuery {
            limit: 100,
            period: Some("7d".into()),
            start_date: Some("2024-09-01".into()),
            end_date: Some("2024-09-10".into()),
            ..Default::default()
        };
        let page = list(&txs, &query, reference()).unwrap();

        assert_eq!(ids(&page), vec!["inrange"]);
    }

    #[test]
    fn paginates_with_has_more() {
        let query = TransactionQuery {
            limit: 20,
            period: Some("1y".into()),
            ..Default::default()
        };
        let page = list(&daily(50), &query, reference()).unwrap();

        assert_eq!(page.pagination.total, 50);
        assert_eq!(page.transactions.len(), 20);
        assert!(page.pagination.has_more);

        let last = TransactionQuery {
            offset: 40,
            ..query
        };
        let page = list(&daily(50), &last, reference()).unwrap();
        assert_eq!(page.transactions.len(), 10);
        assert_eq!(page.pagination.offset, 40);
        assert!(!page.pagination.has_more);
    }

    #[test]
    fn has_more_is_false_when_page_ends_exactly_at_total() {
        let query = TransactionQuery {
            limit: 25,
            offset: 25,
            period: Some("1y".into()),
            ..Default::default()
        };
        let page = list(&daily(50), &query, reference()).unwrap();

        assert_eq!(page.transactions.len(), 25);
        assert!(!page.pagination.has_more);
    }

    #[test]
    fn offset_past_the_end_yields_empty_page() {
        let query = TransactionQuery {
            limit: 10,
            offset: 500,
            ..Default::default()
        };
        let page = list(&daily(40), &query, reference()).unwrap();

        assert!(page.transactions.is_empty());
        assert_eq!(page.pagination.total, 30);
        assert!(!page.pagination.has_more);
    }

    #[test]
    fn limit_and_offset_defaults() {
        let query = TransactionQuery {
            limit: 0,
            offset: -5,
            ..Default::default()
        };
        let page = list(&daily(40), &query, reference()).unwrap();

        assert_eq!(page.pagination.limit, DEFAULT_LIMIT);
        assert_eq!(page.pagination.offset, 0);
        assert_eq!(page.transactions.len(), 20);
        assert!(page.pagination.has_more);
    }

    #[test]
    fn limit_above_maximum_is_rejected() {
        let query = TransactionQuery {
            limit: 101,
            ..Default::default()
        };
        let err = list(&daily(5), &query, reference()).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidArgument("limit must be between 1 and 100".into())
        );
    }

    #[test]
    fn category_filter_is_case_insensitive() {
        let txs = vec![
            tx("1", "2024-09-01T00:00:00Z", "Groceries", 10),
            tx("2", "2024-09-02T00:00:00Z", "Entertainment", 20),
        ];
        let query = TransactionQuery {
            category: Some(" groceries ".into()),
            ..Default::default()
        };
        let page = list(&txs, &query, reference()).unwrap();

        assert_eq!(ids(&page), vec!["1"]);
    }

    #[test]
    fn blank_category_means_no_filter() {
        let txs = vec![
            tx("1", "2024-09-01T00:00:00Z", "Groceries", 10),
            tx("2", "2024-09-02T00:00:00Z", "Entertainment", 20),
        ];
        let query = TransactionQuery {
            category: Some("  ".into()),
            ..Default::default()
        };
        let page = list(&txs, &query, reference()).unwrap();

        assert_eq!(page.pagination.total, 2);
    }

    #[test]
    fn sorts_by_each_key() {
        let txs = vec![
            tx("1", "2024-09-01T00:00:00Z", "Groceries", 10),
            tx("2", "2024-09-02T00:00:00Z", "Groceries", 50),
            tx("3", "2024-09-03T00:00:00Z", "Groceries", 20),
        ];
        let cases = [
            ("amount_desc", vec!["2", "3", "1"]),
            ("amount_asc", vec!["1", "3", "2"]),
            ("date_asc", vec!["1", "2", "3"]),
            ("date_desc", vec!["3", "2", "1"]),
            ("AMOUNT_DESC", vec!["2", "3", "1"]),
        ];
        for (sort_by, expected) in cases {
            let query = TransactionQuery {
                sort_by: Some(sort_by.into()),
                ..Default::default()
            };
            let page = list(&txs, &query, reference()).unwrap();
            assert_eq!(ids(&page), expected, "sortBy {sort_by}");
        }
    }

    #[test]
    fn unknown_sort_is_rejected() {
        let query = TransactionQuery {
            sort_by: Some("merchant".into()),
            ..Default::default()
        };
        let err = list(&daily(3), &query, reference()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument(_)));
    }

    #[test]
    fn sort_applies_before_pagination() {
        let query = TransactionQuery {
            limit: 3,
            sort_by: Some("amount_desc".into()),
            period: Some("1y".into()),
            ..Default::default()
        };
        let page = list(&daily(50), &query, reference()).unwrap();

        assert_eq!(ids(&page), vec!["txn_49", "txn_48", "txn_47"]);
    }

    #[test]
    fn identical_queries_give_identical_pages() {
        let txs = daily(40);
        let query = TransactionQuery {
            limit: 7,
            offset: 3,
            sort_by: Some("amount_asc".into()),
            ..Default::default()
        };

        assert_eq!(
            list(&txs, &query, reference()).unwrap(),
            list(&txs, &query, reference()).unwrap()
        );
    }
}
