use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Query string helpers.
mod query {
    use serde::{Deserialize, Deserializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(i64),
        Text(String),
    }

    /// Optional integer where an empty value (`?limit=`) counts as absent.
    pub(crate) fn optional_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<NumberOrText>::deserialize(deserializer)? {
            None => Ok(None),
            Some(NumberOrText::Number(value)) => Ok(Some(value)),
            Some(NumberOrText::Text(raw)) => match raw.trim() {
                "" => Ok(None),
                value => value
                    .parse()
                    .map(Some)
                    .map_err(|_| D::Error::custom(format!("invalid integer '{value}'"))),
            },
        }
    }
}

pub mod customer {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CustomerProfile {
        pub customer_id: String,
        pub name: String,
        pub email: String,
        /// `YYYY-MM-DD`.
        pub join_date: String,
        pub account_type: String,
        pub total_spent: Decimal,
        pub currency: String,
    }
}

pub mod filters {
    use super::*;

    /// Display metadata for a spending category.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategoryFilter {
        pub name: String,
        pub color: String,
        pub icon: String,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DateRangePreset {
        pub label: String,
        /// Period token accepted by the spending endpoints (`7d`, `30d`, ...).
        pub value: String,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct FiltersResponse {
        pub categories: Vec<CategoryFilter>,
        pub date_range_presets: Vec<DateRangePreset>,
    }
}

pub mod goals {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SpendingGoal {
        pub id: String,
        pub category: String,
        pub monthly_budget: Decimal,
        pub current_spent: Decimal,
        pub percentage_used: Decimal,
        pub days_remaining: i32,
        pub status: String,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SpendingGoalsResponse {
        pub goals: Vec<SpendingGoal>,
    }
}

pub mod trends {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MonthlyTrend {
        /// `YYYY-MM`.
        pub month: String,
        pub total_spent: Decimal,
        pub transaction_count: u32,
        pub average_transaction: Decimal,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SpendingTrendsResponse {
        pub trends: Vec<MonthlyTrend>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TrendsQuery {
        #[serde(default, deserialize_with = "crate::query::optional_int")]
        pub months: Option<i64>,
    }
}

pub mod spending {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SummaryQuery {
        pub period: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategoriesQuery {
        pub period: Option<String>,
        pub start_date: Option<String>,
        pub end_date: Option<String>,
    }

    /// Percentage deltas against the window immediately preceding the
    /// requested one.
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ComparedToPrevious {
        pub spent_change: Decimal,
        pub transaction_change: Decimal,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SpendingSummaryResponse {
        pub period: String,
        pub total_spent: Decimal,
        pub transaction_count: usize,
        pub average_transaction: Decimal,
        /// Empty when the window has no transactions.
        pub top_category: String,
        pub compared_to_previous: ComparedToPrevious,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DateRangeView {
        pub start_date: String,
        pub end_date: String,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategorySpendView {
        pub name: String,
        pub amount: Decimal,
        pub percentage: Decimal,
        pub transaction_count: usize,
        pub color: String,
        pub icon: String,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SpendingByCategoryResponse {
        pub date_range: DateRangeView,
        pub total_amount: Decimal,
        pub categories: Vec<CategorySpendView>,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionsQuery {
        #[serde(default, deserialize_with = "crate::query::optional_int")]
        pub limit: Option<i64>,
        #[serde(default, deserialize_with = "crate::query::optional_int")]
        pub offset: Option<i64>,
        pub category: Option<String>,
        pub period: Option<String>,
        pub start_date: Option<String>,
        pub end_date: Option<String>,
        /// One of `date_desc`, `date_asc`, `amount_desc`, `amount_asc`.
        pub sort_by: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionView {
        pub id: String,
        /// RFC3339 timestamp, including the offset it was recorded with.
        pub date: DateTime<FixedOffset>,
        pub merchant: String,
        pub category: String,
        pub amount: Decimal,
        pub description: String,
        pub payment_method: String,
        pub icon: String,
        pub category_color: String,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Pagination {
        pub total: usize,
        pub limit: usize,
        pub offset: usize,
        pub has_more: bool,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionsResponse {
        pub transactions: Vec<TransactionView>,
        pub pagination: Pagination,
    }
}

pub mod status {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SeedStatus {
        pub is_loaded: bool,
        pub customers: Vec<String>,
        pub transactions: usize,
    }
}
