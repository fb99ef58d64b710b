//! Spending KPIs and per-category breakdowns over a resolved window.
//!
//! All rounding uses `Decimal::round_dp`, so midpoints round to even.

use std::collections::HashMap;

use api_types::filters::CategoryFilter;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{
    DateRange, ResultEngine, Transaction,
    date_range::{self, Period},
    util::category_key,
};

pub const FALLBACK_COLOR: &str = "#999999";
pub const FALLBACK_ICON: &str = "tag";

/// Window selection for the category breakdown.
#[derive(Clone, Debug, Default)]
pub struct CategoryQuery {
    pub period: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpendingSummary {
    pub period: Period,
    pub total_spent: Decimal,
    pub transaction_count: usize,
    /// Rounded to 2 decimals, 0 without transactions.
    pub average_transaction: Decimal,
    /// Empty when the window has no transactions.
    pub top_category: String,
    /// Percentage change of the total against the preceding window.
    pub spent_change: Decimal,
    /// Percentage change of the count against the preceding window.
    pub transaction_change: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategorySpend {
    pub name: String,
    pub amount: Decimal,
    /// Share of the window total, rounded to 1 decimal.
    pub percentage: Decimal,
    pub transaction_count: usize,
    pub color: String,
    pub icon: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryBreakdown {
    pub date_range: DateRange,
    pub total_amount: Decimal,
    /// Ordered by amount, largest first.
    pub categories: Vec<CategorySpend>,
}

/// Transactions of one category, case-insensitively grouped. `name` is the
/// spelling of the first transaction seen.
struct CategoryGroup {
    name: String,
    amount: Decimal,
    count: usize,
}

/// Groups in first-seen order.
fn group_by_category<'a>(txs: impl IntoIterator<Item = &'a Transaction>) -> Vec<CategoryGroup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<CategoryGroup> = Vec::new();

    for tx in txs {
        let slot = *index.entry(category_key(&tx.category)).or_insert_with(|| {
            groups.push(CategoryGroup {
                name: tx.category.clone(),
                amount: Decimal::ZERO,
                count: 0,
            });
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.amount += tx.amount;
        group.count += 1;
    }

    groups
}

fn in_range<'a>(all: &'a [Transaction], range: &DateRange) -> Vec<&'a Transaction> {
    all.iter().filter(|tx| range.contains(tx.utc_date())).collect()
}

fn total(txs: &[&Transaction]) -> Decimal {
    txs.iter().map(|tx| tx.amount).sum()
}

/// Percentage change from `previous` to `current`, rounded to 2 decimals.
///
/// A zero baseline yields 0% when `current` is also zero and 100% otherwise.
pub fn percentage_change(previous: Decimal, current: Decimal) -> Decimal {
    if previous.is_zero() {
        return if current.is_zero() {
            Decimal::ZERO
        } else {
            Decimal::ONE_HUNDRED
        };
    }

    ((current - previous) / previous * Decimal::ONE_HUNDRED).round_dp(2)
}

/// KPIs for the window given by `period` (default `30d`) ending on the day
/// of `reference_now`, compared with the window just before it.
pub fn summarize(
    all: &[Transaction],
    period: Option<&str>,
    reference_now: DateTime<Utc>,
) -> ResultEngine<SpendingSummary> {
    let period = Period::parse_or_default(period)?;
    let current = date_range::resolve(Some(period.as_str()), None, None, reference_now)?;
    let previous = current.preceding()?;

    let current_txs = in_range(all, &current);
    let current_total = total(&current_txs);
    let current_count = current_txs.len();

    let previous_txs = in_range(all, &previous);
    let previous_total = total(&previous_txs);
    let previous_count = previous_txs.len();

    let average_transaction = if current_count == 0 {
        Decimal::ZERO
    } else {
        (current_total / Decimal::from(current_count)).round_dp(2)
    };

    let top_category = group_by_category(current_txs.iter().copied())
        .into_iter()
        .fold(None::<CategoryGroup>, |best, group| match best {
            Some(best) if best.amount >= group.amount => Some(best),
            _ => Some(group),
        })
        .map(|group| group.name)
        .unwrap_or_default();

    Ok(SpendingSummary {
        period,
        total_spent: current_total.round_dp(2),
        transaction_count: current_count,
        average_transaction,
        top_category,
        spent_change: percentage_change(previous_total, current_total),
        transaction_change: percentage_change(
            Decimal::from(previous_count),
            Decimal::from(current_count),
        ),
    })
}

/// Per-category totals inside `range`, enriched with display metadata.
///
/// `catalog` only decorates the output: categories missing from it still
/// appear, with the fallback color and icon.
pub fn breakdown(
    all: &[Transaction],
    range: DateRange,
    catalog: &[CategoryFilter],
) -> CategoryBreakdown {
    let meta: HashMap<String, &CategoryFilter> = catalog
        .iter()
        .map(|filter| (category_key(&filter.name), filter))
        .collect();

    let txs = in_range(all, &range);
    let total_amount = total(&txs);

    let mut categories: Vec<CategorySpend> = group_by_category(txs.iter().copied())
        .into_iter()
        .map(|group| {
            let percentage = if total_amount.is_zero() {
                Decimal::ZERO
            } else {
                (group.amount / total_amount * Decimal::ONE_HUNDRED).round_dp(1)
            };
            let filter = meta.get(&category_key(&group.name));

            CategorySpend {
                amount: group.amount.round_dp(2),
                percentage,
                transaction_count: group.count,
                color: filter.map_or(FALLBACK_COLOR, |f| f.color.as_str()).to_string(),
                icon: filter.map_or(FALLBACK_ICON, |f| f.icon.as_str()).to_string(),
                name: group.name,
            }
        })
        .collect();
    categories.sort_by(|a, b| b.amount.cmp(&a.amount));

    CategoryBreakdown {
        date_range: range,
        total_amount: total_amount.round_dp(2),
        categories,
    }
}
