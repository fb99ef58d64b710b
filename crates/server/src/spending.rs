//! Spending API endpoints

use api_types::spending::{CategoriesQuery, SummaryQuery};
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    ServerError,
    extract::ApiQuery,
    server::ServerState,
    types::spending::{
        CategorySpendView, ComparedToPrevious, DateRangeView, SpendingByCategoryResponse,
        SpendingSummaryResponse,
    },
};

fn map_summary(summary: engine::SpendingSummary) -> SpendingSummaryResponse {
    SpendingSummaryResponse {
        period: summary.period.to_string(),
        total_spent: summary.total_spent,
        transaction_count: summary.transaction_count,
        average_transaction: summary.average_transaction,
        top_category: summary.top_category,
        compared_to_previous: ComparedToPrevious {
            spent_change: summary.spent_change,
            transaction_change: summary.transaction_change,
        },
    }
}

fn map_category(category: engine::CategorySpend) -> CategorySpendView {
    CategorySpendView {
        name: category.name,
        amount: category.amount,
        percentage: category.percentage,
        transaction_count: category.transaction_count,
        color: category.color,
        icon: category.icon,
    }
}

pub async fn summary(
    State(state): State<ServerState>,
    Path(customer_id): Path<String>,
    ApiQuery(query): ApiQuery<SummaryQuery>,
) -> Result<Json<SpendingSummaryResponse>, ServerError> {
    let summary = state
        .engine
        .spending_summary(&customer_id, query.period.as_deref())?;

    Ok(Json(map_summary(summary)))
}

pub async fn categories(
    State(state): State<ServerState>,
    Path(customer_id): Path<String>,
    ApiQuery(query): ApiQuery<CategoriesQuery>,
) -> Result<Json<SpendingByCategoryResponse>, ServerError> {
    let query = engine::CategoryQuery {
        period: query.period,
        start_date: query.start_date,
        end_date: query.end_date,
    };
    let breakdown = state.engine.spending_categories(&customer_id, &query)?;

    Ok(Json(SpendingByCategoryResponse {
        date_range: DateRangeView {
            start_date: breakdown.date_range.start_date_string(),
            end_date: breakdown.date_range.end_date_string(),
        },
        total_amount: breakdown.total_amount,
        categories: breakdown.categories.into_iter().map(map_category).collect(),
    }))
}
