//! Transactions API endpoints

use api_types::transaction::TransactionsQuery;
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    ServerError,
    extract::ApiQuery,
    server::ServerState,
    types::transaction::{Pagination, TransactionView, TransactionsResponse},
};

fn map_transaction(tx: engine::Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        date: tx.date,
        merchant: tx.merchant,
        category: tx.category,
        amount: tx.amount,
        description: tx.description,
        payment_method: tx.payment_method,
        icon: tx.icon,
        category_color: tx.category_color,
    }
}

fn map_pagination(pagination: engine::Pagination) -> Pagination {
    Pagination {
        total: pagination.total,
        limit: pagination.limit,
        offset: pagination.offset,
        has_more: pagination.has_more,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Path(customer_id): Path<String>,
    ApiQuery(query): ApiQuery<TransactionsQuery>,
) -> Result<Json<TransactionsResponse>, ServerError> {
    let query = engine::TransactionQuery {
        limit: query.limit.unwrap_or(engine::DEFAULT_LIMIT as i64),
        offset: query.offset.unwrap_or(0),
        category: query.category,
        period: query.period,
        start_date: query.start_date,
        end_date: query.end_date,
        sort_by: query.sort_by,
    };
    let page = state.engine.transactions(&customer_id, &query)?;

    Ok(Json(TransactionsResponse {
        transactions: page.transactions.into_iter().map(map_transaction).collect(),
        pagination: map_pagination(page.pagination),
    }))
}
