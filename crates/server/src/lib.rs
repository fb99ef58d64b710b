use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{app, run_with_listener};

mod customers;
mod extract;
mod server;
mod spending;
mod transactions;

pub mod types {
    pub mod customer {
        pub use api_types::customer::CustomerProfile;
        pub use api_types::filters::{CategoryFilter, DateRangePreset, FiltersResponse};
        pub use api_types::goals::{SpendingGoal, SpendingGoalsResponse};
        pub use api_types::trends::{MonthlyTrend, SpendingTrendsResponse};
    }

    pub mod spending {
        pub use api_types::spending::{
            CategorySpendView, ComparedToPrevious, DateRangeView, SpendingByCategoryResponse,
            SpendingSummaryResponse,
        };
    }

    pub mod transaction {
        pub use api_types::transaction::{Pagination, TransactionView, TransactionsResponse};
    }

    pub mod status {
        pub use api_types::status::SeedStatus;
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::SeedNotFound(_)
        | EngineError::SeedEmpty(_)
        | EngineError::SeedInvalid { .. }
        | EngineError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::SeedNotFound(_)
        | EngineError::SeedEmpty(_)
        | EngineError::SeedInvalid { .. }
        | EngineError::Io(_) => {
            tracing::error!("data error: {err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(EngineError::KeyNotFound(key)) => {
                tracing::debug!("not found: {key}");
                return StatusCode::NOT_FOUND.into_response();
            }
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };
        if status.is_client_error() {
            tracing::debug!("rejected request: {error}");
        }

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn engine_invalid_argument_maps_to_400() {
        let res = ServerError::from(EngineError::InvalidArgument("bad".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn seed_errors_map_to_500() {
        let res =
            ServerError::from(EngineError::SeedEmpty(PathBuf::from("seed/goals.json"))).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn seed_errors_hide_details() {
        let msg = message_for_engine_error(EngineError::SeedNotFound(PathBuf::from("/secret/seed")));
        assert_eq!(msg, "internal server error");
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
