use api_types::{
    customer::CustomerProfile, filters::FiltersResponse, goals::SpendingGoalsResponse,
    trends::SpendingTrendsResponse,
};

use crate::{EngineError, ResultEngine};

use super::{super::Engine, DEFAULT_TREND_MONTHS, MAX_TREND_MONTHS};

impl Engine {
    pub fn profile(&self, customer_id: &str) -> ResultEngine<CustomerProfile> {
        self.customers
            .profile(customer_id)
            .cloned()
            .ok_or_else(|| EngineError::KeyNotFound(customer_id.to_string()))
    }

    /// Category display metadata and date presets.
    pub fn filters(&self, customer_id: &str) -> ResultEngine<FiltersResponse> {
        self.customers
            .filters(customer_id)
            .cloned()
            .ok_or_else(|| EngineError::KeyNotFound(customer_id.to_string()))
    }

    pub fn goals(&self, customer_id: &str) -> ResultEngine<SpendingGoalsResponse> {
        self.customers
            .goals(customer_id)
            .cloned()
            .ok_or_else(|| EngineError::KeyNotFound(customer_id.to_string()))
    }

    /// The last `months` (1..=24, default 12) monthly trends, oldest first.
    pub fn trends(
        &self,
        customer_id: &str,
        months: Option<i64>,
    ) -> ResultEngine<SpendingTrendsResponse> {
        let months = months.unwrap_or(DEFAULT_TREND_MONTHS);
        if !(1..=MAX_TREND_MONTHS).contains(&months) {
            return Err(EngineError::invalid(format!(
                "months must be between 1 and {MAX_TREND_MONTHS}"
            )));
        }

        self.customers
            .trends(customer_id, months as usize)
            .ok_or_else(|| EngineError::KeyNotFound(customer_id.to_string()))
    }
}
