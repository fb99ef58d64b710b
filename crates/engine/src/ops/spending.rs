use crate::{
    CategoryBreakdown, CategoryQuery, EngineError, ResultEngine, SpendingSummary, date_range,
    spending,
};

use super::super::Engine;

impl Engine {
    /// Spending KPIs for `period` (default `30d`) plus deltas against the
    /// preceding window of equal length.
    pub fn spending_summary(
        &self,
        customer_id: &str,
        period: Option<&str>,
    ) -> ResultEngine<SpendingSummary> {
        let all = self.transactions.all(customer_id)?;
        let reference_now = self.reference_now(all);

        spending::summarize(all, period, reference_now)
    }

    /// Totals per category inside the requested window. Custom dates win
    /// over `period`.
    pub fn spending_categories(
        &self,
        customer_id: &str,
        query: &CategoryQuery,
    ) -> ResultEngine<CategoryBreakdown> {
        let all = self.transactions.all(customer_id)?;
        let reference_now = self.reference_now(all);

        let range = date_range::resolve(
            query.period.as_deref(),
            query.start_date.as_deref(),
            query.end_date.as_deref(),
            reference_now,
        )?;

        let filters = self
            .customers
            .filters(customer_id)
            .ok_or_else(|| EngineError::invalid("Filters not found for customer."))?;

        Ok(spending::breakdown(all, range, &filters.categories))
    }
}
