//! Immutable in-memory snapshot of the seeded customer data and the
//! repository traits the engine reads it through.

use std::collections::HashMap;

use api_types::{
    customer::CustomerProfile,
    filters::FiltersResponse,
    goals::SpendingGoalsResponse,
    status::SeedStatus,
    trends::{MonthlyTrend, SpendingTrendsResponse},
};

use crate::{ResultEngine, Transaction};

/// Read access to a customer's transactions.
pub trait TransactionRepository: Send + Sync {
    /// Every transaction of `customer_id`, newest first. Unknown customers
    /// have none.
    fn all(&self, customer_id: &str) -> ResultEngine<&[Transaction]>;
}

/// Read access to the per-customer catalog documents.
pub trait CustomerRepository: Send + Sync {
    fn profile(&self, customer_id: &str) -> Option<&CustomerProfile>;

    fn filters(&self, customer_id: &str) -> Option<&FiltersResponse>;

    fn goals(&self, customer_id: &str) -> Option<&SpendingGoalsResponse>;

    /// The `months` most recent monthly trends, oldest first.
    fn trends(&self, customer_id: &str, months: usize) -> Option<SpendingTrendsResponse>;
}

/// Everything seeded for one customer.
#[derive(Clone, Debug)]
pub struct CustomerData {
    pub profile: CustomerProfile,
    pub filters: FiltersResponse,
    pub goals: SpendingGoalsResponse,
    pub trends: SpendingTrendsResponse,
    /// Sorted by date, newest first.
    pub transactions: Vec<Transaction>,
}

impl CustomerData {
    pub fn new(
        profile: CustomerProfile,
        filters: FiltersResponse,
        goals: SpendingGoalsResponse,
        trends: SpendingTrendsResponse,
        mut transactions: Vec<Transaction>,
    ) -> Self {
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        Self {
            profile,
            filters,
            goals,
            trends,
            transactions,
        }
    }
}

/// Snapshot built once at startup and never mutated afterwards.
#[derive(Clone, Debug, Default)]
pub struct DataStore {
    customers: HashMap<String, CustomerData>,
}

impl DataStore {
    pub fn new(customers: impl IntoIterator<Item = CustomerData>) -> Self {
        Self {
            customers: customers
                .into_iter()
                .map(|data| (data.profile.customer_id.clone(), data))
                .collect(),
        }
    }

    fn customer(&self, customer_id: &str) -> Option<&CustomerData> {
        self.customers.get(customer_id)
    }

    pub fn status(&self) -> SeedStatus {
        let mut customers: Vec<String> = self.customers.keys().cloned().collect();
        customers.sort();

        SeedStatus {
            is_loaded: !self.customers.is_empty(),
            customers,
            transactions: self.customers.values().map(|c| c.transactions.len()).sum(),
        }
    }
}

impl TransactionRepository for DataStore {
    fn all(&self, customer_id: &str) -> ResultEngine<&[Transaction]> {
        Ok(self
            .customer(customer_id)
            .map(|c| c.transactions.as_slice())
            .unwrap_or_default())
    }
}

impl CustomerRepository for DataStore {
    fn profile(&self, customer_id: &str) -> Option<&CustomerProfile> {
        self.customer(customer_id).map(|c| &c.profile)
    }

    fn filters(&self, customer_id: &str) -> Option<&FiltersResponse> {
        self.customer(customer_id).map(|c| &c.filters)
    }

    fn goals(&self, customer_id: &str) -> Option<&SpendingGoalsResponse> {
        self.customer(customer_id).map(|c| &c.goals)
    }

    fn trends(&self, customer_id: &str, months: usize) -> Option<SpendingTrendsResponse> {
        let customer = self.customer(customer_id)?;

        let mut trends: Vec<MonthlyTrend> = customer.trends.trends.clone();
        trends.sort_by(|a, b| a.month.cmp(&b.month));
        let skip = trends.len().saturating_sub(months);

        Some(SpendingTrendsResponse {
            trends: trends.split_off(skip),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::transactions::tests::tx;

    pub(crate) fn trend(month: &str) -> MonthlyTrend {
        MonthlyTrend {
            month: month.to_string(),
            total_spent: Decimal::from(100),
            transaction_count: 4,
            average_transaction: Decimal::from(25),
        }
    }

    pub(crate) fn customer(id: &str, transactions: Vec<Transaction>) -> CustomerData {
        CustomerData::new(
            CustomerProfile {
                customer_id: id.to_string(),
                name: "John Doe".to_string(),
                email: "john.doe@email.com".to_string(),
                join_date: "2023-01-15".to_string(),
                account_type: "premium".to_string(),
                total_spent: Decimal::new(1542050, 2),
                currency: "ZAR".to_string(),
            },
            FiltersResponse {
                categories: vec![api_types::filters::CategoryFilter {
                    name: "Groceries".to_string(),
                    color: "#FF6B6B".to_string(),
                    icon: "shopping-cart".to_string(),
                }],
                date_range_presets: vec![],
            },
            SpendingGoalsResponse { goals: vec![] },
            SpendingTrendsResponse {
                trends: vec![trend("2024-03"), trend("2024-01"), trend("2024-02")],
            },
            transactions,
        )
    }

    #[test]
    fn transactions_are_kept_newest_first() {
        let store = DataStore::new([customer(
            "12345",
            vec![
                tx("a", "2024-09-01T00:00:00Z", "Groceries", 1),
                tx("b", "2024-09-03T00:00:00Z", "Groceries", 1),
                tx("c", "2024-09-02T00:00:00Z", "Groceries", 1),
            ],
        )]);

        let ids: Vec<&str> = store
            .all("12345")
            .unwrap()
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn unknown_customer_has_no_data() {
        let store = DataStore::new([customer("12345", vec![])]);

        assert!(store.all("999").unwrap().is_empty());
        assert!(store.profile("999").is_none());
        assert!(store.filters("999").is_none());
        assert!(store.goals("999").is_none());
        assert!(store.trends("999", 12).is_none());
    }

    #[test]
    fn trends_keep_most_recent_months_in_ascending_order() {
        let store = DataStore::new([customer("12345", vec![])]);

        let months: Vec<String> = store
            .trends("12345", 2)
            .unwrap()
            .trends
            .into_iter()
            .map(|t| t.month)
            .collect();
        assert_eq!(months, vec!["2024-02", "2024-03"]);

        assert_eq!(store.trends("12345", 24).unwrap().trends.len(), 3);
    }

    #[test]
    fn status_lists_customers_and_counts() {
        let store = DataStore::new([customer(
            "12345",
            vec![tx("a", "2024-09-01T00:00:00Z", "Groceries", 1)],
        )]);
        let status = store.status();

        assert!(status.is_loaded);
        assert_eq!(status.customers, vec!["12345".to_string()]);
        assert_eq!(status.transactions, 1);

        assert!(!DataStore::default().status().is_loaded);
    }
}
