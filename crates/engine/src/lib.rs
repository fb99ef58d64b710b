use std::sync::Arc;

use api_types::status::SeedStatus;
use chrono::{DateTime, Utc};

pub use clock::{Clock, FixedClock, SystemClock};
pub use date_range::{DateRange, Period, reference_time, resolve};
pub use error::EngineError;
pub use seed::SeedLoader;
pub use spending::{
    CategoryBreakdown, CategoryQuery, CategorySpend, SpendingSummary, percentage_change,
};
pub use store::{CustomerData, CustomerRepository, DataStore, TransactionRepository};
pub use transactions::{
    DEFAULT_LIMIT, MAX_LIMIT, Pagination, SortBy, Transaction, TransactionPage, TransactionQuery,
};

mod clock;
mod date_range;
mod error;
mod ops;
pub mod seed;
mod spending;
mod store;
mod transactions;
mod util;

type ResultEngine<T> = Result<T, EngineError>;

/// Read-only query facade over the seeded customer data.
///
/// Every operation is a pure function of the repositories, the request and
/// the clock, so one `Engine` can serve concurrent requests without locking.
pub struct Engine {
    transactions: Arc<dyn TransactionRepository>,
    customers: Arc<dyn CustomerRepository>,
    clock: Arc<dyn Clock>,
    status: SeedStatus,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn seed_status(&self) -> &SeedStatus {
        &self.status
    }

    /// Anchor for relative periods, derived from the customer's own data.
    fn reference_now(&self, all: &[Transaction]) -> DateTime<Utc> {
        reference_time(all, self.clock.now())
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    transactions: Option<Arc<dyn TransactionRepository>>,
    customers: Option<Arc<dyn CustomerRepository>>,
    clock: Option<Arc<dyn Clock>>,
    status: Option<SeedStatus>,
}

impl EngineBuilder {
    /// Serve both repositories from a loaded snapshot.
    pub fn store(mut self, store: DataStore) -> EngineBuilder {
        let store = Arc::new(store);
        let transactions: Arc<dyn TransactionRepository> = store.clone();
        let customers: Arc<dyn CustomerRepository> = store.clone();

        self.status = Some(store.status());
        self.transactions = Some(transactions);
        self.customers = Some(customers);
        self
    }

    pub fn transactions(mut self, repository: Arc<dyn TransactionRepository>) -> EngineBuilder {
        self.transactions = Some(repository);
        self
    }

    pub fn customers(mut self, repository: Arc<dyn CustomerRepository>) -> EngineBuilder {
        self.customers = Some(repository);
        self
    }

    /// Defaults to [`SystemClock`].
    pub fn clock(mut self, clock: impl Clock + 'static) -> EngineBuilder {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Construct `Engine`. Missing repositories behave as an empty store.
    pub fn build(self) -> Engine {
        let empty = Arc::new(DataStore::default());
        let transactions: Arc<dyn TransactionRepository> = match self.transactions {
            Some(repository) => repository,
            None => empty.clone(),
        };
        let customers: Arc<dyn CustomerRepository> = match self.customers {
            Some(repository) => repository,
            None => empty,
        };

        Engine {
            transactions,
            customers,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            status: self.status.unwrap_or(SeedStatus {
                is_loaded: false,
                customers: vec![],
                transactions: 0,
            }),
        }
    }
}
