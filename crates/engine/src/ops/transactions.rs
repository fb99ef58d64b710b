use crate::{ResultEngine, TransactionPage, TransactionQuery, transactions};

use super::super::Engine;

impl Engine {
    /// One page of the customer's transactions, filtered and sorted as
    /// requested.
    pub fn transactions(
        &self,
        customer_id: &str,
        query: &TransactionQuery,
    ) -> ResultEngine<TransactionPage> {
        let all = self.transactions.all(customer_id)?;
        let reference_now = self.reference_now(all);

        transactions::list(all, query, reference_now)
    }
}
