//! Loads the static JSON seed into a [`DataStore`].
//!
//! Any missing, empty or malformed file is fatal: the server never starts
//! with a partial snapshot.

use std::path::{Path, PathBuf};

use api_types::{
    customer::CustomerProfile, filters::FiltersResponse, goals::SpendingGoalsResponse,
    trends::SpendingTrendsResponse,
};
use serde::de::DeserializeOwned;

use crate::{CustomerData, DataStore, EngineError, ResultEngine, Transaction};

pub const PROFILE_FILE: &str = "profile.json";
pub const FILTERS_FILE: &str = "filters.json";
pub const GOALS_FILE: &str = "goals.json";
pub const TRENDS_FILE: &str = "trends.json";
pub const TRANSACTIONS_FILE: &str = "transactions.json";

#[derive(Debug, Clone)]
pub struct SeedLoader {
    dir: PathBuf,
}

impl SeedLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Reads every seed document and builds the snapshot.
    pub fn load(&self) -> ResultEngine<DataStore> {
        if !self.dir.is_dir() {
            return Err(EngineError::SeedNotFound(self.dir.clone()));
        }

        let profile: CustomerProfile = self.read(PROFILE_FILE)?;
        let filters: FiltersResponse = self.read(FILTERS_FILE)?;
        let goals: SpendingGoalsResponse = self.read(GOALS_FILE)?;
        let trends: SpendingTrendsResponse = self.read(TRENDS_FILE)?;
        let transactions: Vec<Transaction> = self.read(TRANSACTIONS_FILE)?;

        tracing::info!(
            "loaded seed for customer {} with {} transactions from {}",
            profile.customer_id,
            transactions.len(),
            self.dir.display()
        );

        Ok(DataStore::new([CustomerData::new(
            profile,
            filters,
            goals,
            trends,
            transactions,
        )]))
    }

    fn read<T: DeserializeOwned>(&self, file: &str) -> ResultEngine<T> {
        read_json(&self.dir.join(file))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> ResultEngine<T> {
    if !path.is_file() {
        return Err(EngineError::SeedNotFound(path.to_path_buf()));
    }

    let json = std::fs::read_to_string(path)?;
    if json.trim().is_empty() {
        return Err(EngineError::SeedEmpty(path.to_path_buf()));
    }

    serde_json::from_str(&json).map_err(|source| EngineError::SeedInvalid {
        path: path.to_path_buf(),
        source,
    })
}
