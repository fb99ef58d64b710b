use std::path::PathBuf;

use engine::{CategoryQuery, Engine, FixedClock, SeedLoader, TransactionQuery};

fn seed_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../seed")
}

fn engine() -> Engine {
    let store = SeedLoader::new(seed_dir()).load().unwrap();
    Engine::builder()
        .store(store)
        .clock(FixedClock::new(chrono::Utc::now()))
        .build()
}

#[test]
fn committed_seed_loads() {
    let engine = engine();
    let status = engine.seed_status();

    assert!(status.is_loaded);
    assert_eq!(status.customers, vec!["12345".to_string()]);
    assert_eq!(status.transactions, 500);
    assert_eq!(engine.filters("12345").unwrap().categories.len(), 6);
    assert_eq!(engine.filters("12345").unwrap().date_range_presets.len(), 4);
}

#[test]
fn committed_seed_windows_end_on_latest_transaction() {
    let engine = engine();

    let breakdown = engine
        .spending_categories("12345", &CategoryQuery::default())
        .unwrap();
    assert_eq!(breakdown.date_range.end_date_string(), "2024-09-16");
    assert_eq!(breakdown.date_range.start_date_string(), "2024-08-18");
    assert!(!breakdown.categories.is_empty());

    let page = engine
        .transactions("12345", &TransactionQuery::default())
        .unwrap();
    assert_eq!(page.transactions.len(), 20);
    assert!(page.pagination.total > 20);
}

#[test]
fn committed_trends_and_goals_agree_with_transactions() {
    use std::collections::BTreeMap;

    use rust_decimal::Decimal;

    let store = SeedLoader::new(seed_dir()).load().unwrap();
    let engine = engine();
    let all = engine::TransactionRepository::all(&store, "12345").unwrap();

    let mut monthly: BTreeMap<String, (Decimal, u32)> = BTreeMap::new();
    for tx in all {
        let entry = monthly
            .entry(tx.utc_date().format("%Y-%m").to_string())
            .or_default();
        entry.0 += tx.amount;
        entry.1 += 1;
    }

    let trends = engine.trends("12345", Some(24)).unwrap().trends;
    assert_eq!(trends.len(), monthly.len());
    for trend in &trends {
        let (total, count) = monthly[&trend.month];
        assert_eq!(trend.total_spent, total, "{}", trend.month);
        assert_eq!(trend.transaction_count, count, "{}", trend.month);
    }

    for goal in engine.goals("12345").unwrap().goals {
        let spent: Decimal = all
            .iter()
            .filter(|tx| tx.in_category(&goal.category))
            .filter(|tx| tx.utc_date().format("%Y-%m").to_string() == "2024-09")
            .map(|tx| tx.amount)
            .sum();
        assert_eq!(goal.current_spent, spent, "{}", goal.category);
    }
}
