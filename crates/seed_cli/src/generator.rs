//! Deterministic synthetic transaction history.
//!
//! The same configuration always yields the same transactions. The category
//! catalog below must stay in step with `seed/filters.json`.

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use engine::{DateRange, EngineError, Transaction};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rust_decimal::{Decimal, prelude::FromPrimitive};

pub const DEFAULT_COUNT: usize = 500;
pub const DEFAULT_RNG_SEED: u64 = 12345;

const MIN_AMOUNT: Decimal = Decimal::from_parts(10, 0, 0, false, 0);
const MAX_AMOUNT: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);
const OUTLIER_RATE: f64 = 0.06;

const PAYMENT_METHODS: [&str; 5] = ["Credit Card", "Debit Card", "Debit Order", "EFT", "Cash"];

pub struct CategoryProfile {
    pub name: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
    merchants: &'static [&'static str],
    descriptions: &'static [&'static str],
    min: i64,
    max: i64,
    weight: u32,
    has_outliers: bool,
}

pub const CATEGORIES: [CategoryProfile; 6] = [
    CategoryProfile {
        name: "Groceries",
        color: "#FF6B6B",
        icon: "shopping-cart",
        merchants: &["Pick n Pay", "Checkers", "Shoprite", "Woolworths Food", "Spar"],
        descriptions: &["Weekly groceries", "Top-up essentials", "Household items", "Monthly stock-up"],
        min: 30,
        max: 650,
        weight: 28,
        has_outliers: false,
    },
    CategoryProfile {
        name: "Entertainment",
        color: "#4ECDC4",
        icon: "film",
        merchants: &["Netflix", "Spotify", "ShowMax", "Steam", "Ster-Kinekor"],
        descriptions: &["Monthly subscription", "Movie tickets", "Game purchase", "Streaming subscription"],
        min: 50,
        max: 500,
        weight: 10,
        has_outliers: false,
    },
    CategoryProfile {
        name: "Transportation",
        color: "#45B7D1",
        icon: "car",
        merchants: &["Engen", "Shell", "BP", "Uber", "Bolt"],
        descriptions: &["Fuel refill", "Ride share", "Parking", "Car wash"],
        min: 40,
        max: 1200,
        weight: 18,
        has_outliers: false,
    },
    CategoryProfile {
        name: "Dining",
        color: "#F7DC6F",
        icon: "utensils",
        merchants: &["KFC", "McDonald's", "Nando's", "Ocean Basket", "Mugg & Bean"],
        descriptions: &["Lunch", "Dinner", "Takeaway", "Coffee & snacks"],
        min: 60,
        max: 900,
        weight: 18,
        has_outliers: false,
    },
    CategoryProfile {
        name: "Shopping",
        color: "#BB8FCE",
        icon: "shopping-bag",
        merchants: &["Takealot", "Mr Price", "H&M", "Game", "Cape Union Mart"],
        descriptions: &["Clothing", "Online purchase", "Electronics accessory", "General shopping"],
        min: 80,
        max: 2500,
        weight: 14,
        has_outliers: true,
    },
    CategoryProfile {
        name: "Utilities",
        color: "#85C1E9",
        icon: "zap",
        merchants: &["Eskom", "City of Cape Town", "Vodacom", "MTN", "Telkom"],
        descriptions: &["Electricity", "Mobile bill", "Internet bill", "Municipal services"],
        min: 100,
        max: 2200,
        weight: 12,
        has_outliers: true,
    },
];

#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub count: usize,
    pub rng_seed: u64,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            rng_seed: DEFAULT_RNG_SEED,
            from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            to: NaiveDate::from_ymd_opt(2024, 9, 16).unwrap_or_default(),
        }
    }
}

/// Generates `config.count` transactions between `from` and `to`
/// (inclusive), newest first.
pub fn generate(config: &GeneratorConfig) -> Result<Vec<Transaction>, EngineError> {
    let window = DateRange::from_dates(config.from, config.to)?;
    let span = (window.end - window.start).num_seconds();
    let mut rng = StdRng::seed_from_u64(config.rng_seed);

    let mut transactions: Vec<Transaction> = (0..config.count)
        .map(|i| {
            let category = pick_category(&mut rng);
            let day = (window.start + TimeDelta::seconds(rng.gen_range(0..=span))).date_naive();
            let date = day.and_time(NaiveTime::MIN) + biased_time_of_day(&mut rng);
            let amount = amount(category, &mut rng);

            Transaction {
                id: format!("txn_{}_{i:04}", date.format("%Y%m%d")),
                date: date.and_utc().fixed_offset(),
                merchant: pick(category.merchants, &mut rng).to_string(),
                category: category.name.to_string(),
                amount,
                description: pick(category.descriptions, &mut rng).to_string(),
                payment_method: pick(&PAYMENT_METHODS, &mut rng).to_string(),
                icon: category.icon.to_string(),
                category_color: category.color.to_string(),
            }
        })
        .collect();

    transactions.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(transactions)
}

fn pick<'a>(items: &[&'a str], rng: &mut StdRng) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

fn pick_category(rng: &mut StdRng) -> &'static CategoryProfile {
    // Groceries, Transportation and Dining dominate.
    let total: u32 = CATEGORIES.iter().map(|c| c.weight).sum();
    let mut roll = rng.gen_range(1..=total);

    for category in &CATEGORIES {
        if roll <= category.weight {
            return category;
        }
        roll -= category.weight;
    }

    &CATEGORIES[0]
}

/// Mornings, lunch and evenings are the busy times.
fn biased_time_of_day(rng: &mut StdRng) -> TimeDelta {
    let hour: i64 = match rng.gen_range(0.0..1.0) {
        r if r < 0.25 => rng.gen_range(7..=10),
        r if r < 0.55 => rng.gen_range(11..=14),
        r if r < 0.90 => rng.gen_range(16..=20),
        _ => rng.gen_range(0..=23),
    };
    let minute: i64 = rng.gen_range(0..60);
    let second: i64 = rng.gen_range(0..60);

    TimeDelta::seconds(hour * 3600 + minute * 60 + second)
}

/// Skewed towards small amounts, with rare spikes for the categories that
/// allow them.
fn amount(category: &CategoryProfile, rng: &mut StdRng) -> Decimal {
    let t = Decimal::from_f64(rng.gen_range(0.0..1.0)).unwrap_or_default();
    let min = Decimal::from(category.min);
    let max = Decimal::from(category.max);
    let mut amount = min + (max - min) * t * t;

    if category.has_outliers && rng.gen_bool(OUTLIER_RATE) {
        let factor = Decimal::from_f64(1.3 + rng.gen_range(0.0..1.0) * 1.8).unwrap_or(Decimal::ONE);
        amount *= factor;
    }

    amount.clamp(MIN_AMOUNT, MAX_AMOUNT).round_dp(2)
}
