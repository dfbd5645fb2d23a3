use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::{Event, EventStore};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubcategoryDuration {
    pub subcategory: String,
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthDuration {
    pub year_month: String,
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMonthDuration {
    pub category: String,
    pub subcategory: String,
    pub year_month: String,
    pub duration: f64,
}

/// The three views handed to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregates {
    pub by_subcategory: Vec<SubcategoryDuration>,
    pub by_month: Vec<MonthDuration>,
    pub by_category_month: Vec<CategoryMonthDuration>,
}

impl Aggregates {
    pub fn from_store(store: &EventStore) -> Self {
        Self {
            by_subcategory: duration_by_subcategory(store),
            by_month: duration_by_month(store),
            by_category_month: duration_by_category_month(store),
        }
    }

    pub fn total_duration(&self) -> f64 {
        self.by_subcategory.iter().map(|row| row.duration).sum()
    }
}

/// Sums keyed by first appearance so equal totals keep a stable order.
struct OrderedSums<K> {
    index: HashMap<K, usize>,
    rows: Vec<(K, f64)>,
}

impl<K: Clone + Eq + Hash> OrderedSums<K> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            rows: Vec::new(),
        }
    }

    fn add(&mut self, key: K, value: f64) {
        match self.index.get(&key) {
            Some(&pos) => self.rows[pos].1 += value,
            None => {
                self.index.insert(key.clone(), self.rows.len());
                self.rows.push((key, value));
            }
        }
    }

    fn into_rows(self) -> Vec<(K, f64)> {
        self.rows
    }
}

/// One row per subcategory, largest total first.
pub fn duration_by_subcategory(store: &EventStore) -> Vec<SubcategoryDuration> {
    let mut totals = OrderedSums::new();
    for event in store {
        totals.add(event.subcategory().to_string(), event.duration());
    }
    let mut result: Vec<SubcategoryDuration> = totals
        .into_rows()
        .into_iter()
        .map(|(subcategory, duration)| SubcategoryDuration {
            subcategory,
            duration,
        })
        .collect();
    result.sort_by(|a, b| b.duration.total_cmp(&a.duration));
    result
}

/// One row per `YYYYMM` of event start, oldest month first.
pub fn duration_by_month(store: &EventStore) -> Vec<MonthDuration> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for event in store {
        *totals.entry(event.year_month()).or_insert(0.0) += event.duration();
    }
    totals
        .into_iter()
        .map(|(year_month, duration)| MonthDuration {
            year_month,
            duration,
        })
        .collect()
}

pub fn duration_by_category_month(store: &EventStore) -> Vec<CategoryMonthDuration> {
    let mut totals = OrderedSums::new();
    for event in store {
        totals.add(category_month_key(event), event.duration());
    }
    totals
        .into_rows()
        .into_iter()
        .map(
            |((category, subcategory, year_month), duration)| CategoryMonthDuration {
                category,
                subcategory,
                year_month,
                duration,
            },
        )
        .collect()
}

fn category_month_key(event: &Event) -> (String, String, String) {
    (
        event.category().to_string(),
        event.subcategory().to_string(),
        event.year_month(),
    )
}
