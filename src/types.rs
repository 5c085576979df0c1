use std::{
    cmp::Ordering,
    collections::{BTreeSet, HashMap},
};

pub type ItemId = usize;
pub type ItemName<'l> = &'l str;

/// Sorted ascending, no duplicates.
pub type Itemset = Vec<ItemId>;
/// Any order, duplicates allowed. The engines canonicalise on entry; the helpers in
/// `itemset` expect the canonical form.
pub type Transaction = Vec<ItemId>;

pub type Inventory = Vec<String>;
pub type ReverseLookup = HashMap<String, ItemId>;

pub type ItemCounts = HashMap<ItemId, u32>;
pub type ItemsetCounts = HashMap<Itemset, u32>;
pub type PatternCounts = HashMap<Itemset, u32>;

pub type ItemsetLength = usize;
pub type CandidateLevel = BTreeSet<Itemset>;

/// An itemset with its raw occurrence count and normalized support.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequentItemset {
    pub itemset: Itemset,
    pub count: u32,
    pub support: f64,
}

impl FrequentItemset {
    /// Descending support, canonical itemset order on ties.
    pub fn by_descending_support(&self, other: &Self) -> Ordering {
        other
            .count
            .cmp(&self.count)
            .then_with(|| self.itemset.cmp(&other.itemset))
    }
}

/// Candidate counts for one Apriori level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelStats {
    pub level: ItemsetLength,
    pub candidates_before: usize,
    pub candidates_after: usize,
}
