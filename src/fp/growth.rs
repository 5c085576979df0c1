use std::collections::HashSet;

use itertools::Itertools;
use tracing::info;

use crate::{
    config::{MiningConfig, SupportThreshold},
    error::{MiningError, Result},
    fp::tree::{FpTree, TreeSummary},
    itemset::{canonical, support, with_item},
    types::{FrequentItemset, ItemId, Itemset, PatternCounts, Transaction},
};

/// Result of one FP-Growth run.
#[derive(Debug, Clone)]
pub struct FpGrowthOutput {
    /// Raw counts per frequent itemset.
    pub patterns: PatternCounts,
    /// Measurements of the top-level tree.
    pub tree: TreeSummary,
    pub transaction_count: usize,
}

impl FpGrowthOutput {
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Patterns normalized by the transaction count, descending support.
    pub fn frequent_itemsets(&self) -> Vec<FrequentItemset> {
        self.patterns
            .iter()
            .map(|(itemset, &count)| FrequentItemset {
                itemset: itemset.clone(),
                count,
                support: support(count, self.transaction_count),
            })
            .sorted_by(FrequentItemset::by_descending_support)
            .collect()
    }
}

pub fn fp_growth(transactions: &[Transaction], config: &MiningConfig) -> Result<FpGrowthOutput> {
    config.validate()?;
    if transactions.is_empty() {
        return Err(MiningError::InvalidInput(
            "no transactions supplied, support is undefined".into(),
        ));
    }

    let threshold = SupportThreshold::new(config.min_support, transactions.len());
    info!(
        transactions = transactions.len(),
        min_support = config.min_support,
        max_depth = ?config.max_depth,
        "running fp-growth"
    );

    let tree = FpTree::new(transactions, &threshold, config.max_depth);
    let patterns = mine_patterns(&tree, &threshold);
    let tree = tree.into_summary();

    if patterns.is_empty() {
        info!(min_support = config.min_support, "no frequent itemsets found");
    } else {
        info!(
            frequent = patterns.len(),
            depth = tree.depth,
            node_count = tree.node_count,
            "fp-growth finished"
        );
    }

    Ok(FpGrowthOutput {
        patterns,
        tree,
        transaction_count: transactions.len(),
    })
}

/// Every frequent pattern of `tree`, each key carrying the tree's suffix.
///
/// Items are mined least frequent first. A pattern already taken from an earlier item's
/// sub-tree in this call is skipped rather than summed.
pub fn mine_patterns(tree: &FpTree, threshold: &SupportThreshold) -> PatternCounts {
    if let Some(path) = tree.single_path() {
        return single_path_patterns(tree, &path);
    }

    let mut patterns = PatternCounts::new();
    let mut seen: HashSet<Itemset> = HashSet::new();

    for (item, count) in tree.mining_order() {
        let base = tree.conditional_pattern_base(item);
        let subtree = FpTree::conditional(&base, threshold, item, count);

        for (pattern, count) in mine_patterns(&subtree, threshold) {
            if !seen.insert(pattern.clone()) {
                continue;
            }
            *patterns.entry(pattern).or_insert(0) += count;
        }
    }

    with_suffix(tree, patterns)
}

/// Every non-empty combination of the chain, counted by its least frequent member.
fn single_path_patterns(tree: &FpTree, path: &[(ItemId, u32)]) -> PatternCounts {
    let suffix = tree.suffix();

    let mut patterns = PatternCounts::new();
    if let Some(item) = suffix {
        patterns.insert(vec![item], tree.root_count());
    }

    for size in 1..=path.len() {
        for combination in path.iter().combinations(size) {
            let count = combination
                .iter()
                .map(|&&(_, count)| count)
                .min()
                .unwrap_or(0);
            let pattern = canonical(combination.iter().map(|&&(item, _)| item).chain(suffix));
            patterns.insert(pattern, count);
        }
    }

    patterns
}

fn with_suffix(tree: &FpTree, patterns: PatternCounts) -> PatternCounts {
    match tree.suffix() {
        None => patterns,
        Some(suffix) => {
            let mut suffixed: PatternCounts = patterns
                .into_iter()
                .map(|(pattern, count)| (with_item(&pattern, suffix), count))
                .collect();
            suffixed.insert(vec![suffix], tree.root_count());
            suffixed
        }
    }
}
