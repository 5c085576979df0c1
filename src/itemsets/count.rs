use crate::{
    combi::{AllPairsJoin, JoinStrategy},
    config::{MiningConfig, SupportThreshold},
    error::{MiningError, Result},
    itemset::{canonical_transactions, support_count},
    types::{
        CandidateLevel, FrequentItemset, ItemsetCounts, ItemsetLength, LevelStats, Transaction,
    },
};
use tracing::{debug, info};

/// Result of one Apriori run.
#[derive(Debug, Clone)]
pub struct AprioriOutput {
    /// Frequent itemsets, shortest first, canonical order within a level.
    pub frequent: Vec<FrequentItemset>,
    /// Counts of every evaluated candidate found in at least one transaction, frequent or not.
    pub frequency_table: ItemsetCounts,
    pub stats: Vec<LevelStats>,
    pub transaction_count: usize,
}

impl AprioriOutput {
    pub fn is_empty(&self) -> bool {
        self.frequent.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frequent.len()
    }
}

/// Level-wise frequent itemset miner.
#[derive(Debug, Clone)]
pub struct Apriori<J = AllPairsJoin> {
    min_support: f64,
    join: J,
}

impl Apriori {
    pub fn new(config: &MiningConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            min_support: config.min_support,
            join: AllPairsJoin,
        })
    }
}

impl<J: JoinStrategy> Apriori<J> {
    /// Swaps the candidate join without touching the rest of the run.
    pub fn with_join<K: JoinStrategy>(self, join: K) -> Apriori<K> {
        Apriori {
            min_support: self.min_support,
            join,
        }
    }

    pub fn run(&self, transactions: &[Transaction]) -> Result<AprioriOutput> {
        if transactions.is_empty() {
            return Err(MiningError::InvalidInput(
                "no transactions supplied, support is undefined".into(),
            ));
        }

        let transactions = canonical_transactions(transactions);
        let transactions: &[Transaction] = &transactions;
        let total = transactions.len();
        let threshold = SupportThreshold::new(self.min_support, total);
        info!(transactions = total, min_support = self.min_support, "running apriori");

        let mut frequency_table = ItemsetCounts::new();
        let mut levels: Vec<CandidateLevel> = Vec::new();
        let mut stats = Vec::new();

        let singletons: CandidateLevel = transactions
            .iter()
            .flatten()
            .map(|&item| vec![item])
            .collect();
        let mut current = count_support(
            &singletons,
            transactions,
            self.min_support,
            &mut frequency_table,
        );

        let mut size: ItemsetLength = 2;
        while !current.is_empty() {
            let candidates = self.join.join(&current, size);
            let passing = count_support(
                &candidates,
                transactions,
                self.min_support,
                &mut frequency_table,
            );

            debug!(
                level = size,
                before = candidates.len(),
                after = passing.len(),
                "counted candidate level"
            );
            stats.push(LevelStats {
                level: size,
                candidates_before: candidates.len(),
                candidates_after: passing.len(),
            });

            levels.push(std::mem::replace(&mut current, passing));
            size += 1;
        }

        let frequent: Vec<FrequentItemset> = levels
            .into_iter()
            .flatten()
            .map(|itemset| {
                let count = frequency_table.get(&itemset).copied().unwrap_or(0);
                FrequentItemset {
                    support: threshold.support(count),
                    itemset,
                    count,
                }
            })
            .collect();

        if frequent.is_empty() {
            info!(min_support = self.min_support, "no frequent itemsets found");
        } else {
            info!(frequent = frequent.len(), levels = stats.len(), "apriori finished");
        }

        Ok(AprioriOutput {
            frequent,
            frequency_table,
            stats,
            transaction_count: total,
        })
    }
}

/// Counts every candidate against every transaction and returns the candidates meeting
/// `min_support`.
///
/// Cost is O(|candidates| x |transactions|) subset tests, the dominant cost of a run: there is
/// no index over transactions and no pruning beyond the support filter. Counts of all
/// candidates, passing or not, are added to `frequency_table`. Candidates and transactions
/// must be canonical, see [`canonical_transactions`].
pub fn count_support(
    candidates: &CandidateLevel,
    transactions: &[Transaction],
    min_support: f64,
    frequency_table: &mut ItemsetCounts,
) -> CandidateLevel {
    let threshold = SupportThreshold::new(min_support, transactions.len());
    let mut passing = CandidateLevel::new();

    for candidate in candidates {
        let count = support_count(candidate, transactions);
        if count > 0 {
            *frequency_table.entry(candidate.clone()).or_insert(0) += count;
        }
        if threshold.is_met(count) {
            passing.insert(candidate.clone());
        }
    }

    passing
}

/// Candidates of `target_length` from the all-pairs join.
pub fn generate_candidates(
    current: &CandidateLevel,
    target_length: ItemsetLength,
) -> CandidateLevel {
    AllPairsJoin.join(current, target_length)
}
