use itertools::Itertools;

use crate::{
    itemset::union,
    types::{CandidateLevel, Itemset, ItemsetLength},
};

/// Builds the candidate level of `target_length` from the frequent itemsets one size below.
pub trait JoinStrategy {
    fn join(&self, level: &CandidateLevel, target_length: ItemsetLength) -> CandidateLevel;
}

/// Unions every pair of the level and keeps those of the target length.
///
/// Quadratic in the level size. Pairs that do not share a prefix still contribute, so the
/// candidate level is larger than strictly necessary; the published level statistics count
/// these candidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllPairsJoin;

impl JoinStrategy for AllPairsJoin {
    fn join(&self, level: &CandidateLevel, target_length: ItemsetLength) -> CandidateLevel {
        level
            .iter()
            .tuple_combinations()
            .map(|(a, b)| union(a, b))
            .filter(|joined| joined.len() == target_length)
            .collect()
    }
}

/// Joins only itemsets sharing their first `target_length - 2` items.
///
/// https://github.com/tommyod/Efficient-Apriori/blob/master/efficient_apriori/itemsets.py
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixJoin;

impl JoinStrategy for PrefixJoin {
    fn join(&self, level: &CandidateLevel, target_length: ItemsetLength) -> CandidateLevel {
        let mut joined = CandidateLevel::new();
        if target_length < 2 {
            return joined;
        }

        // a BTreeSet iterates lexicographically, so a shared prefix forms one run
        let itemsets: Vec<&Itemset> = level
            .iter()
            .filter(|itemset| itemset.len() + 1 == target_length)
            .collect();

        let mut i = 0;
        while i < itemsets.len() {
            let prefix = &itemsets[i][..target_length - 2];
            let run = itemsets[i..]
                .iter()
                .take_while(|other| other.starts_with(prefix))
                .count();

            for (a, b) in itemsets[i..i + run].iter().tuple_combinations() {
                if let Some(&last) = b.last() {
                    let mut candidate = a.to_vec();
                    candidate.push(last);
                    joined.insert(candidate);
                }
            }

            i += run;
        }

        joined
    }
}
