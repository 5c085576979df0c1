use itertools::Itertools;

use crate::{itemset::is_subset, types::FrequentItemset};

/// Keeps the itemsets that have no one-item-larger superset with the same support.
///
/// Checking supersets one item larger is enough: a larger superset with equal support forces
/// every itemset between the two to share that support. Supports share one denominator, so raw
/// counts are compared exactly.
pub fn find_closed_itemsets(frequent: &[FrequentItemset]) -> Vec<FrequentItemset> {
    let by_length = frequent
        .iter()
        .into_group_map_by(|candidate| candidate.itemset.len());

    frequent
        .iter()
        .filter(|candidate| {
            by_length
                .get(&(candidate.itemset.len() + 1))
                .map_or(true, |supersets| {
                    !supersets.iter().any(|superset| {
                        superset.count == candidate.count
                            && is_subset(&candidate.itemset, &superset.itemset)
                    })
                })
        })
        .cloned()
        .sorted_by(FrequentItemset::by_descending_support)
        .collect()
}
