use std::borrow::Cow;

use crate::types::{ItemId, Itemset, Transaction};
use itertools::Itertools;

/// Sorts and deduplicates `items` into the canonical itemset form.
pub fn canonical<I>(items: I) -> Itemset
where
    I: IntoIterator<Item = ItemId>,
{
    items.into_iter().sorted_unstable().dedup().collect()
}

/// Strictly ascending ids, which rules out duplicates.
pub fn is_canonical(items: &[ItemId]) -> bool {
    items.windows(2).all(|pair| pair[0] < pair[1])
}

/// Borrows `transactions` when all of them are canonical, otherwise returns canonical copies.
pub fn canonical_transactions(transactions: &[Transaction]) -> Cow<'_, [Transaction]> {
    if transactions.iter().all(|transaction| is_canonical(transaction)) {
        Cow::Borrowed(transactions)
    } else {
        Cow::Owned(
            transactions
                .iter()
                .map(|transaction| canonical(transaction.iter().copied()))
                .collect(),
        )
    }
}

/// Both slices must be canonical.
pub fn is_subset(itemset: &[ItemId], transaction: &[ItemId]) -> bool {
    if itemset.len() > transaction.len() {
        return false;
    }
    let mut rest = transaction.iter();
    itemset.iter().all(|item| rest.any(|other| other == item))
}

pub fn union(a: &[ItemId], b: &[ItemId]) -> Itemset {
    a.iter().merge(b.iter()).dedup().copied().collect()
}

/// Adds `item` to a canonical itemset, keeping it canonical.
pub fn with_item(itemset: &[ItemId], item: ItemId) -> Itemset {
    union(itemset, &[item])
}

/// Number of transactions containing `itemset`. Linear in the number of transactions.
pub fn support_count(itemset: &[ItemId], transactions: &[Transaction]) -> u32 {
    transactions
        .iter()
        .filter(|transaction| is_subset(itemset, transaction))
        .count() as u32
}

pub fn support(count: u32, transaction_count: usize) -> f64 {
    count as f64 / transaction_count as f64
}
