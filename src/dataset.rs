use std::{collections::BTreeSet, io::BufRead};

use crate::{
    error::Result,
    itemset::canonical,
    types::{Inventory, ItemId, ItemName, Itemset, ReverseLookup, Transaction},
};

/// Transactions over interned item ids.
///
/// Ids are handed out in ascending order of item name, so sorting by id is the canonical
/// item order used for itemset output and for tie-breaks in the FP-tree.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    inventory: Inventory,
    reverse_lookup: ReverseLookup,
    transactions: Vec<Transaction>,
}

impl Dataset {
    pub fn from_records<I, R, S>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let raw: Vec<BTreeSet<String>> = records
            .into_iter()
            .map(|record| {
                record
                    .into_iter()
                    .map(|token| token.as_ref().to_owned())
                    .collect()
            })
            .collect();

        let names: BTreeSet<&str> = raw.iter().flatten().map(String::as_str).collect();
        let inventory: Inventory = names.into_iter().map(str::to_owned).collect();
        let reverse_lookup: ReverseLookup = inventory
            .iter()
            .enumerate()
            .map(|(id, name)| (name.clone(), id))
            .collect();

        let transactions = raw
            .iter()
            .map(|record| {
                canonical(
                    record
                        .iter()
                        .filter_map(|name| reverse_lookup.get(name).copied()),
                )
            })
            .collect();

        Self {
            inventory,
            reverse_lookup,
            transactions,
        }
    }

    /// One transaction per line, items separated by whitespace. Blank lines are kept as
    /// empty transactions.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let lines = reader.lines().collect::<std::io::Result<Vec<String>>>()?;
        Ok(Self::from_records(
            lines.iter().map(|line| line.split_whitespace()),
        ))
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn num_items(&self) -> usize {
        self.inventory.len()
    }

    pub fn name_of(&self, item: ItemId) -> Option<ItemName<'_>> {
        self.inventory.get(item).map(String::as_str)
    }

    pub fn id_of(&self, name: &str) -> Option<ItemId> {
        self.reverse_lookup.get(name).copied()
    }

    /// Canonical itemset for `names`, or `None` if any name is unknown.
    pub fn itemset_of<'n, I>(&self, names: I) -> Option<Itemset>
    where
        I: IntoIterator<Item = &'n str>,
    {
        let ids = names
            .into_iter()
            .map(|name| self.id_of(name))
            .collect::<Option<Vec<ItemId>>>()?;
        Some(canonical(ids))
    }

    pub fn names_of(&self, itemset: &[ItemId]) -> Vec<ItemName<'_>> {
        itemset.iter().filter_map(|&item| self.name_of(item)).collect()
    }
}
