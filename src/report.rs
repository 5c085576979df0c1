//! Plain-text result and statistics files.

use std::{io::Write, time::Duration};

use itertools::Itertools;

use crate::{
    dataset::Dataset,
    error::Result,
    fp::TreeSummary,
    types::{FrequentItemset, ItemId, LevelStats},
};

/// `{a, b, c}` in canonical item order.
pub fn format_itemset(dataset: &Dataset, itemset: &[ItemId]) -> String {
    format!("{{{}}}", dataset.names_of(itemset).join(", "))
}

/// `75.0%\t{a, b}`
pub fn format_support_line(dataset: &Dataset, frequent: &FrequentItemset) -> String {
    format!(
        "{:.1}%\t{}",
        frequent.support * 100.0,
        format_itemset(dataset, &frequent.itemset)
    )
}

/// One line per itemset, descending support.
pub fn write_frequent<W: Write>(
    out: &mut W,
    dataset: &Dataset,
    frequent: &[FrequentItemset],
) -> Result<()> {
    for itemset in frequent.iter().sorted_by(|a, b| a.by_descending_support(b)) {
        writeln!(out, "{}", format_support_line(dataset, itemset))?;
    }
    Ok(())
}

/// Closed itemsets followed by the closed-derivation time as a percentage of mining time.
pub fn write_closed<W: Write>(
    out: &mut W,
    dataset: &Dataset,
    closed: &[FrequentItemset],
    ratio_percent: f64,
) -> Result<()> {
    writeln!(out, "Total number of frequent closed itemsets: {}", closed.len())?;
    write_frequent(out, dataset, closed)?;
    writeln!(out)?;
    writeln!(out, "Ratio of computation time compared to Task 1: {:.2}%", ratio_percent)?;
    Ok(())
}

pub fn write_apriori_stats<W: Write>(
    out: &mut W,
    total_itemsets: usize,
    stats: &[LevelStats],
    elapsed: Duration,
) -> Result<()> {
    writeln!(out, "Total number of frequent itemsets: {}", total_itemsets)?;
    for level in stats {
        writeln!(
            out,
            "{}\t{}\t{}",
            level.level, level.candidates_before, level.candidates_after
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Total execution time: {:.2} seconds", elapsed.as_secs_f64())?;
    Ok(())
}

pub fn write_tree_stats<W: Write>(
    out: &mut W,
    total_itemsets: usize,
    tree: &TreeSummary,
    elapsed: Duration,
) -> Result<()> {
    writeln!(out, "Total number of frequent itemsets: {}", total_itemsets)?;
    writeln!(out, "FP-Tree Depth: {}", tree.depth)?;
    writeln!(out, "FP-Tree Node Count: {}", tree.node_count)?;
    writeln!(
        out,
        "Tree Construction Time: {:.2} seconds",
        tree.construction_time.as_secs_f64()
    )?;
    writeln!(out, "Total execution time: {:.2} seconds", elapsed.as_secs_f64())?;
    Ok(())
}
