//! Frequent and closed itemset mining.
//!
//! Two engines produce the same frequent itemsets from a list of transactions:
//! [`Apriori`], which grows candidates level by level and counts each one against every
//! transaction, and [`fp_growth`], which compresses the transactions into an [`FpTree`] and
//! mines it by recursive conditional sub-trees. [`find_closed_itemsets`] reduces a frequent
//! set to its closed itemsets.
//!
//! ```
//! use freqmine::{find_closed_itemsets, fp_growth, Apriori, Dataset, MiningConfig};
//!
//! let dataset = Dataset::from_records(vec![
//!     vec!["A", "B"],
//!     vec!["B", "C"],
//!     vec!["A", "B", "C"],
//!     vec!["A", "B", "C", "D"],
//! ]);
//! let config = MiningConfig::new(0.5)?;
//!
//! let apriori = Apriori::new(&config)?.run(dataset.transactions())?;
//! let closed = find_closed_itemsets(&apriori.frequent);
//! assert_eq!(closed.len(), 4);
//!
//! let growth = fp_growth(dataset.transactions(), &config)?;
//! assert_eq!(growth.len(), apriori.len());
//! # Ok::<(), freqmine::MiningError>(())
//! ```

pub mod combi;
pub mod config;
pub mod dataset;
pub mod error;
pub mod fp;
pub mod itemset;
pub mod itemsets;
pub mod report;
pub mod types;

#[cfg(feature = "python")]
mod wrapper;


pub use combi::{AllPairsJoin, JoinStrategy, PrefixJoin};
pub use config::{MiningConfig, SupportThreshold};
pub use dataset::Dataset;
pub use error::{MiningError, Result};
pub use fp::{fp_growth, mine_patterns, FpGrowthOutput, FpTree, TreeSummary};
pub use itemsets::{
    count_support, find_closed_itemsets, generate_candidates, Apriori, AprioriOutput,
};
pub use types::{FrequentItemset, ItemId, Itemset, LevelStats, Transaction};
