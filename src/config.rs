use crate::{
    error::{MiningError, Result},
    itemset::support,
};

/// Parameters accepted by both engines.
#[derive(Debug, Clone, PartialEq)]
pub struct MiningConfig {
    /// Fraction of transactions in (0, 1].
    pub min_support: f64,
    /// Caps how many items of a transaction go into the top-level FP-tree.
    pub max_depth: Option<usize>,
}

impl MiningConfig {
    pub fn new(min_support: f64) -> Result<Self> {
        let config = Self {
            min_support,
            max_depth: None,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn validate(&self) -> Result<()> {
        // NaN fails both comparisons
        if self.min_support > 0.0 && self.min_support <= 1.0 {
            Ok(())
        } else {
            Err(MiningError::InvalidConfiguration(format!(
                "min_support must be in (0, 1], got {}",
                self.min_support
            )))
        }
    }
}

/// Minimum support bound to the transaction count of the top-level problem.
///
/// Both engines decide frequency through [`SupportThreshold::is_met`], so an itemset
/// sitting exactly on the boundary is classified the same way by each of them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupportThreshold {
    min_support: f64,
    transaction_count: usize,
}

impl SupportThreshold {
    pub fn new(min_support: f64, transaction_count: usize) -> Self {
        Self {
            min_support,
            transaction_count,
        }
    }

    pub fn min_support(&self) -> f64 {
        self.min_support
    }

    pub fn transaction_count(&self) -> usize {
        self.transaction_count
    }

    pub fn support(&self, count: u32) -> f64 {
        support(count, self.transaction_count)
    }

    pub fn is_met(&self, count: u32) -> bool {
        self.transaction_count > 0 && self.support(count) >= self.min_support
    }
}
