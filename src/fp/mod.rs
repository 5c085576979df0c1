pub mod growth;
pub mod tree;

pub use growth::{fp_growth, mine_patterns, FpGrowthOutput};
pub use tree::{ConditionalPatternBase, FpNode, FpTree, HeaderChain, NodeId, TreeSummary};
