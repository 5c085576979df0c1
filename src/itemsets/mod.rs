pub mod closed;
pub mod count;

pub use closed::find_closed_itemsets;
pub use count::{count_support, generate_candidates, Apriori, AprioriOutput};
