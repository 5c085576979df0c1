use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use crate::{
    config::SupportThreshold,
    itemset::canonical_transactions,
    types::{ItemCounts, ItemId, Transaction},
};
use tracing::debug;

pub type NodeId = usize;

/// Ancestor paths of one item, each with the count of the node it was read from.
pub type ConditionalPatternBase = Vec<(Vec<ItemId>, u32)>;

const ROOT: NodeId = 0;

#[derive(Debug, Clone, PartialEq)]
pub struct FpNode {
    /// `None` only on the root of the top-level tree.
    pub item: Option<ItemId>,
    pub count: u32,
    pub parent: Option<NodeId>,
    /// Next node carrying the same item, in creation order.
    pub link: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl FpNode {
    fn new(item: Option<ItemId>, count: u32, parent: Option<NodeId>) -> Self {
        Self {
            item,
            count,
            parent,
            link: None,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct HeaderEntry {
    head: Option<NodeId>,
    tail: Option<NodeId>,
}

/// What remains of a tree once it has been mined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeSummary {
    pub depth: usize,
    pub node_count: usize,
    pub construction_time: Duration,
}

/// Prefix-sharing tree over frequency-sorted transactions.
///
/// Nodes live in one arena and refer to each other by index. Parent and header-chain links
/// stay valid for the lifetime of the tree; [`FpTree::into_summary`] is the only way to let
/// go of them, and it consumes the tree.
#[derive(Debug, Clone)]
pub struct FpTree {
    nodes: Vec<FpNode>,
    frequent: ItemCounts,
    /// Frequent items by descending count, ties by ascending id.
    order: Vec<ItemId>,
    headers: HashMap<ItemId, HeaderEntry>,
    depth: usize,
    node_count: usize,
    construction_time: Duration,
}

impl FpTree {
    /// Top-level tree. Transactions are canonicalised first, so a repeated item counts once.
    /// With `max_depth`, only the first `max_depth` sorted items of each transaction are
    /// inserted.
    pub fn new(
        transactions: &[Transaction],
        threshold: &SupportThreshold,
        max_depth: Option<usize>,
    ) -> Self {
        let transactions = canonical_transactions(transactions);
        Self::build(
            transactions.iter().map(|transaction| (transaction.as_slice(), 1_u32)),
            threshold,
            None,
            max_depth,
        )
    }

    /// Tree for the sub-problem of `suffix`, whose root carries the suffix and its count in
    /// the parent tree.
    pub fn conditional(
        base: &ConditionalPatternBase,
        threshold: &SupportThreshold,
        suffix: ItemId,
        suffix_count: u32,
    ) -> Self {
        Self::build(
            base.iter().map(|(path, count)| (path.as_slice(), *count)),
            threshold,
            Some((suffix, suffix_count)),
            None,
        )
    }

    fn build<'a, I>(
        transactions: I,
        threshold: &SupportThreshold,
        suffix: Option<(ItemId, u32)>,
        max_depth: Option<usize>,
    ) -> Self
    where
        I: Iterator<Item = (&'a [ItemId], u32)> + Clone,
    {
        let started = Instant::now();

        let mut frequent = ItemCounts::new();
        for (items, weight) in transactions.clone() {
            for &item in items {
                *frequent.entry(item).or_insert(0) += weight;
            }
        }
        frequent.retain(|_, &mut count| threshold.is_met(count));

        let mut order: Vec<ItemId> = frequent.keys().copied().collect();
        order.sort_unstable_by(|a, b| frequent[b].cmp(&frequent[a]).then(a.cmp(b)));
        let rank: HashMap<ItemId, usize> = order
            .iter()
            .enumerate()
            .map(|(rank, &item)| (item, rank))
            .collect();

        let headers = order
            .iter()
            .map(|&item| (item, HeaderEntry::default()))
            .collect();
        let root = FpNode::new(
            suffix.map(|(item, _)| item),
            suffix.map_or(0, |(_, count)| count),
            None,
        );

        let mut tree = Self {
            nodes: vec![root],
            frequent,
            order,
            headers,
            depth: 0,
            node_count: 0,
            construction_time: Duration::default(),
        };

        let mut sorted: Vec<(usize, ItemId)> = Vec::new();
        for (items, weight) in transactions {
            sorted.clear();
            sorted.extend(
                items
                    .iter()
                    .filter_map(|item| rank.get(item).map(|&position| (position, *item))),
            );
            sorted.sort_unstable();
            if let Some(limit) = max_depth {
                sorted.truncate(limit);
            }
            tree.insert(sorted.iter().map(|&(_, item)| item), weight);
        }

        tree.construction_time = started.elapsed();
        let (depth, node_count) = tree.measure();
        tree.depth = depth;
        tree.node_count = node_count;

        debug!(
            suffix = ?tree.suffix(),
            frequent = tree.order.len(),
            depth,
            node_count,
            "built fp-tree"
        );

        tree
    }

    fn insert<I>(&mut self, items: I, weight: u32)
    where
        I: Iterator<Item = ItemId>,
    {
        let mut current = ROOT;
        for item in items {
            current = match self.child_with(current, item) {
                Some(child) => {
                    self.nodes[child].count += weight;
                    child
                }
                None => self.push_child(current, item, weight),
            };
        }
    }

    fn child_with(&self, node: NodeId, item: ItemId) -> Option<NodeId> {
        self.nodes[node]
            .children
            .iter()
            .copied()
            .find(|&child| self.nodes[child].item == Some(item))
    }

    fn push_child(&mut self, parent: NodeId, item: ItemId, count: u32) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(FpNode::new(Some(item), count, Some(parent)));
        self.nodes[parent].children.push(id);

        let entry = self.headers.entry(item).or_default();
        match entry.tail {
            Some(tail) => self.nodes[tail].link = Some(id),
            None => entry.head = Some(id),
        }
        entry.tail = Some(id);

        id
    }

    /// Longest root-to-leaf path (root counts as 1) and number of nodes including the root.
    fn measure(&self) -> (usize, usize) {
        let mut depth = 0;
        let mut node_count = 0;
        let mut stack = vec![(ROOT, 1)];

        while let Some((node, level)) = stack.pop() {
            node_count += 1;
            depth = depth.max(level);
            stack.extend(self.nodes[node].children.iter().map(|&child| (child, level + 1)));
        }

        (depth, node_count)
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn construction_time(&self) -> Duration {
        self.construction_time
    }

    pub fn root(&self) -> &FpNode {
        &self.nodes[ROOT]
    }

    pub fn node(&self, id: NodeId) -> Option<&FpNode> {
        self.nodes.get(id)
    }

    pub fn suffix(&self) -> Option<ItemId> {
        self.root().item
    }

    pub fn root_count(&self) -> u32 {
        self.root().count
    }

    /// Total count of every frequent item of this (sub-)problem.
    pub fn frequent_items(&self) -> &ItemCounts {
        &self.frequent
    }

    /// Frequent items paired with their counts, least frequent first, in exact reverse of
    /// the insertion order.
    pub fn mining_order(&self) -> Vec<(ItemId, u32)> {
        self.order
            .iter()
            .rev()
            .filter_map(|item| self.frequent.get(item).map(|&count| (*item, count)))
            .collect()
    }

    /// Nodes carrying `item`, in creation order.
    pub fn header_chain(&self, item: ItemId) -> HeaderChain<'_> {
        HeaderChain {
            tree: self,
            next: self.headers.get(&item).and_then(|entry| entry.head),
        }
    }

    pub fn has_single_path(&self) -> bool {
        let mut current = ROOT;
        loop {
            match self.nodes[current].children.as_slice() {
                [] => return true,
                [only] => current = *only,
                _ => return false,
            }
        }
    }

    /// Items and counts along the chain below the root, or `None` if the tree branches.
    pub fn single_path(&self) -> Option<Vec<(ItemId, u32)>> {
        let mut path = Vec::new();
        let mut current = ROOT;

        loop {
            match self.nodes[current].children.as_slice() {
                [] => return Some(path),
                [only] => {
                    let node = &self.nodes[*only];
                    if let Some(item) = node.item {
                        path.push((item, node.count));
                    }
                    current = *only;
                }
                _ => return None,
            }
        }
    }

    /// Items strictly between the root and `node`, root side first.
    pub fn prefix_path(&self, node: NodeId) -> Vec<ItemId> {
        let mut path = Vec::new();
        let mut current = self.nodes.get(node).and_then(|n| n.parent);

        while let Some(id) = current {
            if id == ROOT {
                break;
            }
            let ancestor = &self.nodes[id];
            if let Some(item) = ancestor.item {
                path.push(item);
            }
            current = ancestor.parent;
        }

        path.reverse();
        path
    }

    /// One entry per node of `item`'s header chain.
    pub fn conditional_pattern_base(&self, item: ItemId) -> ConditionalPatternBase {
        self.header_chain(item)
            .map(|node| (self.prefix_path(node), self.nodes[node].count))
            .collect()
    }

    /// Drops the arena, links included, keeping the measurements.
    pub fn into_summary(self) -> TreeSummary {
        TreeSummary {
            depth: self.depth,
            node_count: self.node_count,
            construction_time: self.construction_time,
        }
    }
}

/// Walks one item's header chain.
#[derive(Debug, Clone)]
pub struct HeaderChain<'t> {
    tree: &'t FpTree,
    next: Option<NodeId>,
}

impl<'t> Iterator for HeaderChain<'t> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.tree.nodes.get(id).and_then(|node| node.link);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ItemId = 0;
    const B: ItemId = 1;
    const C: ItemId = 2;
    const D: ItemId = 3;

    fn fixture() -> Vec<Transaction> {
        vec![vec![A, B], vec![B, C], vec![A, B, C], vec![A, B, C, D]]
    }

    fn tree(transactions: &[Transaction], min_support: f64, max_depth: Option<usize>) -> FpTree {
        let threshold = SupportThreshold::new(min_support, transactions.len());
        FpTree::new(transactions, &threshold, max_depth)
    }

    fn items_of(tree: &FpTree, nodes: &[NodeId]) -> Vec<Option<ItemId>> {
        nodes
            .iter()
            .map(|&id| tree.node(id).and_then(|node| node.item))
            .collect()
    }

    #[test]
    fn shape_of_fixture_tree() {
        let tree = tree(&fixture(), 0.5, None);

        // root -> B(4) -> { A(3) -> C(2), C(1) }
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.depth(), 4);
        assert_eq!(tree.suffix(), None);
        assert!(!tree.has_single_path());
        assert_eq!(tree.single_path(), None);

        let root = tree.root();
        assert_eq!(items_of(&tree, &root.children), vec![Some(B)]);
        let b = tree.node(root.children[0]).unwrap();
        assert_eq!(b.count, 4);
        assert_eq!(items_of(&tree, &b.children), vec![Some(A), Some(C)]);
    }

    #[test]
    fn infrequent_items_are_left_out() {
        let tree = tree(&fixture(), 0.5, None);

        assert!(!tree.frequent_items().contains_key(&D));
        assert_eq!(tree.header_chain(D).count(), 0);
        assert_eq!(tree.frequent_items()[&B], 4);
    }

    #[test]
    fn header_chain_follows_creation_order() {
        let tree = tree(&fixture(), 0.5, None);

        let chain: Vec<NodeId> = tree.header_chain(C).collect();
        assert_eq!(chain.len(), 2);
        assert!(chain[0] < chain[1]);

        let counts: Vec<u32> = chain.iter().map(|&id| tree.node(id).unwrap().count).collect();
        // B -> C created by the second transaction, B -> A -> C by the third
        assert_eq!(counts, vec![1, 2]);
    }

    #[test]
    fn ties_break_on_item_id() {
        // A and C both appear three times, so A is inserted above C
        let tree = tree(&fixture(), 0.5, None);
        let chain: Vec<NodeId> = tree.header_chain(C).collect();

        assert_eq!(tree.prefix_path(chain[1]), vec![B, A]);
        assert_eq!(tree.mining_order(), vec![(C, 3), (A, 3), (B, 4)]);
    }

    #[test]
    fn links_survive_until_mining() {
        let tree = tree(&fixture(), 0.5, None);

        for &(item, count) in &tree.mining_order() {
            let chained: u32 = tree
                .header_chain(item)
                .map(|id| tree.node(id).unwrap().count)
                .sum();
            assert_eq!(chained, count);
        }
        assert_eq!(
            tree.conditional_pattern_base(C),
            vec![(vec![B], 1), (vec![B, A], 2)]
        );
        assert_eq!(tree.conditional_pattern_base(B), vec![(vec![], 4)]);
    }

    #[test]
    fn conditional_tree_carries_suffix() {
        let threshold = SupportThreshold::new(0.5, 4);
        let base = vec![(vec![B], 1), (vec![B, A], 2)];
        let tree = FpTree::conditional(&base, &threshold, C, 3);

        assert_eq!(tree.suffix(), Some(C));
        assert_eq!(tree.root_count(), 3);
        assert!(tree.has_single_path());
        assert_eq!(tree.single_path(), Some(vec![(B, 3), (A, 2)]));
    }

    #[test]
    fn conditional_threshold_is_absolute() {
        // A occurs once in the base; 1/4 is below 0.5 even though it is half of the base
        let threshold = SupportThreshold::new(0.5, 4);
        let base = vec![(vec![A], 1), (vec![B], 1)];
        let tree = FpTree::conditional(&base, &threshold, C, 2);

        assert!(tree.frequent_items().is_empty());
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn max_depth_truncates_insertions() {
        let tree = tree(&fixture(), 0.5, Some(1));

        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.node_count(), 2);
        assert!(tree.has_single_path());
        // A and C stay frequent, their chains are just empty
        assert_eq!(tree.header_chain(A).count(), 0);
        assert_eq!(tree.frequent_items().len(), 3);
    }

    #[test]
    fn zero_max_depth_inserts_nothing() {
        let tree = tree(&fixture(), 0.5, Some(0));
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn unsorted_transactions_build_the_same_tree() {
        let shuffled = vec![vec![B, A], vec![C, B], vec![C, A, B], vec![D, B, C, A]];
        let sorted = tree(&fixture(), 0.5, None);
        let unsorted = tree(&shuffled, 0.5, None);

        assert_eq!(unsorted.nodes, sorted.nodes);
        assert_eq!(unsorted.mining_order(), sorted.mining_order());
    }

    #[test]
    fn repeated_items_count_once() {
        // root -> A(1), root -> B(1)
        let tree = tree(&[vec![A, A], vec![B]], 0.5, None);

        assert_eq!(tree.frequent_items()[&A], 1);
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn rebuild_is_deterministic() {
        let transactions = vec![
            vec![0, 1, 4],
            vec![1, 2, 3],
            vec![0, 2, 4],
            vec![3, 4],
            vec![0, 1, 2, 3, 4],
            vec![2],
        ];
        let first = tree(&transactions, 0.3, None);
        let second = tree(&transactions, 0.3, None);

        assert_eq!(first.depth(), second.depth());
        assert_eq!(first.node_count(), second.node_count());
        for &(item, _) in &first.mining_order() {
            let a: Vec<NodeId> = first.header_chain(item).collect();
            let b: Vec<NodeId> = second.header_chain(item).collect();
            assert_eq!(a, b);
        }
        assert_eq!(first.nodes, second.nodes);
    }

    #[test]
    fn summary_keeps_measurements() {
        let tree = tree(&fixture(), 0.5, None);
        let (depth, node_count) = (tree.depth(), tree.node_count());
        let summary = tree.into_summary();

        assert_eq!(summary.depth, depth);
        assert_eq!(summary.node_count, node_count);
    }

    #[test]
    fn empty_input_is_bare_root() {
        let tree = tree(&[], 0.5, None);
        assert_eq!(tree.node_count(), 1);
        assert!(tree.has_single_path());
        assert_eq!(tree.single_path(), Some(Vec::new()));
    }
}
