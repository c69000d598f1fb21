//! Breadth-first search over the trees reachable from an input tree.
//!
//! The search starts in [`Phase::Pre`], where both phases of rules apply. The first time a
//! [`Phase::Post`] rule is applied on a path, the path moves to [`Phase::Post`] for good, so that
//! an expansion can never be applied after a contraction and undo it.
//!
//! Explored trees are kept in an arena. Each node points at the node it was rewritten from, which
//! is enough to recover the derivation of any node.

use crate::{
    expr::Expr,
    options::SimplifyOptions,
    rewrite::one_step_rewrites,
    rules::{Phase, RuleCatalog},
    step::INITIAL_REASON,
};
use log::{debug, trace, warn};
use std::collections::{HashSet, VecDeque};

/// A tree explored during a search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchNode {
    /// The tree.
    pub expr: Expr,

    /// The law that produced this tree from its parent.
    pub reason: &'static str,

    /// The index of the node this tree was rewritten from. Only the root has no parent.
    pub parent: Option<usize>,

    /// The phase of the path leading to this tree.
    pub phase: Phase,
}

/// Every tree explored by a search, in the order they were found.
#[derive(Debug, Clone)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,

    /// The largest cost a tree was allowed to have.
    pub cost_bound: usize,

    /// Whether the search stopped at its node limit before running out of trees.
    pub truncated: bool,
}

impl SearchTree {
    /// Returns the explored nodes. The first node is the root.
    pub fn nodes(&self) -> &[SearchNode] {
        &self.nodes
    }

    /// Returns the index of the simplest tree found.
    ///
    /// Trees are ranked by the number of symbols needed to write them, then by their cost. Ties
    /// go to the tree found first, which is the one with the shortest derivation.
    pub fn best(&self) -> usize {
        self.nodes.iter()
            .enumerate()
            .min_by_key(|(_, node)| (node.expr.symbol_count(), node.expr.cost()))
            .map(|(index, _)| index)
            .unwrap_or(0)
    }

    /// Returns the nodes on the path from the root to the node at the given index.
    pub fn path(&self, index: usize) -> Vec<&SearchNode> {
        let mut path = Vec::new();
        let mut current = Some(index);
        while let Some(index) = current {
            let node = &self.nodes[index];
            path.push(node);
            current = node.parent;
        }
        path.reverse();
        path
    }
}

/// Explores every tree reachable from `root` by applying rules from the catalog, within the
/// bounds of the given options.
///
/// Each distinct tree is explored at most once, and trees over the cost bound are discarded.
pub fn explore(root: &Expr, catalog: &RuleCatalog, options: &SimplifyOptions) -> SearchTree {
    let cost_bound = options.cost_bound(root.cost());
    debug!("exploring `{}` with cost bound {}", root, cost_bound);

    let mut nodes = vec![SearchNode {
        expr: root.clone(),
        reason: INITIAL_REASON,
        parent: None,
        phase: Phase::Pre,
    }];
    let mut visited = HashSet::from([root.clone()]);
    let mut queue = VecDeque::from([0]);
    let mut truncated = false;

    'search: while let Some(index) = queue.pop_front() {
        let candidates = {
            let node = &nodes[index];
            let mut candidates = Vec::new();
            if node.phase == Phase::Pre {
                candidates.extend(
                    one_step_rewrites(&node.expr, catalog, Phase::Pre)
                        .into_iter()
                        .map(|rewrite| (rewrite, Phase::Pre)),
                );
            }
            candidates.extend(
                one_step_rewrites(&node.expr, catalog, Phase::Post)
                    .into_iter()
                    .map(|rewrite| (rewrite, Phase::Post)),
            );
            candidates
        };

        for (rewrite, phase) in candidates {
            if rewrite.expr.cost() > cost_bound || visited.contains(&rewrite.expr) {
                continue;
            }

            if options.node_limit.is_some_and(|limit| nodes.len() >= limit) {
                warn!("search stopped after exploring {} trees", nodes.len());
                truncated = true;
                break 'search;
            }

            trace!("#{} from #{}: {} ({})", nodes.len(), index, rewrite.expr, rewrite.reason);
            visited.insert(rewrite.expr.clone());
            nodes.push(SearchNode {
                expr: rewrite.expr,
                reason: rewrite.reason,
                parent: Some(index),
                phase,
            });
            queue.push_back(nodes.len() - 1);
        }
    }

    debug!("explored {} trees", nodes.len());
    SearchTree { nodes, cost_bound, truncated }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::options::SimplifyOptionsBuilder;

    fn parse(source: &str) -> Expr {
        source.parse().unwrap()
    }

    fn explore_default(source: &str) -> SearchTree {
        let catalog = RuleCatalog::builtin().unwrap();
        explore(&parse(source), &catalog, &SimplifyOptions::default())
    }

    #[test_log::test]
    fn trees_are_explored_once() {
        let tree = explore_default("!(A . B) + A . (C + !C)");
        let distinct = tree.nodes().iter().map(|node| &node.expr).collect::<HashSet<_>>();
        assert_eq!(distinct.len(), tree.nodes().len());
    }

    #[test_log::test]
    fn trees_stay_within_cost_bound() {
        let catalog = RuleCatalog::builtin().unwrap();
        let options = SimplifyOptionsBuilder::new()
            .growth_factor(1.0)
            .growth_slack(2)
            .build();
        let root = parse("(A + B) . (C + D)");
        let tree = explore(&root, &catalog, &options);

        assert_eq!(tree.cost_bound, root.cost() + 2);
        assert!(tree.nodes().iter().all(|node| node.expr.cost() <= tree.cost_bound));
        assert!(!tree.truncated);
    }

    #[test]
    fn node_limit_truncates() {
        let catalog = RuleCatalog::builtin().unwrap();
        let options = SimplifyOptionsBuilder::new().node_limit(Some(1)).build();
        let tree = explore(&parse("!(A + B)"), &catalog, &options);
        assert_eq!(tree.nodes().len(), 1);
        assert!(tree.truncated);
    }

    #[test_log::test]
    fn unlimited_search_runs_out_of_trees() {
        let catalog = RuleCatalog::builtin().unwrap();
        let options = SimplifyOptionsBuilder::new().node_limit(None).build();
        let tree = explore(&parse("A . B + A . !B"), &catalog, &options);
        assert!(!tree.truncated);
        assert_eq!(tree.nodes()[tree.best()].expr, parse("A"));
    }

    #[test]
    fn post_phase_is_final() {
        let tree = explore_default("!(A + B) . (C + 1)");
        for node in tree.nodes() {
            if let Some(parent) = node.parent {
                if tree.nodes()[parent].phase == Phase::Post {
                    assert_eq!(node.phase, Phase::Post);
                }
            }
        }
    }

    #[test]
    fn path_leads_back_to_root() {
        let tree = explore_default("A . B + A . !B");
        let best = tree.best();
        let path = tree.path(best);
        assert_eq!(path[0].expr, parse("A . B + A . !B"));
        assert_eq!(path[0].reason, INITIAL_REASON);
        assert_eq!(path.last().map(|node| &node.expr), Some(&parse("A")));
    }

    #[test]
    fn nothing_to_do() {
        let tree = explore_default("A . B");
        assert_eq!(tree.nodes().len(), 1);
        assert_eq!(tree.best(), 0);
    }
}
