//! Ranking engines.
//!
//! # Overview
//!
//! - **PageRank** (`pagerank`): stationary distribution of a random surfer
//!   with uniform teleporting. One score per node.
//! - **HITS** (`hits`): mutually reinforcing hub and authority scores,
//!   usually run on a query's base-set subgraph.
//!
//! Both engines read a [`crate::graph::Graph`], never mutate it, and return
//! dense vectors indexed by node id. Given the same inputs they produce
//! bit-identical results.
//!
//! ```rust,ignore
//! use linkrank_core::graph::Graph;
//! use linkrank_core::metrics::{hits::compute_hits, pagerank::compute_pagerank, rank_order};
//!
//! let g = Graph::from_edge_list(4, 4, &[(0, 1), (1, 2), (2, 0), (2, 3)])?;
//! let pr = compute_pagerank(&g, 0.1, None)?;
//! let (hubs, authorities) = compute_hits(&g, 50)?;
//! let top = rank_order(&pr);
//! ```

pub mod hits;
pub mod pagerank;

use std::cmp::Ordering;

/// Node ids ordered by descending score; ties keep ascending id order.
///
/// NaN scores sort last.
#[must_use]
pub fn rank_order(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| match (scores[a].is_nan(), scores[b].is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => scores[b].total_cmp(&scores[a]),
    });
    order
}

#[cfg(test)]
mod tests {
    use super::rank_order;

    #[test]
    fn orders_descending_with_stable_ties() {
        assert_eq!(rank_order(&[0.1, 0.4, 0.1, 0.4]), vec![1, 3, 0, 2]);
    }

    #[test]
    fn nan_sorts_last() {
        assert_eq!(rank_order(&[f64::NAN, 0.2, 0.5]), vec![2, 1, 0]);
    }

    #[test]
    fn empty_scores() {
        assert!(rank_order(&[]).is_empty());
    }
}
