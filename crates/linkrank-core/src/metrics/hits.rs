//! HITS (Hyperlink-Induced Topic Search) algorithm.
//!
//! # Overview
//!
//! HITS computes two scores for each node:
//!
//! - **Hub score**: how much a node points to good authorities.
//! - **Authority score**: how much a node is pointed to by good hubs.
//!
//! # Algorithm
//!
//! Fixed-step power method (Kleinberg, 1999), starting from all-ones
//! vectors. Two update rules are available:
//!
//! - [`HitsUpdate::Coupled`] (default): precompute the co-citation matrix
//!   `A Aᵀ` and the coupling matrix `Aᵀ A` once, then each step
//!   `hub ← (A Aᵀ) hub` and `authority ← (Aᵀ A) authority`.
//! - [`HitsUpdate::Alternating`]: `hub ← A authority`, then
//!   `authority ← Aᵀ hub` with the hub vector from the same step.
//!
//! After every step both vectors are scaled to sum 1. A vector whose sum is
//! zero (no edges, empty base set) is left as all zeros.
//!
//! # Output
//!
//! A [`HitsResult`] with `hubs` and `authorities` indexed by node id.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::RankError;
use crate::graph::Graph;
use crate::linalg::normalize_sum;

/// How hub and authority vectors are advanced each step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitsUpdate {
    #[default]
    Coupled,
    Alternating,
}

/// Configuration for HITS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitsConfig {
    /// Number of steps. Default: 50.
    pub iterations: usize,
    /// Update rule. Default: coupled.
    pub update: HitsUpdate,
}

impl Default for HitsConfig {
    fn default() -> Self {
        Self {
            iterations: 50,
            update: HitsUpdate::Coupled,
        }
    }
}

/// Result of the HITS algorithm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HitsResult {
    /// Hub score per node id.
    pub hubs: Vec<f64>,
    /// Authority score per node id.
    pub authorities: Vec<f64>,
    /// Number of steps performed.
    pub iterations: usize,
    /// L1 change of the authority vector in the last step (0 when no step ran).
    pub last_delta: f64,
}

/// Compute HITS hub and authority scores.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the engine signatures uniform.
#[instrument(skip(graph, config), fields(order = graph.order(), size = graph.size()))]
pub fn hits(graph: &Graph, config: &HitsConfig) -> Result<HitsResult, RankError> {
    let n = graph.order();
    if n == 0 {
        return Ok(HitsResult {
            hubs: Vec::new(),
            authorities: Vec::new(),
            iterations: 0,
            last_delta: 0.0,
        });
    }

    let adj = graph.adjacency_matrix();
    let mut hub = DVector::<f64>::from_element(n, 1.0);
    let mut auth = DVector::<f64>::from_element(n, 1.0);
    let mut last_delta = 0.0;

    if config.iterations == 0 {
        normalize_sum(hub.as_mut_slice());
        normalize_sum(auth.as_mut_slice());
    } else {
        let stepper = Stepper::new(&adj, config.update);
        for _ in 0..config.iterations {
            let (mut next_hub, mut next_auth) = stepper.step(&hub, &auth);
            normalize_sum(next_hub.as_mut_slice());
            normalize_sum(next_auth.as_mut_slice());
            last_delta = (&next_auth - &auth).lp_norm(1);
            hub = next_hub;
            auth = next_auth;
        }
    }

    debug!(
        iterations = config.iterations,
        last_delta, "HITS finished"
    );

    Ok(HitsResult {
        hubs: hub.iter().copied().collect(),
        authorities: auth.iter().copied().collect(),
        iterations: config.iterations,
        last_delta,
    })
}

/// Compute HITS with the default (coupled) update for `iterations` steps.
///
/// Returns `(hubs, authorities)`.
///
/// # Errors
///
/// See [`hits`].
pub fn compute_hits(graph: &Graph, iterations: usize) -> Result<(Vec<f64>, Vec<f64>), RankError> {
    let config = HitsConfig {
        iterations,
        ..HitsConfig::default()
    };
    hits(graph, &config).map(|result| (result.hubs, result.authorities))
}

enum Stepper<'a> {
    Coupled {
        hub_matrix: DMatrix<f64>,
        auth_matrix: DMatrix<f64>,
    },
    Alternating {
        adj: &'a DMatrix<f64>,
    },
}

impl<'a> Stepper<'a> {
    fn new(adj: &'a DMatrix<f64>, update: HitsUpdate) -> Self {
        match update {
            HitsUpdate::Coupled => Self::Coupled {
                hub_matrix: adj * adj.transpose(),
                auth_matrix: adj.tr_mul(adj),
            },
            HitsUpdate::Alternating => Self::Alternating { adj },
        }
    }

    fn step(&self, hub: &DVector<f64>, auth: &DVector<f64>) -> (DVector<f64>, DVector<f64>) {
        match self {
            Self::Coupled {
                hub_matrix,
                auth_matrix,
            } => (hub_matrix * hub, auth_matrix * auth),
            Self::Alternating { adj } => {
                let next_hub = *adj * auth;
                let next_auth = adj.tr_mul(&next_hub);
                (next_hub, next_auth)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(n: usize, edges: &[(usize, usize)]) -> Graph {
        Graph::from_edge_list(n, edges.len(), edges).expect("valid graph")
    }

    fn run(g: &Graph, iterations: usize, update: HitsUpdate) -> HitsResult {
        hits(g, &HitsConfig { iterations, update }).expect("hits is infallible")
    }

    #[test]
    fn empty_graph_returns_empty() {
        let result = run(&Graph::new(0), 10, HitsUpdate::Coupled);
        assert!(result.hubs.is_empty());
        assert!(result.authorities.is_empty());
    }

    #[test]
    fn edgeless_graph_is_all_zero() {
        for update in [HitsUpdate::Coupled, HitsUpdate::Alternating] {
            let result = run(&Graph::new(3), 5, update);
            assert_eq!(result.hubs, vec![0.0; 3]);
            assert_eq!(result.authorities, vec![0.0; 3]);
        }
    }

    #[test]
    fn zero_iterations_is_uniform() {
        let result = run(&graph(4, &[(0, 1)]), 0, HitsUpdate::Coupled);
        assert!(result.hubs.iter().all(|h| (h - 0.25).abs() < 1e-15));
        assert!(result.authorities.iter().all(|a| (a - 0.25).abs() < 1e-15));
    }

    #[test]
    fn simple_edge_hub_and_authority() {
        // 0 → 1: 0 is the hub, 1 the authority.
        let result = run(&graph(2, &[(0, 1)]), 10, HitsUpdate::Coupled);
        assert!((result.hubs[0] - 1.0).abs() < 1e-12);
        assert!(result.hubs[1].abs() < 1e-12);
        assert!((result.authorities[1] - 1.0).abs() < 1e-12);
        assert!(result.authorities[0].abs() < 1e-12);
    }

    #[test]
    fn star_authority_topology() {
        // 0 → 3, 1 → 3, 2 → 3
        let g = graph(4, &[(0, 3), (1, 3), (2, 3)]);
        for update in [HitsUpdate::Coupled, HitsUpdate::Alternating] {
            let result = run(&g, 20, update);
            assert!((result.authorities[3] - 1.0).abs() < 1e-12);
            for hub in &result.hubs[..3] {
                assert!((hub - 1.0 / 3.0).abs() < 1e-12);
            }
            assert!(result.hubs[3].abs() < 1e-12);
        }
    }

    #[test]
    fn alternating_first_step_matches_definition() {
        // hub = A·1 = out-degrees, authority = Aᵀ·hub.
        let g = graph(3, &[(0, 1), (0, 2), (1, 2)]);
        let result = run(&g, 1, HitsUpdate::Alternating);
        // out-degrees [2, 1, 0] → hub [2/3, 1/3, 0]
        assert!((result.hubs[0] - 2.0 / 3.0).abs() < 1e-12);
        assert!((result.hubs[1] - 1.0 / 3.0).abs() < 1e-12);
        // authority = [0, 2/3, 1] → normalised [0, 0.4, 0.6]
        assert!(result.authorities[0].abs() < 1e-12);
        assert!((result.authorities[1] - 0.4).abs() < 1e-12);
        assert!((result.authorities[2] - 0.6).abs() < 1e-12);
    }

    #[test]
    fn scores_sum_to_one_with_edges() {
        let g = graph(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0), (0, 2)]);
        for update in [HitsUpdate::Coupled, HitsUpdate::Alternating] {
            for k in [1, 2, 7, 40] {
                let result = run(&g, k, update);
                let hs: f64 = result.hubs.iter().sum();
                let as_: f64 = result.authorities.iter().sum();
                assert!((hs - 1.0).abs() < 1e-9, "{update:?} k={k} hub sum {hs}");
                assert!((as_ - 1.0).abs() < 1e-9, "{update:?} k={k} auth sum {as_}");
            }
        }
    }

    #[test]
    fn compute_hits_is_deterministic() {
        let g = graph(4, &[(0, 1), (1, 2), (2, 0), (2, 3)]);
        let a = compute_hits(&g, 30).expect("valid");
        let b = compute_hits(&g, 30).expect("valid");
        assert_eq!(a, b);
    }
}
