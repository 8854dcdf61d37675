//! PageRank over a dense transition matrix.
//!
//! # Overview
//!
//! A random surfer follows an outgoing link with probability `1 - alpha`
//! and teleports to a uniformly random node with probability `alpha`. The
//! PageRank vector is the stationary distribution of that walk.
//!
//! # Transition Matrix
//!
//! ```text
//! P[i][j] = alpha / n + adj[i][j] * (1 - alpha) / outdeg(i)   outdeg(i) > 0
//! P[i][j] = 1 / n                                             outdeg(i) = 0
//! ```
//!
//! Dangling rows spread all of their mass uniformly, so every row sums to 1.
//!
//! # Modes
//!
//! - **Power iteration** (`iterations = Some(k)`): start at `[1/n; n]` and
//!   apply `v ← v P` exactly `k` times, renormalising after each step.
//! - **Direct** (`iterations = None`): ask a [`DominantEigen`] solver for
//!   the stationary vector. The default is an LU solve; when it cannot
//!   produce a unique valid answer (several terminal classes with
//!   `alpha = 0`) the engine falls back to convergent power iteration and
//!   reports [`PageRankMethod::DirectFallback`].
//!
//! # Output
//!
//! A [`PageRankResult`] whose `scores` has one entry per node and sums to 1.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::RankError;
use crate::graph::Graph;
use crate::linalg::{self, DominantEigen, LuStationary, PowerIteration};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for PageRank computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRankConfig {
    /// Teleport probability `alpha` in `[0, 1]`.
    /// Default: 0.1.
    pub teleport_prob: f64,
    /// Power-iteration steps; `None` selects direct mode.
    /// Default: `None`.
    pub iterations: Option<usize>,
    /// Convergence threshold of the direct-mode fallback (L1 change).
    /// Default: 1e-12.
    pub fallback_tolerance: f64,
    /// Step limit of the direct-mode fallback.
    /// Default: 10000.
    pub fallback_max_iter: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            teleport_prob: 0.1,
            iterations: None,
            fallback_tolerance: 1e-12,
            fallback_max_iter: 10_000,
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Result of a PageRank computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRankResult {
    /// PageRank score per node id.
    pub scores: Vec<f64>,
    /// Which computation method produced `scores`.
    pub method: PageRankMethod,
    /// Power steps performed (0 for a successful direct solve).
    pub iterations: usize,
    /// `‖Pᵀx − x‖₁` of the returned scores.
    pub residual: f64,
}

/// Which method was used to compute PageRank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageRankMethod {
    /// Fixed number of power steps.
    PowerIteration,
    /// Direct stationary solve.
    Direct,
    /// Direct solve was rejected; convergent power iteration was used.
    DirectFallback,
}

// ---------------------------------------------------------------------------
// Transition matrix
// ---------------------------------------------------------------------------

/// Build the row-stochastic transition matrix of `graph`.
///
/// # Errors
///
/// [`RankError::InvalidArgument`] if `alpha` is outside `[0, 1]` or the
/// graph has no nodes.
pub fn transition_matrix(graph: &Graph, alpha: f64) -> Result<DMatrix<f64>, RankError> {
    validate(graph, alpha)?;

    let n = graph.order();
    let n_f64 = n as f64;
    let teleport = alpha / n_f64;
    let uniform = 1.0 / n_f64;

    let mut p = DMatrix::<f64>::zeros(n, n);
    for i in 0..n {
        let out_degree = graph.out_degree(i);
        if out_degree == 0 {
            p.row_mut(i).fill(uniform);
            continue;
        }
        p.row_mut(i).fill(teleport);
        let share = (1.0 - alpha) / out_degree as f64;
        for j in graph.out_neighbors(i) {
            p[(i, j)] += share;
        }
    }

    Ok(p)
}

fn validate(graph: &Graph, alpha: f64) -> Result<(), RankError> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(RankError::invalid(format!(
            "teleport probability must be in [0, 1], got {alpha}"
        )));
    }
    if graph.order() == 0 {
        return Err(RankError::invalid("PageRank is undefined for a graph with no nodes"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// PageRank
// ---------------------------------------------------------------------------

/// Compute PageRank scores for every node of `graph`.
///
/// # Errors
///
/// [`RankError::InvalidArgument`] if `config.teleport_prob` is outside
/// `[0, 1]` or the graph has no nodes. [`RankError::Numerical`] if the
/// direct-mode fallback cannot produce a distribution.
#[instrument(skip(graph, config), fields(order = graph.order(), size = graph.size()))]
pub fn pagerank(graph: &Graph, config: &PageRankConfig) -> Result<PageRankResult, RankError> {
    let p = transition_matrix(graph, config.teleport_prob)?;
    let n = graph.order();

    if let Some(steps) = config.iterations {
        let scores = linalg::left_power_steps(&p, linalg::uniform(n), steps);
        let residual = linalg::stationary_residual(&p, &scores);
        debug!(steps, residual, "power iteration finished");
        return Ok(PageRankResult {
            scores: scores.iter().copied().collect(),
            method: PageRankMethod::PowerIteration,
            iterations: steps,
            residual,
        });
    }

    if let Some(est) = LuStationary::default().dominant_left_eigenvector(&p) {
        debug!(residual = est.residual, "direct solve accepted");
        return Ok(PageRankResult {
            scores: est.vector.iter().copied().collect(),
            method: PageRankMethod::Direct,
            iterations: 0,
            residual: est.residual,
        });
    }

    warn!(
        alpha = config.teleport_prob,
        "transition matrix has no unique stationary vector, falling back to power iteration"
    );
    let fallback = PowerIteration {
        tolerance: config.fallback_tolerance,
        max_iter: config.fallback_max_iter,
    };
    let est = fallback
        .dominant_left_eigenvector(&p)
        .ok_or_else(|| RankError::Numerical {
            reason: "power iteration fallback lost all probability mass".to_string(),
        })?;
    if !est.converged {
        warn!(
            iterations = est.iterations,
            residual = est.residual,
            "direct-mode fallback stopped before converging"
        );
    }

    Ok(PageRankResult {
        scores: est.vector.iter().copied().collect(),
        method: PageRankMethod::DirectFallback,
        iterations: est.iterations,
        residual: est.residual,
    })
}

/// Compute PageRank with teleport probability `alpha`.
///
/// `iterations = Some(k)` runs `k` power steps; `None` solves directly.
///
/// # Errors
///
/// See [`pagerank`].
pub fn compute_pagerank(
    graph: &Graph,
    alpha: f64,
    iterations: Option<usize>,
) -> Result<Vec<f64>, RankError> {
    let config = PageRankConfig {
        teleport_prob: alpha,
        iterations,
        ..PageRankConfig::default()
    };
    pagerank(graph, &config).map(|result| result.scores)
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

    fn assert_sums_to_one(scores: &[f64]) {
        let sum: f64 = scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9, "scores sum to {sum}");
    }

    #[test]
    fn rows_are_stochastic() {
        let g = graph(4, &[(0, 1), (1, 2), (2, 0), (2, 3)]);
        for alpha in [0.0, 0.1, 0.5, 1.0] {
            let p = transition_matrix(&g, alpha).expect("valid alpha");
            for i in 0..4 {
                let row: f64 = p.row(i).sum();
                assert!((row - 1.0).abs() < 1e-12, "alpha={alpha} row {i} sums to {row}");
            }
        }
    }

    #[test]
    fn dangling_row_is_uniform() {
        let g = graph(3, &[(0, 1)]);
        let p = transition_matrix(&g, 0.2).expect("valid alpha");
        for j in 0..3 {
            assert!((p[(2, j)] - 1.0 / 3.0).abs() < 1e-15);
        }
    }

    #[test]
    fn duplicate_edges_do_not_skew_probabilities() {
        let once = graph(3, &[(0, 1), (0, 2)]);
        let twice = graph(3, &[(0, 1), (0, 1), (0, 2)]);
        assert_eq!(
            transition_matrix(&once, 0.1).expect("valid"),
            transition_matrix(&twice, 0.1).expect("valid")
        );
    }

    #[test]
    fn rejects_bad_alpha() {
        let g = graph(2, &[(0, 1)]);
        for alpha in [-0.1, 1.5, f64::NAN] {
            let err = compute_pagerank(&g, alpha, None).expect_err("alpha out of range");
            assert!(matches!(err, RankError::InvalidArgument { .. }));
        }
    }

    #[test]
    fn rejects_empty_graph() {
        let err = compute_pagerank(&Graph::new(0), 0.1, Some(5)).expect_err("n == 0");
        assert!(matches!(err, RankError::InvalidArgument { .. }));
    }

    #[test]
    fn single_node_ranks_one() {
        let g = Graph::new(1);
        for alpha in [0.0, 0.3, 1.0] {
            for iterations in [None, Some(0), Some(1), Some(25)] {
                let scores = compute_pagerank(&g, alpha, iterations).expect("valid");
                assert_eq!(scores.len(), 1);
                assert!((scores[0] - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn zero_iterations_is_uniform() {
        let g = graph(4, &[(0, 1), (1, 2)]);
        let result = pagerank(
            &g,
            &PageRankConfig {
                iterations: Some(0),
                ..PageRankConfig::default()
            },
        )
        .expect("valid");
        assert_eq!(result.method, PageRankMethod::PowerIteration);
        assert!(result.scores.iter().all(|s| (s - 0.25).abs() < 1e-15));
    }

    #[test]
    fn direct_and_power_agree() {
        let g = graph(4, &[(0, 1), (1, 2), (2, 0), (2, 3)]);
        let direct = pagerank(&g, &PageRankConfig::default()).expect("valid");
        assert_eq!(direct.method, PageRankMethod::Direct);
        let power = compute_pagerank(&g, 0.1, Some(500)).expect("valid");
        for (d, p) in direct.scores.iter().zip(&power) {
            assert!((d - p).abs() < 1e-9, "direct {d} vs power {p}");
        }
        assert_sums_to_one(&direct.scores);
    }

    #[test]
    fn reducible_chain_falls_back() {
        // Two absorbing self-loops with no teleporting.
        let g = graph(3, &[(0, 0), (1, 1), (2, 0), (2, 1)]);
        let result = pagerank(
            &g,
            &PageRankConfig {
                teleport_prob: 0.0,
                ..PageRankConfig::default()
            },
        )
        .expect("valid");
        assert_eq!(result.method, PageRankMethod::DirectFallback);
        assert_sums_to_one(&result.scores);
        assert!((result.scores[0] - result.scores[1]).abs() < 1e-9);
        assert!(result.scores[2].abs() < 1e-9);
    }

    #[test]
    fn fallback_step_limit_still_returns_a_distribution() {
        let g = graph(3, &[(0, 0), (1, 1), (2, 0), (2, 1)]);
        let result = pagerank(
            &g,
            &PageRankConfig {
                teleport_prob: 0.0,
                fallback_max_iter: 1,
                ..PageRankConfig::default()
            },
        )
        .expect("step limit is not an error");
        assert_eq!(result.method, PageRankMethod::DirectFallback);
        assert_eq!(result.iterations, 1);
        assert!(result.residual > 1e-3);
        assert_sums_to_one(&result.scores);
        // One lazy step from uniform: [5/12, 5/12, 1/6].
        assert!((result.scores[0] - 5.0 / 12.0).abs() < 1e-12);
        assert!((result.scores[2] - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn full_teleport_is_uniform() {
        let g = graph(3, &[(0, 1), (1, 2)]);
        let scores = compute_pagerank(&g, 1.0, None).expect("valid");
        assert!(scores.iter().all(|s| (s - 1.0 / 3.0).abs() < 1e-12));
    }
}
