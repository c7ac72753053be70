//! Fixed-endpoint tour ordering: finds a visiting order for the selected
//! waypoints that minimizes total great-circle travel distance, start pinned
//! first and end pinned last.
//!
//! Nearest-neighbor construction refined by 2-opt over the interior stops,
//! plus seeded-shuffle restarts while the time box allows. Edge costs are
//! whole meters. Deterministic for a given input order: the restart RNG is
//! seeded from a fixed constant, and the deadline only bounds how many
//! restarts run.

use crate::models::Coordinates;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::time::{Duration, Instant};

/// Fixed seed for the restart shuffles
const RESTART_SEED: u64 = 0x5ce1c;
/// Upper bound on shuffle restarts; the deadline usually binds first
const MAX_RESTARTS: usize = 8;

pub struct TourSolver {
    time_budget: Duration,
}

impl TourSolver {
    pub fn new(time_budget: Duration) -> Self {
        TourSolver { time_budget }
    }

    /// Return the visiting order of `waypoints` (as indices into the input
    /// slice) minimizing the start -> ... -> end path length.
    ///
    /// Always returns a permutation of all waypoint indices; on deadline the
    /// best order found so far is returned, never an empty result.
    pub fn order(
        &self,
        start: &Coordinates,
        end: &Coordinates,
        waypoints: &[Coordinates],
    ) -> Vec<usize> {
        let n = waypoints.len();
        if n <= 1 {
            return (0..n).collect();
        }

        let deadline = Instant::now() + self.time_budget;

        // Dense symmetric cost matrix over [start, waypoints..., end]
        let m = n + 2;
        let mut points: Vec<Coordinates> = Vec::with_capacity(m);
        points.push(*start);
        points.extend_from_slice(waypoints);
        points.push(*end);

        let mut cost = vec![0i64; m * m];
        for i in 0..m {
            for j in (i + 1)..m {
                let d = points[i].distance_to_meters(&points[j]);
                cost[i * m + j] = d;
                cost[j * m + i] = d;
            }
        }
        let matrix = CostMatrix { cost, m };

        let mut best = nearest_neighbor_order(&matrix, n);
        two_opt(&mut best, &matrix, deadline);
        let mut best_cost = matrix.path_cost(&best);

        let mut rng = StdRng::seed_from_u64(RESTART_SEED);
        for _ in 0..MAX_RESTARTS {
            if Instant::now() >= deadline {
                break;
            }

            let mut candidate = best.clone();
            candidate.shuffle(&mut rng);
            two_opt(&mut candidate, &matrix, deadline);

            let candidate_cost = matrix.path_cost(&candidate);
            if candidate_cost < best_cost {
                best = candidate;
                best_cost = candidate_cost;
            }
        }

        tracing::debug!(
            waypoints = n,
            tour_m = best_cost,
            "Ordered {} waypoints, tour length {:.1}km",
            n,
            best_cost as f64 / 1000.0
        );

        best
    }
}

struct CostMatrix {
    cost: Vec<i64>,
    m: usize,
}

impl CostMatrix {
    #[inline]
    fn get(&self, i: usize, j: usize) -> i64 {
        self.cost[i * self.m + j]
    }

    /// Total cost of start -> perm -> end, where `perm` holds waypoint indices
    /// (matrix rows are offset by one for the start point)
    fn path_cost(&self, perm: &[usize]) -> i64 {
        let end = self.m - 1;
        let mut total = self.get(0, perm[0] + 1);
        for w in perm.windows(2) {
            total += self.get(w[0] + 1, w[1] + 1);
        }
        total + self.get(perm[perm.len() - 1] + 1, end)
    }
}

/// Greedy construction: from the start, repeatedly hop to the nearest
/// unvisited waypoint
fn nearest_neighbor_order(matrix: &CostMatrix, n: usize) -> Vec<usize> {
    let mut order = Vec::with_capacity(n);
    let mut visited = vec![false; n];
    let mut current = 0; // matrix index of the start point

    for _ in 0..n {
        let Some(w) = (0..n)
            .filter(|w| !visited[*w])
            .min_by_key(|w| matrix.get(current, w + 1))
        else {
            break;
        };
        visited[w] = true;
        order.push(w);
        current = w + 1;
    }

    order
}

/// 2-opt local search over the interior waypoints. Endpoints are never
/// relocated: a move reverses `perm[i..=j]` and is taken whenever it shortens
/// the path. Loops until a full pass finds no improvement or the deadline
/// passes.
fn two_opt(perm: &mut [usize], matrix: &CostMatrix, deadline: Instant) {
    let len = perm.len();
    let end = matrix.m - 1;

    let mut improved = true;
    while improved {
        improved = false;
        if Instant::now() >= deadline {
            return;
        }

        for i in 0..len {
            for j in (i + 1)..len {
                let before = if i == 0 { 0 } else { perm[i - 1] + 1 };
                let after = if j == len - 1 { end } else { perm[j + 1] + 1 };
                let first = perm[i] + 1;
                let last = perm[j] + 1;

                let delta = matrix.get(before, last) + matrix.get(first, after)
                    - matrix.get(before, first)
                    - matrix.get(last, after);
                if delta < 0 {
                    perm[i..=j].reverse();
                    improved = true;
                }
            }
        }
    }
}
