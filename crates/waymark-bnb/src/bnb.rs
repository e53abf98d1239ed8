// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Branch-and-bound search driver.
//!
//! The solver explores partial tours best-first from a priority
//! frontier, pruning against the incumbent tour. An optional baseline
//! provider seeds the incumbent before the first node is popped, so
//! pruning starts with a finite threshold. The search is anytime: a
//! monitor may stop it at any iteration boundary and the best tour held
//! at that point is returned, with optimality claimed only when the
//! frontier drains completely.
//!
//! A search session object encapsulates per-run state, statistics, and
//! timing. Each popped node is checked against the incumbent, scored as
//! a closed tour when it is complete, and expanded otherwise; children
//! whose bound cannot beat the incumbent never enter the frontier.

use crate::{
    frontier::Frontier,
    incumbent::Incumbent,
    node::SearchNode,
    result::BnbOutcome,
    stats::BnbStatistics,
};
use waymark_model::{model::Model, tour::Tour};
use waymark_search::{
    baseline::BaselineProvider,
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    num::SolverFloat,
    result::TerminationReason,
};

/// An exact branch-and-bound solver for the asymmetric traveling
/// salesman problem, bounded by per-node reduced cost matrices.
#[derive(Debug, Clone, Copy, Default)]
pub struct BnbSolver<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> BnbSolver<T>
where
    T: SolverFloat,
{
    /// Creates a new solver instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }

    /// Solves the given model with an empty incumbent. Pruning only
    /// starts once the search itself finds a first complete tour.
    #[inline]
    pub fn solve<S>(&mut self, model: &Model<T>, monitor: S) -> BnbOutcome<T>
    where
        S: SearchMonitor<T>,
    {
        self.solve_internal(model, Incumbent::new(), monitor)
    }

    /// Solves the given model with the incumbent seeded from a baseline
    /// provider. The search never depends on how the baseline was
    /// produced; it is used purely as the initial pruning threshold.
    #[inline]
    pub fn solve_with_baseline<B, S>(
        &mut self,
        model: &Model<T>,
        baseline: &B,
        monitor: S,
    ) -> BnbOutcome<T>
    where
        B: BaselineProvider<T> + ?Sized,
        S: SearchMonitor<T>,
    {
        let incumbent = match baseline.baseline(model) {
            Some(tour) => {
                log::debug!(
                    "seeding incumbent from baseline '{}': cost {}",
                    baseline.name(),
                    tour.cost()
                );
                Incumbent::seeded(tour)
            }
            None => Incumbent::new(),
        };
        self.solve_internal(model, incumbent, monitor)
    }

    #[inline(always)]
    fn solve_internal<S>(
        &mut self,
        model: &Model<T>,
        incumbent: Incumbent<T>,
        mut monitor: S,
    ) -> BnbOutcome<T>
    where
        S: SearchMonitor<T>,
    {
        let session = BnbSearchSession::new(model, incumbent, &mut monitor);
        session.run()
    }
}

/// A search session for the branch-and-bound solver. Encapsulates the
/// state and logic of a single search run.
struct BnbSearchSession<'a, T, S> {
    model: &'a Model<T>,
    monitor: &'a mut S,
    frontier: Frontier<T>,
    incumbent: Incumbent<T>,
    stats: BnbStatistics,
    start_time: std::time::Instant,
}

impl<'a, T, S> std::fmt::Debug for BnbSearchSession<'a, T, S>
where
    T: SolverFloat,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BnbSearchSession")
            .field("model", &self.model)
            .field("frontier_len", &self.frontier.len())
            .field("upper_bound", &self.incumbent.upper_bound())
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, T, S> BnbSearchSession<'a, T, S>
where
    T: SolverFloat,
    S: SearchMonitor<T>,
{
    /// Creates a new search session.
    #[inline]
    fn new(model: &'a Model<T>, incumbent: Incumbent<T>, monitor: &'a mut S) -> Self {
        Self {
            model,
            monitor,
            frontier: Frontier::new(),
            incumbent,
            stats: BnbStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Runs the search session.
    fn run(mut self) -> BnbOutcome<T> {
        self.monitor.on_enter_search(self.model);

        // Root: full reduced matrix, path seeded with the first city.
        let root = SearchNode::root(self.model);

        if root.is_dead_end() {
            // Some city has no feasible outgoing or incoming edge left,
            // so no tour exists at all.
            self.stats.on_pruning_infeasible();
            return self.finalize(TerminationReason::InfeasibilityProven);
        }
        self.frontier.push(root);

        let termination_reason = loop {
            self.monitor.on_step();
            if let SearchCommand::Terminate(msg) = self.monitor.search_command() {
                break TerminationReason::Aborted(msg);
            }

            let node = match self.frontier.pop() {
                Some(node) => node,
                None => {
                    break if self.incumbent.best().is_some() {
                        TerminationReason::OptimalityProven
                    } else {
                        TerminationReason::InfeasibilityProven
                    };
                }
            };

            // A node popped with a bound above the incumbent is counted
            // pruned, but still flows through the completion check and
            // expansion. Which nodes end up counted pruned vs. expanded
            // is a behavioral contract of the counters, and any child
            // worth keeping is filtered against the incumbent below
            // anyway.
            if node.lower_bound() > self.incumbent.upper_bound() {
                self.stats.on_pruning_bound();
            }

            if node.depth() == self.model.num_cities() {
                self.handle_complete_path(&node);
                continue;
            }

            self.expand_node(&node);
        };

        self.finalize(termination_reason)
    }

    /// Scores a complete path as a closed tour, including the return
    /// edge to the start city, which is not part of the partial-path
    /// bound accounting.
    #[inline(always)]
    fn handle_complete_path(&mut self, node: &SearchNode<T>) {
        let tour = Tour::from_order(self.model, node.path().to_vec());

        if tour.is_feasible() && tour.cost() < self.incumbent.upper_bound() {
            self.monitor.on_solution_found(&tour);
            self.incumbent.try_install(tour);
            self.stats.on_solution_found();
        } else if tour.is_feasible() {
            self.stats.on_pruning_bound();
        } else {
            // The closing edge is infeasible; the tour never replaces
            // the incumbent.
            self.stats.on_pruning_infeasible();
        }
    }

    /// Expands a node into one child per unvisited city and pushes the
    /// survivors into the frontier.
    #[inline(always)]
    fn expand_node(&mut self, node: &SearchNode<T>) {
        let children = node.make_children(self.model);

        for child in children {
            self.stats.on_node_created();

            if child.is_dead_end() {
                self.stats.on_pruning_infeasible();
                continue;
            }

            if child.lower_bound() <= self.incumbent.upper_bound() {
                self.frontier.push(child);
            } else {
                self.stats.on_pruning_bound();
            }
        }
    }

    /// Finalizes the outcome. Nodes still live in the frontier count as
    /// pruned; they were never expanded.
    ///
    /// # Note
    ///
    /// This consumes self.
    #[inline]
    fn finalize(mut self, reason: TerminationReason) -> BnbOutcome<T> {
        self.stats.on_prunings_bound_bulk(self.frontier.len() as u64);
        self.stats.on_frontier_len(self.frontier.max_len() as u64);
        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search();

        match reason {
            TerminationReason::OptimalityProven => {
                let tour = self
                    .incumbent
                    .into_best()
                    .expect("expected an incumbent tour when termination is OptimalityProven");
                BnbOutcome::optimal(tour, self.stats)
            }
            TerminationReason::InfeasibilityProven => BnbOutcome::infeasible(self.stats),
            TerminationReason::Aborted(msg) => {
                BnbOutcome::aborted(self.incumbent.into_best(), msg, self.stats)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::time::Duration;
    use waymark_model::{index::CityIndex, model::ModelBuilder};
    use waymark_search::{
        baseline::SeedTour,
        monitor::{no_op::NoOpMonitor, time_limit::TimeLimitMonitor},
        result::SolverResult,
    };

    const INF: f64 = f64::INFINITY;

    /// 4-city unit ring: 0->1->2->3->0 costs 1, everything else 5.
    fn ring_model() -> Model<f64> {
        ModelBuilder::new(4)
            .build_with(|from, to| {
                if (to.get() + 4 - from.get()) % 4 == 1 {
                    1.0
                } else {
                    5.0
                }
            })
            .unwrap()
    }

    /// Exhaustively enumerates all tours starting at city 0 and returns
    /// the cheapest closed-tour cost, or infinity if none is finite.
    fn brute_force_optimal(model: &Model<f64>) -> f64 {
        fn recurse(
            model: &Model<f64>,
            path: &mut Vec<CityIndex>,
            visited: &mut Vec<bool>,
            best: &mut f64,
        ) {
            let n = model.num_cities();
            if path.len() == n {
                let cost = Tour::from_order(model, path.clone()).cost();
                if cost < *best {
                    *best = cost;
                }
                return;
            }
            for city in 0..n {
                if visited[city] {
                    continue;
                }
                visited[city] = true;
                path.push(CityIndex::new(city));
                recurse(model, path, visited, best);
                path.pop();
                visited[city] = false;
            }
        }

        let n = model.num_cities();
        let mut path = vec![CityIndex::new(0)];
        let mut visited = vec![false; n];
        visited[0] = true;
        let mut best = INF;
        recurse(model, &mut path, &mut visited, &mut best);
        best
    }

    #[test]
    fn test_unit_ring_finds_optimal_tour() {
        let model = ring_model();
        let mut solver = BnbSolver::new();
        let outcome = solver.solve(&model, NoOpMonitor::new());

        let tour = match outcome.result() {
            SolverResult::Optimal(tour) => tour,
            other => panic!("expected optimal result, got {}", other),
        };
        assert_eq!(tour.cost(), 4.0);

        // The order must be the ring itself, starting at city 0.
        let order: Vec<usize> = tour.order().iter().map(|c| c.get()).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
        assert!(matches!(
            outcome.termination_reason(),
            TerminationReason::OptimalityProven
        ));
    }

    #[test]
    fn test_matches_brute_force_on_random_instances() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for n in 3..=7 {
            for _ in 0..5 {
                let mut costs = vec![0.0f64; n * n];
                for from in 0..n {
                    for to in 0..n {
                        costs[from * n + to] = if from == to {
                            INF
                        } else {
                            rng.gen_range(1.0..100.0)
                        };
                    }
                }
                let table = costs.clone();
                let model = ModelBuilder::new(n)
                    .build_with(|from, to| table[from.get() * n + to.get()])
                    .unwrap();

                let expected = brute_force_optimal(&model);

                let mut solver = BnbSolver::new();
                let outcome = solver.solve(&model, NoOpMonitor::new());
                let tour = outcome
                    .result()
                    .tour()
                    .unwrap_or_else(|| panic!("no tour for n = {}", n));

                assert!(
                    (tour.cost() - expected).abs() < 1e-9,
                    "n = {}: search found {} but brute force found {}",
                    n,
                    tour.cost(),
                    expected
                );
            }
        }
    }

    #[test]
    fn test_node_bounds_are_admissible() {
        // Every node of the exhaustive tree must carry a bound that
        // never exceeds the cost of its best completion.
        fn walk(model: &Model<f64>, node: &SearchNode<f64>) {
            let best = brute_force_through(model, node.path());
            assert!(
                node.lower_bound() <= best + 1e-9,
                "bound {} at depth {} exceeds its best completion {}",
                node.lower_bound(),
                node.depth(),
                best
            );
            if node.depth() < model.num_cities() {
                for child in node.make_children(model) {
                    walk(model, &child);
                }
            }
        }

        let mut rng = StdRng::seed_from_u64(0xb0b);

        for n in 3..=7 {
            let mut costs = vec![0.0f64; n * n];
            for from in 0..n {
                for to in 0..n {
                    costs[from * n + to] = if from == to {
                        INF
                    } else {
                        rng.gen_range(1.0..50.0)
                    };
                }
            }
            let table = costs.clone();
            let model = ModelBuilder::new(n)
                .build_with(|from, to| table[from.get() * n + to.get()])
                .unwrap();

            walk(&model, &SearchNode::root(&model));
        }
    }

    /// The cheapest closed tour extending the given path prefix.
    fn brute_force_through(model: &Model<f64>, prefix: &[CityIndex]) -> f64 {
        fn recurse(
            model: &Model<f64>,
            path: &mut Vec<CityIndex>,
            visited: &mut Vec<bool>,
            best: &mut f64,
        ) {
            let n = model.num_cities();
            if path.len() == n {
                let cost = Tour::from_order(model, path.clone()).cost();
                if cost < *best {
                    *best = cost;
                }
                return;
            }
            for city in 0..n {
                if visited[city] {
                    continue;
                }
                visited[city] = true;
                path.push(CityIndex::new(city));
                recurse(model, path, visited, best);
                path.pop();
                visited[city] = false;
            }
        }

        let mut path = prefix.to_vec();
        let mut visited = vec![false; model.num_cities()];
        for city in prefix {
            visited[city.get()] = true;
        }
        let mut best = INF;
        recurse(model, &mut path, &mut visited, &mut best);
        best
    }

    #[test]
    fn test_forbidden_edge_is_never_traversed() {
        // Symmetric 5-city instance; the edge between 1 and 3 is
        // forbidden in both directions.
        let base = [
            [0.0, 2.0, 9.0, 10.0, 7.0],
            [2.0, 0.0, 6.0, 4.0, 3.0],
            [9.0, 6.0, 0.0, 8.0, 5.0],
            [10.0, 4.0, 8.0, 0.0, 6.0],
            [7.0, 3.0, 5.0, 6.0, 0.0],
        ];
        let model = ModelBuilder::new(5)
            .build_with(|from, to| {
                let (from, to) = (from.get(), to.get());
                if (from, to) == (1, 3) || (from, to) == (3, 1) {
                    INF
                } else {
                    base[from][to]
                }
            })
            .unwrap();

        let mut solver = BnbSolver::new();
        let outcome = solver.solve(&model, NoOpMonitor::new());

        let tour = match outcome.result() {
            SolverResult::Optimal(tour) => tour,
            other => panic!("expected optimal result, got {}", other),
        };
        assert!(tour.cost().is_finite());
        assert_eq!(tour.cost(), brute_force_optimal(&model));

        // No consecutive pair (including the closing edge) uses 1-3.
        let order = tour.order();
        for k in 0..order.len() {
            let from = order[k].get();
            let to = order[(k + 1) % order.len()].get();
            assert!(
                !((from, to) == (1, 3) || (from, to) == (3, 1)),
                "tour traverses the forbidden edge {} -> {}",
                from,
                to
            );
        }
    }

    #[test]
    fn test_blocked_city_proves_infeasibility() {
        // City 2 has no outgoing edges.
        let model = ModelBuilder::new(4)
            .build_with(|from, _to| if from.get() == 2 { INF } else { 1.0 })
            .unwrap();

        let mut solver = BnbSolver::new();
        let outcome = solver.solve(&model, NoOpMonitor::new());

        assert!(matches!(outcome.result(), SolverResult::Infeasible));
        assert!(matches!(
            outcome.termination_reason(),
            TerminationReason::InfeasibilityProven
        ));
    }

    #[test]
    fn test_expired_budget_returns_seeded_baseline() {
        let model = ring_model();

        // A deliberately bad but feasible baseline: 0 -> 2 -> 1 -> 3.
        let seed = Tour::from_order(
            &model,
            vec![
                CityIndex::new(0),
                CityIndex::new(2),
                CityIndex::new(1),
                CityIndex::new(3),
            ],
        );
        let seed_cost = seed.cost();
        let baseline = SeedTour::new(seed);

        let mut solver = BnbSolver::new();
        let outcome = solver.solve_with_baseline(
            &model,
            &baseline,
            TimeLimitMonitor::new(Duration::ZERO),
        );

        // The budget expires before the first pop; the baseline is all
        // the search holds.
        let tour = match outcome.result() {
            SolverResult::Feasible(tour) => tour,
            other => panic!("expected feasible result, got {}", other),
        };
        assert_eq!(tour.cost(), seed_cost);
        assert!(matches!(
            outcome.termination_reason(),
            TerminationReason::Aborted(_)
        ));
    }

    #[test]
    fn test_baseline_tightens_but_never_worsens_result() {
        let model = ring_model();

        let seed = Tour::from_order(
            &model,
            vec![
                CityIndex::new(0),
                CityIndex::new(2),
                CityIndex::new(1),
                CityIndex::new(3),
            ],
        );
        let baseline = SeedTour::new(seed);

        let mut solver = BnbSolver::new();
        let outcome = solver.solve_with_baseline(&model, &baseline, NoOpMonitor::new());

        let tour = match outcome.result() {
            SolverResult::Optimal(tour) => tour,
            other => panic!("expected optimal result, got {}", other),
        };
        assert_eq!(tour.cost(), 4.0, "seeded search must still reach the optimum");
    }

    #[test]
    fn test_nodes_created_counts_children_only() {
        // Uniform 3-city instance: the root expands into 2 children and
        // each of those expands into exactly 1 complete path, so 4 child
        // nodes are created in total. The root itself is not counted.
        let model = ModelBuilder::new(3).build_with(|_, _| 1.0).unwrap();
        let mut solver = BnbSolver::new();
        let outcome = solver.solve(&model, NoOpMonitor::new());
        assert_eq!(outcome.statistics().nodes_created, 4);

        // With the budget already spent nothing is ever expanded.
        let mut solver = BnbSolver::new();
        let outcome = solver.solve(&ring_model(), TimeLimitMonitor::new(Duration::ZERO));
        assert_eq!(outcome.statistics().nodes_created, 0);
    }

    #[test]
    fn test_statistics_are_populated() {
        let model = ring_model();
        let mut solver = BnbSolver::new();
        let outcome = solver.solve(&model, NoOpMonitor::new());

        let stats = outcome.statistics();
        assert!(stats.nodes_created >= 1);
        assert!(stats.solutions_found >= 1);
        assert!(stats.max_frontier_len >= 1);
    }
}
