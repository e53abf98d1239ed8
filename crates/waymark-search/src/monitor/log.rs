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

use crate::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    num::SolverFloat,
};
use std::time::{Duration, Instant};
use waymark_model::{model::Model, tour::Tour};

/// A monitor that periodically logs search progress and reports every
/// improving tour through the `log` facade.
#[derive(Debug, Clone)]
pub struct LogMonitor<T> {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    steps: u64,
    best_cost: Option<T>,
}

impl<T> LogMonitor<T>
where
    T: SolverFloat,
{
    /// Creates a new `LogMonitor` that emits a progress line at most
    /// once per `log_interval`.
    pub fn new(log_interval: Duration) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            steps: 0,
            best_cost: None,
        }
    }

    fn log_line(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();

        let best_cost_str = if let Some(cost) = &self.best_cost {
            format!("{}", cost)
        } else {
            "Inf".to_string()
        };

        log::info!(
            "elapsed: {:.1}s | steps: {} | best tour: {}",
            elapsed,
            self.steps,
            best_cost_str
        );

        self.last_log_time = now;
    }
}

impl<T> Default for LogMonitor<T>
where
    T: SolverFloat,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl<T> std::fmt::Display for LogMonitor<T>
where
    T: SolverFloat,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}s)",
            self.log_interval.as_secs()
        )
    }
}

impl<T> SearchMonitor<T> for LogMonitor<T>
where
    T: SolverFloat,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, model: &Model<T>) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.steps = 0;
        self.best_cost = None; // Reset
        log::info!(
            "search started on {} cities (tree size {})",
            model.num_cities(),
            model.complexity()
        );
    }

    fn on_exit_search(&mut self) {
        let elapsed = self.start_time.elapsed().as_secs_f32();
        log::info!("search finished after {:.1}s ({} steps)", elapsed, self.steps);
    }

    fn on_solution_found(&mut self, tour: &Tour<T>) {
        let elapsed = self.start_time.elapsed().as_secs_f32();
        self.best_cost = Some(tour.cost());
        log::info!(
            "improving tour found after {:.1}s: cost {}",
            elapsed,
            tour.cost()
        );
    }

    fn on_step(&mut self) {
        self.steps += 1;
        if self.last_log_time.elapsed() >= self.log_interval {
            self.log_line();
        }
    }

    fn search_command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_monitor_counts_steps() {
        let mut monitor = LogMonitor::<f64>::new(Duration::from_secs(3600));
        for _ in 0..10 {
            monitor.on_step();
        }
        assert_eq!(monitor.steps, 10);
        assert_eq!(monitor.search_command(), SearchCommand::Continue);
    }
}
