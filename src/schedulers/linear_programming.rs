//! LP-relaxation rounding scheduler.
//!
//! Solves the fractional relaxation of the active-time problem and rounds
//! it to an integral schedule:
//!
//! - `y_t ∈ [0, 1]` per candidate timestamp, `x_{j,t} ∈ [0, 1]` per
//!   job–timestamp pair within the job's availability;
//! - `Σ_t x_{j,t} = duration(j)`, `Σ_j x_{j,t} ≤ g · y_t`,
//!   `x_{j,t} ≤ y_t`; minimise `Σ_t y_t`.
//!
//! Every timestamp with `y_t ≥ 1/2` is opened (tolerance: the comparison
//! is against `0.5 - 1e-9` to absorb solver round-off), which at most
//! doubles the objective, giving a 2-approximation. Should the rounded set fail
//! the integral feasibility check, the remaining timestamps are opened one
//! at a time by decreasing `y_t` (ties to the earlier timestamp) until the
//! assignment succeeds; a fully open timeline is integrally feasible
//! whenever the LP is, so the fallback terminates.
//!
//! An infeasible LP is the normal [`Schedule::Infeasible`] result; any
//! other solver failure surfaces as [`SchedulerError::LpFailure`].

use good_lp::{
    constraint, default_solver, variable, variables, Expression, ResolutionError, Solution,
    SolverModel, Variable,
};

use crate::flow;
use crate::model::{JobPool, Pool, Schedule};

use super::SchedulerError;

const ROUNDING_THRESHOLD: f64 = 0.5 - 1e-9;

/// 2-approximation for [`JobPool`] via LP rounding.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearProgrammingRoundedScheduler;

impl LinearProgrammingRoundedScheduler {
    pub fn new() -> Self {
        Self
    }

    pub fn process(&self, pool: &JobPool, max_concurrency: u32) -> Result<Schedule, SchedulerError> {
        if max_concurrency == 0 {
            return Err(SchedulerError::InvalidConcurrency);
        }
        let jobs = pool.jobs();

        let mut slots: Vec<u32> = jobs
            .iter()
            .filter(|job| job.duration() > 0)
            .flat_map(|job| job.available_timestamps())
            .collect();
        slots.sort_unstable();
        slots.dedup();

        if slots.is_empty() {
            // Only zero-duration jobs (or none): nothing to solve.
            let assignments = vec![Vec::new(); jobs.len()];
            return Ok(Schedule::from_assignments(jobs, &assignments));
        }

        // ── LP relaxation ─────────────────────────────────────────────
        let mut vars = variables!();
        let y: Vec<Variable> = slots
            .iter()
            .map(|_| vars.add(variable().clamp(0.0, 1.0)))
            .collect();
        // x variables per (job, slot index) pair.
        let mut x_by_job: Vec<Vec<(usize, Variable)>> = Vec::with_capacity(jobs.len());
        let mut x_by_slot: Vec<Vec<Variable>> = vec![Vec::new(); slots.len()];
        for job in jobs {
            let mut row = Vec::new();
            if job.duration() > 0 {
                for t in job.available_timestamps() {
                    let k = slots.partition_point(|&s| s < t);
                    let x = vars.add(variable().clamp(0.0, 1.0));
                    row.push((k, x));
                    x_by_slot[k].push(x);
                }
            }
            x_by_job.push(row);
        }

        let objective: Expression = y.iter().sum();
        let mut model = vars.minimise(objective).using(default_solver);
        for (job, row) in jobs.iter().zip(&x_by_job) {
            if job.duration() == 0 {
                continue;
            }
            let row_vars: Vec<Variable> = row.iter().map(|&(_, x)| x).collect();
            let total: Expression = row_vars.iter().sum();
            model = model.with(constraint!(total == f64::from(job.duration())));
            for &(k, x) in row {
                model = model.with(constraint!(x <= y[k]));
            }
        }
        for (k, xs) in x_by_slot.iter().enumerate() {
            let load: Expression = xs.iter().sum();
            model = model.with(constraint!(load <= f64::from(max_concurrency) * y[k]));
        }

        let solution = match model.solve() {
            Ok(solution) => solution,
            Err(ResolutionError::Infeasible) => return Ok(Schedule::infeasible()),
            Err(error) => return Err(SchedulerError::LpFailure(error.to_string())),
        };
        let y_values: Vec<f64> = y.iter().map(|&v| solution.value(v)).collect();

        // ── Rounding and feasibility fallback ─────────────────────────
        let mut opened: Vec<bool> = y_values.iter().map(|&v| v >= ROUNDING_THRESHOLD).collect();
        loop {
            let open_slots: Vec<u32> = slots
                .iter()
                .zip(&opened)
                .filter(|(_, &open)| open)
                .map(|(&t, _)| t)
                .collect();
            if let Some(assignments) = flow::assign_jobs(jobs, &open_slots, max_concurrency) {
                return Ok(Schedule::from_assignments(jobs, &assignments));
            }
            // Open the best remaining timestamp and retry.
            let mut next: Option<usize> = None;
            for k in 0..slots.len() {
                if opened[k] {
                    continue;
                }
                if next.map_or(true, |best| y_values[k] > y_values[best]) {
                    next = Some(k);
                }
            }
            match next {
                Some(k) => opened[k] = true,
                None => return Ok(Schedule::infeasible()),
            }
        }
    }
}
