//! Shared test support: randomised job-pool generators and comparison
//! helpers for the cross-scheduler laws.
//!
//! All generators take a seeded RNG so every randomised test is
//! reproducible.

#![allow(dead_code)]

use active_time_scheduling::model::{
    JobPool, JobPoolMI, Pool, Schedule, TimeInterval, UnitJobPool, UnitJobPoolMI,
};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn window(rng: &mut StdRng, max_t: u32, length: u32) -> (u32, u32) {
    let release = rng.gen_range(0..=max_t - (length - 1));
    (release, release + length - 1)
}

fn duration(rng: &mut StdRng, length: u32, duration_range: (u32, u32)) -> u32 {
    rng.gen_range(duration_range.0..=duration_range.1.min(length))
}

/// Interval jobs with uniformly random window lengths and durations.
pub fn uniform_pool(
    rng: &mut StdRng,
    number_of_jobs: usize,
    max_t: u32,
    length_range: (u32, u32),
    duration_range: (u32, u32),
) -> JobPool {
    let mut pool = JobPool::new();
    while pool.size() != number_of_jobs {
        let length = rng.gen_range(length_range.0..=length_range.1);
        let (release, deadline) = window(rng, max_t, length);
        let duration = duration(rng, length, duration_range);
        pool.add_job(release, deadline, duration)
            .expect("generated job must satisfy pool preconditions");
    }
    pool
}

/// Like [`uniform_pool`], but pops any job that makes the pool infeasible
/// according to the probe.
pub fn feasible_uniform_pool(
    rng: &mut StdRng,
    number_of_jobs: usize,
    max_t: u32,
    length_range: (u32, u32),
    duration_range: (u32, u32),
    is_feasible: impl Fn(&JobPool) -> bool,
) -> JobPool {
    let mut pool = JobPool::new();
    while pool.size() != number_of_jobs {
        let length = rng.gen_range(length_range.0..=length_range.1);
        let (release, deadline) = window(rng, max_t, length);
        let duration = duration(rng, length, duration_range);
        pool.add_job(release, deadline, duration)
            .expect("generated job must satisfy pool preconditions");
        if !is_feasible(&pool) {
            pool.pop_job();
        }
    }
    pool
}

/// Interval jobs whose window lengths follow a discretised normal
/// distribution over `1..=max_t`.
pub fn normal_pool(
    rng: &mut StdRng,
    number_of_jobs: usize,
    max_t: u32,
    length_mu: f64,
    length_sigma: f64,
    duration_range: (u32, u32),
) -> JobPool {
    let weights: Vec<f64> = (1..=max_t)
        .map(|length| {
            let z = (f64::from(length) - length_mu) / length_sigma;
            (-0.5 * z * z).exp()
        })
        .collect();
    let lengths = WeightedIndex::new(&weights).expect("normal weights must be positive");

    let mut pool = JobPool::new();
    while pool.size() != number_of_jobs {
        let length = lengths.sample(rng) as u32 + 1;
        let (release, deadline) = window(rng, max_t, length);
        let duration = duration(rng, length, duration_range);
        pool.add_job(release, deadline, duration)
            .expect("generated job must satisfy pool preconditions");
    }
    pool
}

/// Unit jobs with uniformly random windows.
pub fn unit_uniform_pool(
    rng: &mut StdRng,
    number_of_jobs: usize,
    max_t: u32,
    length_range: (u32, u32),
) -> UnitJobPool {
    let mut pool = UnitJobPool::new();
    while pool.size() != number_of_jobs {
        let length = rng.gen_range(length_range.0..=length_range.1);
        let (release, deadline) = window(rng, max_t, length);
        pool.add_job(release, deadline)
            .expect("generated job must satisfy pool preconditions");
    }
    pool
}

fn bernoulli_availability(rng: &mut StdRng, max_t: u32, p_range: (f64, f64)) -> Vec<(u32, u32)> {
    let p = rng.gen_range(p_range.0..=p_range.1);
    let selected = (0..=max_t).filter(|_| rng.gen_bool(p));
    TimeInterval::merge_timestamps(selected)
        .into_iter()
        .map(|interval| (interval.start(), interval.end()))
        .collect()
}

/// Multi-interval jobs with Bernoulli-sampled availability.
pub fn mi_pool(
    rng: &mut StdRng,
    number_of_jobs: usize,
    max_t: u32,
    p_range: (f64, f64),
    max_duration: u32,
) -> JobPoolMI {
    let mut pool = JobPoolMI::new();
    while pool.size() != number_of_jobs {
        let intervals = bernoulli_availability(rng, max_t, p_range);
        let available: u64 = intervals
            .iter()
            .map(|&(start, end)| u64::from(end - start + 1))
            .sum();
        let upper = u32::try_from(available).unwrap_or(u32::MAX).min(max_duration);
        let duration = rng.gen_range(0..=upper);
        pool.add_job(&intervals, duration)
            .expect("generated job must satisfy pool preconditions");
    }
    pool
}

/// Unit multi-interval jobs with Bernoulli-sampled availability.
pub fn unit_mi_pool(
    rng: &mut StdRng,
    number_of_jobs: usize,
    max_t: u32,
    p_range: (f64, f64),
) -> UnitJobPoolMI {
    let mut pool = UnitJobPoolMI::new();
    while pool.size() != number_of_jobs {
        let intervals = bernoulli_availability(rng, max_t, p_range);
        pool.add_job(&intervals)
            .expect("generated job must satisfy pool preconditions");
    }
    pool
}

/// Cross-pool comparison of two schedules: identical feasibility verdicts
/// and, when feasible, total active times within `factor` of each other.
///
/// Unlike `validation::check_equality`, this does not validate the entries
/// against a pool, so it also fits comparisons across pool variants (e.g. a
/// `UnitJobPool` scheduler against a `JobPool` scheduler on mirrored jobs).
pub fn assert_active_time_ratio(a: &Schedule, b: &Schedule, factor: u64) {
    assert_eq!(
        a.all_jobs_scheduled(),
        b.all_jobs_scheduled(),
        "feasibility verdicts disagree"
    );
    if let (Some(x), Some(y)) = (a.total_active_time(), b.total_active_time()) {
        assert!(
            x <= factor * y && y <= factor * x,
            "active times {x} and {y} are not within a factor of {factor}"
        );
    }
}
