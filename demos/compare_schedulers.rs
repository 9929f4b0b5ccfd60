//! Demonstration comparing the schedulers on one small job pool.

use active_time_scheduling::model::{JobPool, Pool, Schedule};
use active_time_scheduling::schedulers::{
    BruteForceScheduler, GreedyIntervalsScheduler, GreedyScheduler,
    LinearProgrammingRoundedScheduler,
};

fn describe(name: &str, schedule: &Schedule) {
    match schedule.active_time_intervals() {
        Some(intervals) => {
            let rendered: Vec<String> = intervals.iter().map(|iv| iv.to_string()).collect();
            println!(
                "{name:<30} active slots: {:>2}   intervals: {}",
                schedule.total_active_time().unwrap_or(0),
                rendered.join(", ")
            );
        }
        None => println!("{name:<30} infeasible"),
    }
}

fn main() {
    // A pool with two overlapping jobs and one isolated late job.
    let mut pool = JobPool::new();
    pool.add_job(1, 4, 2).expect("valid job");
    pool.add_job(3, 8, 2).expect("valid job");
    pool.add_job(10, 11, 2).expect("valid job");

    println!("Scheduling {} jobs at concurrency 2", pool.size());
    println!("=====================================");

    let schedule = BruteForceScheduler::new()
        .process(&pool, 2)
        .expect("valid concurrency");
    describe("BruteForceScheduler", &schedule);

    let schedule = GreedyScheduler::new()
        .process(&pool, 2)
        .expect("valid concurrency");
    describe("GreedyScheduler", &schedule);

    let schedule = GreedyIntervalsScheduler::new()
        .process(&pool, 2)
        .expect("valid concurrency");
    describe("GreedyIntervalsScheduler", &schedule);

    let schedule = LinearProgrammingRoundedScheduler::new()
        .process(&pool, 2)
        .expect("solver available");
    describe("LinearProgrammingRounded", &schedule);
}
