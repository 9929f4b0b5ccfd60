mod common;

use active_time_scheduling::model::Pool;
use active_time_scheduling::schedulers::{BruteForceScheduler, GreedyScheduler};
use active_time_scheduling::validation::check_schedule;
use rand::Rng;

#[test]
fn finds_the_optimum_on_the_shared_slot_example() {
    let mut pool = active_time_scheduling::model::JobPool::new();
    pool.add_job(1, 4, 2).unwrap();
    pool.add_job(3, 8, 2).unwrap();
    pool.add_job(10, 11, 2).unwrap();

    let schedule = BruteForceScheduler::new().process(&pool, 2).unwrap();
    assert_eq!(schedule.total_active_time(), Some(4));
    check_schedule(&schedule, &pool, 2).unwrap();
}

#[test]
fn feasibility_guided_generation_only_emits_feasible_pools() {
    let mut rng = common::rng(0x5768);
    for _ in 0..20 {
        let pool = common::feasible_uniform_pool(&mut rng, 6, 8, (1, 4), (1, 3), |candidate| {
            GreedyScheduler::new()
                .process(candidate, 2)
                .map(|schedule| schedule.all_jobs_scheduled())
                .unwrap_or(false)
        });
        assert_eq!(pool.size(), 6);

        let schedule = BruteForceScheduler::new().process(&pool, 2).unwrap();
        assert!(schedule.all_jobs_scheduled(), "pool {:?}", pool.jobs());
        check_schedule(&schedule, &pool, 2).unwrap();
    }
}

#[test]
fn normal_generator_respects_the_timeline() {
    let mut rng = common::rng(0x798a);
    for _ in 0..10 {
        let max_t = rng.gen_range(5..=12);
        let pool = common::normal_pool(&mut rng, 8, max_t, 3.0, 1.5, (1, 3));
        assert_eq!(pool.size(), 8);
        for job in pool.jobs() {
            let window = job.availability()[0];
            assert!(window.end() <= max_t);
            assert!(u64::from(job.duration()) <= window.duration());
        }
    }
}
