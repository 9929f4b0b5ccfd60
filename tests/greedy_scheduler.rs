mod common;

use active_time_scheduling::model::{JobPool, JobPoolMI, Pool, Schedule, TimeInterval};
use active_time_scheduling::schedulers::{
    BruteForceScheduler, GreedyIntervalsScheduler, GreedyScheduler, LazyActivationSchedulerT,
    UpperDegreeConstrainedSubgraphScheduler,
};
use active_time_scheduling::validation::{check_2_approximation, check_equality, check_schedule};
use rand::Rng;

fn process_variant(variant: usize, pool: &JobPool, max_concurrency: u32) -> Schedule {
    if variant == 0 {
        GreedyScheduler::new().process(pool, max_concurrency).unwrap()
    } else {
        GreedyIntervalsScheduler::new()
            .process(pool, max_concurrency)
            .unwrap()
    }
}

#[test]
fn simple_examples() {
    for variant in 0..2 {
        let mut pool = JobPool::new();
        pool.add_job(1, 4, 2).unwrap();
        pool.add_job(3, 8, 2).unwrap();
        pool.add_job(10, 11, 2).unwrap();

        let schedule = process_variant(variant, &pool, 2);
        assert!(schedule.all_jobs_scheduled());
        assert_eq!(
            schedule.active_time_intervals().unwrap(),
            &[TimeInterval::new(3, 4), TimeInterval::new(10, 11)][..]
        );
        assert_eq!(schedule.job_schedules().unwrap().len(), 3);
        check_schedule(&schedule, &pool, 2).unwrap();

        let mut pool = JobPool::new();
        pool.add_job(1, 2, 2).unwrap();
        pool.add_job(1, 2, 2).unwrap();

        let schedule = process_variant(variant, &pool, 1);
        assert!(!schedule.all_jobs_scheduled());
        assert!(schedule.active_time_intervals().is_none());
        assert!(schedule.job_schedules().is_none());
    }
}

#[test]
fn empty_pools() {
    for variant in 0..2 {
        let pool = JobPool::new();
        let schedule = process_variant(variant, &pool, 2);
        assert!(schedule.all_jobs_scheduled());
        assert_eq!(schedule.active_time_intervals().unwrap(), &[][..]);

        let mut pool = JobPool::new();
        pool.add_job(1, 5, 0).unwrap();
        pool.add_job(3, 7, 0).unwrap();

        let schedule = process_variant(variant, &pool, 2);
        assert!(schedule.all_jobs_scheduled());
        assert_eq!(schedule.active_time_intervals().unwrap(), &[][..]);
        assert_eq!(schedule.job_schedules().unwrap().len(), 2);
    }
}

#[test]
fn tight_example_doubles_the_optimum() {
    for variant in 0..2 {
        let mut pool = JobPool::new();
        for _ in 0..10 {
            pool.add_job(1, 11, 1).unwrap();
        }
        for _ in 0..9 {
            pool.add_job(2, 11, 10).unwrap();
        }
        pool.add_job(1, 21, 10).unwrap();

        let schedule = process_variant(variant, &pool, 10);
        assert!(schedule.all_jobs_scheduled());
        assert_eq!(schedule.total_active_time(), Some(20));
        assert_eq!(schedule.job_schedules().unwrap().len(), 20);
        check_schedule(&schedule, &pool, 10).unwrap();
    }
}

#[test]
fn variants_agree() {
    let mut rng = common::rng(0x5e6f);
    for _ in 0..200 {
        let max_length = rng.gen_range(1..=4);
        let max_t = rng.gen_range(15..=30);
        let max_concurrency = rng.gen_range(1..=3);
        let number_of_jobs = rng.gen_range(1..=(max_t * 2)) as usize;

        let pool = common::uniform_pool(
            &mut rng,
            number_of_jobs,
            max_t,
            (1, max_length),
            (1, max_length),
        );

        let a = GreedyScheduler::new().process(&pool, max_concurrency).unwrap();
        let b = GreedyIntervalsScheduler::new()
            .process(&pool, max_concurrency)
            .unwrap();
        assert_eq!(a, b, "greedy variants diverged for {:?}", pool.jobs());
        check_equality(&a, &b, &pool, max_concurrency).unwrap();
    }
}

#[test]
fn against_brute_force() {
    let mut rng = common::rng(0x7a8b);
    for _ in 0..150 {
        let max_length = rng.gen_range(1..=4);
        let max_t = rng.gen_range(4..=8);
        let max_concurrency = rng.gen_range(1..=3);
        let number_of_jobs = rng.gen_range(1..=(max_t / max_length * max_concurrency + 1)) as usize;

        let pool = common::uniform_pool(
            &mut rng,
            number_of_jobs,
            max_t,
            (1, max_length),
            (1, max_length),
        );

        let optimal = BruteForceScheduler::new()
            .process(&pool, max_concurrency)
            .unwrap();
        for variant in 0..2 {
            let schedule = process_variant(variant, &pool, max_concurrency);
            check_2_approximation(&optimal, &schedule, &pool, max_concurrency)
                .unwrap_or_else(|e| panic!("{e} for {:?}", pool.jobs()));
        }
    }
}

#[test]
fn against_lazy_activation_on_unit_durations() {
    let mut rng = common::rng(0x9c0d);
    for _ in 0..150 {
        let max_length = rng.gen_range(1..=4);
        let max_t = rng.gen_range(15..=30);
        let max_concurrency = rng.gen_range(1..=3);
        let number_of_jobs = rng.gen_range(1..=(max_t * 2)) as usize;

        // Mirror the same unit jobs into both pool variants.
        let unit_pool = common::unit_uniform_pool(&mut rng, number_of_jobs, max_t, (1, max_length));
        let mut pool = JobPool::new();
        for job in unit_pool.jobs() {
            let window = job.availability()[0];
            pool.add_job(window.start(), window.end(), 1).unwrap();
        }

        let exact = LazyActivationSchedulerT::new()
            .process(&unit_pool, max_concurrency)
            .unwrap();
        check_schedule(&exact, &unit_pool, max_concurrency).unwrap();
        for variant in 0..2 {
            let schedule = process_variant(variant, &pool, max_concurrency);
            check_schedule(&schedule, &pool, max_concurrency).unwrap();
            common::assert_active_time_ratio(&schedule, &exact, 2);
        }
    }
}

#[test]
fn against_upper_degree_constrained_subgraph() {
    let mut rng = common::rng(0xb1c2);
    for _ in 0..100 {
        let max_length = rng.gen_range(5..=10);
        let max_t = rng.gen_range(15..=30);
        let number_of_jobs = rng.gen_range(1..=(max_t / max_length * 2 + 1)) as usize;

        let pool = common::uniform_pool(
            &mut rng,
            number_of_jobs,
            max_t,
            (1, max_length),
            (1, max_length),
        );
        let mut mi_pool = JobPoolMI::new();
        for job in pool.jobs() {
            let window = job.availability()[0];
            mi_pool
                .add_job(&[(window.start(), window.end())], job.duration())
                .unwrap();
        }

        let reference = UpperDegreeConstrainedSubgraphScheduler::new()
            .process(&mi_pool)
            .unwrap();
        check_schedule(&reference, &mi_pool, 2).unwrap();
        for variant in 0..2 {
            let schedule = process_variant(variant, &pool, 2);
            check_schedule(&schedule, &pool, 2).unwrap();
            common::assert_active_time_ratio(&schedule, &reference, 2);
        }
    }
}
