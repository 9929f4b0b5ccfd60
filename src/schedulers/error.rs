use thiserror::Error;

/// Call-time misuse and solver failures.
///
/// Infeasibility is never reported through this type; it is the
/// [`Schedule::Infeasible`](crate::model::Schedule) result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("concurrency bound must be at least 1")]
    InvalidConcurrency,

    #[error("linear program solver failed: {0}")]
    LpFailure(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_concurrency_display() {
        assert_eq!(
            SchedulerError::InvalidConcurrency.to_string(),
            "concurrency bound must be at least 1"
        );
    }

    #[test]
    fn lp_failure_carries_solver_message() {
        let e = SchedulerError::LpFailure("unbounded".to_string());
        assert_eq!(e.to_string(), "linear program solver failed: unbounded");
    }
}
