//! Scheduler error types

use std::time::Duration;

use rotaboard_domain::RotaboardError;
use thiserror::Error;
use tokio::task::JoinError;
use tokio::time::error::Elapsed;

use crate::errors::InfraError;

/// Scheduler-specific errors
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Scheduler is already running
    #[error("Scheduler already running")]
    AlreadyRunning,

    /// Scheduler is not running
    #[error("Scheduler not running")]
    NotRunning,

    /// A rotation needs at least one widget
    #[error("Rotation requires at least one widget")]
    EmptyRotation,

    /// Failed to start scheduler
    #[error("Failed to start scheduler: {0}")]
    StartFailed(String),

    /// Operation timed out
    #[error("Operation timed out after {duration:?}")]
    Timeout {
        duration: Duration,
        #[source]
        source: Elapsed,
    },

    /// Task join failed
    #[error("Task join failed: {0}")]
    TaskJoinFailed(#[from] JoinError),
}

impl From<SchedulerError> for InfraError {
    fn from(err: SchedulerError) -> Self {
        let rotaboard_err = match err {
            SchedulerError::AlreadyRunning | SchedulerError::NotRunning => {
                RotaboardError::InvalidInput(err.to_string())
            }
            SchedulerError::EmptyRotation => RotaboardError::Config(err.to_string()),
            _ => RotaboardError::Internal(err.to_string()),
        };
        InfraError(rotaboard_err)
    }
}

impl From<SchedulerError> for RotaboardError {
    fn from(err: SchedulerError) -> Self {
        InfraError::from(err).into()
    }
}

/// Convenience type alias for scheduler operations
pub type SchedulerResult<T> = Result<T, SchedulerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_errors_map_to_invalid_input() {
        let err: RotaboardError = SchedulerError::AlreadyRunning.into();
        assert_eq!(err, RotaboardError::InvalidInput("Scheduler already running".into()));

        let err: RotaboardError = SchedulerError::NotRunning.into();
        assert!(matches!(err, RotaboardError::InvalidInput(_)));
    }

    #[test]
    fn empty_rotation_is_a_config_error() {
        let err: RotaboardError = SchedulerError::EmptyRotation.into();
        assert_eq!(err, RotaboardError::Config("Rotation requires at least one widget".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_reports_duration() {
        let duration = Duration::from_secs(5);
        let source =
            tokio::time::timeout(duration, std::future::pending::<()>()).await.unwrap_err();
        let err = SchedulerError::Timeout { duration, source };

        assert_eq!(err.to_string(), "Operation timed out after 5s");
        let mapped: RotaboardError = err.into();
        assert!(matches!(mapped, RotaboardError::Internal(_)));
    }
}
