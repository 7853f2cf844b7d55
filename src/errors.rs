use std::result::Result as StdResult;

use split_config::ConfigError;
use split_core::CoreError;
use thiserror::Error;

/// Unified error type across the balance, storage and config layers.
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Group not found: {0}")]
    GroupNotFound(String),
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = StdResult<T, SplitError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] SplitError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<CoreError> for SplitError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::GroupNotFound(id) => SplitError::GroupNotFound(id.to_string()),
            CoreError::Integrity(violation) => SplitError::DataIntegrity(violation.to_string()),
            CoreError::Storage(message) | CoreError::Serde(message) => {
                SplitError::StorageError(message)
            }
            CoreError::Io(err) => SplitError::StorageError(err.to_string()),
            other @ (CoreError::MemberNotFound(_)
            | CoreError::DuplicateMember(_)
            | CoreError::MemberInUse(_)
            | CoreError::ExpenseNotFound(_)
            | CoreError::PaymentNotFound(_)
            | CoreError::InvalidOperation(_)) => SplitError::InvalidInput(other.to_string()),
        }
    }
}

impl From<ConfigError> for SplitError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => SplitError::StorageError(io.to_string()),
            other => SplitError::ConfigError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for SplitError {
    fn from(err: serde_json::Error) -> Self {
        SplitError::StorageError(err.to_string())
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::from(SplitError::from(err))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::from(SplitError::from(err))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::from(SplitError::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use split_core::IntegrityError;
    use uuid::Uuid;

    #[test]
    fn integrity_violations_map_to_data_integrity() {
        let expense = Uuid::new_v4();
        let err = SplitError::from(CoreError::from(IntegrityError::EmptyParticipants { expense }));
        assert!(matches!(err, SplitError::DataIntegrity(ref message) if message.contains("no participants")));
    }

    #[test]
    fn missing_group_keeps_its_identifier() {
        let id = Uuid::new_v4();
        let err = CliError::from(CoreError::GroupNotFound(id));
        assert!(err.to_string().contains(&id.to_string()));
    }
}
