use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StopperError {
    /// EC2 call failed; fatal to the run.
    #[error("{operation} failed: {message}")]
    RemoteService {
        operation: &'static str,
        message: String,
    },

    /// SNS publish failed; always absorbed by the caller.
    #[error("Notification publish failed: {message}")]
    Notification { message: String },
}

impl StopperError {
    pub fn remote(operation: &'static str, message: impl Into<String>) -> Self {
        Self::RemoteService {
            operation,
            message: message.into(),
        }
    }

    pub fn notification(message: impl Into<String>) -> Self {
        Self::Notification {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_service_display_names_operation() {
        let err = StopperError::remote("StopInstances", "UnauthorizedOperation");
        assert_eq!(err.to_string(), "StopInstances failed: UnauthorizedOperation");
    }

    #[test]
    fn test_notification_display() {
        let err = StopperError::notification("topic does not exist");
        assert_eq!(
            err.to_string(),
            "Notification publish failed: topic does not exist"
        );
    }
}
