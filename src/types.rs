use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Ok,
    Error,
}

/// Result of one invocation, printed as JSON for the scheduler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunOutcome {
    pub status: RunStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub eligible_instances: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excluded_instances: Vec<String>,
    pub dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_execution_seconds: Option<f64>,
}

impl RunOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: RunStatus::Ok,
            message: message.into(),
            eligible_instances: Vec::new(),
            excluded_instances: Vec::new(),
            dry_run: false,
            total_execution_seconds: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: RunStatus::Error,
            ..Self::ok(message)
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == RunStatus::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_outcome_serializes_status_and_message() {
        let json = serde_json::to_value(RunOutcome::ok("No eligible instances to stop.")).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "status": "ok",
                "message": "No eligible instances to stop.",
                "dry_run": false,
            })
        );
    }

    #[test]
    fn test_outcome_lists_eligible_and_excluded_instances() {
        let outcome = RunOutcome {
            eligible_instances: vec!["i-1".to_string()],
            excluded_instances: vec!["i-2".to_string()],
            ..RunOutcome::ok("Stopped EC2 instances: ['i-1']")
        };
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["eligible_instances"], serde_json::json!(["i-1"]));
        assert_eq!(json["excluded_instances"], serde_json::json!(["i-2"]));
        assert!(json.get("stopped_instances").is_none());
    }

    #[test]
    fn test_error_outcome() {
        let outcome = RunOutcome::error("StopInstances failed: throttled");

        assert!(!outcome.is_ok());
        assert_eq!(
            serde_json::to_value(&outcome).unwrap()["status"],
            serde_json::json!("error")
        );
    }
}
