use tracing::{debug, error, info, warn};

use crate::ec2::{InstanceInventory, InstanceRecord};
use crate::error::StopperError;
use crate::exclusion::ExclusionRule;
use crate::notify::Notifier;
use crate::types::RunOutcome;

pub const NOTIFY_SUBJECT: &str = "EC2 Stop Notification";
pub const ERROR_SUBJECT: &str = "EC2 Stop Lambda Error";
pub const NO_ELIGIBLE_MESSAGE: &str = "No eligible instances to stop.";

/// Drives one fetch, filter, stop and notify cycle.
pub struct InstanceStopper {
    inventory: Box<dyn InstanceInventory>,
    notifier: Option<Box<dyn Notifier>>,
    rule: ExclusionRule,
    dry_run: bool,
}

impl InstanceStopper {
    pub fn new(inventory: Box<dyn InstanceInventory>, rule: ExclusionRule) -> Self {
        Self {
            inventory,
            notifier: None,
            rule,
            dry_run: false,
        }
    }

    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Stops every running instance not exempted by the exclusion rule.
    ///
    /// Notification failures are logged and never change the result. Inventory and stop
    /// failures trigger one error notification and are then returned to the caller.
    pub async fn run(&self) -> Result<RunOutcome, StopperError> {
        match self.stop_eligible().await {
            Ok(outcome) => {
                self.notify(NOTIFY_SUBJECT, &outcome.message).await;
                Ok(outcome)
            }
            Err(e) => {
                error!(
                    error = %e,
                    error_detail = ?e,
                    "EC2 stop run failed"
                );
                self.notify_failure(&e).await;
                Err(e)
            }
        }
    }

    async fn stop_eligible(&self) -> Result<RunOutcome, StopperError> {
        let instances = self.inventory.fetch_running_instances().await?;
        let total_running = instances.len();

        let (excluded, eligible): (Vec<InstanceRecord>, Vec<InstanceRecord>) = instances
            .into_iter()
            .partition(|instance| self.rule.is_excluded(&instance.tags));

        for instance in &excluded {
            info!(
                instance_id = %instance.instance_id,
                instance_name = %instance.name().unwrap_or("N/A"),
                exclude_tag_key = %self.rule.key(),
                exclude_tag_value = %instance.tags.get(self.rule.key()).map(String::as_str).unwrap_or(""),
                "Skipping instance due to tag exclusion"
            );
        }

        let to_stop: Vec<String> = eligible.into_iter().map(|i| i.instance_id).collect();

        info!(
            total_running = total_running,
            excluded_count = excluded.len(),
            eligible_count = to_stop.len(),
            "Exclusion filter applied"
        );

        let message = if to_stop.is_empty() {
            info!("{}", NO_ELIGIBLE_MESSAGE);
            NO_ELIGIBLE_MESSAGE.to_string()
        } else if self.dry_run {
            warn!(
                instance_ids = ?to_stop,
                action = "stop",
                "DRY RUN: Would stop instances (no action taken)"
            );
            format!(
                "Dry run, would stop EC2 instances: {}",
                format_instance_ids(&to_stop)
            )
        } else {
            info!(instance_ids = ?to_stop, "Stopping instances");
            self.inventory.stop_instances(&to_stop).await?;
            info!(
                instance_count = to_stop.len(),
                action = "stop",
                result = "success",
                "Successfully requested instance stop"
            );
            format!("Stopped EC2 instances: {}", format_instance_ids(&to_stop))
        };

        Ok(RunOutcome {
            eligible_instances: to_stop,
            excluded_instances: excluded.into_iter().map(|i| i.instance_id).collect(),
            dry_run: self.dry_run,
            ..RunOutcome::ok(message)
        })
    }

    async fn notify(&self, subject: &str, message: &str) {
        let Some(notifier) = &self.notifier else {
            debug!("No notification target configured, skipping publish");
            return;
        };

        if let Err(e) = notifier.publish(subject, message).await {
            error!(
                notifier = notifier.name(),
                subject = %subject,
                error = %e,
                "Failed to publish notification"
            );
        }
    }

    async fn notify_failure(&self, failure: &StopperError) {
        let Some(notifier) = &self.notifier else {
            return;
        };

        if let Err(e) = notifier.publish(ERROR_SUBJECT, &failure.to_string()).await {
            warn!(
                notifier = notifier.name(),
                error = %e,
                "Failed to publish error notification"
            );
        }
    }
}

/// Renders identifiers as `['i-1', 'i-2']`.
pub fn format_instance_ids(instance_ids: &[String]) -> String {
    let quoted: Vec<String> = instance_ids.iter().map(|id| format!("'{}'", id)).collect();
    format!("[{}]", quoted.join(", "))
}
