use async_trait::async_trait;
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::operation::describe_instances::DescribeInstancesOutput;
use aws_sdk_ec2::types::{Filter, Instance, InstanceStateChange};
use tracing::{debug, info, warn};

use super::tags::tags_to_map;
use super::{Ec2Client, InstanceInventory, InstanceRecord, InstanceState};
use crate::error::StopperError;

const OP_DESCRIBE_INSTANCES: &str = "DescribeInstances";
const OP_STOP_INSTANCES: &str = "StopInstances";
const FILTER_INSTANCE_STATE: &str = "instance-state-name";
const STATE_RUNNING: &str = "running";

impl Ec2Client {
    pub async fn describe_running_instances(&self) -> Result<Vec<InstanceRecord>, StopperError> {
        debug!(
            region = %self.region,
            filter = FILTER_INSTANCE_STATE,
            filter_value = STATE_RUNNING,
            "Sending DescribeInstances API request"
        );

        let pages: Vec<DescribeInstancesOutput> = self
            .client
            .describe_instances()
            .filters(
                Filter::builder()
                    .name(FILTER_INSTANCE_STATE)
                    .values(STATE_RUNNING)
                    .build(),
            )
            .into_paginator()
            .send()
            .try_collect()
            .await
            .map_err(|e| {
                StopperError::remote(OP_DESCRIBE_INSTANCES, DisplayErrorContext(&e).to_string())
            })?;

        let instances = Self::flatten_reservations(&pages);

        info!(
            region = %self.region,
            pages = pages.len(),
            running_instances = instances.len(),
            "Fetched running EC2 instances"
        );

        Ok(instances)
    }

    fn flatten_reservations(pages: &[DescribeInstancesOutput]) -> Vec<InstanceRecord> {
        pages
            .iter()
            .flat_map(|page| page.reservations())
            .flat_map(|reservation| reservation.instances())
            .filter_map(Self::to_record)
            .collect()
    }

    fn to_record(instance: &Instance) -> Option<InstanceRecord> {
        let Some(instance_id) = instance.instance_id() else {
            warn!("Skipping instance without an instance ID in DescribeInstances response");
            return None;
        };

        let state = instance
            .state()
            .and_then(|s| s.name())
            .map(InstanceState::from)
            .unwrap_or(InstanceState::Unknown);

        debug!(
            instance_id = %instance_id,
            state = %state,
            tag_count = instance.tags().len(),
            "Parsed instance from DescribeInstances response"
        );

        Some(InstanceRecord {
            instance_id: instance_id.to_string(),
            state,
            tags: tags_to_map(instance_id, instance.tags()),
        })
    }

    pub async fn stop(&self, instance_ids: &[String]) -> Result<(), StopperError> {
        if instance_ids.is_empty() {
            debug!("No instance IDs given, skipping StopInstances request");
            return Ok(());
        }

        info!(
            instance_ids = ?instance_ids,
            instance_count = instance_ids.len(),
            region = %self.region,
            api_action = OP_STOP_INSTANCES,
            "Sending stop request to AWS EC2 API"
        );

        let response = self
            .client
            .stop_instances()
            .set_instance_ids(Some(instance_ids.to_vec()))
            .send()
            .await
            .map_err(|e| {
                StopperError::remote(OP_STOP_INSTANCES, DisplayErrorContext(&e).to_string())
            })?;

        for change in response.stopping_instances() {
            Self::log_state_change(change);
        }

        Ok(())
    }

    fn log_state_change(change: &InstanceStateChange) {
        let state_of = |state: Option<&aws_sdk_ec2::types::InstanceState>| {
            state
                .and_then(|s| s.name())
                .map(InstanceState::from)
                .unwrap_or(InstanceState::Unknown)
        };

        info!(
            instance_id = %change.instance_id().unwrap_or("unknown"),
            previous_state = %state_of(change.previous_state()),
            current_state = %state_of(change.current_state()),
            "Instance state transition"
        );
    }
}

#[async_trait]
impl InstanceInventory for Ec2Client {
    async fn fetch_running_instances(&self) -> Result<Vec<InstanceRecord>, StopperError> {
        self.describe_running_instances().await
    }

    async fn stop_instances(&self, instance_ids: &[String]) -> Result<(), StopperError> {
        self.stop(instance_ids).await
    }
}
