mod client;
mod instances;
mod tags;

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::StopperError;

pub use client::Ec2Client;

/// Lifecycle state reported by DescribeInstances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceState {
    Pending,
    Running,
    ShuttingDown,
    Stopping,
    Stopped,
    Terminated,
    Unknown,
}

impl InstanceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::ShuttingDown => "shutting-down",
            Self::Stopping => "stopping",
            Self::Stopped => "stopped",
            Self::Terminated => "terminated",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for InstanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&aws_sdk_ec2::types::InstanceStateName> for InstanceState {
    fn from(name: &aws_sdk_ec2::types::InstanceStateName) -> Self {
        use aws_sdk_ec2::types::InstanceStateName;

        match name {
            InstanceStateName::Pending => Self::Pending,
            InstanceStateName::Running => Self::Running,
            InstanceStateName::ShuttingDown => Self::ShuttingDown,
            InstanceStateName::Stopping => Self::Stopping,
            InstanceStateName::Stopped => Self::Stopped,
            InstanceStateName::Terminated => Self::Terminated,
            _ => Self::Unknown,
        }
    }
}

/// Snapshot of one instance as returned by the inventory for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceRecord {
    pub instance_id: String,
    pub state: InstanceState,
    pub tags: BTreeMap<String, String>,
}

impl InstanceRecord {
    pub fn new(instance_id: impl Into<String>, state: InstanceState) -> Self {
        Self {
            instance_id: instance_id.into(),
            state,
            tags: BTreeMap::new(),
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.entry(key.into()).or_insert_with(|| value.into());
        self
    }

    /// Value of the `Name` tag, used for log context only.
    pub fn name(&self) -> Option<&str> {
        self.tags.get(tags::TAG_NAME).map(String::as_str)
    }
}

/// Compute inventory the stopper works against.
#[async_trait]
pub trait InstanceInventory: Send + Sync {
    /// All instances currently in the running state, flattened across reservations.
    async fn fetch_running_instances(&self) -> Result<Vec<InstanceRecord>, StopperError>;

    /// Issues one batched stop for `instance_ids`.
    async fn stop_instances(&self, instance_ids: &[String]) -> Result<(), StopperError>;
}
