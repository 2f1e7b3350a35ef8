use aws_config::{BehaviorVersion, SdkConfig};
use tracing::{debug, info};

/// Loads the shared AWS SDK configuration used by both the EC2 and SNS clients.
///
/// Region resolution priority:
/// 1. Explicit region from Config (--region CLI arg or AWS_REGION env var)
/// 2. AWS SDK defaults (environment variables, ~/.aws/config, IMDS)
pub async fn load_config(region: Option<&str>) -> SdkConfig {
    match region {
        Some(r) => {
            info!(region = %r, "Using explicit AWS region from configuration");
            aws_config::defaults(BehaviorVersion::latest())
                .region(aws_config::Region::new(r.to_string()))
                .load()
                .await
        }
        None => {
            debug!("Using default AWS region from AWS SDK (environment/credentials file/IMDS)");
            aws_config::load_defaults(BehaviorVersion::latest()).await
        }
    }
}

pub fn region_name(config: &SdkConfig) -> String {
    config
        .region()
        .map(|r| r.as_ref())
        .unwrap_or("unknown")
        .to_string()
}
