use aws_config::SdkConfig;
use aws_sdk_ec2::Client;
use tracing::info;

use crate::aws;

pub struct Ec2Client {
    pub(super) client: Client,
    pub(super) region: String,
}

impl Ec2Client {
    pub fn new(config: &SdkConfig) -> Self {
        let region = aws::region_name(config);
        let client = Client::new(config);

        info!(
            region = %region,
            "AWS EC2 client initialized successfully"
        );

        Self { client, region }
    }

    /// Wraps an already configured SDK client, e.g. one built against a replay HTTP client.
    pub fn from_sdk_client(client: Client, region: impl Into<String>) -> Self {
        Self {
            client,
            region: region.into(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}
