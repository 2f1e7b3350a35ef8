use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sns::Client;
use aws_sdk_sns::error::DisplayErrorContext;
use tracing::{debug, info};

use crate::error::StopperError;
use crate::notify::Notifier;

pub struct SnsNotifier {
    client: Client,
    topic_arn: String,
}

impl SnsNotifier {
    pub fn new(config: &SdkConfig, topic_arn: impl Into<String>) -> Self {
        Self::from_sdk_client(Client::new(config), topic_arn)
    }

    pub fn from_sdk_client(client: Client, topic_arn: impl Into<String>) -> Self {
        Self {
            client,
            topic_arn: topic_arn.into(),
        }
    }

    pub fn topic_arn(&self) -> &str {
        &self.topic_arn
    }
}

#[async_trait]
impl Notifier for SnsNotifier {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), StopperError> {
        debug!(
            topic_arn = %self.topic_arn,
            subject = %subject,
            "Publishing notification to SNS"
        );

        let response = self
            .client
            .publish()
            .topic_arn(&self.topic_arn)
            .subject(subject)
            .message(message)
            .send()
            .await
            .map_err(|e| StopperError::notification(DisplayErrorContext(&e).to_string()))?;

        info!(
            topic_arn = %self.topic_arn,
            subject = %subject,
            message_id = %response.message_id().unwrap_or("unknown"),
            "Notification published"
        );

        Ok(())
    }

    fn name(&self) -> &str {
        "sns"
    }
}
