pub mod sns;

use async_trait::async_trait;

use crate::error::StopperError;

pub use sns::SnsNotifier;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), StopperError>;
    fn name(&self) -> &str;
}
