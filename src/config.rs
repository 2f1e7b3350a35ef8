use clap::Parser;

use crate::exclusion::ExclusionRule;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "ec2-idle-stopper",
    version,
    about = "Stop running EC2 instances, skipping tag-exempt ones, and report via SNS"
)]
pub struct Config {
    /// SNS topic ARN for run notifications (notifications disabled when unset)
    #[arg(long, env = "SNS_TOPIC_ARN")]
    pub sns_topic_arn: Option<String>,

    /// Tag key checked for exemption
    #[arg(long, env = "EXCLUDE_TAG_KEY", default_value = "Environment")]
    pub exclude_tag_key: String,

    /// Comma-separated tag values that exempt an instance (format: prod,staging)
    #[arg(long, env = "EXCLUDE_TAG_VALUES", value_delimiter = ',')]
    pub exclude_tag_values: Vec<String>,

    /// AWS region
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Dry run mode (no actual stop)
    #[arg(long, env = "DRY_RUN", default_value = "false")]
    pub dry_run: bool,

    /// Log format: json or pretty
    #[arg(long, env = "LOG_FORMAT", default_value = "json")]
    pub log_format: String,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn from_args() -> Self {
        Self::parse()
    }

    pub fn exclusion_rule(&self) -> ExclusionRule {
        ExclusionRule::new(&self.exclude_tag_key, &self.exclude_tag_values)
    }

    /// Topic ARN with blank values treated as unset.
    pub fn notification_target(&self) -> Option<&str> {
        self.sns_topic_arn
            .as_deref()
            .map(str::trim)
            .filter(|arn| !arn.is_empty())
    }

    pub fn display(&self, actual_region: &str) {
        let region_info = if let Some(region) = &self.region {
            region.clone()
        } else {
            format!("auto-detect ({})", actual_region)
        };

        let rule = self.exclusion_rule();

        tracing::info!(
            region = %region_info,
            sns_topic_arn = %self.notification_target().unwrap_or("NONE (notifications disabled)"),
            exclude_tag_key = %rule.key(),
            exclude_tag_values = ?rule.values(),
            dry_run = self.dry_run,
            log_format = %self.log_format,
            log_level = %self.log_level,
            "Configuration initialized"
        );

        if self.dry_run {
            tracing::warn!("DRY RUN MODE ENABLED - No instances will be stopped, only logged");
        }

        if rule.excludes_nothing() {
            tracing::warn!(
                region = actual_region,
                exclude_tag_key = %rule.key(),
                "WARNING: No exclusion tag values configured - ALL running instances in this region will be stopped"
            );
        }
    }
}
