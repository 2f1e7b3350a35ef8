use anyhow::Result;
use std::time::Instant;
use tracing::{error, info, info_span};

use ec2_idle_stopper::aws;
use ec2_idle_stopper::config::Config;
use ec2_idle_stopper::ec2::Ec2Client;
use ec2_idle_stopper::logging;
use ec2_idle_stopper::notify::SnsNotifier;
use ec2_idle_stopper::stopper::InstanceStopper;
use ec2_idle_stopper::types::RunOutcome;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_args();
    logging::init(&config.log_format, &config.log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        commit = env!("GIT_COMMIT"),
        build_date = env!("BUILD_DATE"),
        "EC2 Idle Stopper starting"
    );

    let start_time = Instant::now();

    let sdk_config = aws::load_config(config.region.as_deref()).await;
    let ec2_client = Ec2Client::new(&sdk_config);
    config.display(ec2_client.region());

    let _span = info_span!("ec2_idle_stopper", region = %ec2_client.region()).entered();

    let mut stopper = InstanceStopper::new(Box::new(ec2_client), config.exclusion_rule())
        .with_dry_run(config.dry_run);
    if let Some(topic_arn) = config.notification_target() {
        stopper = stopper.with_notifier(Box::new(SnsNotifier::new(&sdk_config, topic_arn)));
    }

    match stopper.run().await {
        Ok(mut outcome) => {
            let total_time = start_time.elapsed().as_secs_f64();
            outcome.total_execution_seconds = Some(total_time);

            info!(
                status = "success",
                eligible_count = outcome.eligible_instances.len(),
                excluded_count = outcome.excluded_instances.len(),
                total_execution_seconds = total_time,
                "Run completed successfully"
            );

            println!("{}", serde_json::to_string_pretty(&outcome)?);
            Ok(())
        }
        Err(e) => {
            let total_time = start_time.elapsed().as_secs_f64();
            let mut outcome = RunOutcome::error(e.to_string());
            outcome.dry_run = config.dry_run;
            outcome.total_execution_seconds = Some(total_time);

            error!(
                status = "failed",
                error = %e,
                total_execution_seconds = total_time,
                "Run failed"
            );

            println!("{}", serde_json::to_string_pretty(&outcome)?);
            Err(e.into())
        }
    }
}
