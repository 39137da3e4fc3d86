//! Driver Vigilance Pipeline - Main Entry Point

use actuator_link::ActuatorClient;
use alerting::{AlertDispatcher, LogAssistanceBackend, LogAudioBackend};
use anyhow::Context;
use pipeline::{init_logging, replay, PipelineConfig, VigilancePipeline};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== Driver Vigilance Pipeline v{} ===", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let replay_path = args
        .next()
        .context("usage: vigilance-pipeline <landmarks.jsonl> [config]")?;
    let config_path = args.next().unwrap_or_else(|| "vigilance".to_string());

    let config = PipelineConfig::load(&config_path)
        .with_context(|| format!("loading configuration from {config_path}"))?;

    let actuator = match &config.actuator.device {
        Some(device) => {
            let mut client = ActuatorClient::connect(device, config.actuator.baud_rate)
                .await
                .with_context(|| format!("opening actuator link on {device}"))?;
            client.set_timeout(std::time::Duration::from_millis(
                config.actuator.write_timeout_ms,
            ));
            client.handshake().await.context("actuator handshake")?;
            client
        }
        None => {
            warn!("no actuator device configured, using mock link");
            ActuatorClient::mock()
        }
    };

    let dispatcher = AlertDispatcher::new(
        Arc::new(LogAudioBackend),
        Arc::new(LogAssistanceBackend),
        config.alarm_asset.clone(),
    );

    let mut vigilance = VigilancePipeline::new(&config, actuator, dispatcher);

    let records = replay::load_records(&replay_path)
        .with_context(|| format!("loading landmark replay from {replay_path}"))?;
    info!(frames = records.len(), "starting frame loop");

    let mut rejected = 0u64;
    for record in &records {
        match record.frame() {
            Ok(Some(frame)) => {
                if let Err(e) = vigilance.process_frame(&frame).await {
                    rejected += 1;
                    warn!(error = %e, "frame rejected");
                }
            }
            Ok(None) => {
                vigilance.idle_tick().await;
            }
            Err(e) => {
                rejected += 1;
                warn!(error = %e, "frame rejected");
            }
        }
    }

    vigilance.shutdown().await;
    info!(
        frames = records.len(),
        rejected,
        link_errors = vigilance.link_errors(),
        "frame loop finished"
    );

    Ok(())
}
