use clap::Parser;
use sleeping_barber::cli::Args;
use sleeping_barber::config::ShopConfig;
use sleeping_barber::observer::TracingObserver;
use sleeping_barber::runtime::{setup_tracing, ShopSystem};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let config = ShopConfig::try_from(Args::parse())?;
    info!(?config, "Starting simulation");

    let mut system = ShopSystem::start(config, Arc::new(TracingObserver))?;
    system.run_arrivals().await;
    let report = system.shutdown().await?;

    info!(
        arrivals = report.arrivals,
        served = report.shop.served,
        rejected = report.shop.rejected,
        report = %serde_json::to_string(&report)?,
        "Simulation finished"
    );
    Ok(())
}
