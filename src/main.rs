use anyhow::anyhow;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod sampler;

use config::{Args, Config};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from(Args::parse());

    let (stop_tx, stop_rx) = flume::bounded(1);

    ctrlc::set_handler(move || {
        info!("received ctrl+c, exiting");
        let _ = stop_tx.try_send(());
    })?;

    let (reading_tx, reading_rx) = flume::bounded(16);

    let sampler_join = sampler::spawn_thread(config, stop_rx, reading_tx);

    for reading in reading_rx.iter() {
        info!("reading {}: {:.2} °C", reading.index, reading.celsius);
    }

    sampler_join
        .join()
        .map_err(|_| anyhow!("sampler thread panicked"))??;

    info!("exit");

    Ok(())
}
