use clap::Parser;
use metrics_exporter_statsd::StatsdBuilder;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use jokes_gateway::config::{Config, MetricsConfig};

#[derive(Parser)]
#[command(about = "HTTP gateway in front of the chucknorris.io joke API")]
struct Cli {
    /// Path to the YAML config file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let config = match Config::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            process::exit(1);
        }
    };

    // Sentry wants to be initialized before the async runtime starts.
    let _sentry_guard = config.logging.as_ref().map(|logging| {
        sentry::init((
            logging.sentry_dsn.clone(),
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Some(metrics_config) = &config.metrics {
        install_statsd_recorder(metrics_config);
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start runtime: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(jokes_gateway::run(config)) {
        eprintln!("Gateway error: {e}");
        process::exit(1);
    }
}

fn install_statsd_recorder(config: &MetricsConfig) {
    let recorder = match StatsdBuilder::from(&config.statsd_host, config.statsd_port)
        .build(Some("jokes_gateway"))
    {
        Ok(recorder) => recorder,
        Err(e) => {
            eprintln!("Failed to build statsd recorder: {e}");
            process::exit(1);
        }
    };

    if metrics::set_global_recorder(recorder).is_err() {
        eprintln!("Failed to install metrics recorder");
        process::exit(1);
    }
}
