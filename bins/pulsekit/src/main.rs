//! Pulsekit CLI
//!
//! Inspection and tooling commands over the Pulsekit libraries: resolve
//! backend configuration per environment, load and summarize CSV exports,
//! generate mock readings, and manage the local snapshot store.

mod logging;

use anyhow::Result;
use chrono::{TimeZone, Utc};
use clap::{Parser, Subcommand};
use pulsekit_backend::{config_for_environment, load_config, Environment, RemoteBackendClient, RemoteBackendConfig};
use pulsekit_cli::output::{elide_secret, format_count, Status};
use pulsekit_core::asset::DirAssetReader;
use pulsekit_core::error::exit_codes;
use pulsekit_data::{load_readings_csv, merge_and_sort, MockReadingGenerator, WatchReading};
use pulsekit_store::SnapshotStore;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pulsekit")]
#[command(about = "Inspection and tooling for Pulsekit health data")]
#[command(version)]
struct Cli {
    /// Deployment environment
    #[arg(short, long, global = true, env = "PULSEKIT_ENV", default_value = "default")]
    env: Environment,

    /// Directory holding bundled assets
    #[arg(long, global = true, default_value = "assets")]
    assets_dir: PathBuf,

    /// Snapshot store directory (defaults to the platform data dir)
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Backend configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Health-reading data
    Data {
        #[command(subcommand)]
        action: DataAction,
    },

    /// Local snapshot store
    Snapshot {
        #[command(subcommand)]
        action: SnapshotAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Resolve and print the effective configuration for the environment
    Show,
    /// Strictly validate one configuration asset
    Check {
        /// Asset name, e.g. google-services-dev.json
        asset: String,
    },
}

#[derive(Subcommand)]
enum DataAction {
    /// Load a CSV asset and print summary statistics
    Load {
        /// CSV asset name
        file: String,
        /// Merge the local snapshot history into the summary
        #[arg(long)]
        with_snapshot: bool,
    },
    /// Generate mock readings
    Mock {
        /// Number of readings
        #[arg(long, default_value_t = 10)]
        count: usize,
        /// Write a CSV file instead of printing JSON
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum SnapshotAction {
    /// Print the stored history
    Show,
    /// Append one reading to the stored history
    Append {
        /// Heart rate, bpm
        #[arg(long)]
        heart_rate: u32,
        /// Blood oxygen saturation, percent
        #[arg(long)]
        spo2: f32,
        /// Body temperature, °C
        #[arg(long)]
        temperature: f32,
        /// Step count delta
        #[arg(long, default_value_t = 0)]
        steps: u32,
        /// Capture time in epoch milliseconds (defaults to now)
        #[arg(long)]
        timestamp: Option<i64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    logging::init(cli.verbose, cli.quiet)?;

    let assets = DirAssetReader::new(&cli.assets_dir);
    let store = match &cli.store_dir {
        Some(dir) => SnapshotStore::new(dir),
        None => SnapshotStore::default_store(),
    };

    let exit_code = match cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Show => run_config_show(cli.env, &assets),
            ConfigAction::Check { asset } => run_config_check(&asset, &assets),
        },
        Commands::Data { action } => match action {
            DataAction::Load { file, with_snapshot } => {
                run_data_load(&file, &assets, with_snapshot, store)
            }
            DataAction::Mock { count, out } => run_data_mock(count, out.as_deref()),
        },
        Commands::Snapshot { action } => match store {
            Ok(store) => match action {
                SnapshotAction::Show => run_snapshot_show(&store),
                SnapshotAction::Append {
                    heart_rate,
                    spo2,
                    temperature,
                    steps,
                    timestamp,
                } => run_snapshot_append(&store, heart_rate, spo2, temperature, steps, timestamp),
            },
            Err(e) => {
                Status::error(&format!("Snapshot store unavailable: {e}"));
                exit_codes::STORAGE_ERROR
            }
        },
    };

    std::process::exit(exit_code);
}

fn run_config_show(env: Environment, assets: &DirAssetReader) -> i32 {
    let default = RemoteBackendConfig::baked_in();
    let config = config_for_environment(env, assets, &default);
    let is_default = config == default;
    let client = RemoteBackendClient::new(config);

    Status::header(&format!("Backend configuration ({env})"));
    Status::key_value("project_id", client.project_id());
    Status::key_value("application_id", client.config().application_id());
    Status::key_value("storage_bucket", client.config().storage_bucket());
    Status::key_value("api_key", &elide_secret(client.config().api_key()));
    Status::key_value("storage_root", &client.storage_root().to_string());

    if is_default && env != Environment::Default {
        Status::warning("override asset unavailable, using built-in configuration");
    }
    exit_codes::SUCCESS
}

fn run_config_check(asset: &str, assets: &DirAssetReader) -> i32 {
    match load_config(asset, assets) {
        Ok(config) => {
            Status::success(&format!("{asset} is a complete backend configuration"));
            Status::key_value("project_id", config.project_id());
            Status::key_value("storage_bucket", config.storage_bucket());
            exit_codes::SUCCESS
        }
        Err(e) => {
            Status::error(&format!("{asset}: {e}"));
            exit_codes::CONFIG_ERROR
        }
    }
}

fn run_data_load(
    file: &str,
    assets: &DirAssetReader,
    with_snapshot: bool,
    store: pulsekit_core::Result<SnapshotStore>,
) -> i32 {
    let csv_readings = match load_readings_csv(file, assets) {
        Ok(readings) => readings,
        Err(e) => {
            Status::error(&format!("Failed to load {file}: {e}"));
            return exit_codes::DATA_ERROR;
        }
    };

    let readings = if with_snapshot {
        match store {
            Ok(store) => merge_and_sort(csv_readings, store.load()),
            Err(e) => {
                Status::error(&format!("Snapshot store unavailable: {e}"));
                return exit_codes::STORAGE_ERROR;
            }
        }
    } else {
        csv_readings
    };

    print_summary(&readings);
    exit_codes::SUCCESS
}

fn run_data_mock(count: usize, out: Option<&std::path::Path>) -> i32 {
    let mut generator = MockReadingGenerator::new();
    let batch = generator.generate_batch(count);

    match out {
        Some(path) => {
            let mut csv = String::from("timestamp,heart_rate,spo2,temperature,steps\n");
            for r in &batch {
                csv.push_str(&format!(
                    "{},{},{},{},{}\n",
                    r.timestamp_ms, r.heart_rate, r.spo2, r.temperature, r.steps
                ));
            }
            if let Err(e) = std::fs::write(path, csv) {
                Status::error(&format!("Failed to write {}: {e}", path.display()));
                return exit_codes::FAILURE;
            }
            Status::success(&format!(
                "Wrote {} to {}",
                format_count(batch.len(), "mock reading", "mock readings"),
                path.display()
            ));
        }
        None => match serde_json::to_string_pretty(&batch) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                Status::error(&format!("Serialization failed: {e}"));
                return exit_codes::FAILURE;
            }
        },
    }
    exit_codes::SUCCESS
}

fn run_snapshot_show(store: &SnapshotStore) -> i32 {
    let history = store.load();
    if history.is_empty() {
        Status::info("Snapshot history is empty");
        return exit_codes::SUCCESS;
    }

    Status::header(&format!(
        "{} in {}",
        format_count(history.len(), "stored reading", "stored readings"),
        store.dir().display()
    ));
    print_summary(&history);
    exit_codes::SUCCESS
}

fn run_snapshot_append(
    store: &SnapshotStore,
    heart_rate: u32,
    spo2: f32,
    temperature: f32,
    steps: u32,
    timestamp: Option<i64>,
) -> i32 {
    let timestamp_ms = timestamp.unwrap_or_else(|| Utc::now().timestamp_millis());
    let reading = WatchReading::new(timestamp_ms, heart_rate, spo2, temperature, steps);

    if !reading.is_plausible() {
        Status::warning("reading is outside plausible metric ranges");
    }

    match store.append(reading) {
        Ok(()) => {
            Status::success(&format!(
                "Appended reading, history now holds {}",
                format_count(store.load().len(), "entry", "entries")
            ));
            exit_codes::SUCCESS
        }
        Err(e) => {
            Status::error(&format!("Append failed: {e}"));
            exit_codes::STORAGE_ERROR
        }
    }
}

fn print_summary(readings: &[WatchReading]) {
    if readings.is_empty() {
        Status::info("No readings");
        return;
    }

    let count = readings.len();
    let avg_hr = readings.iter().map(|r| f64::from(r.heart_rate)).sum::<f64>() / count as f64;
    let total_steps: u64 = readings.iter().map(|r| u64::from(r.steps)).sum();
    let first = readings.iter().map(|r| r.timestamp_ms).min().unwrap_or(0);
    let last = readings.iter().map(|r| r.timestamp_ms).max().unwrap_or(0);

    Status::key_value("readings", &count.to_string());
    Status::key_value("avg heart rate", &format!("{avg_hr:.1} bpm"));
    Status::key_value("total steps", &total_steps.to_string());
    Status::key_value("from", &format_ts(first));
    Status::key_value("to", &format_ts(last));
}

fn format_ts(timestamp_ms: i64) -> String {
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map_or_else(|| timestamp_ms.to_string(), |dt| dt.to_rfc3339())
}
