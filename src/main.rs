use pharmacy_dashboard::config::{DashboardConfig, OutputFormat};
use pharmacy_dashboard::dataset;
use pharmacy_dashboard::output;
use pharmacy_dashboard::report::{definition, ReportId};
use pharmacy_dashboard::ReportResolver;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pharmacy-dashboard")]
#[command(about = "E-commerce Pharmacy Dashboard reports")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available reports
    List,
    /// Resolve a report and print its chart-ready tables
    Show {
        /// Report name as shown by `list`
        report: String,

        /// Dataset file: Excel workbook, CSV or Parquet (or set DASHBOARD_DATA)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Output format (or set DASHBOARD_OUTPUT)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Group rows with null keys instead of dropping them
        #[arg(long)]
        keep_null_keys: bool,
    },
    /// Check that a dataset has every column the reports read
    Check {
        /// Dataset file: Excel workbook, CSV or Parquet (or set DASHBOARD_DATA)
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Logs go to stderr so JSON output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = DashboardConfig::from_env().context("Invalid dashboard configuration")?;

    match args.command {
        Commands::List => {
            list_reports();
            Ok(())
        }
        Commands::Show {
            report,
            data,
            format,
            keep_null_keys,
        } => {
            if let Some(path) = data {
                config.data_path = path;
            }
            if let Some(format) = format {
                config.output = format;
            }
            if keep_null_keys {
                config.drop_null_keys = false;
            }
            show_report(&report, &config)
        }
        Commands::Check { data } => {
            if let Some(path) = data {
                config.data_path = path;
            }
            check_dataset(&config)
        }
    }
}

fn list_reports() {
    for id in ReportId::ALL {
        let panels = definition(id).map(|d| d.panels.len()).unwrap_or(0);
        println!("{:<45} {} panel(s)", id.name(), panels);
    }
}

fn show_report(report: &str, config: &DashboardConfig) -> Result<()> {
    let id: ReportId = report.parse()?;

    info!("Loading dataset from {:?}", config.data_path);
    let table = dataset::load(&config.data_path)
        .with_context(|| format!("Failed to load {}", config.data_path.display()))?;

    let resolver = ReportResolver::with_policy(config.grouping_policy());
    let panels = resolver
        .resolve_id(id, &table)
        .with_context(|| format!("Failed to resolve report '{}'", id))?;
    info!("Resolved '{}' into {} panel(s)", id, panels.len());

    match config.output {
        OutputFormat::Table => println!("{}", output::render_text(&panels)),
        OutputFormat::Json => {
            let value = output::render_json(&panels)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    Ok(())
}

fn check_dataset(config: &DashboardConfig) -> Result<()> {
    let table = dataset::load(&config.data_path)
        .with_context(|| format!("Failed to load {}", config.data_path.display()))?;

    let missing = dataset::missing_columns(&table);
    if missing.is_empty() {
        println!(
            "{}: {} rows, all {} required columns present",
            config.data_path.display(),
            table.height(),
            dataset::REQUIRED_COLUMNS.len()
        );
        return Ok(());
    }

    for column in &missing {
        warn!("Missing column: {}", column);
    }
    anyhow::bail!(
        "{} is missing {} required column(s): {}",
        config.data_path.display(),
        missing.len(),
        missing.join(", ")
    )
}
