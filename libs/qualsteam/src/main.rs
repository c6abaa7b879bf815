use std::{io::Write, path::PathBuf, process::ExitCode, sync::Arc};

use clap::{Parser, Subcommand, ValueEnum};
use miette::IntoDiagnostic;
use qualsteam::{
    Catalog, Dashboard, DashboardView, Loader, TableCache, ViewState, chart::ChartSpec,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Clone)]
#[command(version, about = "QualSteam forensic trace dashboard", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[clap(long, global = true, help = "Path to a scenario catalog (TOML)")]
    config: Option<PathBuf>,
    #[clap(
        long,
        global = true,
        default_value = ".",
        help = "Directory that relative scenario paths resolve against"
    )]
    root: PathBuf,
    #[clap(
        long,
        global = true,
        value_enum,
        default_value = "info",
        help = "Log level (error, warn, info, debug, trace)"
    )]
    log_level: LogLevel,
}

#[derive(Subcommand, Clone)]
enum Commands {
    #[command(about = "List the configured scenarios")]
    List,
    #[command(about = "Print the header, metrics and chart outline of a scenario")]
    Show(ShowArgs),
    #[command(about = "Write the chart specification of a scenario as JSON")]
    Export(ExportArgs),
}

#[derive(clap::Args, Clone, Debug)]
struct ShowArgs {
    #[clap(help = "Scenario name, e.g. \"Scenario 1\"")]
    scenario: String,
}

#[derive(clap::Args, Clone, Debug)]
struct ExportArgs {
    #[clap(help = "Scenario name, e.g. \"Scenario 1\"")]
    scenario: String,
    #[clap(long, short, help = "Output file (defaults to stdout)")]
    output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

fn main() -> miette::Result<ExitCode> {
    let args = Cli::parse();
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::builder().from_env_lossy()
    } else {
        EnvFilter::builder().parse_lossy(format!("qualsteam={}", args.log_level.as_str()))
    };

    let _ = tracing_subscriber::fmt::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(
            "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        ))
        .try_init();

    let catalog = match &args.config {
        Some(config) => Catalog::from_file(config, &args.root)?,
        None => Catalog::builtin(&args.root),
    };
    info!(scenarios = catalog.scenarios().len(), root = ?args.root, "loaded catalog");
    let dashboard = Dashboard::new(Loader::new(catalog, Arc::new(TableCache::new())));

    match args.command {
        Commands::List => {
            let catalog = dashboard.loader().catalog();
            for scenario in catalog.scenarios() {
                let path = catalog.resolve(&scenario.name)?;
                let status = if path.is_file() { "" } else { " (missing)" };
                println!("{:<16} {}{status}", scenario.name, path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Show(ShowArgs { scenario }) => match dashboard.view(&scenario) {
            ViewState::Ready(view) => {
                print_view(&view);
                Ok(ExitCode::SUCCESS)
            }
            ViewState::Failed(banner) => {
                eprintln!("error: {}", banner.message);
                if let Some(hint) = banner.hint {
                    eprintln!("  help: {hint}");
                }
                Ok(ExitCode::FAILURE)
            }
        },
        Commands::Export(ExportArgs { scenario, output }) => {
            let view = dashboard.try_view(&scenario)?;
            let json = view.chart.to_json_pretty().into_diagnostic()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json).into_diagnostic()?;
                    info!(?path, "wrote chart specification");
                }
                None => {
                    let mut stdout = std::io::stdout().lock();
                    writeln!(stdout, "{json}").into_diagnostic()?;
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_view(view: &DashboardView) {
    println!("QualSteam Forensic Dashboard");
    println!(
        "{} | Date: {} | View: {}",
        view.site,
        view.date_label(),
        view.scenario
    );
    println!();
    for readout in view.metrics.readouts() {
        println!("  {:<22} {readout}", readout.label);
    }
    println!();
    print_outline(&view.chart);
    println!();
    println!("Data source: {}", view.source);
}

fn print_outline(chart: &ChartSpec) {
    println!("{} ({} samples)", chart.title, chart.x_axis.values.len());
    for panel in &chart.panels {
        println!("  [{}] {} ({})", panel.row + 1, panel.title, panel.y_axis.label);
        if panel.series.is_empty() {
            println!("      (no data)");
        }
        for series in &panel.series {
            let fill = if series.style.fill.is_some() {
                ", filled"
            } else {
                ""
            };
            println!(
                "      {:<16} {} {:?}{fill}",
                series.name, series.style.color, series.style.dash
            );
        }
    }
}
