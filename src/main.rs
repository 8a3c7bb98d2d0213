use analytics::{AnalysisOutcome, AnalyticsEngine};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use configuration::{LagCriterion, Settings};
use core_types::AnnualPanel;
use data_feed::SourceProvider;
use reporting::{AnalysisReport, PanelSource, tables};
use std::path::PathBuf;

/// Rows shown at each end of the panel preview.
const PREVIEW_ROWS: usize = 5;

/// The main entry point for the Heckscher-Ohlin capital-intensity analysis.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = configuration::load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.overrides.apply(&mut settings);
    settings.validate().context("Invalid command-line overrides")?;

    // Held until exit so buffered file logs are flushed.
    let _log_guard = configuration::init_tracing(&settings.logging).context("Failed to initialise logging")?;
    tracing::debug!(?settings, "Configuration loaded");
    tracing::info!(
        command = cli.command.name(),
        start_year = settings.feed.start_year,
        end_year = settings.feed.resolved_end_year(),
        "Starting heckscher"
    );

    match cli.command {
        Commands::Run => handle_run(&settings).await,
        Commands::Fetch => handle_fetch(&settings).await.map(|_| ()),
        Commands::Analyze(args) => handle_analyze(args, &settings),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Capital deepening, capital-labor ratio and export analysis of US national accounts.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults to an optional ./config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Acquire the raw series, derive the ratios, persist the panel and analyse it.
    Run,
    /// Acquire the raw series, derive the ratios and persist the panel only.
    Fetch,
    /// Analyse a previously persisted panel table.
    Analyze(AnalyzeArgs),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Run => "run",
            Commands::Fetch => "fetch",
            Commands::Analyze(_) => "analyze",
        }
    }
}

#[derive(Args)]
struct AnalyzeArgs {
    /// The panel CSV to analyse (defaults to the configured panel file).
    #[arg(long)]
    input: Option<PathBuf>,
}

/// Command-line values that take precedence over the loaded configuration.
#[derive(Args)]
struct Overrides {
    /// First year of the analysis window.
    #[arg(long, global = true)]
    start_year: Option<i32>,

    /// Last year of the analysis window (defaults to the current year).
    #[arg(long, global = true)]
    end_year: Option<i32>,

    /// Skip the live feed and use the built-in historical table.
    #[arg(long, global = true)]
    offline: bool,

    /// Upper bound on the ADF augmentation lag.
    #[arg(long, global = true)]
    max_lag: Option<usize>,

    /// How the ADF augmentation lag is chosen.
    #[arg(long, global = true, value_enum)]
    lag_criterion: Option<LagCriterion>,

    /// Coverage of the coefficient confidence intervals, e.g. 0.95.
    #[arg(long, global = true)]
    confidence_level: Option<f64>,

    /// Directory the output files are written to.
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Default log filter, e.g. "debug" or "data_feed=debug,info".
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Hide the download progress bar.
    #[arg(long, global = true)]
    no_progress: bool,
}

impl Overrides {
    fn apply(&self, settings: &mut Settings) {
        if let Some(year) = self.start_year {
            settings.feed.start_year = year;
        }
        if let Some(year) = self.end_year {
            settings.feed.end_year = Some(year);
        }
        if self.offline {
            settings.feed.offline = true;
        }
        if self.no_progress {
            settings.feed.show_progress = false;
        }
        if let Some(lag) = self.max_lag {
            settings.analysis.stationarity.max_lag = Some(lag);
        }
        if let Some(criterion) = self.lag_criterion {
            settings.analysis.stationarity.lag_criterion = criterion;
        }
        if let Some(level) = self.confidence_level {
            settings.analysis.regression.confidence_level = level;
        }
        if let Some(dir) = &self.output_dir {
            settings.output.dir = dir.clone();
        }
        if let Some(level) = &self.log_level {
            settings.logging.level = level.clone();
        }
    }
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Source Provider → Derivation Engine → persisted panel.
async fn handle_fetch(settings: &Settings) -> anyhow::Result<(AnnualPanel, PanelSource)> {
    let provider = SourceProvider::from_config(&settings.feed).context("Failed to build the feed client")?;
    let years = settings.feed.year_range();
    let sourced = provider
        .load(years.clone())
        .await
        .with_context(|| format!("Invalid year range {}-{}", years.start(), years.end()))?;

    let panel = derivation::derive_panel(sourced.panel);

    let panel_path = settings.output.panel_path();
    reporting::write_panel_file(&panel, &panel_path)
        .with_context(|| format!("Failed to write the panel to {}", panel_path.display()))?;

    println!("{}", tables::panel_table(&panel, PREVIEW_ROWS));
    Ok((panel, sourced.origin.into()))
}

async fn handle_run(settings: &Settings) -> anyhow::Result<()> {
    let (panel, source) = handle_fetch(settings).await?;
    analyze_and_report(&panel, source, settings)
}

fn handle_analyze(args: AnalyzeArgs, settings: &Settings) -> anyhow::Result<()> {
    let path = args.input.unwrap_or_else(|| settings.output.panel_path());
    let panel = reporting::read_panel_file(&path).with_context(|| format!("Failed to read the panel from {}", path.display()))?;
    analyze_and_report(&panel, PanelSource::File { path }, settings)
}

/// Runs the analyses, prints them and writes the fit data and the JSON report.
fn analyze_and_report(panel: &AnnualPanel, source: PanelSource, settings: &Settings) -> anyhow::Result<()> {
    let engine = AnalyticsEngine::new(settings.analysis.clone());
    let outcome = engine.analyze(panel);
    if outcome.failures.is_empty() {
        tracing::info!("All analyses completed");
    } else {
        tracing::warn!(failed = outcome.failures.len(), "Some analyses failed; see the report for details");
    }

    print_outcome(&outcome);

    if let Some(summary) = &outcome.regression {
        let fit_path = settings.output.fit_path();
        reporting::write_fit_file(summary, &fit_path)
            .with_context(|| format!("Failed to write the regression fit to {}", fit_path.display()))?;
    }

    let report = AnalysisReport::new(source, panel, outcome);
    let report_path = settings.output.report_path();
    report
        .write_file(&report_path)
        .with_context(|| format!("Failed to write the report to {}", report_path.display()))?;

    Ok(())
}

fn print_outcome(outcome: &AnalysisOutcome) {
    if let Some(summary) = &outcome.regression {
        let (coefficients, fit) = tables::regression_tables(summary);
        println!("\nOLS: {} ~ const + {}", summary.dependent, summary.independent);
        println!("{coefficients}");
        println!("{fit}");
    }
    if !outcome.stationarity.is_empty() {
        println!("\nAugmented Dickey-Fuller tests (stationary iff p < {})", analytics::SIGNIFICANCE_LEVEL);
        println!("{}", tables::stationarity_table(&outcome.stationarity));
    }
    if !outcome.descriptive.is_empty() {
        println!("\nDescriptive statistics");
        println!("{}", tables::descriptive_table(&outcome.descriptive));
    }
    if !outcome.failures.is_empty() {
        println!("\nFailed analyses");
        println!("{}", tables::failures_table(&outcome.failures));
    }
}
