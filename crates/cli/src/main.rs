//! # attendify
//!
//! Command-line interface for attendance anomaly detection.

use std::fs::File;
use std::path::{Path, PathBuf};

use attendance::{
    analyze_roster, flag_volume_anomalies, notification_message, todays_anomalies,
    FlaggedRecord, ReviewQueue, RiskLevel, RiskProfileAnalyzer, RosterFilter, StudentRiskProfile,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use detector_facade::{coerce_series, SeriesDetector, ZScoreConfig, ZScoreDetector};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod input;

type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name = "attendify")]
#[command(about = "Attendance anomaly detection CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flag outliers in a single series
    Detect {
        /// Input file (CSV or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Standard deviations beyond which a sample is flagged
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Column name or index holding the series
        #[arg(short, long)]
        column: Option<String>,

        /// Output file (optional, stdout otherwise)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Flag irregular weeks in student risk profiles
    Profile {
        /// JSON array of risk profiles
        #[arg(short, long)]
        input: PathBuf,

        /// Standard deviations beyond which a week is flagged
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Only analyse students whose name or id contains this text
        #[arg(short, long)]
        student: Option<String>,

        /// Only analyse this risk level (low, medium, high)
        #[arg(short, long)]
        risk_level: Option<RiskLevel>,

        /// Output file (optional, stdout otherwise)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Summarise flagged records awaiting review
    Review {
        /// JSON array of flagged records
        #[arg(short, long)]
        input: PathBuf,

        /// Filter by student name or id
        #[arg(short, long, default_value = "")]
        search: String,

        /// Filter by reason ("all" for every reason)
        #[arg(long)]
        reason: Option<String>,

        /// Day used for the today notification (YYYY-MM-DD, defaults to the local date)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Standard deviations beyond which a day's flag volume is unusual
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Output file (optional, stdout otherwise)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Detector configuration from the environment, overridden by the flag.
fn resolve_config(threshold: Option<f64>) -> CliResult<ZScoreConfig> {
    let mut config = ZScoreConfig::from_env().map_err(|e| e.to_string())?;
    if let Some(threshold) = threshold {
        config.threshold = threshold;
        config.validate().map_err(|e| e.to_string())?;
    }
    Ok(config)
}

/// Write results to file or stdout
fn write_results(json: &serde_json::Value, output: Option<&Path>) -> CliResult<()> {
    match output {
        Some(path) => {
            let mut file =
                File::create(path).map_err(|e| format!("Failed to create output: {}", e))?;
            serde_json::to_writer_pretty(&mut file, json)
                .map_err(|e| format!("Failed to write JSON: {}", e))?;
            info!("results written to {}", path.display());
        }
        None => {
            let text = serde_json::to_string_pretty(json)
                .map_err(|e| format!("Failed to encode JSON: {}", e))?;
            println!("{}", text);
        }
    }
    Ok(())
}

/// Run detect command
fn run_detect(
    input: PathBuf,
    threshold: Option<f64>,
    column: Option<String>,
    output: Option<PathBuf>,
) -> CliResult<()> {
    let config = resolve_config(threshold)?;
    let values = input::load_series(&input, column.as_deref())?;
    info!(
        "loaded {} samples from {:?}",
        values.len(),
        input.file_name().unwrap_or_default()
    );

    let series = coerce_series(&values).map_err(|e| e.to_string())?;
    let detector = ZScoreDetector::from_config(config).map_err(|e| e.to_string())?;
    let report = detector.detect(&series).map_err(|e| e.to_string())?;

    info!(
        threshold = report.threshold,
        anomalies = report.anomaly_count(),
        "detection complete"
    );

    let json = serde_json::json!({
        "threshold": report.threshold,
        "mean": report.mean,
        "std_dev": report.std_dev,
        "total_points": report.len(),
        "anomaly_count": report.anomaly_count(),
        "anomaly_indices": report.anomaly_indices(),
        "reports": report.reports,
    });
    write_results(&json, output.as_deref())
}

/// Run profile command
fn run_profile(
    input: PathBuf,
    threshold: Option<f64>,
    student: Option<String>,
    risk_level: Option<RiskLevel>,
    output: Option<PathBuf>,
) -> CliResult<()> {
    let analyzer =
        RiskProfileAnalyzer::from_config(resolve_config(threshold)?).map_err(|e| e.to_string())?;
    let profiles: Vec<StudentRiskProfile> = input::load_json_list(&input)?;
    info!("loaded {} risk profiles", profiles.len());

    let filter = RosterFilter {
        risk_level,
        search: student,
    };
    let entries = analyze_roster(&analyzer, &profiles, &filter);

    let students: Vec<serde_json::Value> = entries
        .into_iter()
        .map(|entry| match entry.result {
            Ok(analysis) => serde_json::json!({
                "student_id": analysis.student_id,
                "name": analysis.name,
                "risk_level": analysis.risk_level,
                "used_fallback": analysis.used_fallback,
                "mean": analysis.detection.mean,
                "std_dev": analysis.detection.std_dev,
                "flagged_weeks": analysis.flagged_weeks,
            }),
            Err(e) => {
                warn!(student_id = %entry.student_id, error = %e, "profile skipped");
                serde_json::json!({
                    "student_id": entry.student_id,
                    "error": e.to_string(),
                })
            }
        })
        .collect();

    let json = serde_json::json!({
        "threshold": analyzer.detector().threshold(),
        "students": students,
    });
    write_results(&json, output.as_deref())
}

/// Run review command
fn run_review(
    input: PathBuf,
    search: String,
    reason: Option<String>,
    today: Option<NaiveDate>,
    threshold: Option<f64>,
    output: Option<PathBuf>,
) -> CliResult<()> {
    let detector =
        ZScoreDetector::from_config(resolve_config(threshold)?).map_err(|e| e.to_string())?;
    let records: Vec<FlaggedRecord> = input::load_json_list(&input)?;
    let queue = ReviewQueue::new(records);

    let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
    let todays = todays_anomalies(queue.records(), today);
    if let Some(message) = notification_message(todays.len()) {
        warn!("{}", message);
    }

    let volume = if queue.records().is_empty() {
        info!("no flagged records, skipping flag volume check");
        Vec::new()
    } else {
        flag_volume_anomalies(&detector, queue.records()).map_err(|e| e.to_string())?
    };

    let json = serde_json::json!({
        "summary": queue.summary(),
        "reasons": queue.reasons(),
        "records": queue.filter(&search, reason.as_deref()),
        "today": {
            "date": today,
            "count": todays.len(),
            "message": notification_message(todays.len()),
        },
        "volume_anomalies": volume,
    });
    write_results(&json, output.as_deref())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "attendify=info,attendance=info".into()),
        )
        .init();
}

fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Detect {
            input,
            threshold,
            column,
            output,
        } => run_detect(input, threshold, column, output),

        Commands::Profile {
            input,
            threshold,
            student,
            risk_level,
            output,
        } => run_profile(input, threshold, student, risk_level, output),

        Commands::Review {
            input,
            search,
            reason,
            today,
            threshold,
            output,
        } => run_review(input, search, reason, today, threshold, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
