use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::Local;
use clap::{Parser, Subcommand};

mod auth;
mod filter;
mod models;
mod report;
mod stats;
mod store;

use filter::{FilterSpec, Period};
use models::{
    Category, CategorySummary, ShotDetail, ShotEntry, ShotRecord, ValueShare, DEFAULT_SESSION,
    RATING_MAX, RATING_MIN,
};
use store::ShotLog;

#[derive(Parser)]
#[command(name = "vvl-shot-tracker")]
#[command(about = "Practice shot logging and performance reports for V.V.L. athletes", long_about = None)]
struct Cli {
    /// Athlete name (normalized to uppercase)
    #[arg(long)]
    user: String,
    /// Shared access password; falls back to the VVL_PASSWORD environment variable
    #[arg(long)]
    password: Option<String>,
    /// Label for the current practice sitting
    #[arg(long, default_value = DEFAULT_SESSION)]
    session: String,
    /// Path to the shot log
    #[arg(long, default_value = "shot_log.csv")]
    log_file: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the shot log with its header row
    Init,
    /// Load realistic sample data
    Seed,
    /// Import shots from a CSV file with the standard columns
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Record one practice shot
    Log {
        #[arg(long, value_enum)]
        category: Category,
        /// Club used (start distance for putting)
        #[arg(long)]
        club: String,
        /// Strike quality
        #[arg(long)]
        impact: String,
        /// Ball flight (lie for short game, start line for putting)
        #[arg(long)]
        trajectory: String,
        /// Length control (distance control for short game, pace for putting)
        #[arg(long)]
        length: String,
        /// Result distance from the target
        #[arg(long)]
        proximity: String,
        /// Miss direction (long game only)
        #[arg(long)]
        error_dir: Option<String>,
        /// Execution quality score
        #[arg(long)]
        rating: i32,
    },
    /// Show period-filtered performance statistics
    Stats {
        #[arg(long, value_enum, default_value_t = Period::All)]
        period: Period,
        /// Limit the statistics to one category
        #[arg(long, value_enum)]
        category: Option<Category>,
        /// Emit the summaries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a markdown performance report
    Report {
        #[arg(long, value_enum, default_value_t = Period::All)]
        period: Period,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let password = cli
        .password
        .clone()
        .or_else(|| std::env::var("VVL_PASSWORD").ok())
        .context("provide --password or set VVL_PASSWORD")?;
    let session = auth::authenticate(&cli.user, &password, &cli.session)?;
    let log = ShotLog::new(&cli.log_file);

    match cli.command {
        Commands::Init => {
            if log.init()? {
                println!("Shot log created at {}.", cli.log_file.display());
            } else {
                println!("Shot log already present at {}.", cli.log_file.display());
            }
        }
        Commands::Seed => {
            let inserted = log.seed(&session.user, &session.session_name)?;
            println!("Inserted {inserted} sample shots for {}.", session.user);
        }
        Commands::Import { csv } => {
            let (inserted, skipped) = log.import(&csv)?;
            println!(
                "Imported {inserted} shots from {} ({skipped} rows skipped).",
                csv.display()
            );
        }
        Commands::Log {
            category,
            club,
            impact,
            trajectory,
            length,
            proximity,
            error_dir,
            rating,
        } => {
            if !(RATING_MIN..=RATING_MAX).contains(&rating) {
                bail!("rating must be between {RATING_MIN} and {RATING_MAX}");
            }
            let entry = ShotEntry {
                club,
                impact,
                trajectory,
                length,
                proximity,
                error_dir,
            };
            let detail = ShotDetail::from_entry(category, &entry)?;
            let now = Local::now();
            let record = ShotRecord {
                user: session.user.clone(),
                date: Some(now.date_naive()),
                session_name: session.session_name.clone(),
                time: now.format("%H:%M").to_string(),
                rating: Some(rating),
                detail,
            };
            log.append(&record)?;
            println!("Shot recorded for {} in {}.", session.user, category.label());
        }
        Commands::Stats {
            period,
            category,
            json,
        } => {
            let today = Local::now().date_naive();
            let records = log.read_all();
            let spec = FilterSpec {
                category,
                ..FilterSpec::for_period(&session, period, today)
            };
            let filtered = filter::filter(&records, &spec);
            let summaries = match category {
                Some(category) => vec![stats::summarize_category(category, &filtered)],
                None => stats::summarize_all(&filtered),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                print_summaries(&session.user, period, &summaries);
            }
        }
        Commands::Report { period, out } => {
            let today = Local::now().date_naive();
            let records = log.read_all();
            let spec = FilterSpec::for_period(&session, period, today);
            let filtered = filter::filter(&records, &spec);
            let document = report::build_report(&session, period.label(), today, &filtered);
            std::fs::write(&out, document)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

fn print_summaries(user: &str, period: Period, summaries: &[CategorySummary]) {
    println!("Practice statistics for {} ({})", user, period.label());
    for summary in summaries {
        println!();
        println!("{}:", summary.category);
        if summary.shots == 0 {
            println!("  no shots in this period");
            continue;
        }
        match summary.mean_rating {
            Some(mean) => println!(
                "  {} shots, mean rating {:.2} (std dev {:.2}), top-rated {:.1}%",
                summary.shots, mean, summary.std_dev, summary.top_rating_share
            ),
            None => println!("  {} shots, no usable ratings", summary.shots),
        }
        println!("  ratings: {}", spread_line(&summary.ratings));
        if !summary.impacts.is_empty() {
            println!("  impacts: {}", spread_line(&summary.impacts));
        }
    }
}

fn spread_line(values: &[ValueShare]) -> String {
    values
        .iter()
        .map(|entry| format!("{}: {} ({:.1}%)", entry.value, entry.count, entry.share))
        .collect::<Vec<_>>()
        .join(", ")
}
