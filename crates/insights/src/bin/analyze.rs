//! Run analyses over the processed games table.
//!
//! Usage: cargo run --bin analyze -- <report|all> [--username <name>]

use clap::{Parser, ValueEnum};
use insights::analyses::{self, Report};
use insights::{logging, store, InsightsConfig};

#[derive(Parser, Debug)]
#[command(about = "Analyze processed chess.com games")]
struct Args {
    /// Which analysis to run
    #[arg(value_enum)]
    report: Which,

    /// chess.com username (defaults to CHESS_USERNAME)
    #[arg(long, short)]
    username: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Which {
    Openings,
    OpeningEffectiveness,
    Outcomes,
    TimeManagement,
    ByDay,
    ByMonth,
    ByTimeOfDay,
    TimeOfDayWinRate,
    Streaks,
    RatingTrends,
    All,
}

impl Which {
    fn reports(self) -> Vec<Report> {
        match self {
            Which::Openings => vec![Report::Openings],
            Which::OpeningEffectiveness => vec![Report::OpeningEffectiveness],
            Which::Outcomes => vec![Report::RatingDifferential],
            Which::TimeManagement => vec![Report::TimeManagement],
            Which::ByDay => vec![Report::GamesByDay],
            Which::ByMonth => vec![Report::GamesByMonth],
            Which::ByTimeOfDay => vec![Report::GamesByTimeOfDay],
            Which::TimeOfDayWinRate => vec![Report::WinRateByTimeOfDay],
            Which::Streaks => vec![Report::Streaks],
            Which::RatingTrends => vec![Report::RatingTrends],
            Which::All => Report::ALL.to_vec(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init_tracing();

    let args = Args::parse();
    let config = InsightsConfig::from_env(args.username)?;
    let records = store::load_nonempty_records(&config.processed_json_path())?;

    analyses::run_reports(&args.report.reports(), &config, &records)?;
    Ok(())
}
