//! The individual reports: compute an aggregate, print it, save it as JSON and
//! render its chart.

use std::fmt;

use chess_core::{GameRecord, Outcome, TimeClass};
use tracing::info;

use crate::chart::{
    self, BarChart, BarLayout, LineChart, Series, BLUE, GRAY, GREEN, LIGHT_RED, PALE_GREEN, RED,
};
use crate::config::InsightsConfig;
use crate::error::InsightsError;
use crate::report::{fmt_opt, print_table, save_report};
use crate::stats::{calendar, openings, outcomes, streaks, time_management, trends};

const TOP_OPENINGS: usize = 10;
const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Openings,
    OpeningEffectiveness,
    RatingDifferential,
    TimeManagement,
    GamesByDay,
    GamesByMonth,
    GamesByTimeOfDay,
    WinRateByTimeOfDay,
    Streaks,
    RatingTrends,
}

impl Report {
    pub const ALL: [Report; 10] = [
        Report::Openings,
        Report::OpeningEffectiveness,
        Report::RatingDifferential,
        Report::TimeManagement,
        Report::GamesByDay,
        Report::GamesByMonth,
        Report::GamesByTimeOfDay,
        Report::WinRateByTimeOfDay,
        Report::Streaks,
        Report::RatingTrends,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Report::Openings => "main_opening_stats",
            Report::OpeningEffectiveness => "opening_effectiveness",
            Report::RatingDifferential => "rating_differential_stats",
            Report::TimeManagement => "time_management",
            Report::GamesByDay => "games_by_day_results",
            Report::GamesByMonth => "games_by_month",
            Report::GamesByTimeOfDay => "games_by_time_of_day",
            Report::WinRateByTimeOfDay => "win_rate_by_time_of_day",
            Report::Streaks => "longest_streaks",
            Report::RatingTrends => "rating_trends",
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Output file stem, e.g. `ardil30_main_opening_stats`.
fn stem(config: &InsightsConfig, name: &str) -> String {
    format!("{}_{name}", config.username)
}

fn save_chart(config: &InsightsConfig, name: &str, svg: &str) -> Result<(), InsightsError> {
    let path = config.figures_dir().join(format!("{}.svg", stem(config, name)));
    chart::save_svg(&path, svg)
}

pub fn run_report(report: Report, config: &InsightsConfig, records: &[GameRecord]) -> Result<(), InsightsError> {
    info!(%report, games = records.len(), "Running report");
    match report {
        Report::Openings => opening_win_rates(config, records),
        Report::OpeningEffectiveness => opening_effectiveness(config, records),
        Report::RatingDifferential => rating_differential(config, records),
        Report::TimeManagement => time_management(config, records),
        Report::GamesByDay => games_by_day(config, records),
        Report::GamesByMonth => games_by_month(config, records),
        Report::GamesByTimeOfDay => games_by_time_of_day(config, records),
        Report::WinRateByTimeOfDay => win_rate_by_time_of_day(config, records),
        Report::Streaks => longest_streaks(config, records),
        Report::RatingTrends => rating_trends(config, records),
    }
}

fn opening_win_rates(config: &InsightsConfig, records: &[GameRecord]) -> Result<(), InsightsError> {
    let name = Report::Openings.name();
    let stats = openings::opening_win_rates(records, config.min_opening_games);
    let top: Vec<_> = stats.iter().take(TOP_OPENINGS).collect();

    let rows: Vec<Vec<String>> = top
        .iter()
        .map(|s| vec![s.main_opening.clone(), s.games.to_string(), format!("{:.1}", s.win_rate)])
        .collect();
    print_table("Main Opening Statistics (Top 10)", &["Main Opening", "Games Played", "Win Rate"], &rows);
    save_report(&config.report_data_dir(), &stem(config, name), &stats)?;

    let mut c = BarChart::new("Top 10 Main Openings by Win Rate", "Main Opening", "Win Rate (%)");
    c.categories = top.iter().map(|s| s.main_opening.clone()).collect();
    c.series = vec![Series::new("Win Rate", BLUE, top.iter().map(|s| Some(s.win_rate)).collect())
        .with_annotations(top.iter().map(|s| Some(format!("{} games", s.games))).collect())];
    c.y_max = Some(100.0);
    save_chart(config, name, &chart::render_bar_chart(&c))
}

fn opening_effectiveness(config: &InsightsConfig, records: &[GameRecord]) -> Result<(), InsightsError> {
    let name = Report::OpeningEffectiveness.name();
    let stats = openings::opening_effectiveness(records);
    let top: Vec<_> = stats.iter().take(TOP_OPENINGS).collect();

    let rows: Vec<Vec<String>> = top
        .iter()
        .map(|s| {
            vec![
                s.main_opening.clone(),
                s.games.to_string(),
                format!("{:.1}", s.win_rate),
                format!("{:.1}", s.draw_rate),
                format!("{:.1}", s.loss_rate),
            ]
        })
        .collect();
    print_table(
        "Top 10 Openings by Win/Draw/Loss Rates",
        &["Main Opening", "Games Played", "Win %", "Draw %", "Loss %"],
        &rows,
    );
    save_report(&config.report_data_dir(), &stem(config, name), &stats)?;

    let csv_path = config.report_data_dir().join(format!("{}.csv", stem(config, name)));
    let mut writer = csv::Writer::from_path(&csv_path)?;
    for s in &stats {
        writer.serialize(s)?;
    }
    writer.flush().map_err(|e| InsightsError::io(&csv_path, e))?;
    info!(path = %csv_path.display(), "Opening effectiveness data saved");

    let mut c = BarChart::new("Top 10 Openings by Win/Draw/Loss Rates", "Main Opening", "Percentage (%)");
    c.layout = BarLayout::Stacked;
    c.categories = top.iter().map(|s| s.main_opening.clone()).collect();
    c.series = vec![
        Series::new("Win Rate (%)", GREEN, top.iter().map(|s| Some(s.win_rate)).collect()),
        Series::new("Draw Rate (%)", BLUE, top.iter().map(|s| Some(s.draw_rate)).collect()),
        Series::new("Loss Rate (%)", RED, top.iter().map(|s| Some(s.loss_rate)).collect()),
    ];
    c.y_max = Some(100.0);
    save_chart(config, name, &chart::render_bar_chart(&c))
}

fn rating_differential(config: &InsightsConfig, records: &[GameRecord]) -> Result<(), InsightsError> {
    let name = Report::RatingDifferential.name();
    let stats = outcomes::win_rate_by_rating_differential(records, &config.username);

    let rows: Vec<Vec<String>> = stats
        .iter()
        .map(|s| vec![s.bin.clone(), s.games.to_string(), fmt_opt(s.win_rate, 1)])
        .collect();
    print_table("Win Rate by Rating Differential", &["Rating Differential", "Games Played", "Win Rate"], &rows);
    save_report(&config.report_data_dir(), &stem(config, name), &stats)?;

    let mut c = BarChart::new("Win Rate by Rating Differential", "Rating Differential", "Win Rate (%)");
    c.categories = stats.iter().map(|s| s.bin.clone()).collect();
    c.series = vec![Series::new("Win Rate", BLUE, stats.iter().map(|s| s.win_rate).collect())
        .with_annotations(stats.iter().map(|s| Some(format!("{} games", s.games))).collect())];
    c.y_max = Some(100.0);
    c.footnote = Some("Rating Differential = Opponent Rating - My Rating".into());
    save_chart(config, name, &chart::render_bar_chart(&c))
}

fn time_management(config: &InsightsConfig, records: &[GameRecord]) -> Result<(), InsightsError> {
    let name = Report::TimeManagement.name();
    let stats = time_management::average_time_by_outcome(records, &config.username);

    let rows: Vec<Vec<String>> = stats
        .iter()
        .map(|s| {
            vec![
                s.time_class.to_string(),
                s.result.to_string(),
                format!("{:.2}", s.average_time_per_move),
                s.games.to_string(),
            ]
        })
        .collect();
    print_table("Time Management Statistics", &["Time Class", "Result", "Avg Time Per Move (s)", "Games"], &rows);
    save_report(&config.report_data_dir(), &stem(config, name), &stats)?;

    let mut classes: Vec<TimeClass> = stats.iter().map(|s| s.time_class).collect();
    classes.dedup();

    let series_for = |result: Outcome, color: &'static str| {
        let values: Vec<Option<f64>> = classes
            .iter()
            .map(|tc| {
                stats
                    .iter()
                    .find(|s| s.time_class == *tc && s.result == result)
                    .map(|s| s.average_time_per_move)
            })
            .collect();
        let notes = values.iter().map(|v| v.map(|v| format!("{v:.2} sec"))).collect();
        Series::new(result.as_str(), color, values).with_annotations(notes)
    };

    let mut c = BarChart::new("Average Time Per Move by Game Outcome", "Time Format", "Average Time Per Move (seconds)");
    c.categories = classes.iter().map(|tc| tc.to_string()).collect();
    c.series = vec![
        series_for(Outcome::Loss, RED),
        series_for(Outcome::Draw, BLUE),
        series_for(Outcome::Win, GREEN),
    ];
    save_chart(config, name, &chart::render_bar_chart(&c))
}

fn games_by_day(config: &InsightsConfig, records: &[GameRecord]) -> Result<(), InsightsError> {
    let name = Report::GamesByDay.name();
    let stats = calendar::results_by_weekday(records);

    let rows: Vec<Vec<String>> = stats
        .iter()
        .map(|s| {
            vec![
                s.day.to_string(),
                s.win.to_string(),
                s.draw.to_string(),
                s.loss.to_string(),
                s.total().to_string(),
            ]
        })
        .collect();
    print_table("Games Played by Day of the Week", &["Day", "Win", "Draw", "Loss", "Total"], &rows);
    save_report(&config.report_data_dir(), &stem(config, name), &stats)?;

    let count = |f: fn(&calendar::WeekdayRow) -> usize| -> Vec<Option<f64>> {
        stats.iter().map(|s| Some(f(s) as f64)).collect()
    };
    let mut c = BarChart::new("Number of Games Played by Day of the Week", "Day of the Week", "Number of Games Played");
    c.layout = BarLayout::Stacked;
    c.categories = stats.iter().map(|s| s.day.to_string()).collect();
    c.series = vec![
        Series::new("Win", PALE_GREEN, count(|s| s.win)),
        Series::new("Draw", GRAY, count(|s| s.draw)),
        Series::new("Loss", LIGHT_RED, count(|s| s.loss)),
    ];
    save_chart(config, name, &chart::render_bar_chart(&c))
}

fn games_by_month(config: &InsightsConfig, records: &[GameRecord]) -> Result<(), InsightsError> {
    let name = Report::GamesByMonth.name();
    let stats = calendar::games_by_month(records);

    let rows: Vec<Vec<String>> = stats
        .iter()
        .map(|s| vec![s.month.clone(), s.games.to_string()])
        .collect();
    print_table("Number of Games Played by Month", &["Year-Month", "Game Count"], &rows);
    save_report(&config.report_data_dir(), &stem(config, name), &stats)?;

    let mut c = BarChart::new("Number of Games Played by Month", "Year-Month", "Number of Games Played");
    c.categories = stats.iter().map(|s| s.month.clone()).collect();
    c.series = vec![Series::new("Games", BLUE, stats.iter().map(|s| Some(s.games as f64)).collect())];
    save_chart(config, name, &chart::render_bar_chart(&c))
}

fn games_by_time_of_day(config: &InsightsConfig, records: &[GameRecord]) -> Result<(), InsightsError> {
    let name = Report::GamesByTimeOfDay.name();
    let stats = calendar::games_by_time_of_day(records);

    let rows: Vec<Vec<String>> = stats
        .iter()
        .map(|s| vec![MONTH_NAMES[(s.month - 1) as usize].to_string(), s.time_of_day.to_string(), s.games.to_string()])
        .collect();
    print_table("Games Played by Time of Day (Monthly)", &["Month", "Time of Day", "Game Count"], &rows);
    save_report(&config.report_data_dir(), &stem(config, name), &stats)?;

    const SHADES: [&str; 4] = ["#add8e6", "#6495ed", "#4169e1", "#000080"];
    let mut c = BarChart::new("Games Played by Time of Day (Monthly)", "Month", "Number of Games Played");
    c.categories = MONTH_NAMES.iter().map(|m| m.to_string()).collect();
    c.series = calendar::TimeOfDay::ALL
        .iter()
        .zip(SHADES)
        .map(|(slot, color)| {
            let values = (1..=12u32)
                .map(|month| {
                    stats
                        .iter()
                        .find(|s| s.month == month && s.time_of_day == *slot)
                        .map(|s| s.games as f64)
                })
                .collect();
            Series::new(slot.as_str(), color, values)
        })
        .collect();
    save_chart(config, name, &chart::render_bar_chart(&c))
}

fn win_rate_by_time_of_day(config: &InsightsConfig, records: &[GameRecord]) -> Result<(), InsightsError> {
    let name = Report::WinRateByTimeOfDay.name();
    let stats = calendar::win_rate_by_time_of_day(records);

    let rows: Vec<Vec<String>> = stats
        .iter()
        .map(|s| vec![s.time_of_day.to_string(), s.matches.to_string(), format!("{:.2}%", s.win_rate)])
        .collect();
    print_table("Performance by Time of Day", &["Time of Day", "Matches Played", "Win Rate"], &rows);
    save_report(&config.report_data_dir(), &stem(config, name), &stats)?;

    let mut c = BarChart::new("Win Rate by Time of Day", "Time of Day", "Win Rate (%)");
    c.categories = stats.iter().map(|s| s.time_of_day.to_string()).collect();
    c.series = vec![Series::new("Win Rate", BLUE, stats.iter().map(|s| Some(s.win_rate)).collect())
        .with_annotations(stats.iter().map(|s| Some(format!("{} games", s.matches))).collect())];
    c.y_max = Some(100.0);
    save_chart(config, name, &chart::render_bar_chart(&c))
}

fn longest_streaks(config: &InsightsConfig, records: &[GameRecord]) -> Result<(), InsightsError> {
    let name = Report::Streaks.name();
    let stats = streaks::longest_streaks(records);

    let rows = vec![
        vec!["Win".to_string(), stats.win.to_string()],
        vec!["Loss".to_string(), stats.loss.to_string()],
        vec!["Draw".to_string(), stats.draw.to_string()],
    ];
    print_table("Longest Streaks", &["Streak", "Games"], &rows);
    save_report(&config.report_data_dir(), &stem(config, name), &stats)?;
    Ok(())
}

fn rating_trends(config: &InsightsConfig, records: &[GameRecord]) -> Result<(), InsightsError> {
    let name = Report::RatingTrends.name();
    let stats = trends::rating_trends(records, &config.username, trends::DEFAULT_WINDOW);

    let rows: Vec<Vec<String>> = stats
        .iter()
        .filter_map(|t| {
            let first = t.points.first()?;
            let last = t.points.last()?;
            Some(vec![
                t.time_class.to_string(),
                t.points.len().to_string(),
                first.player_rating.to_string(),
                last.player_rating.to_string(),
                format!("{:.1}", last.smoothed_rating),
            ])
        })
        .collect();
    print_table("Rating Trends", &["Time Class", "Games", "First", "Latest", "Smoothed"], &rows);
    save_report(&config.report_data_dir(), &stem(config, name), &stats)?;

    for tc in TimeClass::LIVE {
        let Some(trend) = stats.iter().find(|t| t.time_class == tc) else {
            info!(time_class = %tc, "No data found for time class");
            continue;
        };
        let c = LineChart {
            title: format!("{tc} Rating Trends Over Time (Smoothed)"),
            x_label: "Date".into(),
            y_label: "Rating".into(),
            x_labels: trend
                .points
                .iter()
                .map(|p| p.end_time.format("%Y-%m-%d").to_string())
                .collect(),
            series: vec![Series::new(
                format!("{tc} Rating"),
                BLUE,
                trend.points.iter().map(|p| Some(p.smoothed_rating)).collect(),
            )],
        };
        let chart_name = format!("{}_rating_trends", tc.as_str().to_lowercase());
        save_chart(config, &chart_name, &chart::render_line_chart(&c))?;
    }
    Ok(())
}

/// Run reports in order, stopping at the first failure.
pub fn run_reports(reports: &[Report], config: &InsightsConfig, records: &[GameRecord]) -> Result<(), InsightsError> {
    for &report in reports {
        run_report(report, config, records)?;
        info!(%report, "Report completed");
    }
    info!(count = reports.len(), "All analyses completed successfully");
    Ok(())
}
