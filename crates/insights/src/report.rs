//! Report output: aggregates as JSON files and plain-text tables on stdout.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::InsightsError;

/// Write `data` as pretty JSON to `<dir>/<name>.json`.
pub fn save_report<T: Serialize + ?Sized>(dir: &Path, name: &str, data: &T) -> Result<PathBuf, InsightsError> {
    fs::create_dir_all(dir).map_err(|e| InsightsError::io(dir, e))?;
    let path = dir.join(format!("{name}.json"));
    let file = File::create(&path).map_err(|e| InsightsError::io(&path, e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), data)?;
    info!(path = %path.display(), "Report saved");
    Ok(path)
}

/// Left-aligned text table, one space-padded column per header.
pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let render = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = render(headers.to_vec());
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&render(rule.iter().map(String::as_str).collect()));
    out.push('\n');
    for row in rows {
        out.push_str(&render(row.iter().map(String::as_str).collect()));
        out.push('\n');
    }
    out
}

pub fn print_table(title: &str, headers: &[&str], rows: &[Vec<String>]) {
    println!("{title}:");
    if rows.is_empty() {
        println!("  (no data)");
    } else {
        print!("{}", format_table(headers, rows));
    }
    println!();
}

/// `Some(12.345)` -> "12.35", `None` -> "-"
pub fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.decimals$}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_table_aligns_columns() {
        let table = format_table(
            &["Opening", "Games"],
            &[
                vec!["Italian".into(), "12".into()],
                vec!["Caro kann defense".into(), "3".into()],
            ],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Opening            Games");
        assert_eq!(lines[2], "Italian            12");
        assert_eq!(lines[3], "Caro kann defense  3");
    }

    #[test]
    fn test_fmt_opt() {
        assert_eq!(fmt_opt(Some(12.345), 1), "12.3");
        assert_eq!(fmt_opt(None, 2), "-");
    }

    #[test]
    fn test_save_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_report(&dir.path().join("data"), "streaks", &[1, 2, 3]).unwrap();
        let back: Vec<i32> = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(back, vec![1, 2, 3]);
    }
}
