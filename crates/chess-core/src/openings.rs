//! Two-level opening classification against a user-maintained list of
//! main-opening names (one per line, append-only).

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const UNKNOWN_OPENING: &str = "Unknown";

/// First character upper-cased, the rest lower-cased.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Opening name from a chess.com opening URL,
/// e.g. `https://www.chess.com/openings/Sicilian-Defense-Old-Sicilian` -> `Sicilian defense old sicilian`.
pub fn opening_name_from_eco(eco: Option<&str>) -> String {
    let Some(eco) = eco.filter(|e| !e.trim().is_empty()) else {
        return UNKNOWN_OPENING.to_string();
    };
    let last = eco.trim_end_matches('/').rsplit('/').next().unwrap_or(eco);
    capitalize(&last.replace('-', " "))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningClass {
    pub main_opening: String,
    pub variation: String,
    /// The name matched nothing in the list and should be learned.
    pub is_new: bool,
}

/// Snapshot of the opening list plus the names learned since it was loaded.
///
/// Classification only ever looks at the loaded snapshot, so every game in a
/// run is classified against the same list. Learned names reach the list on
/// [`OpeningCatalog::append_learned`] and take effect on the next run.
#[derive(Debug, Clone, Default)]
pub struct OpeningCatalog {
    known: Vec<String>,
    learned: Vec<String>,
}

impl OpeningCatalog {
    pub fn new(known: Vec<String>) -> Self {
        Self {
            known,
            learned: Vec::new(),
        }
    }

    /// Load the list, creating an empty file if it does not exist yet.
    pub fn load<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::File::create(path)?;
        }
        let contents = fs::read_to_string(path)?;
        Ok(Self::new(parse_list(&contents)))
    }

    pub fn known(&self) -> &[String] {
        &self.known
    }

    pub fn learned(&self) -> &[String] {
        &self.learned
    }

    pub fn classify(&self, opening_name: &str) -> OpeningClass {
        let lowered = opening_name.to_lowercase();
        if let Some(main) = self
            .known
            .iter()
            .find(|main| lowered.contains(&main.to_lowercase()))
        {
            return OpeningClass {
                main_opening: main.clone(),
                variation: capitalize(opening_name.trim()),
                is_new: false,
            };
        }

        if opening_name == UNKNOWN_OPENING {
            OpeningClass {
                main_opening: UNKNOWN_OPENING.to_string(),
                variation: UNKNOWN_OPENING.to_string(),
                is_new: false,
            }
        } else {
            OpeningClass {
                main_opening: opening_name.to_string(),
                variation: UNKNOWN_OPENING.to_string(),
                is_new: true,
            }
        }
    }

    /// Remember a new opening name. Returns false if it is already known or learned.
    pub fn learn(&mut self, opening_name: &str) -> bool {
        let already = self
            .known
            .iter()
            .chain(self.learned.iter())
            .any(|o| o == opening_name);
        if already {
            return false;
        }
        self.learned.push(opening_name.to_string());
        true
    }

    /// Append learned names to the list file, skipping any already present on disk.
    /// Returns the number of lines written.
    pub fn append_learned<P: AsRef<Path>>(&self, path: P) -> io::Result<usize> {
        let path = path.as_ref();
        let on_disk = match fs::read_to_string(path) {
            Ok(contents) => parse_list(&contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e),
        };

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut written = 0;
        for name in &self.learned {
            if on_disk.contains(name) {
                continue;
            }
            writeln!(file, "{name}")?;
            written += 1;
        }
        Ok(written)
    }
}

fn parse_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_name_from_eco() {
        assert_eq!(
            opening_name_from_eco(Some(
                "https://www.chess.com/openings/Sicilian-Defense-Old-Sicilian-Variation"
            )),
            "Sicilian defense old sicilian variation"
        );
        assert_eq!(opening_name_from_eco(None), "Unknown");
        assert_eq!(opening_name_from_eco(Some("")), "Unknown");
    }

    #[test]
    fn test_classify_known_main_opening() {
        let catalog = OpeningCatalog::new(vec!["Sicilian Defense".into(), "Italian".into()]);
        let class = catalog.classify("Sicilian defense najdorf variation");
        assert_eq!(class.main_opening, "Sicilian Defense");
        assert_eq!(class.variation, "Sicilian defense najdorf variation");
        assert!(!class.is_new);
    }

    #[test]
    fn test_first_listed_match_wins() {
        let catalog = OpeningCatalog::new(vec!["Queens".into(), "Queens gambit".into()]);
        assert_eq!(catalog.classify("Queens gambit declined").main_opening, "Queens");
    }

    #[test]
    fn test_classify_new_opening() {
        let catalog = OpeningCatalog::new(vec!["Italian".into()]);
        let class = catalog.classify("Caro kann defense");
        assert_eq!(class.main_opening, "Caro kann defense");
        assert_eq!(class.variation, "Unknown");
        assert!(class.is_new);
    }

    #[test]
    fn test_classify_unknown_is_not_learned() {
        let catalog = OpeningCatalog::default();
        let class = catalog.classify("Unknown");
        assert_eq!(class.main_opening, "Unknown");
        assert_eq!(class.variation, "Unknown");
        assert!(!class.is_new);
    }

    #[test]
    fn test_classify_is_idempotent_on_fixed_list() {
        let mut catalog = OpeningCatalog::new(vec!["Italian".into()]);
        let first = catalog.classify("Caro kann defense");
        catalog.learn("Caro kann defense");
        let second = catalog.classify("Caro kann defense");
        assert_eq!(first, second);
    }

    #[test]
    fn test_learn_dedupes() {
        let mut catalog = OpeningCatalog::new(vec!["Italian".into()]);
        assert!(catalog.learn("Caro kann defense"));
        assert!(!catalog.learn("Caro kann defense"));
        assert!(!catalog.learn("Italian"));
        assert_eq!(catalog.learned(), ["Caro kann defense".to_string()]);
    }

    #[test]
    fn test_load_creates_file_and_append_learned() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed/chess_openings.txt");

        let mut catalog = OpeningCatalog::load(&path).unwrap();
        assert!(path.exists());
        assert!(catalog.known().is_empty());

        catalog.learn("Scandinavian defense");
        catalog.learn("Kings pawn opening");
        assert_eq!(catalog.append_learned(&path).unwrap(), 2);
        // Second append finds both names on disk
        assert_eq!(catalog.append_learned(&path).unwrap(), 0);

        let reloaded = OpeningCatalog::load(&path).unwrap();
        assert_eq!(
            reloaded.known(),
            ["Scandinavian defense".to_string(), "Kings pawn opening".to_string()]
        );
    }
}
