//! Feature rows, one-hot encoding and target encodings.

use chess_core::Outcome;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

pub const CLASS_LABELS: [&str; 3] = ["Loss", "Draw", "Win"];

/// Loss 0, Draw 1, Win 2. Unknown results have no class.
pub fn outcome_class(outcome: Outcome) -> Option<usize> {
    match outcome {
        Outcome::Loss => Some(0),
        Outcome::Draw => Some(1),
        Outcome::Win => Some(2),
        Outcome::Unknown => None,
    }
}

/// Loss 0, Draw 0.5, Win 1.
pub fn outcome_score(outcome: Outcome) -> Option<f64> {
    match outcome {
        Outcome::Loss => Some(0.0),
        Outcome::Draw => Some(0.5),
        Outcome::Win => Some(1.0),
        Outcome::Unknown => None,
    }
}

/// One example before encoding: numeric columns pass through, categorical
/// columns are one-hot encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub numeric: Vec<f64>,
    pub categorical: Vec<String>,
}

/// One-hot encoder fitted on the training rows. Output columns are the
/// numeric columns followed by one `Column_Value` indicator per category
/// seen in training, categories sorted within each column. A category not
/// seen in training encodes as all zeros for that column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    numeric_names: Vec<String>,
    categorical_names: Vec<String>,
    categories: Vec<Vec<String>>,
}

impl OneHotEncoder {
    pub fn fit(
        numeric_names: &[&str],
        categorical_names: &[&str],
        rows: &[FeatureRow],
    ) -> Result<Self, ModelError> {
        let mut categories = vec![Vec::new(); categorical_names.len()];
        for row in rows {
            check_width(numeric_names.len(), row.numeric.len())?;
            check_width(categorical_names.len(), row.categorical.len())?;
            for (seen, value) in categories.iter_mut().zip(&row.categorical) {
                seen.push(value.clone());
            }
        }
        for seen in &mut categories {
            seen.sort();
            seen.dedup();
        }

        Ok(Self {
            numeric_names: numeric_names.iter().map(|s| s.to_string()).collect(),
            categorical_names: categorical_names.iter().map(|s| s.to_string()).collect(),
            categories,
        })
    }

    pub fn width(&self) -> usize {
        self.numeric_names.len() + self.categories.iter().map(Vec::len).sum::<usize>()
    }

    pub fn column_names(&self) -> Vec<String> {
        let mut names = self.numeric_names.clone();
        for (column, values) in self.categorical_names.iter().zip(&self.categories) {
            names.extend(values.iter().map(|v| format!("{column}_{v}")));
        }
        names
    }

    pub fn transform(&self, row: &FeatureRow) -> Result<Vec<f64>, ModelError> {
        check_width(self.numeric_names.len(), row.numeric.len())?;
        check_width(self.categorical_names.len(), row.categorical.len())?;

        let mut out = Vec::with_capacity(self.width());
        out.extend_from_slice(&row.numeric);
        for (values, value) in self.categories.iter().zip(&row.categorical) {
            let hit = values.binary_search(value).ok();
            out.extend((0..values.len()).map(|i| if Some(i) == hit { 1.0 } else { 0.0 }));
        }
        Ok(out)
    }

    pub fn transform_all(&self, rows: &[FeatureRow]) -> Result<Vec<Vec<f64>>, ModelError> {
        rows.iter().map(|r| self.transform(r)).collect()
    }
}

fn check_width(expected: usize, actual: usize) -> Result<(), ModelError> {
    if expected == actual {
        Ok(())
    } else {
        Err(ModelError::FeatureMismatch { expected, actual })
    }
}
