use nalgebra::linalg::Cholesky;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ModelError;

/// Added to the diagonal of XᵀX (not the intercept) so a full one-hot block
/// next to the intercept still has a unique solution.
const RIDGE: f64 = 1e-6;
const SVD_EPSILON: f64 = 1e-12;

/// Ordinary least squares with an intercept, solved through the normal
/// equations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearRegression {
    pub fn fit(x: &[Vec<f64>], y: &[f64]) -> Result<Self, ModelError> {
        if x.is_empty() {
            return Err(ModelError::InsufficientData("no training rows".into()));
        }
        if x.len() != y.len() {
            return Err(ModelError::LabelCount { rows: x.len(), labels: y.len() });
        }
        let n_features = x[0].len();
        if let Some(bad) = x.iter().find(|r| r.len() != n_features) {
            return Err(ModelError::FeatureMismatch { expected: n_features, actual: bad.len() });
        }
        if x.iter().flatten().chain(y).any(|v| !v.is_finite()) {
            return Err(ModelError::Singular);
        }

        // Leading column of ones for the intercept
        let design = DMatrix::from_fn(x.len(), n_features + 1, |i, j| if j == 0 { 1.0 } else { x[i][j - 1] });
        let target = DVector::from_column_slice(y);

        let mut normal = design.tr_mul(&design);
        for i in 1..normal.nrows() {
            normal[(i, i)] += RIDGE;
        }
        let rhs = design.tr_mul(&target);

        let beta = match Cholesky::new(normal.clone()) {
            Some(chol) => chol.solve(&rhs),
            None => {
                debug!("Normal equations not positive definite, falling back to SVD");
                normal
                    .svd(true, true)
                    .solve(&rhs, SVD_EPSILON)
                    .map_err(|_| ModelError::Singular)?
            }
        };
        if beta.iter().any(|b| !b.is_finite()) {
            return Err(ModelError::Singular);
        }

        Ok(Self {
            intercept: beta[0],
            coefficients: beta.iter().skip(1).copied().collect(),
        })
    }

    pub fn predict(&self, row: &[f64]) -> Result<f64, ModelError> {
        if row.len() != self.coefficients.len() {
            return Err(ModelError::FeatureMismatch {
                expected: self.coefficients.len(),
                actual: row.len(),
            });
        }
        Ok(self.intercept + row.iter().zip(&self.coefficients).map(|(x, c)| x * c).sum::<f64>())
    }

    pub fn predict_all(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, ModelError> {
        rows.iter().map(|r| self.predict(r)).collect()
    }
}
