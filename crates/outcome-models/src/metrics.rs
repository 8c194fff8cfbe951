use serde::Serialize;

pub fn accuracy(y_true: &[usize], y_pred: &[usize]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    let hits = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    hits as f64 / y_true.len() as f64
}

/// Rows are actual classes, columns predicted classes.
pub fn confusion_matrix(y_true: &[usize], y_pred: &[usize], n_classes: usize) -> Vec<Vec<usize>> {
    let mut cm = vec![vec![0; n_classes]; n_classes];
    for (&t, &p) in y_true.iter().zip(y_pred) {
        if t < n_classes && p < n_classes {
            cm[t][p] += 1;
        }
    }
    cm
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Per-class precision, recall, F1 and support; any zero division yields 0.
pub fn classification_report(y_true: &[usize], y_pred: &[usize], labels: &[&str]) -> Vec<ClassMetrics> {
    let cm = confusion_matrix(y_true, y_pred, labels.len());
    labels
        .iter()
        .enumerate()
        .map(|(c, label)| {
            let tp = cm[c][c];
            let predicted: usize = cm.iter().map(|row| row[c]).sum();
            let support: usize = cm[c].iter().sum();
            let precision = ratio(tp, predicted);
            let recall = ratio(tp, support);
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };
            ClassMetrics {
                label: label.to_string(),
                precision,
                recall,
                f1,
                support,
            }
        })
        .collect()
}

pub fn format_classification_report(report: &[ClassMetrics]) -> String {
    let mut out = format!("{:>10} {:>10} {:>10} {:>10} {:>10}\n", "", "precision", "recall", "f1-score", "support");
    for m in report {
        out.push_str(&format!(
            "{:>10} {:>10.2} {:>10.2} {:>10.2} {:>10}\n",
            m.label, m.precision, m.recall, m.f1, m.support
        ));
    }
    out
}

pub fn mean_squared_error(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    let sum: f64 = y_true.iter().zip(y_pred).map(|(t, p)| (t - p).powi(2)).sum();
    sum / y_true.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_and_confusion() {
        let truth = [0, 1, 2, 2, 0];
        let pred = [0, 2, 2, 2, 1];
        assert_eq!(accuracy(&truth, &pred), 0.6);
        assert_eq!(
            confusion_matrix(&truth, &pred, 3),
            vec![vec![1, 1, 0], vec![0, 0, 1], vec![0, 0, 2]]
        );
        assert_eq!(accuracy(&[], &[]), 0.0);
    }

    #[test]
    fn test_report_zero_division_is_zero() {
        // Draw never predicted and never correct
        let report = classification_report(&[0, 1, 2], &[0, 0, 2], &["Loss", "Draw", "Win"]);
        let draw = &report[1];
        assert_eq!((draw.precision, draw.recall, draw.f1, draw.support), (0.0, 0.0, 0.0, 1));
        let loss = &report[0];
        assert_eq!(loss.precision, 0.5);
        assert_eq!(loss.recall, 1.0);
        assert!((loss.f1 - 2.0 / 3.0).abs() < 1e-12);

        let text = format_classification_report(&report);
        assert!(text.lines().nth(2).unwrap().trim_start().starts_with("Draw"));
    }

    #[test]
    fn test_mse() {
        assert_eq!(mean_squared_error(&[1.0, 0.0], &[0.5, 0.5]), 0.25);
        assert_eq!(mean_squared_error(&[], &[]), 0.0);
    }
}
