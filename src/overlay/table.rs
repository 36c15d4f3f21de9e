//! Results table of detected labels and their confidences

use serde::Serialize;
use std::fmt;

use crate::vision::Detection;

/// One table row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub label: String,
    pub confidence: f32,
}

/// Detected labels with confidences, in detection order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultsTable {
    pub rows: Vec<ResultRow>,
}

impl ResultsTable {
    pub fn from_detections(detections: &[&Detection]) -> Self {
        Self {
            rows: detections
                .iter()
                .map(|d| ResultRow {
                    label: d.label.clone(),
                    confidence: d.confidence,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

const LABEL_HEADER: &str = "Label";
const CONFIDENCE_HEADER: &str = "Confidence";

impl fmt::Display for ResultsTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "No text detected.");
        }

        let label_width = self
            .rows
            .iter()
            .map(|r| r.label.chars().count())
            .max()
            .unwrap_or(0)
            .max(LABEL_HEADER.len());

        writeln!(f, "{:<label_width$}  {}", LABEL_HEADER, CONFIDENCE_HEADER)?;
        writeln!(f, "{}  {}", "-".repeat(label_width), "-".repeat(CONFIDENCE_HEADER.len()))?;
        for row in &self.rows {
            writeln!(f, "{:<label_width$}  {:>10.2}", row.label, row.confidence)?;
        }
        Ok(())
    }
}
