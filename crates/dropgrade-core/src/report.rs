//! Grade report types with JSON output.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::grading::{GradeOutcome, ScoreResult, Verdict};
use crate::model::{ElementId, ZoneId};
use crate::placement::PlacementStore;
use crate::session::InstanceId;

/// A graded snapshot of one question session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeReport {
    /// Session that was graded.
    pub session: InstanceId,
    /// When the grading pass ran.
    pub graded_at: DateTime<Utc>,
    /// Task title, if the task has one.
    #[serde(default)]
    pub title: String,
    /// One entry per gradeable element, in id order.
    pub elements: Vec<ElementReport>,
    pub score: ScoreResult,
}

/// Verdict and location of a single element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementReport {
    pub element: ElementId,
    /// Zone the element was in when graded.
    pub zone: Option<ZoneId>,
    pub verdict: Verdict,
}

impl GradeReport {
    pub fn new(
        session: InstanceId,
        title: &str,
        outcome: &GradeOutcome,
        store: &PlacementStore,
    ) -> Self {
        let elements = outcome
            .verdicts
            .iter()
            .map(|(element, verdict)| ElementReport {
                element: *element,
                zone: store.zone_of(*element),
                verdict: *verdict,
            })
            .collect();

        Self {
            session,
            graded_at: Utc::now(),
            title: title.to_string(),
            elements,
            score: outcome.score,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        if !self.title.is_empty() {
            md.push_str(&format!("## {}\n\n", self.title));
        }

        md.push_str(&format!(
            "**Score:** {}/{} ({:.1}%)\n\n",
            self.score.points,
            self.score.max_score,
            self.score.ratio() * 100.0
        ));

        if !self.elements.is_empty() {
            md.push_str("| Element | Zone | Verdict |\n");
            md.push_str("|---------|------|---------|\n");
            for e in &self.elements {
                let zone = e
                    .zone
                    .map(|z| z.to_string())
                    .unwrap_or_else(|| "-".to_string());
                md.push_str(&format!("| {} | {} | {} |\n", e.element, zone, e.verdict));
            }
        }

        md
    }
}
