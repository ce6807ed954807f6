//! Grading pass: verdicts per element and the aggregate score.
//!
//! Grading is a pure function of the task and the current placements. It
//! holds no state between calls, so repeated calls without intervening
//! placement changes produce identical results.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{ElementId, TaskDefinition, ZoneId};
use crate::placement::PlacementStore;

/// Outcome for a single gradeable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    pub fn is_correct(self) -> bool {
        self == Verdict::Correct
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Correct => write!(f, "correct"),
            Verdict::Incorrect => write!(f, "incorrect"),
        }
    }
}

/// One point per correct verdict, out of the number of gradeable elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub points: u32,
    pub max_score: u32,
}

impl ScoreResult {
    /// Fraction of points earned. A task with nothing to grade counts as 1.0.
    pub fn ratio(&self) -> f64 {
        if self.max_score == 0 {
            return 1.0;
        }
        self.points as f64 / self.max_score as f64
    }

    pub fn is_perfect(&self) -> bool {
        self.points == self.max_score
    }
}

/// Result of one grading pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeOutcome {
    pub verdicts: BTreeMap<ElementId, Verdict>,
    pub score: ScoreResult,
}

/// For each element, the zones in which it counts as correct.
pub type CorrectZoneMap = HashMap<ElementId, BTreeSet<ZoneId>>;

/// Invert every zone's `correct_elements` into a per-element lookup.
///
/// Elements that are correct nowhere have no entry.
pub fn correct_zone_map(task: &TaskDefinition) -> CorrectZoneMap {
    let mut map: CorrectZoneMap = HashMap::new();
    for zone in task.drop_zones() {
        for element in &zone.correct_elements {
            map.entry(*element).or_default().insert(zone.id);
        }
    }
    map
}

/// Verdict for one element given where it currently is.
///
/// An element with no correct zone is correct only while unplaced. Any other
/// element is correct only while sitting in one of its correct zones.
pub fn verdict_for(correct_zones: Option<&BTreeSet<ZoneId>>, current: Option<ZoneId>) -> Verdict {
    let correct = match correct_zones {
        None => current.is_none(),
        Some(zones) => current.is_some_and(|zone| zones.contains(&zone)),
    };
    if correct {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}

/// Grade the current placements against the task's answer key.
///
/// Static elements are skipped entirely: they get no verdict and do not
/// count towards `max_score`.
pub fn grade(task: &TaskDefinition, store: &PlacementStore) -> GradeOutcome {
    let map = correct_zone_map(task);

    let mut verdicts = BTreeMap::new();
    let mut points = 0u32;
    let mut max_score = 0u32;

    for element in task.gradeable_elements() {
        max_score += 1;
        let verdict = verdict_for(map.get(&element.id), store.zone_of(element.id));
        if verdict.is_correct() {
            points += 1;
        }
        verdicts.insert(element.id, verdict);
    }

    tracing::debug!("graded {max_score} element(s): {points} point(s)");

    GradeOutcome {
        verdicts,
        score: ScoreResult { points, max_score },
    }
}
