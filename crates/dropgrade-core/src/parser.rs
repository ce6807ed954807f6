//! Task file parser.
//!
//! Loads task definitions from TOML or JSON files and directories, and
//! validates them. JSON files may use the camelCase layout the content type
//! stores (`dropZones`, `correctElements`, string indices, an optional
//! `question.task` wrapper); TOML files use snake_case keys.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::TaskError;
use crate::model::{
    Behaviour, DropZone, ElementId, ElementKind, Rect, Settings, Size, TaskDefinition,
    TaskElement, ZoneId,
};

/// Intermediate structure for parsing task files.
#[derive(Debug, Deserialize)]
struct RawTaskFile {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    settings: RawSettings,
    #[serde(default)]
    behaviour: Behaviour,
    #[serde(default, alias = "dropZones")]
    drop_zones: Vec<RawDropZone>,
    #[serde(default)]
    elements: Vec<RawElement>,
    /// Content-type layout: `{ question: { settings, task: { elements, dropZones } } }`.
    #[serde(default)]
    question: Option<RawQuestion>,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(default)]
    settings: RawSettings,
    #[serde(default)]
    task: RawTask,
}

#[derive(Debug, Default, Deserialize)]
struct RawTask {
    #[serde(default, alias = "dropZones")]
    drop_zones: Vec<RawDropZone>,
    #[serde(default)]
    elements: Vec<RawElement>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    #[serde(default)]
    size: Size,
    #[serde(default)]
    background: Option<RawBackground>,
}

/// Either a bare path or a file object carrying one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawBackground {
    Path(String),
    File { path: String },
}

/// Indices appear as numbers or as numeric strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawIndex {
    Number(i64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawKind {
    Static,
    Draggable,
}

#[derive(Debug, Deserialize)]
struct RawDropZone {
    #[serde(default)]
    label: String,
    #[serde(default, alias = "showLabel")]
    show_label: bool,
    #[serde(default, alias = "correctElements")]
    correct_elements: Vec<RawIndex>,
    #[serde(flatten)]
    rect: Rect,
}

#[derive(Debug, Deserialize)]
struct RawElement {
    #[serde(default, alias = "dropZones")]
    drop_zones: Vec<RawIndex>,
    #[serde(default)]
    kind: Option<RawKind>,
    #[serde(flatten)]
    rect: Rect,
}

fn parse_index(raw: &RawIndex, field: &str) -> Result<usize, TaskError> {
    let invalid = |value: String| TaskError::InvalidIndex {
        field: field.to_string(),
        value,
    };
    match raw {
        RawIndex::Number(n) => usize::try_from(*n).map_err(|_| invalid(n.to_string())),
        RawIndex::Text(s) => s.trim().parse::<usize>().map_err(|_| invalid(s.clone())),
    }
}

fn parse_indices(raw: &[RawIndex], field: &str) -> Result<BTreeSet<usize>, TaskError> {
    raw.iter().map(|r| parse_index(r, field)).collect()
}

fn build_task(raw: RawTaskFile, fallback_title: &str) -> Result<TaskDefinition, TaskError> {
    let (settings, task) = match raw.question {
        Some(question) => (question.settings, question.task),
        None => (
            raw.settings,
            RawTask {
                drop_zones: raw.drop_zones,
                elements: raw.elements,
            },
        ),
    };

    let elements = task
        .elements
        .into_iter()
        .enumerate()
        .map(|(position, e)| {
            let id = ElementId(position);
            let zones = parse_indices(&e.drop_zones, &format!("elements[{position}].drop_zones"))?;
            let kind = match (e.kind, zones.is_empty()) {
                (Some(RawKind::Static), false) => return Err(TaskError::StaticWithDropZones(id)),
                (Some(RawKind::Static), true) | (None, true) => ElementKind::Static,
                (Some(RawKind::Draggable), _) | (None, false) => ElementKind::Draggable {
                    allowed_zones: zones.into_iter().map(ZoneId).collect(),
                },
            };
            Ok(TaskElement {
                id,
                kind,
                rect: e.rect,
            })
        })
        .collect::<Result<Vec<_>, TaskError>>()?;

    let drop_zones = task
        .drop_zones
        .into_iter()
        .enumerate()
        .map(|(position, z)| {
            let correct = parse_indices(
                &z.correct_elements,
                &format!("drop_zones[{position}].correct_elements"),
            )?;
            Ok(DropZone {
                id: ZoneId(position),
                label: z.label,
                show_label: z.show_label,
                correct_elements: correct.into_iter().map(ElementId).collect(),
                rect: z.rect,
            })
        })
        .collect::<Result<Vec<_>, TaskError>>()?;

    let settings = Settings {
        size: settings.size,
        background: settings.background.map(|b| match b {
            RawBackground::Path(path) | RawBackground::File { path } => path,
        }),
    };

    TaskDefinition::new(
        raw.title.unwrap_or_else(|| fallback_title.to_string()),
        elements,
        drop_zones,
        settings,
        raw.behaviour,
    )
}

/// Parse a single task file.
pub fn parse_task_file(path: &Path) -> Result<TaskDefinition> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read task file: {}", path.display()))?;

    parse_task_str(&content, path)
}

/// Parse task content; `source_path` picks the format by extension and
/// provides the default title.
pub fn parse_task_str(content: &str, source_path: &Path) -> Result<TaskDefinition> {
    let is_json = source_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let raw: RawTaskFile = if is_json {
        serde_json::from_str(content)
            .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?
    } else {
        toml::from_str(content)
            .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?
    };

    let fallback_title = source_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    build_task(raw, &fallback_title)
        .with_context(|| format!("invalid task definition: {}", source_path.display()))
}

/// Recursively load all `.toml` and `.json` task files from a directory.
pub fn load_task_directory(dir: &Path) -> Result<Vec<TaskDefinition>> {
    let mut tasks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            tasks.extend(load_task_directory(&path)?);
        } else if path
            .extension()
            .is_some_and(|ext| ext == "toml" || ext == "json")
        {
            match parse_task_file(&path) {
                Ok(task) => tasks.push(task),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(tasks)
}

/// A warning from task validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The element concerned (if applicable).
    pub element: Option<ElementId>,
    /// The drop zone concerned (if applicable).
    pub zone: Option<ZoneId>,
    /// Warning message.
    pub message: String,
}

/// Check a task for configurations that are legal but probably unintended.
pub fn validate_task(task: &TaskDefinition) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Correct elements that can never be graded, or never reach their zone
    for zone in task.drop_zones() {
        for element_id in &zone.correct_elements {
            let Some(element) = task.element(*element_id) else {
                continue;
            };
            if !element.is_gradeable() {
                warnings.push(ValidationWarning {
                    element: Some(element.id),
                    zone: Some(zone.id),
                    message: format!(
                        "static element {} is listed as correct for drop zone {} and is never graded",
                        element.id, zone.id
                    ),
                });
            } else if !element.allows(zone.id) {
                warnings.push(ValidationWarning {
                    element: Some(element.id),
                    zone: Some(zone.id),
                    message: format!(
                        "element {} is correct in drop zone {} but cannot be dropped there",
                        element.id, zone.id
                    ),
                });
            }
        }
    }

    // Draggables with nowhere to go
    for element in task.gradeable_elements() {
        if element.allowed_zones().is_some_and(|z| z.is_empty()) {
            warnings.push(ValidationWarning {
                element: Some(element.id),
                zone: None,
                message: format!("element {} is draggable but lists no drop zones", element.id),
            });
        }
    }

    // Zones nothing can be dropped on
    for zone in task.drop_zones() {
        let reachable = task.elements().iter().any(|e| e.allows(zone.id));
        if !reachable {
            warnings.push(ValidationWarning {
                element: None,
                zone: Some(zone.id),
                message: format!("drop zone {} accepts no elements", zone.id),
            });
        }
    }

    warnings
}
