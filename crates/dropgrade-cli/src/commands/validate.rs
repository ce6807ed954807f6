//! The `dropgrade validate` command.

use std::path::PathBuf;

use anyhow::Result;

use dropgrade_core::layout::ContentPaths;
use dropgrade_core::parser;

pub fn execute(task_path: PathBuf, content_base: Option<String>) -> Result<()> {
    let tasks = if task_path.is_dir() {
        parser::load_task_directory(&task_path)?
    } else {
        vec![parser::parse_task_file(&task_path)?]
    };

    let paths = content_base.map(ContentPaths::new);
    let mut total_warnings = 0;

    for task in &tasks {
        println!(
            "Task: {} ({} elements, {} drop zones, max score {})",
            task.title(),
            task.elements().len(),
            task.drop_zones().len(),
            task.max_score()
        );

        if let (Some(paths), Some(background)) = (&paths, &task.settings().background) {
            println!("  background: {}", paths.resolve(background));
        }

        let warnings = parser::validate_task(task);
        for w in &warnings {
            let prefix = match (w.element, w.zone) {
                (Some(e), _) => format!("  [element {e}]"),
                (None, Some(z)) => format!("  [zone {z}]"),
                (None, None) => "  ".to_string(),
            };
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All tasks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
