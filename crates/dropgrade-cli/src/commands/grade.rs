//! The `dropgrade grade` command.

use std::path::PathBuf;

use anyhow::Result;

use dropgrade_core::model::{ElementId, ZoneId};
use dropgrade_core::parser;
use dropgrade_core::report::GradeReport;
use dropgrade_core::session::QuestionSession;
use dropgrade_core::traits::NoopShell;

pub fn execute(
    task_path: PathBuf,
    places: Vec<(ElementId, ZoneId)>,
    format: String,
    output: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(
        matches!(format.as_str(), "text" | "json" | "markdown" | "md"),
        "unknown format: {format}"
    );

    let task = parser::parse_task_file(&task_path)?;
    tracing::debug!(
        "loaded task '{}' from {} ({} gradeable elements)",
        task.title(),
        task_path.display(),
        task.max_score()
    );
    let mut session = QuestionSession::new(task);

    for (element, zone) in places {
        if !session.place(element, zone) {
            eprintln!("  Rejected: element {element} cannot be dropped on zone {zone}");
        }
    }

    let report = session.show_solutions(&mut NoopShell);

    if let Some(path) = &output {
        report.save_json(path)?;
        eprintln!("Report written to {}", path.display());
    }

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "markdown" | "md" => println!("{}", report.to_markdown()),
        _ => print_summary(&report),
    }

    Ok(())
}

fn print_summary(report: &GradeReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Element", "Zone", "Verdict"]);

    for e in &report.elements {
        table.add_row(vec![
            Cell::new(e.element),
            Cell::new(e.zone.map(|z| z.to_string()).unwrap_or_else(|| "-".into())),
            Cell::new(e.verdict),
        ]);
    }

    if !report.title.is_empty() {
        println!("{}", report.title);
    }
    println!("{table}");
    println!(
        "Score: {}/{} ({:.1}%)",
        report.score.points,
        report.score.max_score,
        report.score.ratio() * 100.0
    );
}
