// src/report.rs

//! Rendering a [`PlanView`] for the terminal or for another program.

use std::fmt::Write as _;

use crate::errors::Result;
use crate::session::PlanView;
use crate::types::OutputFormat;

pub fn render(view: &PlanView, format: OutputFormat, show_hidden: bool) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(view, show_hidden)),
        OutputFormat::Json => render_json(view),
    }
}

pub fn render_json(view: &PlanView) -> Result<String> {
    Ok(serde_json::to_string_pretty(view)?)
}

/// Plain table, one line per visible task.
///
/// Parents are marked `-` (expanded) or `+` (collapsed); critical tasks get
/// a trailing `*`.
pub fn render_text(view: &PlanView, show_hidden: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<28} {:>4} {:<10} {:<10} {:<10} {:<10} {:>5}",
        "TASK", "DAYS", "ES", "EF", "LS", "LF", "FLOAT"
    );

    for (task, row) in view.schedule.scheduled_tasks.iter().zip(view.rows.iter()) {
        if row.hidden && !show_hidden {
            continue;
        }

        let marker = match (row.has_children, row.collapsed) {
            (true, true) => "+ ",
            (true, false) => "- ",
            (false, _) => "  ",
        };
        let label = if task.task.name.is_empty() {
            task.task.id.clone()
        } else {
            format!("{} {}", task.task.id, task.task.name)
        };
        let label = format!("{}{}{}", "  ".repeat(row.depth), marker, label);

        let _ = writeln!(
            out,
            "{:<28} {:>4} {:<10} {:<10} {:<10} {:<10} {:>5}{}",
            truncate(&label, 28),
            task.duration,
            task.es,
            task.ef,
            task.ls.as_deref().unwrap_or("-"),
            task.lf.as_deref().unwrap_or("-"),
            task.float.map(|f| f.to_string()).unwrap_or_else(|| "-".to_string()),
            if task.is_critical { " *" } else { "" },
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "critical path: {}",
        if view.schedule.critical_task_ids.is_empty() {
            "(none)".to_string()
        } else {
            view.schedule.critical_task_ids.join(" -> ")
        }
    );
    if let Some(finish) = &view.diagnostics.project_finish {
        let _ = writeln!(out, "project finish: {finish}");
    }
    if let Some(cycle) = &view.diagnostics.cycle_task {
        let _ = writeln!(out, "warning: dependency cycle involving '{cycle}'");
    }
    if !view.diagnostics.converged() {
        let _ = writeln!(
            out,
            "warning: iteration cap ({}) reached; dates may be incomplete",
            view.diagnostics.iteration_cap
        );
    }

    out
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(width.saturating_sub(1)).collect();
        t.push('~');
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpm::CpmEngine;
    use crate::hierarchy::CollapseState;
    use crate::model::Task;
    use crate::session::PlanSession;

    fn view(collapsed: &CollapseState) -> PlanView {
        let parent = Task::new("P", "2024-01-01", "2024-01-03");
        let mut child = Task::new("C", "2024-01-01", "2024-01-03");
        child.parent_id = Some("P".into());
        child.name = "Build".into();

        PlanSession::new(CpmEngine::default(), false).apply(&[parent, child], collapsed)
    }

    #[test]
    fn hidden_rows_are_skipped_unless_requested() {
        let mut collapsed = CollapseState::new();
        collapsed.insert("P".into(), true);
        let v = view(&collapsed);

        let text = render_text(&v, false);
        assert!(text.contains("+ P"));
        assert!(!text.contains("C Build"));

        let text = render_text(&v, true);
        assert!(text.contains("C Build"));
    }

    #[test]
    fn json_uses_the_external_field_names() {
        let v = view(&CollapseState::new());
        let json = render_json(&v).unwrap();

        assert!(json.contains("\"criticalTaskIds\""));
        assert!(json.contains("\"isCritical\""));
        assert!(json.contains("\"ES\""));
        assert!(json.contains("\"parentId\""));
    }
}
