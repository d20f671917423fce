//! Plan rendering for the terminal.

use agentplan_schema::{Action, ActionPlan, PlannedAction};
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};

/// Render a plan as a table, one row per action in apply order.
pub fn plan_table(plan: &ActionPlan) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Kind", "Target", "Detail", "Requires"]);

    for (i, planned) in plan.iter().enumerate() {
        let (target, detail) = describe(planned);
        let requires = planned
            .requires
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            (i + 1).to_string(),
            planned.action.kind().to_string(),
            target,
            detail,
            requires,
        ]);
    }
    table
}

/// Target and a one-line summary for an action.
fn describe(planned: &PlannedAction) -> (String, String) {
    match &planned.action {
        Action::EnsureDirectory { path, mode } => (
            path.clone(),
            mode.as_deref()
                .map_or_else(|| "ensure directory".to_string(), |m| format!("mode {m}")),
        ),
        Action::EnsureFile {
            path,
            source,
            mode,
            owner,
            group,
        } => {
            let mut detail = format!("from {source}");
            if let (Some(owner), Some(group)) = (owner, group) {
                detail.push_str(&format!(" ({owner}:{group}"));
                if let Some(mode) = mode {
                    detail.push_str(&format!(" {mode}"));
                }
                detail.push(')');
            }
            (path.clone(), detail)
        }
        Action::RunCommandUnless {
            name,
            command,
            guard,
            ..
        } => (name.clone(), format!("{command}\nunless {guard}")),
        Action::SetRepositorySetting {
            file,
            section,
            key,
            value,
        } => (format!("{file} [{section}]"), format!("{key}={value}")),
        Action::EnsurePackage {
            name,
            version,
            provider,
            source,
        } => {
            let mut detail = format!("{version} via {provider}");
            if let Some(source) = source {
                detail.push_str(&format!(" from {source}"));
            }
            (name.to_string(), detail)
        }
    }
}
