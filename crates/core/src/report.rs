use crate::planner::{RenameEntry, RenameOutcome};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenameSummary {
    pub total: usize,
    pub changed: usize,
    pub unchanged: usize,
    pub renamed: usize,
    pub failed: usize,
}

impl RenameSummary {
    pub fn from_entries(entries: &[RenameEntry]) -> Self {
        let mut summary = Self {
            total: entries.len(),
            ..Self::default()
        };
        for entry in entries {
            if entry.changed {
                summary.changed += 1;
            } else {
                summary.unchanged += 1;
            }
            match entry.outcome {
                RenameOutcome::Renamed => summary.renamed += 1,
                RenameOutcome::Failed { .. } => summary.failed += 1,
                RenameOutcome::Unchanged | RenameOutcome::Planned => {}
            }
        }
        summary
    }
}

/// Live preview log: one block per file with the removed slice, the injected
/// text and the final name.
pub fn format_preview(entries: &[RenameEntry], injected: &str) -> String {
    if entries.is_empty() {
        return "No matching files found.\n".to_string();
    }

    let mut out = String::from("Live Preview:\n\n");
    for entry in entries {
        out.push_str(&format!("{}\n", entry.original_name));
        out.push_str(&format!(
            "  ↳ Replacing slice [{}:{}] → '{}' with '{}'\n",
            entry.slice_start, entry.slice_end, entry.removed_segment, injected
        ));
        out.push_str(&format!("  ↳ Final name: {}\n\n", entry.new_name));
    }
    out
}

/// Post-commit log. Dry-run entries are listed as pending, failures with
/// their reason.
pub fn format_commit(entries: &[RenameEntry]) -> String {
    let mut renamed = Vec::new();
    let mut planned = Vec::new();
    let mut failed = Vec::new();
    for entry in entries {
        match &entry.outcome {
            RenameOutcome::Renamed => renamed.push(entry),
            RenameOutcome::Planned => planned.push(entry),
            RenameOutcome::Failed { reason } => failed.push((entry, reason)),
            RenameOutcome::Unchanged => {}
        }
    }

    if renamed.is_empty() && planned.is_empty() && failed.is_empty() {
        return "No files were renamed.\n".to_string();
    }

    let mut out = String::new();
    if !renamed.is_empty() {
        out.push_str("Renamed files:\n\n");
        for entry in &renamed {
            out.push_str(&format!("{} → {}\n", entry.original_name, entry.new_name));
        }
    }
    if !planned.is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("Would rename (dry run):\n\n");
        for entry in &planned {
            out.push_str(&format!("{} → {}\n", entry.original_name, entry.new_name));
        }
    }
    if !failed.is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("Failed renames:\n\n");
        for (entry, reason) in &failed {
            out.push_str(&format!(
                "{} → {} ({})\n",
                entry.original_name, entry.new_name, reason
            ));
        }
    }
    out
}
