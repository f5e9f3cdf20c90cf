use crate::error::RenameError;
use crate::params::{ExtensionSet, TransformParams};
use crate::transform::{compute_new_name, split_extension};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenameOutcome {
    Unchanged,
    Planned,
    Renamed,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameEntry {
    pub original_name: String,
    pub new_name: String,
    pub changed: bool,
    pub removed_segment: String,
    pub slice_start: usize,
    pub slice_end: usize,
    pub outcome: RenameOutcome,
}

/// A destination name claimed by more than one entry of the same batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collision {
    pub new_name: String,
    pub sources: Vec<String>,
}

/// Names of the regular files directly inside `folder` that end with one of
/// `extensions`, sorted by name.
pub fn list_eligible_files(
    folder: &Path,
    extensions: &ExtensionSet,
) -> Result<Vec<String>, RenameError> {
    ensure_folder(folder)?;

    let entries = fs::read_dir(folder).map_err(|source| RenameError::ReadFolder {
        path: folder.to_path_buf(),
        source,
    })?;

    let mut out = Vec::new();
    let mut skipped = 0usize;
    for entry in entries {
        let entry = entry.map_err(|source| RenameError::ReadFolder {
            path: folder.to_path_buf(),
            source,
        })?;
        if entry.path().is_dir() {
            continue;
        }

        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                let lossy = raw.to_string_lossy();
                if extensions.matches(&lossy) {
                    warn!("skipping file name that is not valid UTF-8: {}", lossy);
                }
                skipped += 1;
                continue;
            }
        };

        if extensions.matches(&name) {
            out.push(name);
        } else {
            skipped += 1;
        }
    }
    out.sort();

    debug!(
        "{} eligible files in {} ({} skipped)",
        out.len(),
        folder.display(),
        skipped
    );
    Ok(out)
}

/// Computes the rename for every eligible file without touching the disk.
pub fn preview(folder: &Path, params: &TransformParams) -> Result<Vec<RenameEntry>, RenameError> {
    let files = list_eligible_files(folder, &params.extensions)?;
    Ok(files
        .into_iter()
        .map(|name| plan_entry(name, params))
        .collect())
}

/// Longest base name (in chars) among eligible files, or 0 when there are none.
/// Front ends use it as the upper bound of their slice controls.
pub fn max_base_name_len(folder: &Path, extensions: &ExtensionSet) -> Result<usize, RenameError> {
    let files = list_eligible_files(folder, extensions)?;
    Ok(files
        .iter()
        .map(|name| split_extension(name).0.chars().count())
        .max()
        .unwrap_or(0))
}

/// Destinations that more than one entry ends up with, in first-seen order.
/// Unchanged entries count because they keep occupying their name.
pub fn find_collisions(entries: &[RenameEntry]) -> Vec<Collision> {
    let mut index = HashMap::<&str, usize>::new();
    let mut groups = Vec::<Collision>::new();

    for entry in entries {
        match index.get(entry.new_name.as_str()) {
            Some(&pos) => groups[pos].sources.push(entry.original_name.clone()),
            None => {
                index.insert(entry.new_name.as_str(), groups.len());
                groups.push(Collision {
                    new_name: entry.new_name.clone(),
                    sources: vec![entry.original_name.clone()],
                });
            }
        }
    }

    groups.retain(|group| group.sources.len() > 1);
    groups
}

fn ensure_folder(folder: &Path) -> Result<(), RenameError> {
    if !folder.is_dir() {
        return Err(RenameError::InvalidFolder {
            path: folder.to_path_buf(),
        });
    }
    Ok(())
}

fn plan_entry(original_name: String, params: &TransformParams) -> RenameEntry {
    let (base, extension) = split_extension(&original_name);
    let computed = compute_new_name(base, extension, params);
    let changed = computed.final_name != original_name;

    RenameEntry {
        original_name,
        new_name: computed.final_name,
        changed,
        removed_segment: computed.removed_segment,
        slice_start: computed.effective_start,
        slice_end: computed.effective_end,
        outcome: if changed {
            RenameOutcome::Planned
        } else {
            RenameOutcome::Unchanged
        },
    }
}
