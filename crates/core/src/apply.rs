use crate::error::RenameError;
use crate::params::TransformParams;
use crate::planner::{preview, RenameEntry, RenameOutcome};
use log::{debug, warn};
use std::fs;
use std::io;
use std::path::{is_separator, Path};

/// Computes the same entries as [`preview`] and, unless `params.dry_run` is
/// set, renames every changed file inside `folder`.
///
/// Renames are independent. A failure is recorded on its entry as
/// [`RenameOutcome::Failed`] and the remaining files are still attempted.
/// Two sources mapping to the same destination are both attempted; what
/// happens to the second is up to the platform's `rename`.
pub fn commit(folder: &Path, params: &TransformParams) -> Result<Vec<RenameEntry>, RenameError> {
    let mut entries = preview(folder, params)?;
    if params.dry_run {
        return Ok(entries);
    }

    for entry in entries.iter_mut().filter(|entry| entry.changed) {
        entry.outcome = match rename_entry(folder, entry) {
            Ok(()) => {
                debug!("renamed {} -> {}", entry.original_name, entry.new_name);
                RenameOutcome::Renamed
            }
            Err(err) => {
                warn!("{err}");
                RenameOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        };
    }

    Ok(entries)
}

fn rename_entry(folder: &Path, entry: &RenameEntry) -> Result<(), RenameError> {
    let failed = |source: io::Error| RenameError::RenameFailed {
        from: entry.original_name.clone(),
        to: entry.new_name.clone(),
        source,
    };

    if !is_plain_file_name(&entry.new_name) {
        return Err(failed(io::Error::new(
            io::ErrorKind::InvalidInput,
            "new name must be a plain file name inside the folder",
        )));
    }

    fs::rename(
        folder.join(&entry.original_name),
        folder.join(&entry.new_name),
    )
    .map_err(failed)
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.chars().any(is_separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str, body: &[u8]) {
        fs::write(dir.join(name), body).expect("write fixture");
    }

    fn dir_listing(dir: &Path) -> BTreeSet<String> {
        fs::read_dir(dir)
            .expect("read dir")
            .flatten()
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .collect()
    }

    fn prefix_params(prefix: &str) -> TransformParams {
        TransformParams {
            prefix: prefix.to_string(),
            ..TransformParams::default()
        }
    }

    #[test]
    fn commit_renames_changed_files() {
        let temp = tempdir().expect("tempdir");
        touch(temp.path(), "a.jpg", b"A");
        touch(temp.path(), "b.png", b"B");
        touch(temp.path(), "keep.txt", b"T");

        let entries = commit(temp.path(), &prefix_params("IMG_")).expect("commit");

        assert!(entries
            .iter()
            .all(|entry| entry.outcome == RenameOutcome::Renamed));
        assert_eq!(
            dir_listing(temp.path()),
            BTreeSet::from([
                "IMG_a.jpg".to_string(),
                "IMG_b.png".to_string(),
                "keep.txt".to_string()
            ])
        );
        assert_eq!(
            fs::read(temp.path().join("IMG_a.jpg")).expect("read renamed"),
            b"A"
        );
    }

    #[test]
    fn commit_skips_unchanged_entries() {
        let temp = tempdir().expect("tempdir");
        touch(temp.path(), "a_old.jpg", b"A");
        touch(temp.path(), "b.jpg", b"B");

        let params = TransformParams {
            find: "_old".to_string(),
            ..TransformParams::default()
        };
        let entries = commit(temp.path(), &params).expect("commit");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].new_name, "a.jpg");
        assert_eq!(entries[0].outcome, RenameOutcome::Renamed);
        assert_eq!(entries[1].original_name, "b.jpg");
        assert_eq!(entries[1].outcome, RenameOutcome::Unchanged);
        assert!(temp.path().join("b.jpg").exists());
    }

    #[test]
    fn dry_run_matches_preview_and_leaves_disk_alone() {
        let temp = tempdir().expect("tempdir");
        touch(temp.path(), "a.jpg", b"A");
        touch(temp.path(), "b.jpg", b"B");
        let before = dir_listing(temp.path());

        let params = TransformParams {
            suffix: "_final".to_string(),
            dry_run: true,
            ..TransformParams::default()
        };
        let committed = commit(temp.path(), &params).expect("dry-run commit");
        let previewed = preview(temp.path(), &params).expect("preview");

        assert_eq!(committed, previewed);
        assert!(committed
            .iter()
            .all(|entry| entry.outcome == RenameOutcome::Planned));
        assert_eq!(dir_listing(temp.path()), before);
    }

    #[test]
    fn failed_rename_does_not_stop_the_batch() {
        let temp = tempdir().expect("tempdir");
        touch(temp.path(), "a.jpg", b"A");
        touch(temp.path(), "b.jpg", b"B");

        let blocked = temp.path().join("X_a.jpg");
        fs::create_dir(&blocked).expect("create blocking dir");
        touch(&blocked, "keep.txt", b"x");

        let entries = commit(temp.path(), &prefix_params("X_")).expect("commit");

        assert_eq!(entries.len(), 2);
        match &entries[0].outcome {
            RenameOutcome::Failed { reason } => {
                assert!(reason.contains("failed to rename a.jpg -> X_a.jpg"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(entries[1].outcome, RenameOutcome::Renamed);
        assert!(temp.path().join("a.jpg").exists());
        assert!(temp.path().join("X_b.jpg").exists());
    }

    #[test]
    fn new_name_with_separator_is_rejected_per_file() {
        let temp = tempdir().expect("tempdir");
        touch(temp.path(), "a.jpg", b"A");
        fs::create_dir(temp.path().join("sub")).expect("create sub");

        let entries = commit(temp.path(), &prefix_params("sub/")).expect("commit");

        assert!(matches!(entries[0].outcome, RenameOutcome::Failed { .. }));
        assert!(temp.path().join("a.jpg").exists());
        assert!(!temp.path().join("sub").join("a.jpg").exists());
    }

    #[cfg(unix)]
    #[test]
    fn colliding_destinations_are_both_attempted() {
        let temp = tempdir().expect("tempdir");
        touch(temp.path(), "a_1.jpg", b"first");
        touch(temp.path(), "a_2.jpg", b"second");

        let params = TransformParams {
            slice_start: 1,
            slice_end: 3,
            ..TransformParams::default()
        };
        let entries = commit(temp.path(), &params).expect("commit");

        assert_eq!(entries.len(), 2);
        assert!(entries
            .iter()
            .all(|entry| entry.new_name == "a.jpg" && entry.outcome == RenameOutcome::Renamed));
        assert_eq!(
            dir_listing(temp.path()),
            BTreeSet::from(["a.jpg".to_string()])
        );
        assert_eq!(
            fs::read(temp.path().join("a.jpg")).expect("read"),
            b"second"
        );
    }

    #[test]
    fn invalid_folder_fails_before_any_work() {
        let temp = tempdir().expect("tempdir");
        let err = commit(&temp.path().join("nope"), &TransformParams::default())
            .expect_err("invalid folder");
        assert!(matches!(err, RenameError::InvalidFolder { .. }));
    }
}
