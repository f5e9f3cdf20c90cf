mod apply;
mod config;
mod error;
mod params;
mod planner;
mod report;
mod transform;

pub use apply::commit;
pub use config::{app_paths, load_config, load_config_from, save_config_to, AppConfig, AppPaths};
pub use error::RenameError;
pub use params::{ExtensionSet, TransformParams, BATCH_EXTENSIONS, INTERACTIVE_EXTENSIONS};
pub use planner::{
    find_collisions, list_eligible_files, max_base_name_len, preview, Collision, RenameEntry,
    RenameOutcome,
};
pub use report::{format_commit, format_preview, RenameSummary};
pub use transform::{compute_new_name, compute_slice, split_extension, NameOutcome, SliceOutcome};
