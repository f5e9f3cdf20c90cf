mod logger;
mod session;

use anyhow::{bail, Result};
use batch_renamer_core::{
    app_paths, commit, find_collisions, format_commit, format_preview, load_config,
    load_config_from, preview, save_config_to, AppConfig, ExtensionSet, RenameEntry, RenameSummary,
    TransformParams,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use session::Session;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "batch-renamer", version)]
#[command(about = "Batch-rename image files with prefix, suffix, find/replace and slice edits")]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,
    /// Read settings from this file instead of the OS config directory
    #[arg(long, global = true)]
    config_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the computed names without renaming anything
    Preview(TransformArgs),
    /// Rename the files (nothing is touched with --dry-run)
    Rename(RenameArgs),
    /// Edit parameters interactively and commit when the preview looks right
    Session(SessionArgs),
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
struct TransformArgs {
    #[arg(long)]
    folder: PathBuf,
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    prefix: String,
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    suffix: String,
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    find: String,
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    replace: String,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    slice_start: i64,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    slice_end: i64,
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    slice_replacement: String,
    /// Comma-separated, e.g. `.jpg,.png`
    #[arg(long, value_delimiter = ',')]
    extensions: Vec<String>,
    #[arg(long, value_enum)]
    output: Option<OutputFormat>,
}

#[derive(Debug, Args)]
struct RenameArgs {
    #[command(flatten)]
    transform: TransformArgs,
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

#[derive(Debug, Args)]
struct SessionArgs {
    #[arg(long)]
    folder: PathBuf,
    #[arg(long, value_delimiter = ',')]
    extensions: Vec<String>,
}

#[derive(Debug, Args)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    Show,
    /// Write the default settings to the config file
    Init {
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

impl TransformArgs {
    fn to_params(&self, config: &AppConfig, dry_run: bool) -> TransformParams {
        TransformParams {
            prefix: self.prefix.clone(),
            suffix: self.suffix.clone(),
            find: self.find.clone(),
            replace: self.replace.clone(),
            slice_start: self.slice_start,
            slice_end: self.slice_end,
            slice_replacement: self.slice_replacement.clone(),
            extensions: resolve_extensions(
                &self.extensions,
                config.batch_extension_set(),
                ExtensionSet::batch_default(),
            ),
            dry_run,
        }
    }

    fn output_format(&self, config: &AppConfig) -> OutputFormat {
        self.output.unwrap_or_else(|| {
            <OutputFormat as ValueEnum>::from_str(&config.output, true)
                .unwrap_or(OutputFormat::Table)
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);
    let config_file = cli.config_file.as_deref();

    match cli.command {
        Commands::Preview(args) => cmd_preview(args, &read_config(config_file)?),
        Commands::Rename(args) => cmd_rename(args, &read_config(config_file)?),
        Commands::Session(args) => cmd_session(args, &read_config(config_file)?),
        Commands::Config(config) => match config.action {
            ConfigAction::Show => cmd_config_show(config_file),
            ConfigAction::Init { force } => cmd_config_init(config_file, force),
        },
    }
}

fn read_config(config_file: Option<&Path>) -> Result<AppConfig> {
    match config_file {
        Some(path) => load_config_from(path),
        None => load_config(),
    }
}

fn config_path(config_file: Option<&Path>) -> Result<PathBuf> {
    match config_file {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(app_paths()?.config_path),
    }
}

fn cmd_preview(args: TransformArgs, config: &AppConfig) -> Result<()> {
    let params = args.to_params(config, false);
    let entries = preview(&args.folder, &params)?;

    match args.output_format(config) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Table => print!("{}", format_preview(&entries, &params.slice_replacement)),
    }

    warn_collisions(&entries);
    let summary = RenameSummary::from_entries(&entries);
    eprintln!(
        "preview: {} of {} files would be renamed. Nothing was changed.",
        summary.changed, summary.total
    );
    Ok(())
}

fn cmd_rename(args: RenameArgs, config: &AppConfig) -> Result<()> {
    let params = args.transform.to_params(config, args.dry_run);
    let entries = commit(&args.transform.folder, &params)?;

    match args.transform.output_format(config) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Table => print!("{}", format_commit(&entries)),
    }

    warn_collisions(&entries);
    let summary = RenameSummary::from_entries(&entries);
    if params.dry_run {
        eprintln!(
            "dry run: {} of {} files would be renamed. Drop --dry-run to apply.",
            summary.changed, summary.total
        );
    } else {
        eprintln!(
            "done: {} renamed, {} failed, {} unchanged",
            summary.renamed, summary.failed, summary.unchanged
        );
    }
    Ok(())
}

fn cmd_session(args: SessionArgs, config: &AppConfig) -> Result<()> {
    let extensions = resolve_extensions(
        &args.extensions,
        config.interactive_extension_set(),
        ExtensionSet::interactive_default(),
    );
    let session = Session::open(args.folder, extensions)?;
    session::run(session, io::stdin().lock(), io::stdout().lock())
}

fn cmd_config_show(config_file: Option<&Path>) -> Result<()> {
    let path = config_path(config_file)?;
    let config = load_config_from(&path)?;
    println!("config file: {}", path.display());
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

fn cmd_config_init(config_file: Option<&Path>, force: bool) -> Result<()> {
    let path = config_path(config_file)?;
    if path.exists() && !force {
        bail!(
            "config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    save_config_to(&path, &AppConfig::default())?;
    println!("wrote {}", path.display());
    Ok(())
}

/// Explicit `--extensions` win, then the config file, then the built-in set.
fn resolve_extensions(
    requested: &[String],
    configured: ExtensionSet,
    fallback: ExtensionSet,
) -> ExtensionSet {
    let requested = ExtensionSet::new(requested);
    if !requested.is_empty() {
        return requested;
    }
    if !configured.is_empty() {
        return configured;
    }
    fallback
}

fn warn_collisions(entries: &[RenameEntry]) {
    for collision in find_collisions(entries) {
        eprintln!(
            "warning: {} is the target of several files: {}",
            collision.new_name,
            collision.sources.join(", ")
        );
    }
}
