use anyhow::Result;
use batch_renamer_core::{
    commit, find_collisions, format_commit, format_preview, max_base_name_len, preview,
    ExtensionSet, RenameError, TransformParams,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

const HELP: &str = "\
commands:
  prefix <text>       set the prefix (no text clears it)
  suffix <text>       set the suffix
  find <text>         set the literal text to find
  replace <text>      set the replacement for found text
  inject <text>       set the text that replaces the slice
  start <n>           set the slice start
  end <n>             set the slice end
  slice <start> <end> set both slice bounds
  folder <path>       switch to another folder
  show                print the preview again
  commit              rename the files as previewed
  help                print this list
  quit                leave without renaming
";

const INVALID_FOLDER: &str = "No folder selected or folder is invalid.\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Prefix(String),
    Suffix(String),
    Find(String),
    Replace(String),
    Inject(String),
    Start(i64),
    End(i64),
    Slice(i64, i64),
    Folder(PathBuf),
    Show,
    Commit,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\r', '\n']).trim_start();
        let (name, rest) = line.split_once(' ').unwrap_or((line.trim_end(), ""));

        match name {
            "prefix" => Ok(Self::Prefix(rest.to_string())),
            "suffix" => Ok(Self::Suffix(rest.to_string())),
            "find" => Ok(Self::Find(rest.to_string())),
            "replace" => Ok(Self::Replace(rest.to_string())),
            "inject" => Ok(Self::Inject(rest.to_string())),
            "start" => parse_offset(rest).map(Self::Start),
            "end" => parse_offset(rest).map(Self::End),
            "slice" => {
                let mut parts = rest.split_whitespace();
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(start), Some(end), None) => {
                        Ok(Self::Slice(parse_offset(start)?, parse_offset(end)?))
                    }
                    _ => Err("usage: slice <start> <end>".to_string()),
                }
            }
            "folder" => {
                let path = rest.trim();
                if path.is_empty() {
                    return Err("usage: folder <path>".to_string());
                }
                Ok(Self::Folder(PathBuf::from(path)))
            }
            "" | "show" => Ok(Self::Show),
            "commit" => Ok(Self::Commit),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command: {other} (type `help`)")),
        }
    }
}

fn parse_offset(value: &str) -> Result<i64, String> {
    let value = value.trim();
    value
        .parse::<i64>()
        .map_err(|_| format!("not an integer: {value}"))
}

#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    Continue(String),
    Quit,
}

/// Interactive state: the folder and the parameters being edited. Every edit
/// re-renders the preview; nothing is renamed until `commit`.
#[derive(Debug)]
pub struct Session {
    folder: PathBuf,
    params: TransformParams,
    slider_max: usize,
}

impl Session {
    pub fn open(folder: PathBuf, extensions: ExtensionSet) -> Result<Self, RenameError> {
        let slider_max = max_base_name_len(&folder, &extensions)?;
        Ok(Self {
            folder,
            params: TransformParams {
                extensions,
                ..TransformParams::interactive()
            },
            slider_max,
        })
    }

    pub fn handle(&mut self, command: SessionCommand) -> Step {
        match command {
            SessionCommand::Prefix(value) => self.params.prefix = value,
            SessionCommand::Suffix(value) => self.params.suffix = value,
            SessionCommand::Find(value) => self.params.find = value,
            SessionCommand::Replace(value) => self.params.replace = value,
            SessionCommand::Inject(value) => self.params.slice_replacement = value,
            SessionCommand::Start(value) => self.params.slice_start = self.clamp_to_slider(value),
            SessionCommand::End(value) => self.params.slice_end = self.clamp_to_slider(value),
            SessionCommand::Slice(start, end) => {
                self.params.slice_start = self.clamp_to_slider(start);
                self.params.slice_end = self.clamp_to_slider(end);
            }
            SessionCommand::Folder(folder) => return self.switch_folder(folder),
            SessionCommand::Show => {}
            SessionCommand::Commit => return Step::Continue(self.commit()),
            SessionCommand::Help => return Step::Continue(HELP.to_string()),
            SessionCommand::Quit => return Step::Quit,
        }
        Step::Continue(self.render())
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "Slice Range: [{}:{}] (0..={})\n",
            self.params.slice_start, self.params.slice_end, self.slider_max
        );
        match preview(&self.folder, &self.params) {
            Ok(entries) => {
                out.push_str(&format_preview(&entries, &self.params.slice_replacement));
                for collision in find_collisions(&entries) {
                    out.push_str(&format!(
                        "warning: {} would be written by {}\n",
                        collision.new_name,
                        collision.sources.join(", ")
                    ));
                }
            }
            Err(RenameError::InvalidFolder { .. }) => out.push_str(INVALID_FOLDER),
            Err(err) => out.push_str(&format!("{err}\n")),
        }
        out
    }

    fn commit(&mut self) -> String {
        let params = TransformParams {
            dry_run: false,
            ..self.params.clone()
        };
        match commit(&self.folder, &params) {
            Ok(entries) => {
                if let Ok(max) = max_base_name_len(&self.folder, &self.params.extensions) {
                    self.slider_max = max;
                }
                format_commit(&entries)
            }
            Err(RenameError::InvalidFolder { .. }) => INVALID_FOLDER.to_string(),
            Err(err) => format!("{err}\n"),
        }
    }

    fn switch_folder(&mut self, folder: PathBuf) -> Step {
        match max_base_name_len(&folder, &self.params.extensions) {
            Ok(max) => {
                self.folder = folder;
                self.slider_max = max;
                self.params.slice_start = self.clamp_to_slider(self.params.slice_start);
                self.params.slice_end = self.clamp_to_slider(self.params.slice_end);
                Step::Continue(self.render())
            }
            Err(RenameError::InvalidFolder { .. }) => Step::Continue(INVALID_FOLDER.to_string()),
            Err(err) => Step::Continue(format!("{err}\n")),
        }
    }

    fn clamp_to_slider(&self, value: i64) -> i64 {
        let max = i64::try_from(self.slider_max).unwrap_or(i64::MAX);
        value.clamp(0, max)
    }
}

/// Reads commands line by line until `quit` or end of input.
pub fn run<R: BufRead, W: Write>(mut session: Session, input: R, mut out: W) -> Result<()> {
    out.write_all(session.render().as_bytes())?;
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        match line.parse::<SessionCommand>() {
            Ok(command) => match session.handle(command) {
                Step::Continue(text) => out.write_all(text.as_bytes())?,
                Step::Quit => return Ok(()),
            },
            Err(message) => writeln!(out, "{message}")?,
        }
        write!(out, "> ")?;
        out.flush()?;
    }

    Ok(())
}
