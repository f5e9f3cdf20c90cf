/// Default extensions for the one-shot batch rename path.
pub const BATCH_EXTENSIONS: &[&str] = &[".exr", ".jpg", ".png", ".jpeg", ".tiff", ".bmp"];

/// Default extensions for the interactive preview/commit path. Includes `.exe`,
/// which the batch path does not.
pub const INTERACTIVE_EXTENSIONS: &[&str] =
    &[".exr", ".jpg", ".png", ".jpeg", ".tiff", ".bmp", ".exe"];

/// Case-insensitive set of file extensions, stored lower-cased with a leading dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSet {
    extensions: Vec<String>,
}

impl ExtensionSet {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut extensions = Vec::<String>::new();
        for value in values {
            let Some(normalized) = normalize_extension(value.as_ref()) else {
                continue;
            };
            if !extensions.contains(&normalized) {
                extensions.push(normalized);
            }
        }
        Self { extensions }
    }

    /// Parses a comma-separated list such as `".jpg, PNG,tiff"`.
    pub fn parse_list(input: &str) -> Self {
        Self::new(input.split(','))
    }

    pub fn batch_default() -> Self {
        Self::new(BATCH_EXTENSIONS)
    }

    pub fn interactive_default() -> Self {
        Self::new(INTERACTIVE_EXTENSIONS)
    }

    pub fn matches(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        self.extensions
            .iter()
            .any(|ext| lower.ends_with(ext.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self::batch_default()
    }
}

fn normalize_extension(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "." {
        return None;
    }
    let lower = trimmed.to_lowercase();
    if lower.starts_with('.') {
        Some(lower)
    } else {
        Some(format!(".{}", lower))
    }
}

/// Everything a single preview or commit needs. Assembled by the front end and
/// passed by reference; nothing in the core mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransformParams {
    pub prefix: String,
    pub suffix: String,
    pub find: String,
    pub replace: String,
    /// Character offset; any value is accepted and clamped by the engine.
    pub slice_start: i64,
    pub slice_end: i64,
    pub slice_replacement: String,
    pub extensions: ExtensionSet,
    pub dry_run: bool,
}

impl TransformParams {
    /// Defaults for the interactive path, which uses [`INTERACTIVE_EXTENSIONS`].
    pub fn interactive() -> Self {
        Self {
            extensions: ExtensionSet::interactive_default(),
            ..Self::default()
        }
    }
}
