use crate::params::TransformParams;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceOutcome {
    pub result: String,
    pub removed_segment: String,
    pub effective_start: usize,
    pub effective_end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameOutcome {
    pub final_name: String,
    pub removed_segment: String,
    pub effective_start: usize,
    pub effective_end: usize,
}

/// Replaces the character range `[start, end)` of `name` with `replacement`.
///
/// Both bounds are clamped to `[0, name.chars().count()]` and swapped when
/// reversed, so every input pair is valid. Offsets count `char`s, not bytes.
pub fn compute_slice(name: &str, start: i64, end: i64, replacement: &str) -> SliceOutcome {
    let len = name.chars().count();
    let mut start = clamp_offset(start, len);
    let mut end = clamp_offset(end, len);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }

    let start_byte = byte_offset(name, start);
    let end_byte = byte_offset(name, end);

    let mut result = String::with_capacity(name.len() + replacement.len());
    result.push_str(&name[..start_byte]);
    result.push_str(replacement);
    result.push_str(&name[end_byte..]);

    SliceOutcome {
        result,
        removed_segment: name[start_byte..end_byte].to_string(),
        effective_start: start,
        effective_end: end,
    }
}

/// Computes the new file name for `original_base` + `extension`.
///
/// Order matters: find/replace runs first, the slice is taken from its
/// output, and prefix/suffix wrap the sliced result.
pub fn compute_new_name(
    original_base: &str,
    extension: &str,
    params: &TransformParams,
) -> NameOutcome {
    let replaced = replace_literal(original_base, &params.find, &params.replace);
    let sliced = compute_slice(
        &replaced,
        params.slice_start,
        params.slice_end,
        &params.slice_replacement,
    );

    NameOutcome {
        final_name: format!(
            "{}{}{}{}",
            params.prefix, sliced.result, params.suffix, extension
        ),
        removed_segment: sliced.removed_segment,
        effective_start: sliced.effective_start,
        effective_end: sliced.effective_end,
    }
}

/// Splits a file name at its last `.`, keeping the dot on the extension.
/// Leading dots never start an extension, so `.png` has none.
pub fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(pos) if file_name[..pos].chars().any(|c| c != '.') => {
            (&file_name[..pos], &file_name[pos..])
        }
        _ => (file_name, ""),
    }
}

fn replace_literal(value: &str, find: &str, replace: &str) -> String {
    if find.is_empty() {
        return value.to_string();
    }
    value.replace(find, replace)
}

fn clamp_offset(value: i64, len: usize) -> usize {
    if value <= 0 {
        return 0;
    }
    usize::try_from(value).map_or(len, |v| v.min(len))
}

fn byte_offset(value: &str, char_index: usize) -> usize {
    value
        .char_indices()
        .nth(char_index)
        .map_or(value.len(), |(pos, _)| pos)
}
