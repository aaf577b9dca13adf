//! Text preparation and presentation around a pipeline run.
//!
//! Nothing here touches the cipher core: input is normalized before it is
//! handed to a pipeline, and output is padded and grouped for display.

use serde::{Deserialize, Serialize};

/// Display and normalization options, usually read from the `format` table
/// of a pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Keep the input's case instead of uppercasing it
    pub keep_case: bool,
    /// Keep digits, punctuation and spaces instead of dropping them
    pub allow_non_alpha: bool,
    /// Drop all whitespace after normalization
    pub remove_spaces: bool,
    /// Split output into space-separated groups of this size
    pub group_size: Option<usize>,
    /// Pad the final group to full size with this symbol
    pub pad_char: Option<char>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            keep_case: false,
            allow_non_alpha: false,
            remove_spaces: true,
            group_size: None,
            pad_char: None,
        }
    }
}

/// Uppercase (unless `keep_case`) and drop non-alphabetic characters
/// (unless `allow_non_alpha`).
pub fn normalize(text: &str, keep_case: bool, allow_non_alpha: bool) -> String {
    let cased = if keep_case {
        text.to_string()
    } else {
        text.to_uppercase()
    };

    if allow_non_alpha {
        cased
    } else {
        cased.chars().filter(|c| c.is_alphabetic()).collect()
    }
}

pub fn remove_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Right-pad `text` with `pad_char` up to `length` symbols.
pub fn pad_to_length(text: &str, length: usize, pad_char: char) -> String {
    let current = text.chars().count();
    let mut padded = text.to_string();
    padded.extend(std::iter::repeat_n(pad_char, length.saturating_sub(current)));
    padded
}

/// Split `text` into space-separated groups of `size` symbols.
/// A size of zero returns the text unchanged.
pub fn group(text: &str, size: usize) -> String {
    if size == 0 {
        return text.to_string();
    }

    let symbols: Vec<char> = text.chars().collect();
    symbols
        .chunks(size)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize raw input for a pipeline run.
pub fn prepare(text: &str, options: &FormatOptions) -> String {
    let normalized = normalize(text, options.keep_case, options.allow_non_alpha);
    if options.remove_spaces {
        remove_whitespace(&normalized)
    } else {
        normalized
    }
}

/// Pad and group pipeline output for display.
pub fn present(text: &str, options: &FormatOptions) -> String {
    let Some(size) = options.group_size.filter(|&size| size > 0) else {
        return text.to_string();
    };

    let padded = match options.pad_char {
        Some(pad_char) => {
            let length = text.chars().count();
            let remainder = length % size;
            if remainder == 0 {
                text.to_string()
            } else {
                pad_to_length(text, length + size - remainder, pad_char)
            }
        }
        None => text.to_string(),
    };

    group(&padded, size)
}
