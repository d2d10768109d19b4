//! Class and display name derivation

use std::path::Path;

/// Base name of a file: directory and last extension stripped
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Pseudo-class name for a shader base name
///
/// The first character is uppercased and the rest lowercased, then hyphens become
/// underscores so the result is a valid C++ identifier: `bloom-blur` -> `Bloom_blur`.
pub fn class_name(stem: &str) -> String {
    capitalize(stem).replace('-', "_")
}

/// Human-readable name for the `\brief` line: `Bloom_blur` -> `Bloom blur`
pub fn display_name(class_name: &str) -> String {
    class_name.replace('_', " ")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
