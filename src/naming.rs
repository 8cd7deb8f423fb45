//! Output filename derivation for the command-line tool
//!
//! `notes.txt` encodes to `encode_notes.bin`; `encode_notes.bin` decodes to
//! `decode_notes`. An existing file is never overwritten: `_1`, `_2`, ... is
//! appended to the stem until the name is free.

use std::path::{Path, PathBuf};

pub const ENCODED_PREFIX: &str = "encode_";
pub const DECODED_PREFIX: &str = "decode_";
pub const ENCODED_EXTENSION: &str = "bin";

fn file_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn first_free(dir: &Path, candidate: impl Fn(Option<u32>) -> String) -> PathBuf {
    let first = dir.join(candidate(None));
    if !first.exists() {
        return first;
    }
    (1..)
        .map(|n| dir.join(candidate(Some(n))))
        .find(|path| !path.exists())
        .unwrap_or(first)
}

/// Name for the artifact produced from `input`, placed in `dir`.
pub fn encoded_path(input: &Path, dir: &Path) -> PathBuf {
    let stem = file_stem(input);
    first_free(dir, |n| match n {
        None => format!("{ENCODED_PREFIX}{stem}.{ENCODED_EXTENSION}"),
        Some(n) => format!("{ENCODED_PREFIX}{stem}_{n}.{ENCODED_EXTENSION}"),
    })
}

/// Name for the bytes recovered from `artifact`, placed in `dir`.
pub fn decoded_path(artifact: &Path, dir: &Path) -> PathBuf {
    let stem = file_stem(artifact);
    let stem = stem.strip_prefix(ENCODED_PREFIX).unwrap_or(stem.as_str());
    first_free(dir, |n| match n {
        None => format!("{DECODED_PREFIX}{stem}"),
        Some(n) => format!("{DECODED_PREFIX}{stem}_{n}"),
    })
}
