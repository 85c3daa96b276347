//! Source file reading with encoding fallback
//!
//! Kotlin corpora scraped from the wild are not uniformly UTF-8: a minority
//! of files carry latin-1, windows-1252, or UTF-16 content. The reader tries
//! a fixed priority list of encodings and returns the first decode that
//! succeeds without error.

use std::fs;
use std::path::Path;

use crate::error::{KtMineError, Result};

/// Read a source file, trying encodings in fixed priority order:
/// UTF-8, ISO-8859-1, windows-1252, UTF-16.
///
/// ISO-8859-1 assigns a character to every byte, so the chain cannot fall
/// through in practice; the `DecodeFailure` arm exists so the contract is
/// total.
pub fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;

    if let Ok(text) = String::from_utf8(bytes.clone()) {
        return Ok(text);
    }
    if let Some(text) = decode_latin1(&bytes) {
        return Ok(text);
    }
    if let Some(text) = decode_strict(encoding_rs::WINDOWS_1252, &bytes) {
        return Ok(text);
    }
    if let Some(text) = decode_strict(encoding_rs::UTF_16LE, &bytes) {
        return Ok(text);
    }

    Err(KtMineError::DecodeFailure {
        path: path.display().to_string(),
    })
}

/// ISO-8859-1: every byte maps 1:1 onto U+0000..U+00FF
fn decode_latin1(bytes: &[u8]) -> Option<String> {
    Some(bytes.iter().map(|&b| b as char).collect())
}

/// Decode with encoding_rs, rejecting any input that produced replacement
/// characters
fn decode_strict(encoding: &'static encoding_rs::Encoding, bytes: &[u8]) -> Option<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        None
    } else {
        Some(text.into_owned())
    }
}
