//! Storage key conventions.
//!
//! Pure string functions with no filesystem dependency. These define the
//! canonical layout of persisted client-side state.

use crate::error::CoreError;

pub const TRANSCRIPTS_PREFIX: &str = "transcripts/";

/// Longest encoded scope that still fits in a file name on common
/// filesystems once the prefix and extension are added.
pub const MAX_ENCODED_SCOPE: usize = 240;

/// Key of the transcript for one memorial within a viewer session.
///
/// Tribute ids are opaque and end up in file names, so they are
/// percent-encoded: `[A-Za-z0-9_-]` pass through, every other byte becomes
/// `%XX`. Distinct ids always map to distinct keys.
pub fn transcript(tribute_id: &str) -> Result<String, CoreError> {
    Ok(format!("{TRANSCRIPTS_PREFIX}{}.json", encode_scope(tribute_id)?))
}

/// File-name-safe form of a scope id.
pub fn encode_scope(id: &str) -> Result<String, CoreError> {
    if id.is_empty() {
        return Err(CoreError::InvalidScope("empty scope".to_string()));
    }

    let mut encoded = String::with_capacity(id.len());
    for byte in id.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }

    if encoded.len() > MAX_ENCODED_SCOPE {
        return Err(CoreError::InvalidScope(format!(
            "scope too long ({} bytes encoded)",
            encoded.len()
        )));
    }
    Ok(encoded)
}

/// Check a user-chosen name (such as a local session) that is used as a
/// directory name verbatim.
pub fn validate_scope(name: &str) -> Result<(), CoreError> {
    let valid = !name.is_empty()
        && name.len() <= 128
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(CoreError::InvalidScope(name.to_string()))
    }
}
