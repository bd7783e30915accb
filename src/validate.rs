//! Input validation for the generator pipeline. All errors here are fatal;
//! the caller validates before any file is written.

use anyhow::{Result, anyhow};
use regex::Regex;

const IDENTIFIER_PATTERN: &str = r"^[\w-]+$";
const DESCRIPTION_PATTERN: &str = r"^[\w\s.,'-]*$";

/// Accepts any positive length and converts it for use as a count.
pub fn sequence_length(raw: i64) -> Result<usize> {
    if raw <= 0 {
        return Err(anyhow!("Sequence length must be positive, got {raw}"));
    }
    Ok(raw as usize)
}

/// Identifiers may contain letters, digits, '_' and '-' only.
pub fn identifier(id: &str) -> Result<()> {
    let re = Regex::new(IDENTIFIER_PATTERN)
        .map_err(|e| anyhow!("Invalid identifier pattern: {e}"))?;
    if re.is_match(id) {
        Ok(())
    } else {
        Err(anyhow!(
            "Sequence identifier may only contain letters, digits, '_' and '-', got '{id}'"
        ))
    }
}

/// Descriptions may contain letters, digits, '_', whitespace and . , ' -
/// An empty description is accepted.
pub fn description(text: &str) -> Result<()> {
    let re = Regex::new(DESCRIPTION_PATTERN)
        .map_err(|e| anyhow!("Invalid description pattern: {e}"))?;
    if re.is_match(text) {
        Ok(())
    } else {
        Err(anyhow!(
            "Sequence description may only contain letters, digits, whitespace and . , ' - but got '{text}'"
        ))
    }
}
