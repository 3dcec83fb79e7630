// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components and shared field rules

pub mod comment;
pub mod photo;
pub mod update;

pub use comment::*;
pub use photo::*;
pub use update::*;

use chrono::{DateTime, SubsecRound, Utc};
use validator::ValidationError;

/// Display name used when a guest leaves their name empty
pub const ANONYMOUS: &str = "Anonymous";

/// Rejects strings that are empty once surrounding whitespace is removed
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Trimmed display name, falling back to `Anonymous`
pub(crate) fn display_name(name: Option<String>) -> String {
    name.map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| ANONYMOUS.to_string())
}

/// Creation timestamp at microsecond precision, the finest PostgreSQL keeps
pub(crate) fn record_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
