//! Field checks applied on save.

use regex::Regex;
use std::sync::OnceLock;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};

/// Longest accepted display name, in characters.
pub const MAX_NAME_CHARS: usize = 128;

fn id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Literal pattern, checked by the tests below.
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_\-.]{1,64}$").expect("valid id pattern"))
}

pub(crate) fn validate_id(field: &'static str, id: &str) -> CatalogResult<()> {
    if id_pattern().is_match(id) {
        Ok(())
    } else {
        Err(CatalogError::validation(
            field,
            format!(
                "'{}' must be 1-64 characters of letters, digits, '_', '-' or '.'",
                id
            ),
        ))
    }
}

pub(crate) fn validate_name(name: &str) -> CatalogResult<()> {
    if name.trim().is_empty() {
        return Err(CatalogError::validation("name", "must not be empty"));
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(CatalogError::validation(
            "name",
            format!("must be at most {} characters", MAX_NAME_CHARS),
        ));
    }
    Ok(())
}

pub(crate) fn validate_supplier_account(supplier_account: &str) -> CatalogResult<()> {
    if supplier_account.trim().is_empty() {
        return Err(CatalogError::validation(
            "supplier_account",
            "must not be empty",
        ));
    }
    Ok(())
}

/// Returns the entity's ID after checking it, or a fresh one when unset.
pub(crate) fn resolve_id(field: &'static str, id: Option<&str>) -> CatalogResult<String> {
    match id {
        Some(id) => {
            validate_id(field, id)?;
            Ok(id.to_string())
        }
        None => Ok(Uuid::new_v4().simple().to_string()),
    }
}
