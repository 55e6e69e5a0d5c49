//! Reconciliation of an imported package list with the stored one.

use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::domain::model::Package;
use crate::error::{Error, Result};

/// How an import is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Append packages whose id is not stored yet.
    Merge,
    /// Discard the stored list and use the imported one verbatim.
    Replace,
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportMode::Merge => f.write_str("merge"),
            ImportMode::Replace => f.write_str("replace"),
        }
    }
}

impl FromStr for ImportMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "merge" => Ok(ImportMode::Merge),
            "r" | "replace" => Ok(ImportMode::Replace),
            other => Err(format!("unknown import mode '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub packages: Vec<Package>,
    /// Number of incoming packages that were appended.
    pub added: usize,
}

/// Appends the incoming packages whose id is not already present.
///
/// Existing packages keep their order and come first. An id repeated inside
/// `incoming` is only taken once.
pub fn merge(existing: &[Package], incoming: Vec<Package>) -> MergeOutcome {
    let mut seen: HashSet<String> = existing.iter().map(|p| p.id.clone()).collect();
    let mut packages = existing.to_vec();
    let mut added = 0;

    for pkg in incoming {
        if seen.insert(pkg.id.clone()) {
            packages.push(pkg);
            added += 1;
        }
    }

    MergeOutcome { packages, added }
}

/// The imported list becomes the whole collection.
pub fn replace(incoming: Vec<Package>) -> Vec<Package> {
    incoming
}

/// Checks the shape of an import payload.
///
/// Only the first entry is inspected: it must carry a non-empty `id` and an
/// `efficiency` key (`null` stands for an unbounded efficiency).
pub fn validate_import(payload: &Value) -> Result<()> {
    let entries = payload
        .as_array()
        .ok_or_else(|| Error::format("expected a list of packages"))?;

    let Some(first) = entries.first() else {
        return Ok(());
    };

    let has_id = match first.get("id") {
        Some(Value::String(id)) => !id.is_empty(),
        Some(Value::Number(n)) => n.as_f64() != Some(0.0),
        _ => false,
    };
    if !has_id {
        return Err(Error::format("the first package has no id"));
    }

    if first.get("efficiency").is_none() {
        return Err(Error::format("the first package has no efficiency"));
    }

    Ok(())
}

/// Parses and validates an import file's text.
pub fn parse_import(text: &str) -> Result<Vec<Package>> {
    let payload: Value = serde_json::from_str(text)?;
    decode_import(payload)
}

/// Validates an already parsed payload and decodes it into packages.
pub fn decode_import(payload: Value) -> Result<Vec<Package>> {
    validate_import(&payload)?;
    let packages: Vec<Package> = serde_json::from_value(normalize_ids(payload))?;
    Ok(packages)
}

/// Numeric ids are accepted and kept as their decimal text.
fn normalize_ids(mut payload: Value) -> Value {
    if let Some(entries) = payload.as_array_mut() {
        for entry in entries {
            if let Some(Value::Number(n)) = entry.get("id") {
                let text = n.to_string();
                entry["id"] = Value::String(text);
            }
        }
    }
    payload
}
