//! Response shape normalization
//!
//! List endpoints have been observed returning a bare array, or an object
//! with the array under one of several keys. This boundary adapts whatever
//! arrives into a typed list, drops entries that fail minimal shape
//! validation, and never errors on malformed input: the worst outcome is an
//! empty list plus a diagnostics flag.
//!
//! The pattern exists to tolerate an unstable upstream contract; new
//! endpoints should use one canonical envelope and skip this entirely.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Candidate keys searched, in order, when a list arrives wrapped in an
/// object
pub const LIST_KEYS: [&str; 5] = ["data", "items", "orders", "invoices", "inventory"];

/// Outcome of normalizing one list payload
#[derive(Debug, Clone)]
pub struct Normalized<T> {
    /// Entries that passed shape validation
    pub items: Vec<T>,
    /// Entries dropped for failing validation
    pub dropped: usize,
    /// Set when the payload matched none of the accepted shapes
    pub malformed: bool,
}

impl<T> Normalized<T> {
    fn empty(malformed: bool) -> Self {
        Self {
            items: Vec::new(),
            dropped: 0,
            malformed,
        }
    }
}

/// How a non-list object payload is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleObject {
    /// Promote a lone object to a one-element list (endpoints where that is
    /// a documented possibility)
    Promote,
    /// Treat it as malformed and yield an empty list
    Reject,
}

/// Extract the raw entry list from a payload of unstable shape; `None`
/// means the payload matched no accepted shape
fn extract_entries(payload: Value, single: SingleObject) -> Option<Vec<Value>> {
    match payload {
        Value::Array(entries) => Some(entries),
        Value::Object(map) => {
            for key in LIST_KEYS {
                if let Some(Value::Array(entries)) = map.get(key) {
                    return Some(entries.clone());
                }
            }
            match single {
                SingleObject::Promote => Some(vec![Value::Object(map)]),
                SingleObject::Reject => None,
            }
        }
        // Scalars, null: nothing usable
        _ => None,
    }
}

/// Minimal shape check before attempting typed deserialization: an entry
/// must be an object carrying a non-empty string identity field
fn has_identity(entry: &Value) -> bool {
    entry
        .get("_id")
        .and_then(Value::as_str)
        .map(|id| !id.is_empty())
        .unwrap_or(false)
}

/// Normalize a list payload into typed entries.
///
/// Entries missing their identity field or failing to deserialize (wrong
/// type for a numeric field, missing required field) are dropped and
/// counted rather than propagated downstream.
pub fn normalize_list<T: DeserializeOwned>(payload: Value, single: SingleObject) -> Normalized<T> {
    let entries = match extract_entries(payload, single) {
        Some(entries) => entries,
        None => {
            tracing::warn!("list payload matched no accepted shape");
            return Normalized::empty(true);
        }
    };

    let mut items = Vec::with_capacity(entries.len());
    let mut dropped = 0usize;
    for entry in entries {
        if !has_identity(&entry) {
            dropped += 1;
            continue;
        }
        match serde_json::from_value::<T>(entry) {
            Ok(item) => items.push(item),
            Err(e) => {
                tracing::warn!(error = %e, "dropping entry that failed shape validation");
                dropped += 1;
            }
        }
    }

    if dropped > 0 {
        tracing::warn!(dropped, "list response contained invalid entries");
    }

    Normalized {
        items,
        dropped,
        malformed: false,
    }
}
