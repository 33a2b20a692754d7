//! `KEY=VALUE` overrides applied onto thumbnail options.
//!
//! Keys are option field names (`art_style`, `color_palette`, ...). Every
//! field is a string on the wire, so values are taken verbatim unless they
//! are a quoted JSON string. The merged result is re-validated against the
//! option enumerations.
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::workflow::thumbnail::ThumbnailOptions;

pub fn parse_set_pairs(items: &[String]) -> AppResult<Vec<(String, Value)>> {
    let mut out = Vec::new();
    for s in items {
        let Some((k, val)) = s.split_once('=') else {
            return Err(AppError::validation(format!("Invalid --set '{}', expected KEY=VALUE", s)));
        };
        out.push((k.trim().to_string(), parse_value(val)));
    }
    Ok(out)
}

pub fn parse_value(src: &str) -> Value {
    let src = src.trim();
    if let Ok(Value::String(s)) = serde_json::from_str::<Value>(src) {
        return Value::String(s);
    }
    Value::String(src.to_string())
}

/// Replaces `key` in the top-level object `root`. Returns false when the
/// key is not already present.
pub fn apply_set(root: &mut Value, key: &str, new_val: Value) -> bool {
    match root.get_mut(key) {
        Some(slot) => {
            *slot = new_val;
            true
        }
        None => false,
    }
}

/// Applies `--set` overrides onto `options`, rejecting unknown fields and
/// values outside their enumeration.
pub fn apply_overrides(options: &ThumbnailOptions, sets: &[String]) -> AppResult<ThumbnailOptions> {
    if sets.is_empty() {
        return Ok(options.clone());
    }
    let mut value = serde_json::to_value(options)?;
    for (key, new_val) in parse_set_pairs(sets)? {
        if !apply_set(&mut value, &key, new_val) {
            return Err(AppError::validation(format!("Unknown option '{}'", key)));
        }
    }
    serde_json::from_value(value).map_err(|e| AppError::validation(e.to_string()))
}
