//! Patches the generated project's `package.json` with collected answers.

use crate::{
    answers::{AnswerRecord, AnswerValue},
    constants::MANIFEST_FILENAME,
    error::{Error, Result},
};
use serde_json::{Map, Value};
use std::path::Path;

/// Manifest key a list answer may be written to
const LIST_KEY: &str = "keywords";

/// Answer fields that may be written into the manifest, and the key each one sets.
/// Nothing outside this table is ever written.
pub const MANIFEST_OVERLAY: &[(&str, &str)] = &[
    ("npmName", "name"),
    ("version", "version"),
    ("description", "description"),
    ("keywords", LIST_KEY),
];

/// Overlays answers onto `<target_dir>/package.json`.
///
/// Returns `false` without touching anything when the manifest does not exist.
pub fn patch_manifest<P: AsRef<Path>>(target_dir: P, answers: &AnswerRecord) -> Result<bool> {
    let path = target_dir.as_ref().join(MANIFEST_FILENAME);
    if !path.is_file() {
        log::debug!("No {MANIFEST_FILENAME} in {}, skipping patch", target_dir.as_ref().display());
        return Ok(false);
    }

    let content = std::fs::read_to_string(&path)?;
    let mut manifest = parse_manifest(&content).map_err(|reason| Error::ManifestParseError {
        path: path.display().to_string(),
        reason,
    })?;

    apply_overlay(&mut manifest, answers);

    let mut serialized = serde_json::to_string_pretty(&Value::Object(manifest))?;
    serialized.push('\n');
    std::fs::write(&path, serialized)?;
    log::info!("Patched {}", path.display());
    Ok(true)
}

fn parse_manifest(content: &str) -> std::result::Result<Map<String, Value>, String> {
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("expected a JSON object at the top level".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

/// Writes every answer with a manifest counterpart. Empty text answers and answers of
/// the wrong shape leave the key untouched.
pub fn apply_overlay(manifest: &mut Map<String, Value>, answers: &AnswerRecord) {
    for (field, key) in MANIFEST_OVERLAY {
        let Some(answer) = answers.get(field) else {
            continue;
        };

        let value = match answer {
            AnswerValue::Text(text) if *key != LIST_KEY && !text.is_empty() => {
                Value::String(text.clone())
            }
            AnswerValue::List(items) if *key == LIST_KEY => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
            other => {
                log::debug!("Not writing '{field}' ({other:?}) to manifest key '{key}'");
                continue;
            }
        };
        manifest.insert(key.to_string(), value);
    }
}
