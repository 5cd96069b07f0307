//! Portable preset documents for the radar console.
//!
//! `{ version, timestamp, config, nodes }` as JSON. Unknown fields are
//! ignored; `version` is recorded for future migrations but not enforced.

use crate::radar::{AudioNode, ConsoleConfig};
use serde::{Deserialize, Serialize};

pub const PRESET_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PresetDocument {
    pub version: u32,
    /// Epoch milliseconds at save time.
    pub timestamp: u64,
    pub config: ConsoleConfig,
    pub nodes: Vec<AudioNode>,
}

#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    #[error("invalid preset document: {0}")]
    InvalidDocument(#[from] serde_json::Error),
    #[error("invalid node `{id}`: {reason}")]
    InvalidNode { id: String, reason: &'static str },
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

/// Snapshot config and nodes with runtime node state neutralized.
pub fn save(config: &ConsoleConfig, nodes: &[AudioNode], timestamp: u64) -> PresetDocument {
    PresetDocument {
        version: PRESET_VERSION,
        timestamp,
        config: *config,
        nodes: nodes.iter().map(AudioNode::neutralized).collect(),
    }
}

/// Pretty-printed JSON for a document.
pub fn to_json(doc: &PresetDocument) -> Result<String, PresetError> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Parse and validate a document; nodes come back neutralized.
///
/// On error the caller keeps its current state.
pub fn load(json: &str) -> Result<(ConsoleConfig, Vec<AudioNode>), PresetError> {
    let doc: PresetDocument = serde_json::from_str(json)?;
    if doc.version != PRESET_VERSION {
        log::warn!("[preset] version {} differs from {}", doc.version, PRESET_VERSION);
    }
    validate_config(&doc.config)?;
    for node in &doc.nodes {
        validate_node(node)?;
    }
    Ok((
        doc.config,
        doc.nodes.iter().map(AudioNode::neutralized).collect(),
    ))
}

fn validate_config(config: &ConsoleConfig) -> Result<(), PresetError> {
    if !config.tempo.is_finite() || config.tempo <= 0.0 {
        return Err(PresetError::InvalidConfig("tempo must be positive"));
    }
    Ok(())
}

fn validate_node(node: &AudioNode) -> Result<(), PresetError> {
    let in_unit = |v: f32| v.is_finite() && (0.0..=1.0).contains(&v);
    let reason = if node.id.is_empty() {
        Some("empty id")
    } else if !in_unit(node.x) || !in_unit(node.y) {
        Some("position outside the unit square")
    } else if !node.frequency.is_finite() || node.frequency <= 0.0 {
        Some("frequency must be positive")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(PresetError::InvalidNode {
            id: node.id.clone(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Download name for a preset saved at `timestamp` (epoch ms).
pub fn preset_file_name(timestamp: u64) -> String {
    format!("SENSORIUM_PRESET_{timestamp}.json")
}
