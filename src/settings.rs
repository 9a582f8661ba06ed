//! User preferences
//!
//! A motion preset plus accessibility and debug switches. Hosts may persist
//! the JSON form however they like; the engine never does.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tuning::Tuning;

/// How skittish the element is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MotionPreset {
    Calm,
    #[default]
    Default,
    Frantic,
}

impl MotionPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            MotionPreset::Calm => "Calm",
            MotionPreset::Default => "Default",
            MotionPreset::Frantic => "Frantic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "calm" => Some(MotionPreset::Calm),
            "default" | "normal" => Some(MotionPreset::Default),
            "frantic" => Some(MotionPreset::Frantic),
            _ => None,
        }
    }

    /// Tuning for this preset
    pub fn tuning(&self) -> Tuning {
        let base = Tuning::default();
        match self {
            MotionPreset::Calm => Tuning {
                fear_radius: 200.0,
                hard_radius: 80.0,
                max_speed: 900.0,
                max_accel: 3000.0,
                idle_max_speed: 60.0,
                idle_max_accel: 180.0,
                ..base
            },
            MotionPreset::Default => base,
            MotionPreset::Frantic => Tuning {
                fear_radius: 340.0,
                hard_radius: 150.0,
                max_speed: 2200.0,
                max_accel: 8000.0,
                lateral_jitter: 0.3,
                ..base
            },
        }
    }
}

/// Preferences that shape how the engine is built and driven
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub preset: MotionPreset,
    /// Keep the element still (platform "prefers reduced motion")
    pub reduced_motion: bool,
    /// Draw radii and readouts
    pub debug_overlay: bool,
    /// Field-level overrides applied on top of the preset
    pub overrides: Option<serde_json::Value>,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Preset tuning with overrides merged in, validated
    pub fn effective_tuning(&self) -> Result<Tuning, ConfigError> {
        let mut tuning = self.preset.tuning();
        match &self.overrides {
            None | Some(serde_json::Value::Null) => {}
            Some(serde_json::Value::Object(overrides)) => {
                let mut merged = serde_json::to_value(tuning)?;
                if let serde_json::Value::Object(fields) = &mut merged {
                    for (key, value) in overrides {
                        fields.insert(key.clone(), value.clone());
                    }
                }
                tuning = serde_json::from_value(merged)?;
            }
            Some(other) => {
                return Err(ConfigError::OverridesNotObject {
                    kind: json_kind(other),
                });
            }
        }
        tuning.validate()?;
        Ok(tuning)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
