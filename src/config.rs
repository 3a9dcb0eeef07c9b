use std::io::Read;

use serde::{Deserialize, Serialize};
use serde_json;

use crate::error::{MotorError, Result};
use crate::pins::{PinNumbering, Pins};
use crate::sequencer::MAX_SPEED;

pub const DEFAULT_CONFIG_PATH: &str = "motor.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotorConfig {
    pub numbering: PinNumbering,
    pub pins: Vec<i64>,
    pub default_speed: u8,
}

impl Default for MotorConfig {
    fn default() -> Self {
        MotorConfig {
            numbering: PinNumbering::Bcm,
            pins: vec![19, 22, 23, 24],
            default_speed: MAX_SPEED,
        }
    }
}

impl MotorConfig {
    pub fn pins(&self) -> Result<Pins> {
        Pins::new(self.numbering, &self.pins)
    }

    pub fn validate(&self) -> Result<()> {
        self.pins()?;
        if self.default_speed > MAX_SPEED {
            return Err(MotorError::Configuration(format!(
                "default speed {} is outside 0..={MAX_SPEED}",
                self.default_speed
            )));
        }
        Ok(())
    }
}

fn decorate_with_path(e: impl std::fmt::Display, path: &std::path::Path) -> MotorError {
    let p = path.display();
    return MotorError::Configuration(format!("{p}: {e}"));
}

pub fn parse_config(text: &str) -> Result<MotorConfig> {
    let config: MotorConfig =
        serde_json::from_str(text).map_err(|e| MotorError::Configuration(e.to_string()))?;
    config.validate()?;
    return Ok(config);
}

pub fn load_config(path: &std::path::Path) -> Result<MotorConfig> {
    let file = std::fs::File::open(path).map_err(|e| decorate_with_path(e, path))?;
    let mut reader = std::io::BufReader::new(file);

    let mut buffer = String::new();
    reader
        .read_to_string(&mut buffer)
        .map_err(|e| decorate_with_path(e, path))?;

    parse_config(&buffer).map_err(|e| match e {
        MotorError::Configuration(msg) => decorate_with_path(msg, path),
        other => other,
    })
}
