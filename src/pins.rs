//! The four coil lines of a ULN2003 board and the header pins they sit on.

use serde::{Deserialize, Serialize};

use crate::error::{MotorError, Result};

/// Physical header pin -> BCM GPIO number on a 40 pin Raspberry Pi header.
const BOARD_TO_BCM: [(u8, u8); 26] = [
    (3, 2),
    (5, 3),
    (7, 4),
    (8, 14),
    (10, 15),
    (11, 17),
    (12, 18),
    (13, 27),
    (15, 22),
    (16, 23),
    (18, 24),
    (19, 10),
    (21, 9),
    (22, 25),
    (23, 11),
    (24, 8),
    (26, 7),
    (29, 5),
    (31, 6),
    (32, 12),
    (33, 13),
    (35, 19),
    (36, 16),
    (37, 26),
    (38, 20),
    (40, 21),
];

const BCM_RANGE: std::ops::RangeInclusive<i64> = 2..=27;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinNumbering {
    #[default]
    Bcm,
    Board,
}

/// Coil lines IN1..IN4, always stored as BCM GPIO numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pins {
    bcm: [u8; 4],
}

impl Pins {
    pub fn new(numbering: PinNumbering, ids: &[i64]) -> Result<Pins> {
        if ids.len() != 4 {
            return Err(MotorError::Configuration(format!(
                "a 4-phase motor needs exactly 4 pins, got {}",
                ids.len()
            )));
        }
        let mut bcm = [0_u8; 4];
        for (slot, &id) in bcm.iter_mut().zip(ids) {
            *slot = to_bcm(numbering, id)?;
        }
        Ok(Pins { bcm })
    }

    pub fn parse(numbering: PinNumbering, list: &str) -> Result<Pins> {
        Pins::new(numbering, &parse_list(list)?)
    }

    pub fn bcm(&self) -> [u8; 4] {
        self.bcm
    }
}

/// Parses a comma separated list such as `19,22,23,24`.
pub fn parse_list(list: &str) -> Result<Vec<i64>> {
    list.split(',')
        .map(|s| {
            s.trim().parse::<i64>().map_err(|_| {
                MotorError::Configuration(format!("pin '{}' is not an integer", s.trim()))
            })
        })
        .collect()
}

fn to_bcm(numbering: PinNumbering, id: i64) -> Result<u8> {
    match numbering {
        PinNumbering::Bcm if BCM_RANGE.contains(&id) => Ok(id as u8),
        PinNumbering::Board => BOARD_TO_BCM
            .iter()
            .find(|(board, _)| *board as i64 == id)
            .map(|&(_, bcm)| bcm)
            .ok_or_else(|| {
                MotorError::Configuration(format!("pin {id} is not a GPIO header pin"))
            }),
        PinNumbering::Bcm => Err(MotorError::Configuration(format!(
            "pin {id} is not a valid BCM GPIO number"
        ))),
    }
}
