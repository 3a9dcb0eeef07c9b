//! Half-step pulse sequencing.

use std::time::Duration;

use log::trace;

use crate::motor::{Actuator, Clock};
use crate::planner::Direction;

/// Coil patterns for IN1..IN4, one row per half step.
pub const PULSE_TABLE: [[bool; 4]; 8] = [
    [true, false, false, true],
    [true, false, false, false],
    [true, true, false, false],
    [false, true, false, false],
    [false, true, true, false],
    [false, false, true, false],
    [false, false, true, true],
    [false, false, false, true],
];

/// Delay after each pulse, slowest first.
///
/// A 28BYJ-48 pulls in at about 500 pps and pulls out at about 900 pps, so
/// level 8 starts reliably while level 9 only holds once the shaft turns.
pub const SPEED_TABLE: [Duration; 10] = [
    Duration::from_millis(10),
    Duration::from_millis(9),
    Duration::from_millis(8),
    Duration::from_millis(7),
    Duration::from_millis(6),
    Duration::from_millis(5),
    Duration::from_millis(4),
    Duration::from_millis(3),
    Duration::from_millis(2),
    Duration::from_millis(1),
];

pub const MAX_SPEED: u8 = (SPEED_TABLE.len() - 1) as u8;

pub fn clamp_speed(level: u32) -> u8 {
    level.min(MAX_SPEED as u32) as u8
}

pub fn step_delay(speed: u8) -> Duration {
    SPEED_TABLE[clamp_speed(speed as u32) as usize]
}

#[derive(Debug, Default)]
pub struct Sequencer {
    step: u8,
}

impl Sequencer {
    pub fn new() -> Sequencer {
        Sequencer { step: 0 }
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn pattern(&self) -> [bool; 4] {
        PULSE_TABLE[self.step as usize]
    }

    /// Moves one row along the table, wrapping at both ends.
    pub fn advance(&mut self, direction: Direction) -> [bool; 4] {
        let len = PULSE_TABLE.len() as i64;
        let next = (self.step as i64 + direction.sign()).rem_euclid(len);
        self.step = next as u8;
        self.pattern()
    }

    /// Emits `pulses` patterns, each followed by the delay for `speed`.
    pub fn run(
        &mut self,
        pulses: u64,
        direction: Direction,
        speed: u8,
        actuator: &mut dyn Actuator,
        clock: &mut dyn Clock,
    ) {
        let delay = step_delay(speed);
        for _ in 0..pulses {
            let pattern = self.advance(direction);
            trace!("step {} -> {:?}", self.step, pattern);
            actuator.set_outputs(pattern);
            clock.sleep(delay);
        }
    }
}
