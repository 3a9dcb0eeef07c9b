//! A single half-step motor: tracked position, step state and the hardware
//! it drives.

use log::{debug, info};

use crate::config::MotorConfig;
use crate::error::Result;
use crate::motor::{make_actuator, Actuator, Clock, ThreadClock};
use crate::planner::{self, Direction, Heading, Plan};
use crate::position::Position;
use crate::sequencer::{clamp_speed, Sequencer};

/// What a move dispatched to the coils.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    pub pulses: u64,
    pub direction: Direction,
    pub speed: u8,
    pub angle: u16,
    pub phase: u16,
}

/// Owns the actuator for its whole lifetime and releases it on drop.
pub struct Driver {
    position: Position,
    sequencer: Sequencer,
    default_speed: u8,
    actuator: Box<dyn Actuator>,
    clock: Box<dyn Clock>,
}

impl Driver {
    /// The current shaft position becomes the zero reference.
    pub fn new(actuator: Box<dyn Actuator>, clock: Box<dyn Clock>, default_speed: u32) -> Driver {
        let mut driver = Driver {
            position: Position::default(),
            sequencer: Sequencer::new(),
            default_speed: clamp_speed(default_speed),
            actuator,
            clock,
        };
        // hold the shaft on the first row
        let pattern = driver.sequencer.pattern();
        driver.actuator.set_outputs(pattern);
        driver
    }

    pub fn from_config(config: &MotorConfig) -> Result<Driver> {
        config.validate()?;
        let actuator = make_actuator(&config.pins()?)?;
        Ok(Driver::new(
            actuator,
            Box::new(ThreadClock),
            config.default_speed as u32,
        ))
    }

    /// Turns by `degrees` relative to the current position.
    ///
    /// A negative angle reverses `direction`. Whole revolutions are turned
    /// out in full even though they leave the tracked angle unchanged.
    pub fn rotate(
        &mut self,
        degrees: i64,
        direction: Direction,
        speed: Option<u32>,
    ) -> Result<MoveReport> {
        let plan = planner::plan_rotate(self.position, degrees, direction)?;
        Ok(self.execute(plan, speed))
    }

    /// Turns to `target` degrees from the zero reference.
    pub fn turn_to(
        &mut self,
        target: i64,
        heading: Heading,
        speed: Option<u32>,
    ) -> Result<MoveReport> {
        let plan = planner::plan_turn_to(self.position, target, heading)?;
        Ok(self.execute(plan, speed))
    }

    /// Declares the current shaft position to be zero without moving.
    pub fn zero(&mut self) {
        debug!("zeroed at angle {}", self.position.angle());
        self.position = Position::default();
    }

    pub fn angle(&self) -> u16 {
        self.position.angle()
    }

    pub fn phase(&self) -> u16 {
        self.position.phase()
    }

    pub fn step(&self) -> u8 {
        self.sequencer.step()
    }

    pub fn default_speed(&self) -> u8 {
        self.default_speed
    }

    pub fn set_default_speed(&mut self, speed: u32) {
        self.default_speed = clamp_speed(speed);
    }

    pub fn actuator_name(&self) -> String {
        self.actuator.name()
    }

    fn execute(&mut self, plan: Plan, speed: Option<u32>) -> MoveReport {
        let speed = speed.map_or(self.default_speed, clamp_speed);
        self.position = plan.target;

        info!(
            "turning {} pulses {:?} at speed {}",
            plan.pulses, plan.direction, speed
        );
        self.sequencer.run(
            plan.pulses,
            plan.direction,
            speed,
            self.actuator.as_mut(),
            self.clock.as_mut(),
        );
        debug!(
            "now at angle {} phase {}",
            self.position.angle(),
            self.position.phase()
        );

        MoveReport {
            pulses: plan.pulses,
            direction: plan.direction,
            speed,
            angle: self.position.angle(),
            phase: self.position.phase(),
        }
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        self.actuator.release();
    }
}
