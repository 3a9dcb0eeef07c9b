//! Position tracking and half-step sequencing for a 4-phase unipolar stepper
//! (28BYJ-48 on a ULN2003 board).

pub mod config;
pub mod driver;
pub mod error;
pub mod motor;
pub mod pins;
pub mod planner;
pub mod position;
pub mod sequencer;
pub mod server;

pub use driver::{Driver, MoveReport};
pub use error::MotorError;
pub use planner::{Direction, Heading};
