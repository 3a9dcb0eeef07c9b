use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use log::{debug, trace};

use crate::error::Result;
use crate::pins::Pins;

/// Drives the four coil lines of the motor.
pub trait Actuator {
    fn set_outputs(&mut self, pattern: [bool; 4]);
    /// De-energizes the coils and gives the lines back.
    fn release(&mut self);
    fn name(&self) -> String;
}

pub trait Clock {
    fn sleep(&mut self, delay: Duration);
}

pub struct ThreadClock;

impl Clock for ThreadClock {
    fn sleep(&mut self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

pub fn make_actuator(pins: &Pins) -> Result<Box<dyn Actuator>> {
    #[cfg(feature = "motor")]
    let actuator: Box<dyn Actuator> = Box::new(real_motor::Uln2003Actuator::new(pins)?);
    #[cfg(not(feature = "motor"))]
    let actuator: Box<dyn Actuator> = Box::new(MockActuator { pins: *pins });
    return Ok(actuator);
}

#[cfg(feature = "motor")]
pub mod real_motor {
    use super::*;
    use rppal::gpio::{Gpio, Level, OutputPin};

    pub struct Uln2003Actuator {
        pins: [OutputPin; 4],
    }

    impl Uln2003Actuator {
        pub fn new(pins: &Pins) -> rppal::gpio::Result<Uln2003Actuator> {
            let gpio = Gpio::new()?;
            let [in1, in2, in3, in4] = pins.bcm();
            let actuator = Uln2003Actuator {
                pins: [
                    gpio.get(in1)?.into_output_low(),
                    gpio.get(in2)?.into_output_low(),
                    gpio.get(in3)?.into_output_low(),
                    gpio.get(in4)?.into_output_low(),
                ],
            };
            return Ok(actuator);
        }
    }

    impl Actuator for Uln2003Actuator {
        fn set_outputs(&mut self, pattern: [bool; 4]) {
            for (pin, &high) in self.pins.iter_mut().zip(pattern.iter()) {
                pin.write(if high { Level::High } else { Level::Low });
            }
        }

        fn release(&mut self) {
            for pin in &mut self.pins {
                pin.set_low();
            }
        }

        fn name(&self) -> String {
            return "28BYJ-48 on ULN2003".to_string();
        }
    }
}

pub struct MockActuator {
    pins: Pins,
}

impl Actuator for MockActuator {
    fn set_outputs(&mut self, pattern: [bool; 4]) {
        trace!("pins {:?} <- {:?}", self.pins.bcm(), pattern);
    }

    fn release(&mut self) {
        debug!("released pins {:?}", self.pins.bcm());
    }

    fn name(&self) -> String {
        return "Mock Motor".to_string();
    }
}

/// What a [`RecordingActuator`] has been asked to do.
#[derive(Debug, Default)]
pub struct Recording {
    pub patterns: Vec<[bool; 4]>,
    pub releases: usize,
}

/// Keeps every pattern it is given, for inspection after the driver is gone.
#[derive(Default)]
pub struct RecordingActuator {
    recording: Rc<RefCell<Recording>>,
}

impl RecordingActuator {
    pub fn new() -> (RecordingActuator, Rc<RefCell<Recording>>) {
        let recording = Rc::new(RefCell::new(Recording::default()));
        let actuator = RecordingActuator {
            recording: Rc::clone(&recording),
        };
        (actuator, recording)
    }
}

impl Actuator for RecordingActuator {
    fn set_outputs(&mut self, pattern: [bool; 4]) {
        self.recording.borrow_mut().patterns.push(pattern);
    }

    fn release(&mut self) {
        self.recording.borrow_mut().releases += 1;
    }

    fn name(&self) -> String {
        return "Recording Motor".to_string();
    }
}

/// Records requested delays instead of sleeping.
#[derive(Default)]
pub struct RecordingClock {
    delays: Rc<RefCell<Vec<Duration>>>,
}

impl RecordingClock {
    pub fn new() -> (RecordingClock, Rc<RefCell<Vec<Duration>>>) {
        let delays = Rc::new(RefCell::new(Vec::new()));
        let clock = RecordingClock {
            delays: Rc::clone(&delays),
        };
        (clock, delays)
    }
}

impl Clock for RecordingClock {
    fn sleep(&mut self, delay: Duration) {
        self.delays.borrow_mut().push(delay);
    }
}
