//! Absolute shaft orientation, kept in both the degree and the pulse domain.

/// Pulses per output-shaft revolution in half-step mode.
pub const PHASES_PER_REV: u32 = 4096;
pub const DEGREES_PER_REV: u32 = 360;

/// `round(4096 * angle / 360)`, rounding halves up.
///
/// Returns 4096 for 360; store only values reduced modulo [`PHASES_PER_REV`].
pub fn angle_to_phase(angle: u32) -> u32 {
    (PHASES_PER_REV * angle + DEGREES_PER_REV / 2) / DEGREES_PER_REV
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    angle: u16,
    phase: u16,
}

impl Position {
    /// Position for an angle already in `[0, 360)`.
    pub fn at(angle: u16) -> Position {
        debug_assert!((angle as u32) < DEGREES_PER_REV);
        let phase = angle_to_phase(angle as u32) % PHASES_PER_REV;
        Position {
            angle,
            phase: phase as u16,
        }
    }

    pub fn angle(&self) -> u16 {
        self.angle
    }

    pub fn phase(&self) -> u16 {
        self.phase
    }
}
