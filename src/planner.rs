//! Turns relative and absolute angular requests into pulse trains.
//!
//! The pulse count of a move is never derived from the requested angle alone.
//! It is the phase distance between where the shaft is and the phase of the
//! absolute target angle, so rounding never accumulates over many moves.

use log::warn;

use crate::error::{MotorError, Result};
use crate::position::{Position, DEGREES_PER_REV, PHASES_PER_REV};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// `-1` is counter-clockwise, every other value clockwise.
    pub fn from_sign(sign: i64) -> Direction {
        match sign {
            -1 => Direction::CounterClockwise,
            _ => Direction::Clockwise,
        }
    }

    pub fn sign(self) -> i64 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    pub fn reversed(self) -> Direction {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// How an absolute move picks its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Shortest,
    Fixed(Direction),
}

impl Heading {
    /// `0` is the shorter arc, `-1` counter-clockwise, anything else clockwise.
    pub fn from_sign(sign: i64) -> Heading {
        match sign {
            0 => Heading::Shortest,
            other => Heading::Fixed(Direction::from_sign(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub pulses: u64,
    pub direction: Direction,
    pub target: Position,
}

/// Truncates a requested angle toward zero.
///
/// NaN and infinities are rejected rather than passed through.
pub fn degrees_from_f64(value: f64) -> Result<i64> {
    if !value.is_finite() {
        return Err(MotorError::InvalidArgument(format!(
            "angle {value} is not a number of degrees"
        )));
    }
    let truncated = value.trunc();
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return Err(MotorError::InvalidArgument(format!(
            "angle {value} is out of range"
        )));
    }
    if truncated != value {
        warn!("angle {value} truncated to {truncated}");
    }
    Ok(truncated as i64)
}

pub fn plan_rotate(from: Position, degrees: i64, direction: Direction) -> Result<Plan> {
    let direction = if degrees < 0 {
        direction.reversed()
    } else {
        direction
    };
    let magnitude = degrees.unsigned_abs();
    let rounds = magnitude / DEGREES_PER_REV as u64;
    // always < 360, so a single correction brings dst back into range
    let remainder = (magnitude % DEGREES_PER_REV as u64) as i64;

    let full = DEGREES_PER_REV as i64;
    let mut dst = from.angle() as i64 + remainder * direction.sign();
    if dst >= full {
        dst -= full;
    } else if dst < 0 {
        dst += full;
    }
    let target = Position::at(dst as u16);

    let mut delta = match direction {
        Direction::Clockwise => target.phase() as i64 - from.phase() as i64,
        Direction::CounterClockwise => from.phase() as i64 - target.phase() as i64,
    };
    if delta < 0 {
        delta += PHASES_PER_REV as i64;
    }

    let pulses = rounds
        .checked_mul(PHASES_PER_REV as u64)
        .and_then(|p| p.checked_add(delta as u64))
        .ok_or_else(|| {
            MotorError::InvalidArgument(format!("rotation of {degrees} degrees is too large"))
        })?;

    Ok(Plan {
        pulses,
        direction,
        target,
    })
}

/// Signed arc and direction that reach `target` from `from`.
///
/// The returned arc is always within one revolution.
pub fn resolve_turn(from: Position, target: i64, heading: Heading) -> (i64, Direction) {
    let full = DEGREES_PER_REV as i64;
    let target = target.rem_euclid(full);
    let turn = target - from.angle() as i64;

    match heading {
        Heading::Shortest => {
            if turn >= 0 {
                if turn <= full / 2 {
                    (turn, Direction::Clockwise)
                } else {
                    (full - turn, Direction::CounterClockwise)
                }
            } else if -turn <= full / 2 {
                (-turn, Direction::CounterClockwise)
            } else {
                (full + turn, Direction::Clockwise)
            }
        }
        Heading::Fixed(Direction::Clockwise) => (turn.rem_euclid(full), Direction::Clockwise),
        Heading::Fixed(Direction::CounterClockwise) => {
            ((-turn).rem_euclid(full), Direction::CounterClockwise)
        }
    }
}

pub fn plan_turn_to(from: Position, target: i64, heading: Heading) -> Result<Plan> {
    let (arc, direction) = resolve_turn(from, target, heading);
    plan_rotate(from, arc, direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(mut pos: Position, moves: &[(i64, Direction)]) -> Position {
        for &(degrees, direction) in moves {
            pos = plan_rotate(pos, degrees, direction).unwrap().target;
        }
        pos
    }

    #[test]
    fn nine_small_rotations() {
        let moves = [(25, Direction::Clockwise); 9];
        let pos = walk(Position::default(), &moves);
        assert_eq!(pos.angle(), 225);
        assert_eq!(pos.phase(), 2560);
    }

    #[test]
    fn first_rotation_pulses() {
        let plan = plan_rotate(Position::default(), 25, Direction::Clockwise).unwrap();
        assert_eq!(plan.pulses, 284);
        assert_eq!(plan.direction, Direction::Clockwise);
    }

    #[test]
    fn negative_angle_reverses_direction() {
        let from = Position::at(100);
        let a = plan_rotate(from, -25, Direction::Clockwise).unwrap();
        let b = plan_rotate(from, 25, Direction::CounterClockwise).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.target.angle(), 75);

        let c = plan_rotate(from, -25, Direction::CounterClockwise).unwrap();
        assert_eq!(c.direction, Direction::Clockwise);
        assert_eq!(c.target.angle(), 125);
    }

    #[test]
    fn wraps_across_zero() {
        let plan = plan_rotate(Position::at(10), 30, Direction::CounterClockwise).unwrap();
        assert_eq!(plan.target.angle(), 340);
        assert_eq!(plan.pulses, 342);

        let plan = plan_rotate(Position::at(350), 10, Direction::Clockwise).unwrap();
        assert_eq!(plan.target.angle(), 0);
        assert_eq!(plan.target.phase(), 0);
        assert_eq!(plan.pulses, 4096 - 3982);
    }

    #[test]
    fn full_rounds_add_whole_revolutions() {
        let plan = plan_rotate(Position::at(90), 360 * 3 + 90, Direction::Clockwise).unwrap();
        assert_eq!(plan.target.angle(), 180);
        assert_eq!(plan.pulses, 3 * 4096 + 1024);

        let plan = plan_rotate(Position::at(90), 360, Direction::CounterClockwise).unwrap();
        assert_eq!(plan.target, Position::at(90));
        assert_eq!(plan.pulses, 4096);
    }

    #[test]
    fn full_revolutions_never_drift() {
        let mut pos = Position::default();
        for _ in 0..1000 {
            let plan = plan_rotate(pos, 360, Direction::Clockwise).unwrap();
            assert_eq!(plan.pulses, 4096);
            pos = plan.target;
        }
        assert_eq!(pos, Position::default());
    }

    #[test]
    fn there_and_back_restores_position() {
        for start in [0, 1, 179, 225, 359] {
            for x in [0, 1, 7, 25, 180, 359, 360, 361, 1000, -1, -725] {
                let from = Position::at(start);
                let there = plan_rotate(from, x, Direction::Clockwise).unwrap();
                let back = plan_rotate(there.target, x, Direction::CounterClockwise).unwrap();
                assert_eq!(back.target, from, "start {start} x {x}");
                assert_eq!(back.pulses, there.pulses, "start {start} x {x}");
            }
        }
    }

    #[test]
    fn oversized_rotation_is_rejected() {
        let err = plan_rotate(Position::default(), i64::MIN, Direction::Clockwise).unwrap_err();
        assert!(matches!(err, MotorError::InvalidArgument(_)));
    }

    #[test]
    fn shortest_arc_from_zero() {
        for target in 0..360 {
            let (arc, direction) = resolve_turn(Position::default(), target, Heading::Shortest);
            assert!(arc <= 180);
            if target <= 180 {
                assert_eq!(direction, Direction::Clockwise, "target {target}");
                assert_eq!(arc, target);
            } else {
                assert_eq!(direction, Direction::CounterClockwise, "target {target}");
                assert_eq!(arc, 360 - target);
            }
        }
    }

    #[test]
    fn shortest_arc_going_back() {
        let from = Position::at(300);
        assert_eq!(
            resolve_turn(from, 200, Heading::Shortest),
            (100, Direction::CounterClockwise)
        );
        assert_eq!(
            resolve_turn(from, 10, Heading::Shortest),
            (70, Direction::Clockwise)
        );
    }

    #[test]
    fn explicit_heading_may_take_the_long_way() {
        let from = Position::at(225);
        assert_eq!(
            resolve_turn(from, 333, Heading::Fixed(Direction::Clockwise)),
            (108, Direction::Clockwise)
        );
        assert_eq!(
            resolve_turn(from, 333, Heading::Fixed(Direction::CounterClockwise)),
            (252, Direction::CounterClockwise)
        );
        assert_eq!(
            resolve_turn(from, 200, Heading::Fixed(Direction::Clockwise)),
            (335, Direction::Clockwise)
        );
        assert_eq!(
            resolve_turn(from, 225, Heading::Fixed(Direction::CounterClockwise)),
            (0, Direction::CounterClockwise)
        );
    }

    #[test]
    fn target_is_reduced_into_one_revolution() {
        let from = Position::default();
        assert_eq!(resolve_turn(from, 370, Heading::Shortest), (10, Direction::Clockwise));
        assert_eq!(
            resolve_turn(from, -10, Heading::Shortest),
            (10, Direction::CounterClockwise)
        );
        assert_eq!(resolve_turn(from, 720, Heading::Shortest).0, 0);
    }

    #[test]
    fn turn_to_333_clockwise() {
        let plan = plan_turn_to(Position::at(225), 333, Heading::Fixed(Direction::Clockwise))
            .unwrap();
        assert_eq!(plan.direction, Direction::Clockwise);
        assert_eq!(plan.target, Position::at(333));
        assert_eq!(plan.pulses, 3789 - 2560);
    }

    #[test]
    fn headings_from_signs() {
        assert_eq!(Heading::from_sign(0), Heading::Shortest);
        assert_eq!(Heading::from_sign(-1), Heading::Fixed(Direction::CounterClockwise));
        assert_eq!(Heading::from_sign(7), Heading::Fixed(Direction::Clockwise));
        assert_eq!(Direction::from_sign(0), Direction::Clockwise);
    }

    #[test]
    fn degrees_are_truncated() {
        assert_eq!(degrees_from_f64(25.9).unwrap(), 25);
        assert_eq!(degrees_from_f64(-25.9).unwrap(), -25);
        assert!(matches!(
            degrees_from_f64(f64::NAN),
            Err(MotorError::InvalidArgument(_))
        ));
        assert!(degrees_from_f64(f64::INFINITY).is_err());
        assert!(degrees_from_f64(1e300).is_err());
    }
}
