pub static DEFAULT_SERVER_PORT: &str = "12345";

pub mod command {
    use serde;

    #[derive(Debug, PartialEq, serde::Deserialize, serde::Serialize)]
    pub enum Command {
        Status,
        Zero,
        Rotate(Rotate),
        TurnTo(TurnTo),
    }

    /// Relative move. A negative `degrees` flips `direction`.
    #[derive(Debug, PartialEq, serde::Deserialize, serde::Serialize)]
    pub struct Rotate {
        pub degrees: f64,
        /// `1` clockwise, `-1` counter-clockwise, anything else is clockwise.
        #[serde(default = "clockwise")]
        pub direction: i64,
        #[serde(default)]
        pub speed: Option<u32>,
    }

    /// Absolute move relative to the zero reference.
    #[derive(Debug, PartialEq, serde::Deserialize, serde::Serialize)]
    pub struct TurnTo {
        pub degrees: f64,
        /// `0` picks the shorter arc.
        #[serde(default)]
        pub direction: i64,
        #[serde(default)]
        pub speed: Option<u32>,
    }

    fn clockwise() -> i64 {
        1
    }
}

pub mod response {
    use serde;

    #[derive(Debug, PartialEq, serde::Deserialize, serde::Serialize)]
    pub enum Response {
        Ok,
        Error(String),
        Moved(Move),
        Status(Status),
    }

    #[derive(Debug, PartialEq, serde::Deserialize, serde::Serialize)]
    pub struct Move {
        pub pulses: u64,
        pub direction: i64,
        pub speed: u8,
        pub angle: u16,
        pub phase: u16,
    }

    #[derive(Debug, PartialEq, serde::Deserialize, serde::Serialize)]
    pub struct Status {
        pub actuator: String,
        pub angle: u16,
        pub phase: u16,
        pub step: u8,
        pub default_speed: u8,
    }
}
