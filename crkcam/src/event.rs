/// Deci-degrees in one crank revolution
pub const DECI_DEG_PER_REV: u32 = 3_600;

/// Deci-degrees in one cam cycle, two crank revolutions
pub const CAM_CYCLE_DECI_DEG: u32 = 2 * DECI_DEG_PER_REV;

#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Edge {
    Falling,
    Rising,
}

impl Edge {
    /// Output level once the edge has happened, `true` is high.
    pub fn level_after(self) -> bool {
        self == Edge::Rising
    }

    pub fn level_before(self) -> bool {
        !self.level_after()
    }
}

impl core::ops::Not for Edge {
    type Output = Edge;

    fn not(self) -> Self::Output {
        match self {
            Edge::Rising => Edge::Falling,
            Edge::Falling => Edge::Rising,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WheelEvent {
    /// Position of the event on its wheel
    pub id: u8,
    /// Angle since the previous event, deci-degrees
    pub delta: u32,
    pub edge: Edge,
    /// `false` keeps the output frozen, used for missing teeth
    pub active: bool,
}
