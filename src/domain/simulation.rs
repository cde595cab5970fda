//! Result of one simulation run.

use std::fmt;

use serde::Serialize;

use super::animal::Animal;
use super::perspective::{ImageState, VisionDetails, VisionPerspective};

/// Which of the two perspectives an event or action refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    /// Animal A observing animal B.
    A,
    /// Animal B observing animal A.
    B,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::A, Side::B];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Two animals and how each one sees the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub animal_a: Animal,
    pub animal_b: Animal,
    /// How A sees B.
    pub perspective_a: VisionPerspective,
    /// How B sees A.
    pub perspective_b: VisionPerspective,
}

impl SimulationResult {
    /// Result with text populated and both images loading.
    #[must_use]
    pub fn pending(animal_a: Animal, animal_b: Animal, details: VisionDetails) -> Self {
        Self {
            animal_a,
            animal_b,
            perspective_a: VisionPerspective::loading(details.perspective_a),
            perspective_b: VisionPerspective::loading(details.perspective_b),
        }
    }

    #[must_use]
    pub fn perspective(&self, side: Side) -> &VisionPerspective {
        match side {
            Side::A => &self.perspective_a,
            Side::B => &self.perspective_b,
        }
    }

    pub fn perspective_mut(&mut self, side: Side) -> &mut VisionPerspective {
        match side {
            Side::A => &mut self.perspective_a,
            Side::B => &mut self.perspective_b,
        }
    }

    /// The animal doing the looking on `side`.
    #[must_use]
    pub fn observer(&self, side: Side) -> Animal {
        match side {
            Side::A => self.animal_a,
            Side::B => self.animal_b,
        }
    }

    /// The animal being looked at on `side`.
    #[must_use]
    pub fn subject(&self, side: Side) -> Animal {
        match side {
            Side::A => self.animal_b,
            Side::B => self.animal_a,
        }
    }

    /// True once neither image is still loading.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !self.perspective_a.is_loading() && !self.perspective_b.is_loading()
    }

    /// Sides whose image ended up unavailable.
    #[must_use]
    pub fn unavailable_sides(&self) -> Vec<Side> {
        Side::BOTH
            .into_iter()
            .filter(|side| {
                matches!(
                    self.perspective(*side).image,
                    ImageState::Unavailable { .. }
                )
            })
            .collect()
    }
}
