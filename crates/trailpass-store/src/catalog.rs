//! The static trail catalog. A real deployment would load this from a
//! resort feed; the four seeded trails match the demo data set.

use serde::Serialize;

use crate::record::Difficulty;

/// One trail on the mountain.
#[derive(Debug, Clone, Serialize)]
pub struct Trail {
    pub id: &'static str,
    pub name: &'static str,
    pub difficulty: Difficulty,
    pub location: &'static str,
    /// Run length in kilometres.
    pub length: f64,
    /// Vertical drop in metres.
    pub elevation: u32,
}

/// All known trails, easiest first.
static TRAILS: [Trail; 4] = [
    Trail {
        id: "1",
        name: "Bunny Slope",
        difficulty: Difficulty::Beginner,
        location: "North Face",
        length: 0.5,
        elevation: 50,
    },
    Trail {
        id: "2",
        name: "Bluebird Run",
        difficulty: Difficulty::Intermediate,
        location: "South Ridge",
        length: 2.1,
        elevation: 300,
    },
    Trail {
        id: "3",
        name: "Black Diamond",
        difficulty: Difficulty::Expert,
        location: "Western Bowl",
        length: 3.5,
        elevation: 650,
    },
    Trail {
        id: "4",
        name: "Extreme Couloir",
        difficulty: Difficulty::Extreme,
        location: "Backcountry",
        length: 4.2,
        elevation: 850,
    },
];

/// All known trails.
pub fn trails() -> &'static [Trail] {
    &TRAILS
}
