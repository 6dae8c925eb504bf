// Shared workout model for the integration tests

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use model_forms::{Enumeration, Model, RelatedId};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Enumeration)]
#[enumeration(name = "WorkoutKind")]
pub enum Kind {
    #[default]
    Run,
    Lift,
    Swim,
}

/// Eccentric-concentric tempo, stored as text like `3-1`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tempo {
    pub down: u8,
    pub up: u8,
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.down, self.up)
    }
}

impl FromStr for Tempo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (down, up) = s.split_once('-').ok_or_else(|| format!("expected D-U, got {}", s))?;
        Ok(Tempo {
            down: down.trim().parse().map_err(|_| format!("bad tempo {}", s))?,
            up: up.trim().parse().map_err(|_| format!("bad tempo {}", s))?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Model)]
pub struct WorkoutRecord {
    pub id: String,
    pub title: String,
    pub date: DateTime<Utc>,
    pub reps: i32,
    pub weight_kg: Option<f64>,
    pub completed: bool,
    pub kind: Kind,
    pub coach: Option<RelatedId>,
    #[model(text)]
    pub tempo: Tempo,
    #[model(skip)]
    pub cached_volume: f64,
}

pub fn leg_day() -> WorkoutRecord {
    WorkoutRecord {
        id: "w-1".into(),
        title: "Leg day".into(),
        date: Utc.with_ymd_and_hms(2024, 3, 9, 7, 30, 0).unwrap(),
        reps: 8,
        weight_kg: Some(102.5),
        completed: true,
        kind: Kind::Lift,
        coach: Some(RelatedId::new("coach-7")),
        tempo: Tempo { down: 3, up: 1 },
        cached_volume: 0.0,
    }
}
