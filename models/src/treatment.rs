// models/src/treatment.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog entry for a billable treatment/service. Independent of bills:
/// edits here never touch the snapshots already captured on bills.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Treatment {
    pub id: Uuid,
    pub name: String,
    pub cost: f64,
    pub duration: String,
}

/// Create / update payload for a catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTreatment {
    pub name: String,
    pub cost: f64,
    pub duration: String,
}

impl Treatment {
    pub fn from_new(new: NewTreatment) -> Self {
        Treatment {
            id: Uuid::new_v4(),
            name: new.name,
            cost: new.cost,
            duration: new.duration,
        }
    }

    pub fn apply(&mut self, update: NewTreatment) {
        self.name = update.name;
        self.cost = update.cost;
        self.duration = update.duration;
    }
}
