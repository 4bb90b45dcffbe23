//! Bed domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::bed_status::{BedState, OccupantChange};
use crate::config::{BED_STATUS_AVAILABLE, BED_STATUS_MAINTENANCE, BED_STATUS_OCCUPIED};

/// Bed status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BedStatus {
    Available,
    Occupied,
    Maintenance,
}

impl BedStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BedStatus::Available => BED_STATUS_AVAILABLE,
            BedStatus::Occupied => BED_STATUS_OCCUPIED,
            BedStatus::Maintenance => BED_STATUS_MAINTENANCE,
        }
    }
}

/// Unknown stored values are treated as out of service.
impl From<&str> for BedStatus {
    fn from(s: &str) -> Self {
        match s {
            BED_STATUS_AVAILABLE => BedStatus::Available,
            BED_STATUS_OCCUPIED => BedStatus::Occupied,
            _ => BedStatus::Maintenance,
        }
    }
}

impl std::fmt::Display for BedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bed domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bed {
    pub id: Uuid,
    pub room_id: Uuid,
    pub bed_number: i32,
    pub status: BedStatus,
    pub patient_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bed {
    pub fn state(&self) -> BedState {
        BedState::new(self.status, self.patient_id)
    }

    pub fn is_available(&self) -> bool {
        self.status == BedStatus::Available
    }

    pub fn is_occupied(&self) -> bool {
        self.status == BedStatus::Occupied
    }

    pub fn is_in_maintenance(&self) -> bool {
        self.status == BedStatus::Maintenance
    }
}

/// Bed together with the name of its occupant.
#[derive(Debug, Clone)]
pub struct BedDetail {
    pub bed: Bed,
    pub patient_name: Option<String>,
}

/// Partial bed update: only present parts are applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct BedPatch {
    pub status: Option<BedStatus>,
    pub occupant: OccupantChange,
}

/// Bed actions issued from the ward management screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BedAction {
    Assign { bed_id: Uuid, patient_id: Uuid },
    Maintenance { bed_id: Uuid },
    Transfer { bed_id: Uuid, new_bed_id: Uuid },
}

/// Bed response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BedResponse {
    pub id: Uuid,
    pub room_id: Uuid,
    #[schema(example = 1)]
    pub bed_number: i32,
    pub status: BedStatus,
    pub patient_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
}

impl From<Bed> for BedResponse {
    fn from(bed: Bed) -> Self {
        Self {
            id: bed.id,
            room_id: bed.room_id,
            bed_number: bed.bed_number,
            status: bed.status,
            patient_id: bed.patient_id,
            patient_name: None,
        }
    }
}

impl From<BedDetail> for BedResponse {
    fn from(detail: BedDetail) -> Self {
        Self {
            patient_name: detail.patient_name,
            ..Self::from(detail.bed)
        }
    }
}

/// Both beds touched by a patient transfer.
#[derive(Debug, Clone)]
pub struct BedTransfer {
    /// Emptied bed
    pub source: Bed,
    /// Bed now holding the patient
    pub target: Bed,
}
