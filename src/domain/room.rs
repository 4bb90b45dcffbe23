//! Room domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::bed::{BedDetail, BedResponse};

/// Room type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Ward,
    Private,
    Icu,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Ward => "ward",
            RoomType::Private => "private",
            RoomType::Icu => "icu",
        }
    }
}

impl From<&str> for RoomType {
    fn from(s: &str) -> Self {
        match s {
            "private" => RoomType::Private,
            "icu" => RoomType::Icu,
            _ => RoomType::Ward,
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Room domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub room_number: String,
    pub floor: i32,
    pub room_type: RoomType,
    /// Always equal to the number of beds owned by the room
    pub total_beds: i32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Room creation input
#[derive(Debug, Clone)]
pub struct NewRoom {
    pub room_number: String,
    pub floor: i32,
    pub room_type: RoomType,
    pub total_beds: i32,
    pub notes: Option<String>,
}

/// Partial room update. `total_beds` triggers a resize.
#[derive(Debug, Clone, Default)]
pub struct RoomPatch {
    pub room_number: Option<String>,
    pub floor: Option<i32>,
    pub room_type: Option<RoomType>,
    pub total_beds: Option<i32>,
    /// Empty string clears the notes
    pub notes: Option<String>,
}

/// Room with its beds ordered by bed number.
#[derive(Debug, Clone)]
pub struct RoomDetail {
    pub room: Room,
    pub beds: Vec<BedDetail>,
}

impl RoomDetail {
    pub fn available_beds(&self) -> usize {
        self.beds.iter().filter(|b| b.bed.is_available()).count()
    }
}

/// Room response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoomResponse {
    pub id: Uuid,
    #[schema(example = "101A")]
    pub room_number: String,
    #[schema(example = 1)]
    pub floor: i32,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    #[schema(example = 3)]
    pub total_beds: i32,
    pub available_beds: usize,
    pub notes: Option<String>,
    pub beds: Vec<BedResponse>,
    pub created_at: DateTime<Utc>,
}

impl From<RoomDetail> for RoomResponse {
    fn from(detail: RoomDetail) -> Self {
        let available_beds = detail.available_beds();
        let room = detail.room;

        Self {
            id: room.id,
            room_number: room.room_number,
            floor: room.floor,
            room_type: room.room_type,
            total_beds: room.total_beds,
            available_beds,
            notes: room.notes,
            beds: detail.beds.into_iter().map(BedResponse::from).collect(),
            created_at: room.created_at,
        }
    }
}

/// Ward occupancy counters shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct Occupancy {
    pub rooms: u64,
    pub total_beds: u64,
    pub available_beds: u64,
    pub occupied_beds: u64,
    pub maintenance_beds: u64,
}
