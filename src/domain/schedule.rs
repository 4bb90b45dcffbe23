//! Nurse shift schedule entity and calendar helpers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Nursing shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    Morning,
    Evening,
    Night,
}

impl Shift {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Morning => "morning",
            Shift::Evening => "evening",
            Shift::Night => "night",
        }
    }

    /// Working hours shown on the calendar
    pub fn time_range(&self) -> &'static str {
        match self {
            Shift::Morning => "7:00 AM - 3:00 PM",
            Shift::Evening => "3:00 PM - 11:00 PM",
            Shift::Night => "11:00 PM - 7:00 AM",
        }
    }
}

impl From<&str> for Shift {
    fn from(s: &str) -> Self {
        match s {
            "evening" => Shift::Evening,
            "night" => Shift::Night,
            _ => Shift::Morning,
        }
    }
}

/// Schedule status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Scheduled,
    Completed,
    Absent,
    Cancelled,
}

impl ScheduleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Scheduled => "scheduled",
            ScheduleStatus::Completed => "completed",
            ScheduleStatus::Absent => "absent",
            ScheduleStatus::Cancelled => "cancelled",
        }
    }
}

impl From<&str> for ScheduleStatus {
    fn from(s: &str) -> Self {
        match s {
            "completed" => ScheduleStatus::Completed,
            "absent" => ScheduleStatus::Absent,
            "cancelled" => ScheduleStatus::Cancelled,
            _ => ScheduleStatus::Scheduled,
        }
    }
}

/// Nurse schedule domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NurseSchedule {
    pub id: Uuid,
    pub nurse_id: Uuid,
    pub room_id: Uuid,
    pub shift: Shift,
    pub date: NaiveDate,
    pub status: ScheduleStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Schedule creation input
#[derive(Debug, Clone)]
pub struct NewSchedule {
    pub nurse_id: Uuid,
    pub room_id: Uuid,
    pub shift: Shift,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

/// Partial schedule update
#[derive(Debug, Clone, Default)]
pub struct SchedulePatch {
    pub room_id: Option<Uuid>,
    pub shift: Option<Shift>,
    pub date: Option<NaiveDate>,
    pub status: Option<ScheduleStatus>,
    pub notes: Option<String>,
}

/// Schedule listing filter (inclusive date range)
#[derive(Debug, Clone)]
pub struct ScheduleFilter {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub nurse_id: Option<Uuid>,
}

/// Calendar badge colour of a nurse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct BadgeColor {
    /// Bootstrap background class suffix
    #[schema(value_type = String, example = "primary")]
    pub bg: &'static str,
    /// Text colour readable on `bg`
    #[schema(value_type = String, example = "white")]
    pub text: &'static str,
}

const BADGE_PALETTE: [BadgeColor; 7] = [
    BadgeColor { bg: "primary", text: "white" },
    BadgeColor { bg: "secondary", text: "white" },
    BadgeColor { bg: "success", text: "white" },
    BadgeColor { bg: "danger", text: "white" },
    BadgeColor { bg: "warning", text: "dark" },
    BadgeColor { bg: "info", text: "dark" },
    BadgeColor { bg: "dark", text: "white" },
];

/// Deterministic badge colour for a nurse (FNV-1a over the id bytes).
pub fn badge_color(nurse_id: Uuid) -> BadgeColor {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

    let hash = nurse_id
        .as_bytes()
        .iter()
        .fold(FNV_OFFSET, |acc, byte| (acc ^ u64::from(*byte)).wrapping_mul(FNV_PRIME));

    BADGE_PALETTE[(hash % BADGE_PALETTE.len() as u64) as usize]
}

/// Schedule response enriched with calendar presentation hints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScheduleResponse {
    pub id: Uuid,
    pub nurse_id: Uuid,
    pub room_id: Uuid,
    pub shift: Shift,
    #[schema(value_type = String, example = "7:00 AM - 3:00 PM")]
    pub shift_time: &'static str,
    pub date: NaiveDate,
    pub status: ScheduleStatus,
    pub notes: Option<String>,
    pub badge: BadgeColor,
}

impl From<NurseSchedule> for ScheduleResponse {
    fn from(schedule: NurseSchedule) -> Self {
        Self {
            id: schedule.id,
            nurse_id: schedule.nurse_id,
            room_id: schedule.room_id,
            shift: schedule.shift,
            shift_time: schedule.shift.time_range(),
            date: schedule.date,
            status: schedule.status,
            notes: schedule.notes,
            badge: badge_color(schedule.nurse_id),
        }
    }
}
