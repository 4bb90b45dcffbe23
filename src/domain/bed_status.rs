//! Bed status derivation.
//!
//! Every bed mutation funnels through [`resolve`] right before the row is
//! persisted, so `status` and `patient_id` can never drift apart.

use uuid::Uuid;

use super::bed::BedStatus;

/// Status and occupant of a bed as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BedState {
    pub status: BedStatus,
    pub occupant: Option<Uuid>,
}

impl BedState {
    pub fn new(status: BedStatus, occupant: Option<Uuid>) -> Self {
        Self { status, occupant }
    }

    /// Fresh bed: available, nobody in it.
    pub fn available() -> Self {
        Self::new(BedStatus::Available, None)
    }

    pub fn maintenance() -> Self {
        Self::new(BedStatus::Maintenance, None)
    }
}

/// Requested change to the occupant field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OccupantChange {
    #[default]
    Keep,
    Assign(Uuid),
    Clear,
}

impl OccupantChange {
    fn apply(self, current: Option<Uuid>) -> Option<Uuid> {
        match self {
            OccupantChange::Keep => current,
            OccupantChange::Assign(patient_id) => Some(patient_id),
            OccupantChange::Clear => None,
        }
    }
}

/// Resolve the state a bed must be persisted with.
///
/// Precedence:
/// 1. an explicit `maintenance` request wins and evicts the occupant;
/// 2. an explicit `available` request evicts the occupant;
/// 3. an occupant forces `occupied` unless the bed is (or is being put) in maintenance;
/// 4. no occupant on an `occupied` bed falls back to `available`.
pub fn resolve(
    current: BedState,
    occupant: OccupantChange,
    requested: Option<BedStatus>,
) -> BedState {
    match requested {
        Some(BedStatus::Maintenance) => return BedState::maintenance(),
        Some(BedStatus::Available) => return BedState::available(),
        _ => {}
    }

    let occupant = occupant.apply(current.occupant);
    let status = requested.unwrap_or(current.status);

    let status = match (occupant, status) {
        (Some(_), BedStatus::Maintenance) => BedStatus::Maintenance,
        (Some(_), _) => BedStatus::Occupied,
        (None, BedStatus::Occupied) => BedStatus::Available,
        (None, other) => other,
    };

    BedState { status, occupant }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupied_by(patient: Uuid) -> BedState {
        BedState::new(BedStatus::Occupied, Some(patient))
    }

    #[test]
    fn test_assign_marks_occupied() {
        let patient = Uuid::new_v4();
        let state = resolve(BedState::available(), OccupantChange::Assign(patient), None);
        assert_eq!(state, occupied_by(patient));
    }

    #[test]
    fn test_assign_with_explicit_occupied_request() {
        let patient = Uuid::new_v4();
        let state = resolve(
            BedState::available(),
            OccupantChange::Assign(patient),
            Some(BedStatus::Occupied),
        );
        assert_eq!(state, occupied_by(patient));
    }

    #[test]
    fn test_clearing_occupant_frees_bed() {
        let state = resolve(occupied_by(Uuid::new_v4()), OccupantChange::Clear, None);
        assert_eq!(state, BedState::available());
    }

    #[test]
    fn test_maintenance_request_evicts_occupant() {
        let patient = Uuid::new_v4();
        let state = resolve(
            occupied_by(patient),
            OccupantChange::Keep,
            Some(BedStatus::Maintenance),
        );
        assert_eq!(state, BedState::maintenance());

        // Even a simultaneous assignment loses against maintenance
        let state = resolve(
            BedState::available(),
            OccupantChange::Assign(patient),
            Some(BedStatus::Maintenance),
        );
        assert_eq!(state, BedState::maintenance());
    }

    #[test]
    fn test_available_request_evicts_occupant() {
        let patient = Uuid::new_v4();
        let state = resolve(
            occupied_by(patient),
            OccupantChange::Assign(patient),
            Some(BedStatus::Available),
        );
        assert_eq!(state, BedState::available());
    }

    #[test]
    fn test_assign_into_maintenance_keeps_maintenance() {
        let patient = Uuid::new_v4();
        let state = resolve(BedState::maintenance(), OccupantChange::Assign(patient), None);
        assert_eq!(state.status, BedStatus::Maintenance);
        assert_eq!(state.occupant, Some(patient));
    }

    #[test]
    fn test_occupied_request_without_occupant_falls_back() {
        let state = resolve(BedState::available(), OccupantChange::Keep, Some(BedStatus::Occupied));
        assert_eq!(state, BedState::available());
    }

    #[test]
    fn test_keep_is_identity_for_consistent_states() {
        let patient = Uuid::new_v4();
        for state in [BedState::available(), BedState::maintenance(), occupied_by(patient)] {
            assert_eq!(resolve(state, OccupantChange::Keep, None), state);
        }
    }
}
