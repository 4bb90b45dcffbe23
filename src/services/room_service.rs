//! Room service - Ward inventory and bed lifecycle.
//!
//! SOLID (SRP): Handles room capacity and bed occupancy use cases only.
//! DDD: Every bed mutation goes through `resolve_bed_state` right before it
//! is persisted, and every multi-row change runs in one transaction.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::{MAX_ROOM_BEDS, MIN_ROOM_BEDS, MIN_ROOM_FLOOR};
use crate::domain::{
    resolve_bed_state, Bed, BedAction, BedDetail, BedPatch, BedStatus, BedTransfer, NewRoom,
    OccupantChange, RoomDetail, RoomPatch, User,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{TransactionContext, UnitOfWork};

const SHRINK_CONFLICT: &str = "Cannot reduce beds: some beds are currently occupied";
const DELETE_CONFLICT: &str = "Cannot delete room: some beds are currently occupied";
const REMOVE_OCCUPIED_BED: &str = "Cannot remove an occupied bed";
const ROOM_NUMBER_TAKEN: &str = "The room number has already been taken";

/// Room service trait for dependency injection.
#[async_trait]
pub trait RoomService: Send + Sync {
    /// All rooms with their beds and occupant names
    async fn list_rooms(&self) -> AppResult<Vec<RoomDetail>>;

    async fn get_room(&self, id: Uuid) -> AppResult<RoomDetail>;

    /// Create a room together with `total_beds` available beds numbered from 1
    async fn create_room(&self, room: NewRoom) -> AppResult<RoomDetail>;

    /// Apply present fields, then resize when `total_beds` is given
    async fn update_room(&self, id: Uuid, patch: RoomPatch) -> AppResult<RoomDetail>;

    /// Grow or shrink the room to exactly `total_beds` beds
    async fn resize_room(&self, id: Uuid, total_beds: i32) -> AppResult<RoomDetail>;

    /// Delete an unoccupied room with its beds and schedules
    async fn delete_room(&self, id: Uuid) -> AppResult<()>;

    /// Beds of a room ordered by bed number
    async fn room_beds(&self, room_id: Uuid) -> AppResult<Vec<BedDetail>>;

    /// Append one available bed after the highest bed number
    async fn add_bed(&self, room_id: Uuid) -> AppResult<Bed>;

    /// Generic status/occupant patch
    async fn update_bed(&self, bed_id: Uuid, patch: BedPatch) -> AppResult<Bed>;

    async fn remove_bed(&self, bed_id: Uuid) -> AppResult<()>;

    async fn assign_patient(&self, bed_id: Uuid, patient_id: Uuid) -> AppResult<Bed>;

    async fn set_maintenance(&self, bed_id: Uuid) -> AppResult<Bed>;

    async fn transfer_patient(&self, bed_id: Uuid, new_bed_id: Uuid) -> AppResult<BedTransfer>;

    /// Release the occupant; the bed goes to maintenance before reuse
    async fn discharge_patient(&self, bed_id: Uuid) -> AppResult<Bed>;

    /// Dispatch an action posted by the ward screen, returning every bed it changed
    async fn manage_bed(&self, action: BedAction) -> AppResult<Vec<Bed>>;
}

/// Concrete implementation of RoomService using Unit of Work.
pub struct RoomManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> RoomManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> RoomService for RoomManager<U> {
    async fn list_rooms(&self) -> AppResult<Vec<RoomDetail>> {
        self.uow.rooms().list_with_beds().await
    }

    async fn get_room(&self, id: Uuid) -> AppResult<RoomDetail> {
        self.uow.rooms().find_with_beds(id).await?.ok_or_not_found()
    }

    async fn create_room(&self, room: NewRoom) -> AppResult<RoomDetail> {
        let room_number = room.room_number.trim().to_string();
        if room_number.is_empty() {
            return Err(AppError::validation("Room number is required"));
        }
        validate_floor(room.floor)?;
        validate_capacity(room.total_beds)?;

        let total_beds = room.total_beds;
        let new_room = NewRoom { room_number, ..room };

        let detail = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    if ctx.rooms().number_taken(&new_room.room_number, None).await? {
                        return Err(AppError::validation(ROOM_NUMBER_TAKEN));
                    }

                    let room = ctx.rooms().create(new_room).await?;
                    ctx.beds().create_numbered(room.id, 1..=total_beds).await?;
                    ctx.rooms().sync_total_beds(room.id).await?;

                    ctx.rooms().find_with_beds(room.id).await?.ok_or_not_found()
                })
            })
            .await?;

        tracing::info!(
            room_id = %detail.room.id,
            room_number = %detail.room.room_number,
            total_beds = detail.room.total_beds,
            "Room created"
        );

        Ok(detail)
    }

    async fn update_room(&self, id: Uuid, patch: RoomPatch) -> AppResult<RoomDetail> {
        let patch = RoomPatch {
            room_number: patch.room_number.map(|n| n.trim().to_string()),
            ..patch
        };
        if matches!(patch.room_number.as_deref(), Some("")) {
            return Err(AppError::validation("Room number is required"));
        }
        if let Some(floor) = patch.floor {
            validate_floor(floor)?;
        }
        if let Some(total_beds) = patch.total_beds {
            validate_capacity(total_beds)?;
        }

        let detail = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    ctx.rooms().find_by_id(id).await?.ok_or_not_found()?;

                    if let Some(room_number) = &patch.room_number {
                        if ctx.rooms().number_taken(room_number, Some(id)).await? {
                            return Err(AppError::validation(ROOM_NUMBER_TAKEN));
                        }
                    }

                    ctx.rooms().update(id, &patch).await?;
                    if let Some(total_beds) = patch.total_beds {
                        resize_beds(&ctx, id, total_beds).await?;
                    }

                    ctx.rooms().find_with_beds(id).await?.ok_or_not_found()
                })
            })
            .await?;

        tracing::info!(room_id = %id, "Room updated");

        Ok(detail)
    }

    async fn resize_room(&self, id: Uuid, total_beds: i32) -> AppResult<RoomDetail> {
        validate_capacity(total_beds)?;

        let detail = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    ctx.rooms().find_by_id(id).await?.ok_or_not_found()?;
                    resize_beds(&ctx, id, total_beds).await?;
                    ctx.rooms().find_with_beds(id).await?.ok_or_not_found()
                })
            })
            .await?;

        tracing::info!(room_id = %id, total_beds = detail.room.total_beds, "Room resized");

        Ok(detail)
    }

    async fn delete_room(&self, id: Uuid) -> AppResult<()> {
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    ctx.rooms().find_by_id(id).await?.ok_or_not_found()?;

                    let beds = ctx.beds().list_by_room(id).await?;
                    if beds.iter().any(Bed::is_occupied) {
                        return Err(AppError::conflict(DELETE_CONFLICT));
                    }

                    ctx.schedules().delete_by_room(id).await?;
                    ctx.beds().delete_by_room(id).await?;
                    ctx.rooms().delete(id).await
                })
            })
            .await?;

        tracing::info!(room_id = %id, "Room deleted");

        Ok(())
    }

    async fn room_beds(&self, room_id: Uuid) -> AppResult<Vec<BedDetail>> {
        let detail = self.get_room(room_id).await?;
        Ok(detail.beds)
    }

    async fn add_bed(&self, room_id: Uuid) -> AppResult<Bed> {
        let bed = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    ctx.rooms().find_by_id(room_id).await?.ok_or_not_found()?;

                    let beds = ctx.beds().list_by_room(room_id).await?;
                    if beds.len() >= MAX_ROOM_BEDS as usize {
                        return Err(AppError::validation(format!(
                            "A room holds at most {} beds",
                            MAX_ROOM_BEDS
                        )));
                    }

                    let bed_number = next_bed_number(&beds);
                    ctx.beds()
                        .create_numbered(room_id, bed_number..=bed_number)
                        .await?;
                    ctx.rooms().sync_total_beds(room_id).await?;

                    ctx.beds()
                        .list_by_room(room_id)
                        .await?
                        .into_iter()
                        .find(|b| b.bed_number == bed_number)
                        .ok_or_not_found()
                })
            })
            .await?;

        tracing::info!(room_id = %room_id, bed_id = %bed.id, bed_number = bed.bed_number, "Bed added");

        Ok(bed)
    }

    async fn update_bed(&self, bed_id: Uuid, patch: BedPatch) -> AppResult<Bed> {
        if patch.status == Some(BedStatus::Occupied)
            && !matches!(patch.occupant, OccupantChange::Assign(_))
        {
            return Err(AppError::validation(
                "Patient is required when status is occupied",
            ));
        }

        let bed = self
            .uow
            .transaction_serializable(move |ctx| {
                Box::pin(async move {
                    let bed = ctx.beds().find_by_id(bed_id).await?.ok_or_not_found()?;

                    if let OccupantChange::Assign(patient_id) = patch.occupant {
                        let evicting = matches!(
                            patch.status,
                            Some(BedStatus::Maintenance | BedStatus::Available)
                        );
                        if !evicting && bed.patient_id != Some(patient_id) && !bed.is_available() {
                            return Err(AppError::conflict(format!(
                                "Bed {} is not available",
                                bed.bed_number
                            )));
                        }
                        ensure_assignable(&ctx, patient_id, bed.id).await?;
                    }

                    let state = resolve_bed_state(bed.state(), patch.occupant, patch.status);
                    ctx.beds().save_state(bed.id, state).await
                })
            })
            .await?;

        tracing::info!(bed_id = %bed.id, status = %bed.status, "Bed updated");

        Ok(bed)
    }

    async fn remove_bed(&self, bed_id: Uuid) -> AppResult<()> {
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let bed = ctx.beds().find_by_id(bed_id).await?.ok_or_not_found()?;
                    if bed.is_occupied() {
                        return Err(AppError::BadRequest(REMOVE_OCCUPIED_BED.to_string()));
                    }

                    ctx.beds().delete(bed.id).await?;
                    ctx.rooms().sync_total_beds(bed.room_id).await?;
                    Ok(())
                })
            })
            .await?;

        tracing::info!(bed_id = %bed_id, "Bed removed");

        Ok(())
    }

    async fn assign_patient(&self, bed_id: Uuid, patient_id: Uuid) -> AppResult<Bed> {
        let bed = self
            .uow
            .transaction_serializable(move |ctx| {
                Box::pin(async move {
                    let bed = ctx.beds().find_by_id(bed_id).await?.ok_or_not_found()?;
                    if !bed.is_available() {
                        return Err(AppError::conflict(format!(
                            "Bed {} is not available",
                            bed.bed_number
                        )));
                    }

                    ensure_assignable(&ctx, patient_id, bed.id).await?;

                    let state = resolve_bed_state(
                        bed.state(),
                        OccupantChange::Assign(patient_id),
                        Some(BedStatus::Occupied),
                    );
                    ctx.beds().save_state(bed.id, state).await
                })
            })
            .await?;

        tracing::info!(bed_id = %bed.id, patient_id = %patient_id, "Patient assigned to bed");

        Ok(bed)
    }

    async fn set_maintenance(&self, bed_id: Uuid) -> AppResult<Bed> {
        let bed = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let bed = ctx.beds().find_by_id(bed_id).await?.ok_or_not_found()?;
                    let state = resolve_bed_state(
                        bed.state(),
                        OccupantChange::Clear,
                        Some(BedStatus::Maintenance),
                    );
                    ctx.beds().save_state(bed.id, state).await
                })
            })
            .await?;

        tracing::info!(bed_id = %bed.id, "Bed set to maintenance");

        Ok(bed)
    }

    async fn transfer_patient(&self, bed_id: Uuid, new_bed_id: Uuid) -> AppResult<BedTransfer> {
        if bed_id == new_bed_id {
            return Err(AppError::BadRequest(
                "Target bed must differ from the current bed".to_string(),
            ));
        }

        let transfer = self
            .uow
            .transaction_serializable(move |ctx| {
                Box::pin(async move {
                    let source = ctx.beds().find_by_id(bed_id).await?.ok_or_not_found()?;
                    let target = ctx.beds().find_by_id(new_bed_id).await?.ok_or_not_found()?;

                    let patient_id = source.patient_id.ok_or_else(|| {
                        AppError::conflict(format!("Bed {} has no patient to transfer", source.bed_number))
                    })?;
                    if !target.is_available() {
                        return Err(AppError::conflict(format!(
                            "Bed {} is not available",
                            target.bed_number
                        )));
                    }

                    // The source is cleared first: the occupant column is unique
                    let source_state =
                        resolve_bed_state(source.state(), OccupantChange::Clear, None);
                    let target_state = resolve_bed_state(
                        target.state(),
                        OccupantChange::Assign(patient_id),
                        Some(BedStatus::Occupied),
                    );

                    let source = ctx.beds().save_state(source.id, source_state).await?;
                    let target = ctx.beds().save_state(target.id, target_state).await?;

                    Ok(BedTransfer { source, target })
                })
            })
            .await?;

        tracing::info!(
            from_bed = %transfer.source.id,
            to_bed = %transfer.target.id,
            "Patient transferred"
        );

        Ok(transfer)
    }

    async fn discharge_patient(&self, bed_id: Uuid) -> AppResult<Bed> {
        let (bed, discharged) = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let bed = ctx.beds().find_by_id(bed_id).await?.ok_or_not_found()?;
                    let discharged = bed.patient_id;

                    let state = resolve_bed_state(
                        bed.state(),
                        OccupantChange::Clear,
                        Some(BedStatus::Maintenance),
                    );
                    let bed = ctx.beds().save_state(bed.id, state).await?;

                    Ok((bed, discharged))
                })
            })
            .await?;

        match discharged {
            Some(patient_id) => {
                tracing::info!(bed_id = %bed.id, patient_id = %patient_id, "Patient discharged")
            }
            None => tracing::info!(bed_id = %bed.id, "Empty bed sent to maintenance"),
        }

        Ok(bed)
    }

    async fn manage_bed(&self, action: BedAction) -> AppResult<Vec<Bed>> {
        match action {
            BedAction::Assign { bed_id, patient_id } => {
                Ok(vec![self.assign_patient(bed_id, patient_id).await?])
            }
            BedAction::Maintenance { bed_id } => Ok(vec![self.set_maintenance(bed_id).await?]),
            BedAction::Transfer { bed_id, new_bed_id } => {
                let transfer = self.transfer_patient(bed_id, new_bed_id).await?;
                Ok(vec![transfer.source, transfer.target])
            }
        }
    }
}

fn validate_floor(floor: i32) -> AppResult<()> {
    if floor < MIN_ROOM_FLOOR {
        return Err(AppError::validation(format!(
            "Floor must be at least {}",
            MIN_ROOM_FLOOR
        )));
    }
    Ok(())
}

fn validate_capacity(total_beds: i32) -> AppResult<()> {
    if !(MIN_ROOM_BEDS..=MAX_ROOM_BEDS).contains(&total_beds) {
        return Err(AppError::validation(format!(
            "Total beds must be between {} and {}",
            MIN_ROOM_BEDS, MAX_ROOM_BEDS
        )));
    }
    Ok(())
}

/// Number following the highest bed number of `beds`.
fn next_bed_number(beds: &[Bed]) -> i32 {
    beds.iter().map(|b| b.bed_number).max().unwrap_or(0) + 1
}

/// Highest-numbered beds that can be dropped when shrinking by `excess`.
///
/// Returns `None` when too few non-occupied beds exist.
fn shrink_candidates(beds: &[Bed], excess: usize) -> Option<Vec<Uuid>> {
    let mut removable: Vec<&Bed> = beds.iter().filter(|b| !b.is_occupied()).collect();
    if removable.len() < excess {
        return None;
    }

    removable.sort_by_key(|b| std::cmp::Reverse(b.bed_number));
    Some(removable.into_iter().take(excess).map(|b| b.id).collect())
}

/// Bring the room to exactly `total_beds` beds and resync its counter.
async fn resize_beds(ctx: &TransactionContext<'_>, room_id: Uuid, total_beds: i32) -> AppResult<()> {
    let beds = ctx.beds().list_by_room(room_id).await?;
    let current = beds.len() as i32;

    match total_beds.cmp(&current) {
        Ordering::Greater => {
            let first = next_bed_number(&beds);
            let last = first + (total_beds - current) - 1;
            ctx.beds().create_numbered(room_id, first..=last).await?;
        }
        Ordering::Less => {
            let excess = (current - total_beds) as usize;
            let removable =
                shrink_candidates(&beds, excess).ok_or_else(|| AppError::conflict(SHRINK_CONFLICT))?;
            ctx.beds().delete_many(removable).await?;
        }
        Ordering::Equal => {}
    }

    ctx.rooms().sync_total_beds(room_id).await?;
    Ok(())
}

/// The user must be a patient that holds no bed other than `bed_id`.
async fn ensure_assignable(
    ctx: &TransactionContext<'_>,
    patient_id: Uuid,
    bed_id: Uuid,
) -> AppResult<User> {
    let user = ctx.users().find_by_id(patient_id).await?.ok_or_not_found()?;
    if !user.is_patient() {
        return Err(AppError::validation("Selected user is not a patient"));
    }

    if let Some(held) = ctx.beds().find_by_patient(patient_id).await? {
        if held.id != bed_id {
            return Err(AppError::conflict(format!(
                "{} is already assigned to bed {}",
                user.name, held.bed_number
            )));
        }
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn bed(bed_number: i32, status: BedStatus) -> Bed {
        Bed {
            id: Uuid::new_v4(),
            room_id: Uuid::nil(),
            bed_number,
            status,
            patient_id: (status == BedStatus::Occupied).then(Uuid::new_v4),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_shrink_takes_highest_unoccupied_beds() {
        let beds = vec![
            bed(1, BedStatus::Occupied),
            bed(2, BedStatus::Available),
            bed(3, BedStatus::Maintenance),
        ];

        let removed = shrink_candidates(&beds, 1).unwrap();
        assert_eq!(removed, vec![beds[2].id]);
    }

    #[test]
    fn test_shrink_skips_occupied_top_bed() {
        let beds = vec![
            bed(1, BedStatus::Available),
            bed(2, BedStatus::Available),
            bed(3, BedStatus::Occupied),
        ];

        let removed = shrink_candidates(&beds, 1).unwrap();
        assert_eq!(removed, vec![beds[1].id]);
    }

    #[test]
    fn test_shrink_fails_without_enough_free_beds() {
        let beds = vec![
            bed(1, BedStatus::Occupied),
            bed(2, BedStatus::Occupied),
            bed(3, BedStatus::Available),
        ];

        assert!(shrink_candidates(&beds, 2).is_none());
    }

    #[test]
    fn test_next_bed_number_follows_highest() {
        assert_eq!(next_bed_number(&[]), 1);
        let beds = vec![bed(1, BedStatus::Available), bed(4, BedStatus::Available)];
        assert_eq!(next_bed_number(&beds), 5);
    }

    #[test]
    fn test_capacity_bounds() {
        assert!(validate_capacity(0).is_err());
        assert!(validate_capacity(1).is_ok());
        assert!(validate_capacity(MAX_ROOM_BEDS + 1).is_err());
        assert!(validate_floor(0).is_err());
    }
}
