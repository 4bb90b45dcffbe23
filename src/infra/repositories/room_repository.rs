//! Room repository: read side of the room and bed inventory.

use std::collections::HashMap;

use async_trait::async_trait;
#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use super::entities::{bed, room, user, BedEntity, RoomEntity, RoomModel, UserEntity};
use crate::domain::{Bed, BedDetail, BedStatus, Occupancy, Room, RoomDetail};
use crate::errors::AppResult;

/// Room repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// All rooms ordered by room number, each with its beds
    async fn list_with_beds(&self) -> AppResult<Vec<RoomDetail>>;

    /// One room with its beds ordered by bed number
    async fn find_with_beds(&self, id: Uuid) -> AppResult<Option<RoomDetail>>;

    /// Room row without beds
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Room>>;

    /// Room and bed counters grouped by bed status
    async fn occupancy(&self) -> AppResult<Occupancy>;
}

/// SeaORM implementation of RoomRepository
pub struct RoomStore {
    db: DatabaseConnection,
}

impl RoomStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct StatusCount {
    status: String,
    total: i64,
}

#[async_trait]
impl RoomRepository for RoomStore {
    async fn list_with_beds(&self) -> AppResult<Vec<RoomDetail>> {
        let rooms = RoomEntity::find()
            .order_by_asc(room::Column::RoomNumber)
            .all(&self.db)
            .await?;

        load_room_details(&self.db, rooms).await
    }

    async fn find_with_beds(&self, id: Uuid) -> AppResult<Option<RoomDetail>> {
        let Some(model) = RoomEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        Ok(load_room_details(&self.db, vec![model]).await?.pop())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Room>> {
        let model = RoomEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Room::from))
    }

    async fn occupancy(&self) -> AppResult<Occupancy> {
        let rooms = RoomEntity::find().count(&self.db).await?;

        let counts = BedEntity::find()
            .select_only()
            .column(bed::Column::Status)
            .column_as(Expr::col(bed::Column::Id).count(), "total")
            .group_by(bed::Column::Status)
            .into_model::<StatusCount>()
            .all(&self.db)
            .await?;

        let mut occupancy = Occupancy {
            rooms,
            ..Occupancy::default()
        };

        for row in counts {
            let total = u64::try_from(row.total).unwrap_or_default();
            occupancy.total_beds += total;
            match BedStatus::from(row.status.as_str()) {
                BedStatus::Available => occupancy.available_beds += total,
                BedStatus::Occupied => occupancy.occupied_beds += total,
                BedStatus::Maintenance => occupancy.maintenance_beds += total,
            }
        }

        Ok(occupancy)
    }
}

/// Attach beds (ordered by bed number) and occupant names to room rows.
///
/// Works on any connection so transactional code paths can reuse it.
pub(crate) async fn load_room_details<C>(db: &C, rooms: Vec<RoomModel>) -> AppResult<Vec<RoomDetail>>
where
    C: ConnectionTrait,
{
    if rooms.is_empty() {
        return Ok(Vec::new());
    }

    let room_ids: Vec<Uuid> = rooms.iter().map(|r| r.id).collect();
    let beds = BedEntity::find()
        .filter(bed::Column::RoomId.is_in(room_ids))
        .order_by_asc(bed::Column::BedNumber)
        .all(db)
        .await?;

    let occupant_ids: Vec<Uuid> = beds.iter().filter_map(|b| b.patient_id).collect();
    let names = patient_names(db, occupant_ids).await?;

    let mut beds_by_room: HashMap<Uuid, Vec<BedDetail>> = HashMap::new();
    for model in beds {
        let bed = Bed::from(model);
        let patient_name = bed.patient_id.and_then(|id| names.get(&id).cloned());
        beds_by_room
            .entry(bed.room_id)
            .or_default()
            .push(BedDetail { bed, patient_name });
    }

    Ok(rooms
        .into_iter()
        .map(|model| {
            let room = Room::from(model);
            let beds = beds_by_room.remove(&room.id).unwrap_or_default();
            RoomDetail { room, beds }
        })
        .collect())
}

/// Names of the given users keyed by id.
pub(crate) async fn patient_names<C>(db: &C, ids: Vec<Uuid>) -> AppResult<HashMap<Uuid, String>>
where
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let users = UserEntity::find()
        .filter(user::Column::Id.is_in(ids))
        .all(db)
        .await?;

    Ok(users.into_iter().map(|u| (u.id, u.name)).collect())
}
