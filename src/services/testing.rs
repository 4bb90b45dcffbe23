//! Unit-test doubles shared by the service tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Room, RoomType, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::{
    MockPatientRepository, MockRoomRepository, MockScheduleRepository, MockUserRepository,
    PatientRepository, RoomRepository, ScheduleRepository, TransactionContext, TxFuture,
    UnitOfWork, UserRepository,
};

/// UnitOfWork over mocked repositories.
///
/// Unconfigured repositories are bare mocks, so any unexpected call fails the test.
#[derive(Default)]
pub(crate) struct TestUnitOfWork {
    rooms: Arc<MockRoomRepository>,
    patients: Arc<MockPatientRepository>,
    users: Arc<MockUserRepository>,
    schedules: Arc<MockScheduleRepository>,
}

impl TestUnitOfWork {
    pub(crate) fn with_rooms(mut self, repo: MockRoomRepository) -> Self {
        self.rooms = Arc::new(repo);
        self
    }

    pub(crate) fn with_patients(mut self, repo: MockPatientRepository) -> Self {
        self.patients = Arc::new(repo);
        self
    }

    pub(crate) fn with_users(mut self, repo: MockUserRepository) -> Self {
        self.users = Arc::new(repo);
        self
    }

    pub(crate) fn with_schedules(mut self, repo: MockScheduleRepository) -> Self {
        self.schedules = Arc::new(repo);
        self
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn rooms(&self) -> Arc<dyn RoomRepository> {
        self.rooms.clone()
    }

    fn patients(&self) -> Arc<dyn PatientRepository> {
        self.patients.clone()
    }

    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn schedules(&self) -> Arc<dyn ScheduleRepository> {
        self.schedules.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        // Transactional paths are covered by the SQLite integration tests
        Err(AppError::internal("Transactions not supported in test mock"))
    }

    async fn transaction_serializable<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

fn user(name: &str, role: UserRole) -> User {
    User {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        role,
        staff_id: role.is_staff().then(|| "S-0001".to_string()),
        gender: None,
        ic_number: None,
        contact_number: None,
        address: None,
        blood_type: None,
        emergency_contact: None,
        relation: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub(crate) fn patient(name: &str) -> User {
    user(name, UserRole::Patient)
}

pub(crate) fn nurse(name: &str) -> User {
    user(name, UserRole::Nurse)
}

pub(crate) fn room(room_number: &str) -> Room {
    Room {
        id: Uuid::new_v4(),
        room_number: room_number.to_string(),
        floor: 1,
        room_type: RoomType::Ward,
        total_beds: 2,
        notes: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
