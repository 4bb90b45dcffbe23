//! Nurse schedule calendar and dashboard counters against a real (SQLite) store.

mod common;

use chrono::NaiveDate;

use common::{create_nurse, create_patient, create_room, test_services};
use ward_admin::domain::{NewSchedule, ScheduleFilter, SchedulePatch, ScheduleStatus, Shift};
use ward_admin::errors::AppError;
use ward_admin::services::ServiceContainer;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn month() -> ScheduleFilter {
    ScheduleFilter {
        from: day(1),
        to: day(31),
        nurse_id: None,
    }
}

#[tokio::test]
async fn test_double_booking_is_a_conflict() {
    let services = test_services().await;
    let nurse = create_nurse(&services, "Farah Nadia").await;
    let room = create_room(&services, "101A", 1).await;
    let schedules = services.schedules();
    let shift = NewSchedule {
        nurse_id: nurse.id,
        room_id: room.room.id,
        shift: Shift::Night,
        date: day(4),
        notes: None,
    };

    let created = schedules.create_schedule(shift.clone()).await.unwrap();
    assert_eq!(created.status, ScheduleStatus::Scheduled);

    let again = schedules.create_schedule(shift.clone()).await;
    assert!(matches!(again, Err(AppError::Conflict(_))));

    // A cancelled slot can be booked again
    schedules
        .update_schedule(
            created.id,
            SchedulePatch {
                status: Some(ScheduleStatus::Cancelled),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    schedules.create_schedule(shift).await.unwrap();
}

#[tokio::test]
async fn test_only_nurses_can_be_scheduled() {
    let services = test_services().await;
    let patient = create_patient(&services, "Not A Nurse").await;
    let room = create_room(&services, "101A", 1).await;

    let result = services
        .schedules()
        .create_schedule(NewSchedule {
            nurse_id: patient.id,
            room_id: room.room.id,
            shift: Shift::Morning,
            date: day(1),
            notes: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_list_orders_by_date_then_shift() {
    let services = test_services().await;
    let nurse = create_nurse(&services, "Farah Nadia").await;
    let other = create_nurse(&services, "Gina Tan").await;
    let room = create_room(&services, "101A", 1).await;
    let schedules = services.schedules();

    for (nurse_id, shift, date) in [
        (nurse.id, Shift::Night, day(2)),
        (nurse.id, Shift::Morning, day(2)),
        (other.id, Shift::Evening, day(2)),
        (nurse.id, Shift::Evening, day(1)),
    ] {
        schedules
            .create_schedule(NewSchedule {
                nurse_id,
                room_id: room.room.id,
                shift,
                date,
                notes: None,
            })
            .await
            .unwrap();
    }

    let listed = schedules.list_schedules(month()).await.unwrap();
    assert_eq!(
        listed.iter().map(|s| (s.date, s.shift)).collect::<Vec<_>>(),
        vec![
            (day(1), Shift::Evening),
            (day(2), Shift::Morning),
            (day(2), Shift::Evening),
            (day(2), Shift::Night),
        ]
    );

    let filtered = schedules
        .list_schedules(ScheduleFilter {
            nurse_id: Some(other.id),
            ..month()
        })
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
}

#[tokio::test]
async fn test_moving_into_a_booked_slot_conflicts() {
    let services = test_services().await;
    let nurse = create_nurse(&services, "Farah Nadia").await;
    let room = create_room(&services, "101A", 1).await;
    let schedules = services.schedules();
    let morning = schedules
        .create_schedule(NewSchedule {
            nurse_id: nurse.id,
            room_id: room.room.id,
            shift: Shift::Morning,
            date: day(5),
            notes: None,
        })
        .await
        .unwrap();
    let evening = schedules
        .create_schedule(NewSchedule {
            nurse_id: nurse.id,
            room_id: room.room.id,
            shift: Shift::Evening,
            date: day(5),
            notes: Some("Cover for Gina".to_string()),
        })
        .await
        .unwrap();

    let result = schedules
        .update_schedule(
            evening.id,
            SchedulePatch {
                shift: Some(Shift::Morning),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    // Rescheduling onto its own slot is fine
    let same = schedules
        .update_schedule(
            morning.id,
            SchedulePatch {
                status: Some(ScheduleStatus::Completed),
                notes: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(same.status, ScheduleStatus::Completed);
    assert_eq!(same.notes, None);
}

#[tokio::test]
async fn test_reactivating_a_cancelled_shift_rechecks_the_slot() {
    let services = test_services().await;
    let nurse = create_nurse(&services, "Farah Nadia").await;
    let room = create_room(&services, "101A", 1).await;
    let schedules = services.schedules();
    let shift = NewSchedule {
        nurse_id: nurse.id,
        room_id: room.room.id,
        shift: Shift::Evening,
        date: day(9),
        notes: None,
    };
    let status = |status| SchedulePatch {
        status: Some(status),
        ..Default::default()
    };

    let first = schedules.create_schedule(shift.clone()).await.unwrap();
    schedules
        .update_schedule(first.id, status(ScheduleStatus::Cancelled))
        .await
        .unwrap();
    let replacement = schedules.create_schedule(shift).await.unwrap();

    let revived = schedules
        .update_schedule(first.id, status(ScheduleStatus::Scheduled))
        .await;
    assert!(matches!(revived, Err(AppError::Conflict(_))));

    let booked = schedules
        .list_schedules(ScheduleFilter {
            nurse_id: Some(nurse.id),
            ..month()
        })
        .await
        .unwrap();
    let active: Vec<_> = booked
        .iter()
        .filter(|s| s.status != ScheduleStatus::Cancelled)
        .map(|s| s.id)
        .collect();
    assert_eq!(active, vec![replacement.id]);
}

#[tokio::test]
async fn test_delete_schedule() {
    let services = test_services().await;
    let nurse = create_nurse(&services, "Farah Nadia").await;
    let room = create_room(&services, "101A", 1).await;
    let schedules = services.schedules();
    let created = schedules
        .create_schedule(NewSchedule {
            nurse_id: nurse.id,
            room_id: room.room.id,
            shift: Shift::Morning,
            date: day(9),
            notes: None,
        })
        .await
        .unwrap();

    schedules.delete_schedule(created.id).await.unwrap();

    assert!(schedules.list_schedules(month()).await.unwrap().is_empty());
    assert!(matches!(
        schedules.delete_schedule(created.id).await,
        Err(AppError::NotFound)
    ));
}

#[tokio::test]
async fn test_deleting_room_drops_its_schedules() {
    let services = test_services().await;
    let nurse = create_nurse(&services, "Farah Nadia").await;
    let room = create_room(&services, "101A", 1).await;
    services
        .schedules()
        .create_schedule(NewSchedule {
            nurse_id: nurse.id,
            room_id: room.room.id,
            shift: Shift::Night,
            date: day(3),
            notes: None,
        })
        .await
        .unwrap();

    services.rooms().delete_room(room.room.id).await.unwrap();

    assert!(services
        .schedules()
        .list_schedules(month())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_dashboard_counts_beds_by_status() {
    let services = test_services().await;
    let rooms = services.rooms();
    let room = create_room(&services, "101A", 3).await;
    create_room(&services, "102", 2).await;
    let p1 = create_patient(&services, "Ahmad Faiz").await;
    create_patient(&services, "Siti Hajar").await;
    create_nurse(&services, "Farah Nadia").await;

    rooms.assign_patient(room.beds[0].bed.id, p1.id).await.unwrap();
    rooms.set_maintenance(room.beds[1].bed.id).await.unwrap();

    let summary = services.dashboard().summary().await.unwrap();

    assert_eq!(summary.rooms, 2);
    assert_eq!(summary.total_beds, 5);
    assert_eq!(summary.occupied_beds, 1);
    assert_eq!(summary.maintenance_beds, 1);
    assert_eq!(summary.available_beds, 3);
    assert_eq!(summary.patients, 2);
    assert_eq!(summary.nurses, 1);
}
