mod helpers;

use attenda_sdk::{
    CreateEnrollmentInput, CreateReminderConfigInput, CreateSessionInput, CreateUserInput,
    TriggerSessionRemindersInput,
};
use chrono::Utc;
use helpers::setup::spawn_app;

#[actix_web::main]
#[test]
async fn test_enrollment_flow() {
    let (_, sdk, _) = spawn_app().await;
    let start_ts = Utc::now().timestamp_millis() + 1000 * 60 * 60 * 24;

    let session = sdk
        .session
        .create(CreateSessionInput {
            title: "Rust 101".into(),
            description: None,
            start_ts,
            end_ts: None,
            location: None,
            is_online: Some(true),
            speaker_name: None,
            duration_minutes: None,
            settings: None,
        })
        .await
        .expect("Expected to create session")
        .session;

    let mut user_ids = Vec::new();
    for email in ["ada@example.com", "grace@example.com"] {
        let user = sdk
            .user
            .create(CreateUserInput {
                email: email.into(),
                full_name: email.into(),
                preferences: None,
            })
            .await
            .expect("Expected to create user")
            .user;
        user_ids.push(user.id);
    }

    for user_id in &user_ids {
        sdk.enrollment
            .create(CreateEnrollmentInput {
                session_id: session.id.clone(),
                user_id: user_id.clone(),
            })
            .await
            .expect("Expected to enroll user");
    }

    // Enrolling twice is a conflict
    assert!(sdk
        .enrollment
        .create(CreateEnrollmentInput {
            session_id: session.id.clone(),
            user_id: user_ids[0].clone(),
        })
        .await
        .is_err());

    let enrollments = sdk
        .enrollment
        .get_for_session(session.id.clone())
        .await
        .expect("Expected to list enrollments")
        .enrollments;
    assert_eq!(enrollments.len(), 2);

    sdk.enrollment
        .cancel(session.id.clone(), user_ids[0].clone())
        .await
        .expect("Expected to cancel enrollment");
    let enrollments = sdk
        .enrollment
        .get_for_session(session.id.clone())
        .await
        .expect("Expected to list enrollments")
        .enrollments;
    assert_eq!(enrollments.len(), 1);

    // Cancelling an enrollment that is not active is an error
    assert!(sdk
        .enrollment
        .cancel(session.id, user_ids[0].clone())
        .await
        .is_err());
}

#[actix_web::main]
#[test]
async fn test_sweep_sends_once() {
    let (_, sdk, _) = spawn_app().await;

    sdk.reminder_config
        .create(CreateReminderConfigInput {
            reminder_type: "1h".into(),
            minutes_before: 60,
            is_enabled: None,
            email_subject_template: Some("Starting soon: {session_title}".into()),
            display_name: None,
            sort_order: None,
        })
        .await
        .expect("Expected to create reminder config");

    // Starts in 59 minutes, which is inside the 1h send window
    let start_ts = Utc::now().timestamp_millis() + 1000 * 60 * 59;
    let session = sdk
        .session
        .create(CreateSessionInput {
            title: "Rust 101".into(),
            description: None,
            start_ts,
            end_ts: None,
            location: None,
            is_online: Some(true),
            speaker_name: None,
            duration_minutes: None,
            settings: None,
        })
        .await
        .expect("Expected to create session")
        .session;

    let mut user_ids = Vec::new();
    for email in ["ada@example.com", "grace@example.com"] {
        let user = sdk
            .user
            .create(CreateUserInput {
                email: email.into(),
                full_name: email.into(),
                preferences: None,
            })
            .await
            .expect("Expected to create user")
            .user;
        sdk.enrollment
            .create(CreateEnrollmentInput {
                session_id: session.id.clone(),
                user_id: user.id.clone(),
            })
            .await
            .expect("Expected to enroll user");
        user_ids.push(user.id);
    }

    let summary = sdk.reminder.sweep().await.expect("Expected to sweep");
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.total_reminders, 2);
    assert_eq!(summary.total_failed, 0);
    assert_eq!(summary.results[0].reminder_type, "1h");
    assert_eq!(summary.results[0].sent, 2);

    // A second sweep finds everything already sent
    let summary = sdk.reminder.sweep().await.expect("Expected to sweep");
    assert_eq!(summary.total_reminders, 0);

    // And a manual trigger sees the same send ledger
    let trigger = sdk
        .reminder
        .trigger(TriggerSessionRemindersInput {
            session_id: session.id,
            reminder_types: None,
            triggered_by: user_ids[0].clone(),
        })
        .await
        .expect("Expected to trigger reminders");
    assert_eq!(trigger.total_sent, 0);
    assert_eq!(trigger.total_failed, 0);
}

#[actix_web::main]
#[test]
async fn test_trigger_with_unknown_type() {
    let (_, sdk, _) = spawn_app().await;

    sdk.reminder_config
        .create(CreateReminderConfigInput {
            reminder_type: "24h".into(),
            minutes_before: 24 * 60,
            is_enabled: None,
            email_subject_template: None,
            display_name: None,
            sort_order: None,
        })
        .await
        .expect("Expected to create reminder config");

    let start_ts = Utc::now().timestamp_millis() + 1000 * 60 * 60;
    let session = sdk
        .session
        .create(CreateSessionInput {
            title: "Rust 101".into(),
            description: None,
            start_ts,
            end_ts: None,
            location: None,
            is_online: Some(true),
            speaker_name: None,
            duration_minutes: None,
            settings: None,
        })
        .await
        .expect("Expected to create session")
        .session;
    let user = sdk
        .user
        .create(CreateUserInput {
            email: "ada@example.com".into(),
            full_name: "Ada Lovelace".into(),
            preferences: None,
        })
        .await
        .expect("Expected to create user")
        .user;

    let res = sdk
        .reminder
        .trigger(TriggerSessionRemindersInput {
            session_id: session.id,
            reminder_types: Some(vec!["bogus".into()]),
            triggered_by: user.id,
        })
        .await;
    assert!(res.is_err());
}
