mod helpers;

use attenda_sdk::{
    CreateReminderConfigInput, CreateSessionInput, CreateUserInput, UpdateReminderConfigInput,
    UpdateSessionInput, UpdateSessionSettingsInput, UpdateUserInput,
};
use chrono::Utc;
use helpers::setup::spawn_app;

#[actix_web::main]
#[test]
async fn test_status_ok() {
    let (_, sdk, _) = spawn_app().await;
    assert!(sdk.status.check_health().await.is_ok());
}

#[actix_web::main]
#[test]
async fn test_crud_user() {
    let (_, sdk, _) = spawn_app().await;
    let res = sdk
        .user
        .create(CreateUserInput {
            email: "ada@example.com".into(),
            full_name: "Ada Lovelace".into(),
            preferences: None,
        })
        .await
        .expect("Expected to create user");
    let user_id = res.user.id.clone();
    assert_eq!(res.user.email, "ada@example.com");
    assert!(res.user.preferences.session_reminders);

    // The same email in a different casing is still taken
    assert!(sdk
        .user
        .create(CreateUserInput {
            email: "ADA@example.com".into(),
            full_name: "Someone Else".into(),
            preferences: None,
        })
        .await
        .is_err());

    let get_user_res = sdk
        .user
        .get(user_id.clone())
        .await
        .expect("Expected to get user");
    assert_eq!(get_user_res.user.id, user_id);

    let update_user_res = sdk
        .user
        .update(UpdateUserInput {
            user_id: user_id.clone(),
            email: None,
            full_name: Some("Ada King".into()),
            preferences: None,
        })
        .await
        .expect("Expected to update user");
    assert_eq!(update_user_res.user.full_name, "Ada King");
    assert_eq!(update_user_res.user.email, "ada@example.com");

    let delete_user_res = sdk
        .user
        .delete(user_id.clone())
        .await
        .expect("Expected to delete user");
    assert_eq!(delete_user_res.user.id, user_id);

    // Get after deleted should be error
    let get_user_res = sdk.user.get(user_id).await;
    assert!(get_user_res.is_err());
}

#[actix_web::main]
#[test]
async fn test_crud_session() {
    let (_, sdk, _) = spawn_app().await;
    let start_ts = Utc::now().timestamp_millis() + 1000 * 60 * 60 * 24;

    let res = sdk
        .session
        .create(CreateSessionInput {
            title: "Rust 101".into(),
            description: Some("An introduction".into()),
            start_ts,
            end_ts: Some(start_ts + 1000 * 60 * 90),
            location: None,
            is_online: Some(true),
            speaker_name: Some("Ada Lovelace".into()),
            duration_minutes: None,
            settings: None,
        })
        .await
        .expect("Expected to create session");
    let session_id = res.session.id.clone();
    assert_eq!(res.session.title, "Rust 101");
    assert!(res.session.is_online);

    let get_res = sdk
        .session
        .get(session_id.clone())
        .await
        .expect("Expected to get session");
    assert_eq!(get_res.session.id, session_id);

    let update_res = sdk
        .session
        .update(UpdateSessionInput {
            session_id: session_id.clone(),
            title: Some("Rust 101: ownership".into()),
            description: None,
            start_ts: None,
            end_ts: None,
            location: Some("Room 4".into()),
            is_online: None,
            speaker_name: None,
            duration_minutes: None,
        })
        .await
        .expect("Expected to update session");
    assert_eq!(update_res.session.title, "Rust 101: ownership");
    assert_eq!(update_res.session.location, Some("Room 4".into()));

    let settings_res = sdk
        .session
        .update_settings(UpdateSessionSettingsInput {
            session_id: session_id.clone(),
            min_attendance_minutes: Some(45),
            use_percentage: None,
            attendance_percentage: None,
        })
        .await
        .expect("Expected to update session settings");
    assert_eq!(settings_res.settings.min_attendance_minutes, 45);

    let get_settings_res = sdk
        .session
        .get_settings(session_id.clone())
        .await
        .expect("Expected to get session settings");
    assert_eq!(get_settings_res.settings.min_attendance_minutes, 45);

    let delete_res = sdk
        .session
        .delete(session_id.clone())
        .await
        .expect("Expected to delete session");
    assert_eq!(delete_res.session.id, session_id);

    // Get after deleted should be error
    assert!(sdk.session.get(session_id).await.is_err());
}

#[actix_web::main]
#[test]
async fn test_crud_reminder_configs() {
    let (_, sdk, _) = spawn_app().await;

    let res = sdk
        .reminder_config
        .create(CreateReminderConfigInput {
            reminder_type: "24h".into(),
            minutes_before: 24 * 60,
            is_enabled: None,
            email_subject_template: None,
            display_name: Some("Day before".into()),
            sort_order: Some(1),
        })
        .await
        .expect("Expected to create reminder config");
    let config_id = res.config.id.clone();
    assert!(res.config.is_enabled);

    // The type is unique
    assert!(sdk
        .reminder_config
        .create(CreateReminderConfigInput {
            reminder_type: "24h".into(),
            minutes_before: 60,
            is_enabled: None,
            email_subject_template: None,
            display_name: None,
            sort_order: None,
        })
        .await
        .is_err());

    let list_res = sdk
        .reminder_config
        .list()
        .await
        .expect("Expected to list reminder configs");
    assert_eq!(list_res.configs.len(), 1);

    let update_res = sdk
        .reminder_config
        .update(UpdateReminderConfigInput {
            config_id: config_id.clone(),
            minutes_before: None,
            is_enabled: Some(false),
            email_subject_template: Some("See you soon: {session_title}".into()),
            display_name: None,
            sort_order: None,
        })
        .await
        .expect("Expected to update reminder config");
    assert!(!update_res.config.is_enabled);

    let delete_res = sdk
        .reminder_config
        .delete(config_id)
        .await
        .expect("Expected to delete reminder config");
    assert_eq!(delete_res.config.reminder_type, "24h");

    let list_res = sdk
        .reminder_config
        .list()
        .await
        .expect("Expected to list reminder configs");
    assert!(list_res.configs.is_empty());
}
