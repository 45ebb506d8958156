//! Resolves which users still need a reminder email for a set of sessions.
//! Shared by the periodic sweep and the manual trigger.

use attenda_domain::{
    PendingReminder, ReminderConfiguration, Session, SessionReminderDetails,
};
use attenda_infra::AttendaContext;

/// Sessions whose start falls inside the configuration's send window at
/// `now`. The window is deliberately narrower than the sweep interval, see
/// `ReminderConfiguration::send_window`.
pub async fn find_sessions_in_window(
    config: &ReminderConfiguration,
    now: i64,
    ctx: &AttendaContext,
) -> Vec<Session> {
    let window = config.send_window(now);
    ctx.repos
        .sessions
        .find_by_starting_between(window.start(), window.end())
        .await
}

/// Joins sessions with their active enrollments and user profiles and drops
/// everyone who cannot or should not receive this reminder: missing email,
/// reminders switched off, the per-type preference key disabled, or a
/// ledger row already present for `(session, user, type)`.
pub async fn resolve_pending(
    config: &ReminderConfiguration,
    sessions: &[Session],
    ctx: &AttendaContext,
) -> anyhow::Result<Vec<PendingReminder>> {
    if sessions.is_empty() {
        return Ok(Vec::new());
    }

    let session_ids = sessions
        .iter()
        .map(|session| session.id.clone())
        .collect::<Vec<_>>();
    let sent_keys = ctx
        .repos
        .reminder_emails
        .find_sent_keys(&session_ids, &config.reminder_type)
        .await?;
    let preference_key = config.preference_key();

    let mut pending = Vec::new();
    for session in sessions {
        let enrollments = ctx.repos.enrollments.find_by_session(&session.id).await;
        if enrollments.is_empty() {
            continue;
        }
        let user_ids = enrollments
            .iter()
            .map(|enrollment| enrollment.user_id.clone())
            .collect::<Vec<_>>();
        let users = ctx.repos.users.find_many(&user_ids).await;
        let details = SessionReminderDetails::from(session);

        for user in users {
            if user.email.trim().is_empty() {
                continue;
            }
            if !user.preferences.allows(&preference_key) {
                continue;
            }
            let already_sent = sent_keys
                .iter()
                .any(|(session_id, user_id)| *session_id == session.id && *user_id == user.id);
            if already_sent {
                continue;
            }
            pending.push(PendingReminder {
                session_id: session.id.clone(),
                user_id: user.id.clone(),
                user_email: user.email.clone(),
                user_name: user.full_name.clone(),
                session: details.clone(),
            });
        }
    }
    Ok(pending)
}
