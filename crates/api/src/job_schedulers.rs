use crate::{
    reminder::{
        process_due_reminders::ProcessDueRemindersUseCase,
        send_individual_reminder::SendIndividualReminderUseCase,
    },
    shared::usecase::execute,
};
use actix_web::rt::time::{interval, sleep_until, Instant};
use attenda_infra::AttendaContext;
use std::time::Duration;
use tracing::info;

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Periodically sweeps for sessions whose start time falls inside an enabled
/// reminder configuration's send window and dispatches the batched emails.
pub fn start_reminder_sweep_job(ctx: AttendaContext) {
    actix_web::rt::spawn(async move {
        let mut sweep_interval =
            interval(Duration::from_millis(ctx.config.sweep_interval_millis as u64));
        loop {
            sweep_interval.tick().await;

            let usecase = ProcessDueRemindersUseCase {};
            let _ = execute(usecase, &ctx).await;
        }
    });
}

/// Claims scheduled per-enrollment reminders that have come due and sends each
/// one. The first run is aligned to the next minute boundary so send times line
/// up with the minute precision the schedule rows are written with.
pub fn start_scheduled_reminder_drain_job(ctx: AttendaContext) {
    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);

        sleep_until(start).await;
        let mut drain_interval =
            interval(Duration::from_millis(ctx.config.drain_interval_millis as u64));
        loop {
            drain_interval.tick().await;
            let context = ctx.clone();
            actix_web::rt::spawn(drain_due_reminders(context));
        }
    });
}

async fn drain_due_reminders(context: AttendaContext) {
    let now = context.sys.get_timestamp_millis();
    // Claim-by-delete, so a reminder is handed to exactly one drain run
    let due = context.repos.scheduled_reminders.delete_all_before(now).await;
    if due.is_empty() {
        return;
    }
    info!("Draining {} scheduled reminders due at {}", due.len(), now);

    for reminder in due {
        let usecase = SendIndividualReminderUseCase {
            session_id: reminder.session_id,
            user_id: reminder.user_id,
            reminder_type: reminder.reminder_type,
        };
        // Sideeffect, ignore result
        let _ = execute(usecase, &context).await;
    }
}
