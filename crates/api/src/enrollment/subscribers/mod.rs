use super::create_enrollment::CreateEnrollmentUseCase;
use crate::reminder::schedule_enrollment_reminders::ScheduleEnrollmentRemindersUseCase;
use crate::shared::usecase::{execute, Subscriber};
use attenda_domain::Enrollment;

pub struct ScheduleRemindersOnEnrollmentCreated;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateEnrollmentUseCase> for ScheduleRemindersOnEnrollmentCreated {
    async fn notify(&self, enrollment: &Enrollment, ctx: &attenda_infra::AttendaContext) {
        let schedule_reminders = ScheduleEnrollmentRemindersUseCase {
            session_id: enrollment.session_id.clone(),
            user_id: enrollment.user_id.clone(),
        };

        // Sideeffect, ignore result
        let _ = execute(schedule_reminders, ctx).await;
    }
}
