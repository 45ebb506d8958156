use attenda_domain::{AttendanceSource, AttendanceStatus, SessionAttendance, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceDTO {
    pub id: ID,
    pub session_id: ID,
    pub user_id: ID,
    pub check_in_time: i64,
    pub join_time: i64,
    pub leave_time: Option<i64>,
    pub duration_minutes: i64,
    pub is_eligible_for_certificate: bool,
    pub attendance_source: AttendanceSource,
    pub status: AttendanceStatus,
    pub approved_by: Option<ID>,
    pub approved_at: Option<i64>,
    pub notes: Option<String>,
}

impl AttendanceDTO {
    pub fn new(attendance: SessionAttendance) -> Self {
        Self {
            id: attendance.id.clone(),
            session_id: attendance.session_id.clone(),
            user_id: attendance.user_id.clone(),
            check_in_time: attendance.check_in_time,
            join_time: attendance.join_time,
            leave_time: attendance.leave_time,
            duration_minutes: attendance.duration_minutes,
            is_eligible_for_certificate: attendance.is_eligible_for_certificate,
            attendance_source: attendance.attendance_source,
            status: attendance.status,
            approved_by: attendance.approved_by.clone(),
            approved_at: attendance.approved_at,
            notes: attendance.notes,
        }
    }
}

/// One uploaded row that could not be turned into an attendance record.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RowError {
    pub name: String,
    pub email: String,
    pub error: String,
}

/// Outcome of one attendance report upload.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UploadReport {
    pub upload_id: ID,
    pub total_records: usize,
    pub success_count: usize,
    pub error_count: usize,
    pub errors: Vec<RowError>,
}
