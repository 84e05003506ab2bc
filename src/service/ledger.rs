use crate::error::{HrmError, HrmResult};
use crate::model::attendance::{AttendanceRecord, MarkAttendance};
use crate::store::HrmStore;
use tracing::{info, instrument};

/// Records the status for one employee on one date.
///
/// Marking the same `(employee_id, date)` again overwrites the earlier status; the
/// ledger never holds two records for the same key. Input is validated before the
/// store is touched, and an unknown employee leaves the ledger unchanged.
#[instrument(name = "mark_attendance", skip(store, payload), fields(employee_id = %payload.employee_id, date = %payload.date))]
pub async fn mark_attendance(store: &dyn HrmStore, payload: &MarkAttendance) -> HrmResult<AttendanceRecord> {
    let mark = payload.validate()?;

    let record = store
        .upsert_attendance(&mark)
        .await?
        .ok_or_else(|| HrmError::employee_not_found(&mark.employee_id))?;

    info!(status = %record.status, "Attendance marked");
    Ok(record)
}
