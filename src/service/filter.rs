use crate::error::{HrmError, HrmResult};
use crate::model::attendance::{AttendanceRecord, DateRange};
use crate::store::HrmStore;
use tracing::debug;

/// History for one employee inside `range`, oldest first.
///
/// An inverted range (`from > to`) is not an error; it simply matches nothing.
pub async fn attendance_for_employee(
    store: &dyn HrmStore,
    employee_id: &str,
    range: &DateRange,
) -> HrmResult<Vec<AttendanceRecord>> {
    if store.find_employee(employee_id).await?.is_none() {
        return Err(HrmError::employee_not_found(employee_id));
    }

    if range.is_empty() {
        return Ok(Vec::new());
    }

    let records = store.attendance_for_employee(employee_id, range).await?;
    debug!(employee_id, count = records.len(), ?range, "Fetched employee attendance");
    Ok(records)
}

/// Every record inside `range`, ordered by date then employee id.
pub async fn all_attendance(store: &dyn HrmStore, range: &DateRange) -> HrmResult<Vec<AttendanceRecord>> {
    if range.is_empty() {
        return Ok(Vec::new());
    }

    let records = store.all_attendance(range).await?;
    debug!(count = records.len(), ?range, "Fetched attendance");
    Ok(records)
}
