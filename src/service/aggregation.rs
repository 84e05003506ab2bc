use crate::error::{HrmError, HrmResult};
use crate::model::dashboard::DashboardSummary;
use crate::model::employee::EmployeeAggregate;
use crate::store::HrmStore;
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Present/absent counts for one employee, read straight from the ledger.
pub async fn employee_aggregate(store: &dyn HrmStore, employee_id: &str) -> HrmResult<EmployeeAggregate> {
    if store.find_employee(employee_id).await?.is_none() {
        return Err(HrmError::employee_not_found(employee_id));
    }

    store.employee_aggregate(employee_id).await
}

/// Head-count summary for `today`, which the caller supplies.
pub async fn dashboard_summary(store: &dyn HrmStore, today: NaiveDate) -> HrmResult<DashboardSummary> {
    let counts = store.daily_counts(today).await?;
    let marked = counts.present + counts.absent;

    if marked > counts.total_employees {
        // Only reachable if the one-record-per-employee-per-day rule was broken in storage.
        warn!(
            total_employees = counts.total_employees,
            marked,
            %today,
            "More attendance records than employees for the day"
        );
    }

    let summary = DashboardSummary {
        date: today,
        total_employees: counts.total_employees,
        present_today: counts.present,
        absent_today: counts.absent,
        not_marked_today: counts.total_employees.saturating_sub(marked),
    };
    debug!(?summary, "Dashboard summary computed");

    Ok(summary)
}
