use crate::error::{HrmError, HrmResult};
use crate::model::employee::{CreateEmployee, Employee, EmployeeAggregate, EmployeeStats};
use crate::store::HrmStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "message": "Employee 'EMP001' deleted successfully",
    "attendance_records_deleted": 2
}))]
pub struct DeletedEmployee {
    pub message: String,
    pub attendance_records_deleted: u64,
}

/// All employees with fresh aggregates, ordered by `employee_id`.
pub async fn list_employees(store: &dyn HrmStore) -> HrmResult<Vec<EmployeeStats>> {
    let rows = store.list_employee_stats().await?;
    debug!(count = rows.len(), "Listed employees");

    Ok(rows
        .into_iter()
        .map(|(employee, aggregate)| EmployeeStats::new(employee, aggregate))
        .collect())
}

pub async fn get_employee(store: &dyn HrmStore, employee_id: &str) -> HrmResult<Employee> {
    store
        .find_employee(employee_id)
        .await?
        .ok_or_else(|| HrmError::employee_not_found(employee_id))
}

/// One employee with its aggregates, taken from a single read.
pub async fn get_employee_stats(store: &dyn HrmStore, employee_id: &str) -> HrmResult<EmployeeStats> {
    let (employee, aggregate) = store
        .find_employee_stats(employee_id)
        .await?
        .ok_or_else(|| HrmError::employee_not_found(employee_id))?;

    Ok(EmployeeStats::new(employee, aggregate))
}

/// Validates and registers a new employee. The result starts with zero aggregates.
#[instrument(name = "create_employee", skip(store, payload), fields(employee_id = %payload.employee_id))]
pub async fn create_employee(store: &dyn HrmStore, payload: &CreateEmployee) -> HrmResult<EmployeeStats> {
    let employee = payload.validate()?;

    store.insert_employee(&employee).await?;
    info!("Employee created");

    Ok(EmployeeStats::new(employee, EmployeeAggregate::default()))
}

/// Removes the employee together with its whole attendance history.
#[instrument(name = "delete_employee", skip(store))]
pub async fn delete_employee(store: &dyn HrmStore, employee_id: &str) -> HrmResult<DeletedEmployee> {
    let removed = store
        .delete_employee_cascade(employee_id)
        .await?
        .ok_or_else(|| HrmError::employee_not_found(employee_id))?;

    info!(attendance_records_deleted = removed, "Employee deleted");

    Ok(DeletedEmployee {
        message: format!("Employee '{}' deleted successfully", employee_id),
        attendance_records_deleted: removed,
    })
}
