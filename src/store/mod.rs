//! Data-access port for the directory and the attendance ledger.
//!
//! The core only talks to storage through [`HrmStore`]. Every method is one unit
//! of work: multi-step mutations (cascade delete, checked upsert) run inside a
//! single transaction or lock scope so concurrent readers never see them half done.

use crate::error::HrmResult;
use crate::model::attendance::{AttendanceMark, AttendanceRecord, DateRange};
use crate::model::employee::{Employee, EmployeeAggregate};
use async_trait::async_trait;
use chrono::NaiveDate;

pub mod memory;
pub mod mysql;

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

/// Raw per-day counts, taken from one consistent read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailyCounts {
    pub total_employees: u64,
    pub present: u64,
    pub absent: u64,
}

#[async_trait]
pub trait HrmStore: Send + Sync {
    // --- Directory ---

    /// Inserts a new employee. `Conflict` when the id or the email is taken.
    async fn insert_employee(&self, employee: &Employee) -> HrmResult<()>;

    async fn find_employee(&self, employee_id: &str) -> HrmResult<Option<Employee>>;

    /// One employee with its counts, read together.
    async fn find_employee_stats(
        &self,
        employee_id: &str,
    ) -> HrmResult<Option<(Employee, EmployeeAggregate)>>;

    /// Every employee with its counts, ordered by `employee_id`.
    async fn list_employee_stats(&self) -> HrmResult<Vec<(Employee, EmployeeAggregate)>>;

    /// Removes the employee and all its attendance atomically.
    /// Returns the number of attendance rows removed, or `None` if the employee was absent.
    async fn delete_employee_cascade(&self, employee_id: &str) -> HrmResult<Option<u64>>;

    // --- Ledger ---

    /// Creates or overwrites the record for `(employee_id, date)`.
    /// Returns `None` without writing if the employee does not exist.
    async fn upsert_attendance(&self, mark: &AttendanceMark) -> HrmResult<Option<AttendanceRecord>>;

    /// Counts for one employee. Zero counts for an unknown id.
    async fn employee_aggregate(&self, employee_id: &str) -> HrmResult<EmployeeAggregate>;

    /// Records for one employee inside `range`, ascending by date.
    async fn attendance_for_employee(
        &self,
        employee_id: &str,
        range: &DateRange,
    ) -> HrmResult<Vec<AttendanceRecord>>;

    /// Records for everyone inside `range`, ordered by `(date, employee_id)`.
    async fn all_attendance(&self, range: &DateRange) -> HrmResult<Vec<AttendanceRecord>>;

    async fn daily_counts(&self, date: NaiveDate) -> HrmResult<DailyCounts>;
}
