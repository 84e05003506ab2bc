use super::{DailyCounts, HrmStore};
use crate::error::{HrmError, HrmResult};
use crate::model::attendance::{AttendanceMark, AttendanceRecord, AttendanceStatus, DateRange};
use crate::model::employee::{Employee, EmployeeAggregate};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    employees: BTreeMap<String, Employee>,
    /// Keyed by (employee_id, date) so one employee's history is a contiguous range.
    attendance: BTreeMap<(String, NaiveDate), AttendanceStatus>,
}

impl Tables {
    fn record(&self, employee_id: &str, date: NaiveDate, status: AttendanceStatus) -> AttendanceRecord {
        let employee_name = self
            .employees
            .get(employee_id)
            .map(|e| e.full_name.clone())
            .unwrap_or_default();

        AttendanceRecord {
            employee_id: employee_id.to_string(),
            employee_name,
            date,
            status,
        }
    }

    fn aggregate(&self, employee_id: &str) -> EmployeeAggregate {
        self.history(employee_id, &DateRange::all())
            .fold(EmployeeAggregate::default(), |mut acc, (_, status)| {
                match status {
                    AttendanceStatus::Present => acc.total_present += 1,
                    AttendanceStatus::Absent => acc.total_absent += 1,
                }
                acc
            })
    }

    fn history<'a>(
        &'a self,
        employee_id: &str,
        range: &DateRange,
    ) -> impl Iterator<Item = (NaiveDate, AttendanceStatus)> + use<'a> {
        let window = if range.is_empty() {
            None
        } else {
            let lo = (employee_id.to_string(), range.from.unwrap_or(NaiveDate::MIN));
            let hi = (employee_id.to_string(), range.to.unwrap_or(NaiveDate::MAX));
            Some(self.attendance.range(lo..=hi))
        };

        window
            .into_iter()
            .flatten()
            .map(|((_, date), status)| (*date, *status))
    }
}

/// In-process store behind one lock.
///
/// Every operation takes the lock once, so a cascade delete or a checked upsert is
/// never visible half applied. Used by the test suite and `STORE_BACKEND=memory`.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl HrmStore for MemoryStore {
    async fn insert_employee(&self, employee: &Employee) -> HrmResult<()> {
        let mut tables = self.write();

        if tables.employees.contains_key(&employee.employee_id) {
            return Err(HrmError::duplicate_employee_id(&employee.employee_id));
        }
        if tables
            .employees
            .values()
            .any(|e| e.email.eq_ignore_ascii_case(&employee.email))
        {
            return Err(HrmError::duplicate_email(&employee.email));
        }

        tables
            .employees
            .insert(employee.employee_id.clone(), employee.clone());
        Ok(())
    }

    async fn find_employee(&self, employee_id: &str) -> HrmResult<Option<Employee>> {
        Ok(self.read().employees.get(employee_id).cloned())
    }

    async fn find_employee_stats(
        &self,
        employee_id: &str,
    ) -> HrmResult<Option<(Employee, EmployeeAggregate)>> {
        let tables = self.read();
        Ok(tables
            .employees
            .get(employee_id)
            .map(|e| (e.clone(), tables.aggregate(employee_id))))
    }

    async fn list_employee_stats(&self) -> HrmResult<Vec<(Employee, EmployeeAggregate)>> {
        let tables = self.read();
        Ok(tables
            .employees
            .values()
            .map(|e| (e.clone(), tables.aggregate(&e.employee_id)))
            .collect())
    }

    async fn delete_employee_cascade(&self, employee_id: &str) -> HrmResult<Option<u64>> {
        let mut tables = self.write();

        if tables.employees.remove(employee_id).is_none() {
            return Ok(None);
        }

        let before = tables.attendance.len();
        tables.attendance.retain(|(owner, _), _| owner != employee_id);
        Ok(Some((before - tables.attendance.len()) as u64))
    }

    async fn upsert_attendance(&self, mark: &AttendanceMark) -> HrmResult<Option<AttendanceRecord>> {
        let mut tables = self.write();

        if !tables.employees.contains_key(&mark.employee_id) {
            return Ok(None);
        }

        tables
            .attendance
            .insert((mark.employee_id.clone(), mark.date), mark.status);
        Ok(Some(tables.record(&mark.employee_id, mark.date, mark.status)))
    }

    async fn employee_aggregate(&self, employee_id: &str) -> HrmResult<EmployeeAggregate> {
        Ok(self.read().aggregate(employee_id))
    }

    async fn attendance_for_employee(
        &self,
        employee_id: &str,
        range: &DateRange,
    ) -> HrmResult<Vec<AttendanceRecord>> {
        let tables = self.read();
        Ok(tables
            .history(employee_id, range)
            .map(|(date, status)| tables.record(employee_id, date, status))
            .collect())
    }

    async fn all_attendance(&self, range: &DateRange) -> HrmResult<Vec<AttendanceRecord>> {
        let tables = self.read();
        let mut records: Vec<AttendanceRecord> = tables
            .attendance
            .iter()
            .filter(|((_, date), _)| range.contains(*date))
            .map(|((id, date), status)| tables.record(id, *date, *status))
            .collect();

        records.sort_by(|a, b| (a.date, &a.employee_id).cmp(&(b.date, &b.employee_id)));
        Ok(records)
    }

    async fn daily_counts(&self, date: NaiveDate) -> HrmResult<DailyCounts> {
        let tables = self.read();
        let mut counts = DailyCounts {
            total_employees: tables.employees.len() as u64,
            ..DailyCounts::default()
        };

        for ((_, day), status) in tables.attendance.iter() {
            if *day != date {
                continue;
            }
            match status {
                AttendanceStatus::Present => counts.present += 1,
                AttendanceStatus::Absent => counts.absent += 1,
            }
        }

        Ok(counts)
    }
}
