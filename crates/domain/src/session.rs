//! Per-request identity.
//!
//! A [`Session`] is built once per request and passed explicitly to every
//! operation that depends on who is asking.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::common::{EntityKind, Locale};
use crate::models::user::Role;
use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    user_id: Option<Uuid>,
    role: Role,
    locale: Locale,
}

impl Session {
    pub fn new(user_id: Option<Uuid>, role: Role, locale: Locale) -> Self {
        Self {
            user_id,
            role,
            locale,
        }
    }

    /// Session used when the gateway forwards no identity.
    pub fn anonymous_admin(locale: Locale) -> Self {
        Self::new(None, Role::Admin, locale)
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn can_manage(&self, kind: EntityKind) -> bool {
        kind.managers().contains(&self.role)
    }

    /// Whether the session sees only its own records of `kind`.
    pub fn is_scoped(&self, kind: EntityKind) -> bool {
        kind.scoped_roles().contains(&self.role)
    }

    /// Whether `record` is visible to this session.
    ///
    /// Scoped roles see a record only when they own it; a scoped session
    /// without a user id sees nothing.
    pub fn can_view<R: Record>(&self, record: &R) -> bool {
        if !self.is_scoped(R::KIND) {
            return true;
        }
        match (self.user_id, record.owner_id()) {
            (Some(user), Some(owner)) => user == owner,
            _ => false,
        }
    }

    /// Keeps the records this session may see, preserving order.
    pub fn scope<R: Record>(&self, records: Vec<R>) -> Vec<R> {
        if !self.is_scoped(R::KIND) {
            return records;
        }
        records.into_iter().filter(|r| self.can_view(r)).collect()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::anonymous_admin(Locale::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::{Attendance, AttendanceForm, AttendanceStatus};
    use crate::models::payroll::{Payroll, PayrollForm, PayrollStatus};
    use crate::record::Resource;
    use chrono::{NaiveDate, Utc};

    fn attendance(student_id: Uuid) -> Attendance {
        Attendance::create(
            AttendanceForm {
                student_id,
                student_name: "Student".to_string(),
                class_name: "X-1".to_string(),
                subject: "Art".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 9, 3).unwrap(),
                status: AttendanceStatus::Present,
                note: None,
            },
            Uuid::new_v4(),
            Utc::now(),
        )
    }

    fn payroll(teacher_id: Uuid) -> Payroll {
        Payroll::create(
            PayrollForm {
                teacher_id,
                teacher_name: "Teacher".to_string(),
                position: "Art Teacher".to_string(),
                period: "2024-09".to_string(),
                base_salary: 5_000_000.0,
                allowances: vec![],
                deductions: vec![],
                status: PayrollStatus::Draft,
            },
            Uuid::new_v4(),
            Utc::now(),
        )
    }

    #[test]
    fn test_default_is_anonymous_admin() {
        let session = Session::default();
        assert_eq!(session.role(), Role::Admin);
        assert_eq!(session.user_id(), None);
        assert_eq!(session.locale(), Locale::En);
    }

    #[test]
    fn test_can_manage() {
        let teacher = Session::new(Some(Uuid::new_v4()), Role::Teacher, Locale::En);
        assert!(teacher.can_manage(EntityKind::Grades));
        assert!(teacher.can_manage(EntityKind::Attendance));
        assert!(!teacher.can_manage(EntityKind::Users));
        assert!(!teacher.can_manage(EntityKind::Payments));

        let student = Session::new(Some(Uuid::new_v4()), Role::Student, Locale::En);
        for kind in EntityKind::ALL {
            assert!(!student.can_manage(kind));
        }

        let admin = Session::default();
        for kind in EntityKind::ALL {
            assert!(admin.can_manage(kind));
        }
    }

    #[test]
    fn test_student_sees_only_own_attendance() {
        let me = Uuid::new_v4();
        let session = Session::new(Some(me), Role::Student, Locale::Id);
        let records = vec![attendance(me), attendance(Uuid::new_v4()), attendance(me)];
        let visible = session.scope(records);
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|r| r.student_id == me));
    }

    #[test]
    fn test_teacher_sees_all_attendance_but_own_payroll() {
        let me = Uuid::new_v4();
        let session = Session::new(Some(me), Role::Teacher, Locale::En);
        assert_eq!(
            session
                .scope(vec![attendance(Uuid::new_v4()), attendance(Uuid::new_v4())])
                .len(),
            2
        );
        let visible = session.scope(vec![payroll(me), payroll(Uuid::new_v4())]);
        assert_eq!(visible.len(), 1);
    }

    #[test]
    fn test_scoped_without_user_sees_nothing() {
        let session = Session::new(None, Role::Student, Locale::En);
        assert!(session.scope(vec![attendance(Uuid::new_v4())]).is_empty());
        assert!(!session.can_view(&payroll(Uuid::new_v4())));
    }
}
