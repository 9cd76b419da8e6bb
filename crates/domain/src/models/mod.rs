//! Record models for every managed collection.

pub mod attendance;
pub mod career;
pub mod certificate;
pub mod common;
pub mod course;
pub mod dashboard;
pub mod grade;
pub mod payment;
pub mod payroll;
pub mod schedule;
pub mod user;

pub use attendance::Attendance;
pub use career::{JobApplication, JobVacancy};
pub use certificate::Certificate;
pub use common::{Badge, BadgeColor, BadgeValue, EntityKind, Facet, Locale};
pub use course::Course;
pub use grade::Grade;
pub use payment::Payment;
pub use payroll::Payroll;
pub use schedule::Schedule;
pub use user::{Role, UserRecord};
