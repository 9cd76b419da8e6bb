//! Demo datasets loaded into empty stores.
//!
//! Ids are fixed so records can reference each other (grades, attendance
//! and payments point at student users; payroll points at teachers).

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use domain::models::attendance::{Attendance, AttendanceForm, AttendanceStatus};
use domain::models::career::{
    Applicant, ApplicationForm, ApplicationStatus, EmploymentType, JobApplication, JobVacancy,
    VacancyForm, VacancyStatus,
};
use domain::models::certificate::{Certificate, CertificateForm, CertificateType};
use domain::models::course::{Course, CourseForm, CourseLevel, CourseModule, CourseStatus};
use domain::models::grade::{Grade, GradeForm, GradeStatus, ScoreComponent};
use domain::models::payment::{Payment, PaymentForm, PaymentMethod, PaymentStatus};
use domain::models::payroll::{Payroll, PayrollForm, PayrollStatus, SalaryComponent};
use domain::models::schedule::{
    Schedule, ScheduleClass, ScheduleForm, ScheduleStatus, ScheduleTeacher, ScheduleType,
};
use domain::models::user::{Role, UserForm, UserRecord, UserStatus};
use domain::Resource;
use uuid::Uuid;

/// Id namespaces, one per collection.
mod ids {
    use uuid::Uuid;

    pub const USERS: u128 = 0x1000;
    pub const COURSES: u128 = 0x2000;
    pub const GRADES: u128 = 0x3000;
    pub const SCHEDULES: u128 = 0x4000;
    pub const CERTIFICATES: u128 = 0x5000;
    pub const VACANCIES: u128 = 0x6000;
    pub const APPLICATIONS: u128 = 0x7000;
    pub const PAYMENTS: u128 = 0x8000;
    pub const PAYROLL: u128 = 0x9000;
    pub const ATTENDANCE: u128 = 0xA000;

    pub fn id(namespace: u128, n: u128) -> Uuid {
        Uuid::from_u128(0x5eed_0000_0000_0000_0000_0000_0000_0000 | (namespace << 16) | n)
    }
}

/// Id of the n-th seeded user (1-based).
pub fn user_id(n: u128) -> Uuid {
    ids::id(ids::USERS, n)
}

struct Person {
    n: u128,
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    role: Role,
    status: UserStatus,
}

const PEOPLE: &[Person] = &[
    Person { n: 1, name: "Ahmad Fauzi", email: "admin@eduplatform.id", phone: "+62 811-1000-0001", role: Role::Admin, status: UserStatus::Active },
    Person { n: 2, name: "Dewi Lestari", email: "dewi.lestari@eduplatform.id", phone: "+62 812-2000-0002", role: Role::Teacher, status: UserStatus::Active },
    Person { n: 3, name: "Hendra Gunawan", email: "hendra.gunawan@eduplatform.id", phone: "+62 812-2000-0003", role: Role::Teacher, status: UserStatus::Active },
    Person { n: 4, name: "Sri Wahyuni", email: "sri.wahyuni@eduplatform.id", phone: "+62 812-2000-0004", role: Role::Teacher, status: UserStatus::Inactive },
    Person { n: 5, name: "Budi Santoso", email: "budi.santoso@student.eduplatform.id", phone: "+62 813-3000-0005", role: Role::Student, status: UserStatus::Active },
    Person { n: 6, name: "Siti Rahma", email: "siti.rahma@student.eduplatform.id", phone: "+62 813-3000-0006", role: Role::Student, status: UserStatus::Active },
    Person { n: 7, name: "Rina Wijaya", email: "rina.wijaya@student.eduplatform.id", phone: "+62 813-3000-0007", role: Role::Student, status: UserStatus::Active },
    Person { n: 8, name: "Agus Pratama", email: "agus.pratama@student.eduplatform.id", phone: "+62 813-3000-0008", role: Role::Student, status: UserStatus::Inactive },
];

fn seeded_at() -> DateTime<Utc> {
    DateTime::from_timestamp(1_719_820_800, 0).unwrap_or_default()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn time(h: u32, m: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(h, m, 0)
}

fn name_of(n: u128) -> String {
    PEOPLE
        .iter()
        .find(|p| p.n == n)
        .map(|p| p.name.to_string())
        .unwrap_or_default()
}

pub fn users() -> Vec<UserRecord> {
    PEOPLE
        .iter()
        .map(|p| {
            UserRecord::create(
                UserForm {
                    name: p.name.to_string(),
                    email: p.email.to_string(),
                    phone: p.phone.to_string(),
                    role: p.role,
                    status: p.status,
                },
                user_id(p.n),
                seeded_at(),
            )
        })
        .collect()
}

fn module(title: &str, minutes: u32, lessons: &[&str]) -> CourseModule {
    CourseModule {
        title: title.to_string(),
        duration_minutes: minutes,
        lessons: lessons.iter().map(|l| l.to_string()).collect(),
    }
}

pub fn courses() -> Vec<Course> {
    let forms = vec![
        CourseForm {
            name: "Web Development Bootcamp".to_string(),
            description: "HTML, CSS, JavaScript and a first full-stack project".to_string(),
            category: "Programming".to_string(),
            level: CourseLevel::Beginner,
            duration_weeks: 12,
            price: 2_500_000.0,
            capacity: 40,
            status: CourseStatus::Active,
            modules: vec![
                module("HTML & CSS", 240, &["Semantic HTML", "Flexbox", "Grid"]),
                module("JavaScript", 360, &["Syntax", "DOM", "Fetch API"]),
                module("Final Project", 480, &["Planning", "Build", "Demo"]),
            ],
        },
        CourseForm {
            name: "Data Science Fundamentals".to_string(),
            description: "Statistics, pandas and visualisation".to_string(),
            category: "Data".to_string(),
            level: CourseLevel::Intermediate,
            duration_weeks: 10,
            price: 3_000_000.0,
            capacity: 30,
            status: CourseStatus::Active,
            modules: vec![
                module("Statistics Refresher", 180, &["Distributions", "Hypothesis tests"]),
                module("Pandas", 300, &["DataFrames", "Grouping"]),
            ],
        },
        CourseForm {
            name: "UI/UX Design Essentials".to_string(),
            description: "Research, wireframes and prototyping".to_string(),
            category: "Design".to_string(),
            level: CourseLevel::Beginner,
            duration_weeks: 6,
            price: 1_750_000.0,
            capacity: 25,
            status: CourseStatus::Inactive,
            modules: vec![module("User Research", 120, &["Interviews", "Personas"])],
        },
        CourseForm {
            name: "Cloud Architecture".to_string(),
            description: "Designing scalable systems on managed infrastructure".to_string(),
            category: "Programming".to_string(),
            level: CourseLevel::Advanced,
            duration_weeks: 8,
            price: 4_250_000.0,
            capacity: 20,
            status: CourseStatus::Draft,
            modules: vec![],
        },
    ];

    forms
        .into_iter()
        .zip(1..)
        .map(|(form, n)| Course::create(form, ids::id(ids::COURSES, n), seeded_at()))
        .collect()
}

fn components(scores: &[(&str, f64)]) -> Vec<ScoreComponent> {
    scores
        .iter()
        .map(|(name, score)| ScoreComponent::new(*name, *score))
        .collect()
}

pub fn grades() -> Vec<Grade> {
    let rows: Vec<(u128, &str, &str, Vec<ScoreComponent>, GradeStatus)> = vec![
        (5, "Mathematics", "Grade 10", components(&[("Assignment 1", 95.0), ("Assignment 2", 98.0), ("Quiz", 94.0), ("Midterm", 97.0), ("Final", 97.0)]), GradeStatus::Published),
        (5, "Physics", "Grade 10", components(&[("Lab", 78.0), ("Midterm", 82.0), ("Final", 80.0)]), GradeStatus::Published),
        (6, "Mathematics", "Grade 10", components(&[("Assignment 1", 72.0), ("Midterm", 68.0), ("Final", 75.0)]), GradeStatus::Published),
        (6, "Biology", "Grade 10", components(&[("Practicum", 88.0), ("Final", 91.0)]), GradeStatus::Draft),
        (7, "Mathematics", "Grade 11", components(&[("Quiz", 55.0), ("Midterm", 62.0), ("Final", 58.0)]), GradeStatus::Published),
        (8, "History", "Grade 11", components(&[("Essay", 66.0), ("Final", 61.0)]), GradeStatus::Draft),
    ];

    rows.into_iter()
        .zip(1..)
        .map(|((student, subject, level, components, status), n)| {
            Grade::create(
                GradeForm {
                    student_id: user_id(student),
                    student_name: name_of(student),
                    subject: subject.to_string(),
                    level: level.to_string(),
                    components,
                    status,
                },
                ids::id(ids::GRADES, n),
                seeded_at(),
            )
        })
        .collect()
}

fn teacher(n: u128) -> ScheduleTeacher {
    ScheduleTeacher {
        id: user_id(n),
        name: name_of(n),
    }
}

fn class(name: &str, room: Option<&str>) -> ScheduleClass {
    ScheduleClass {
        name: name.to_string(),
        room: room.map(str::to_string),
    }
}

pub fn schedules() -> Vec<Schedule> {
    let forms = vec![
        ScheduleForm {
            title: "Mathematics X-IPA-1".to_string(),
            description: "Weekly mathematics session".to_string(),
            schedule_type: ScheduleType::Regular,
            start_date: date(2024, 7, 15),
            end_date: date(2024, 12, 20),
            start_time: time(7, 30),
            end_time: time(9, 0),
            teachers: vec![teacher(2)],
            classes: vec![class("X-IPA-1", Some("R101"))],
            status: ScheduleStatus::Ongoing,
        },
        ScheduleForm {
            title: "Midterm Examinations".to_string(),
            description: "Odd semester midterms for all grades".to_string(),
            schedule_type: ScheduleType::Exam,
            start_date: date(2024, 9, 23),
            end_date: date(2024, 9, 27),
            start_time: time(8, 0),
            end_time: time(12, 0),
            teachers: vec![teacher(2), teacher(3)],
            classes: vec![class("X-IPA-1", None), class("XI-IPS-2", None)],
            status: ScheduleStatus::Scheduled,
        },
        ScheduleForm {
            title: "Science Fair".to_string(),
            description: "Student projects exhibition".to_string(),
            schedule_type: ScheduleType::Event,
            start_date: date(2024, 10, 12),
            end_date: date(2024, 10, 12),
            start_time: time(9, 0),
            end_time: time(15, 0),
            teachers: vec![teacher(3)],
            classes: vec![],
            status: ScheduleStatus::Scheduled,
        },
        ScheduleForm {
            title: "Independence Day".to_string(),
            description: "National holiday".to_string(),
            schedule_type: ScheduleType::Holiday,
            start_date: date(2024, 8, 17),
            end_date: date(2024, 8, 17),
            start_time: None,
            end_time: None,
            teachers: vec![],
            classes: vec![],
            status: ScheduleStatus::Completed,
        },
    ];

    forms
        .into_iter()
        .zip(1..)
        .map(|(form, n)| Schedule::create(form, ids::id(ids::SCHEDULES, n), seeded_at()))
        .collect()
}

pub fn certificates() -> Vec<Certificate> {
    let rows = vec![
        (5, "Web Development Bootcamp", CertificateType::Completion, date(2024, 3, 1), Some(date(2027, 3, 1))),
        (6, "National Math Olympiad", CertificateType::Achievement, date(2023, 11, 10), None),
        (7, "Data Science Fundamentals", CertificateType::Completion, date(2022, 5, 20), Some(date(2024, 5, 20))),
        (5, "Science Fair 2023", CertificateType::Participation, date(2023, 10, 14), None),
    ];

    rows.into_iter()
        .zip(1..)
        .map(|((student, course, certificate_type, issue_date, valid_until), n)| {
            Certificate::create(
                CertificateForm {
                    student_id: user_id(student),
                    student_name: name_of(student),
                    course_name: course.to_string(),
                    certificate_type,
                    issue_date,
                    valid_until,
                },
                ids::id(ids::CERTIFICATES, n),
                seeded_at(),
            )
        })
        .collect()
}

pub fn vacancies() -> Vec<JobVacancy> {
    let forms = vec![
        VacancyForm {
            title: "Mathematics Teacher".to_string(),
            department: "Academic".to_string(),
            location: "Jakarta".to_string(),
            employment_type: EmploymentType::FullTime,
            description: "Teach mathematics for grades 10-12".to_string(),
            requirements: vec![
                "Bachelor's degree in Mathematics or Education".to_string(),
                "Two years of teaching experience".to_string(),
            ],
            salary_min: 6_000_000.0,
            salary_max: 9_000_000.0,
            deadline: Some(date(2025, 12, 31)),
            status: VacancyStatus::Open,
        },
        VacancyForm {
            title: "Frontend Developer".to_string(),
            department: "Technology".to_string(),
            location: "Remote".to_string(),
            employment_type: EmploymentType::Contract,
            description: "Build and maintain the learning portal".to_string(),
            requirements: vec!["React".to_string(), "TypeScript".to_string()],
            salary_min: 10_000_000.0,
            salary_max: 15_000_000.0,
            deadline: None,
            status: VacancyStatus::Open,
        },
        VacancyForm {
            title: "Administrative Intern".to_string(),
            department: "Operations".to_string(),
            location: "Bandung".to_string(),
            employment_type: EmploymentType::Internship,
            description: "Support the registrar's office".to_string(),
            requirements: vec![],
            salary_min: 2_000_000.0,
            salary_max: 2_500_000.0,
            deadline: Some(date(2024, 6, 30)),
            status: VacancyStatus::Closed,
        },
    ];

    forms
        .into_iter()
        .zip(1..)
        .map(|(form, n)| JobVacancy::create(form, ids::id(ids::VACANCIES, n), seeded_at()))
        .collect()
}

pub fn applications() -> Vec<JobApplication> {
    let rows = vec![
        (1, "Mathematics Teacher", "Yusuf Hidayat", "yusuf.hidayat@mail.id", "081311112222", ApplicationStatus::Pending),
        (1, "Mathematics Teacher", "Maya Sari", "maya.sari@mail.id", "081322223333", ApplicationStatus::Interview),
        (2, "Frontend Developer", "Rizky Ramadhan", "rizky.r@mail.id", "081333334444", ApplicationStatus::Shortlisted),
        (3, "Administrative Intern", "Nadia Putri", "nadia.putri@mail.id", "081344445555", ApplicationStatus::Rejected),
    ];

    rows.into_iter()
        .zip(1..)
        .map(|((vacancy, position, name, email, phone, status), n)| {
            let mut application = JobApplication::create(
                ApplicationForm {
                    vacancy_id: ids::id(ids::VACANCIES, vacancy),
                    position: position.to_string(),
                    applicant: Applicant {
                        name: name.to_string(),
                        email: email.to_string(),
                        phone: phone.to_string(),
                    },
                    cover_letter: String::new(),
                    resume_url: None,
                },
                ids::id(ids::APPLICATIONS, n),
                seeded_at(),
            );
            // Seed rows start mid-pipeline without replaying each move.
            application.status = status;
            application
        })
        .collect()
}

pub fn payments() -> Vec<Payment> {
    let rows = vec![
        (5, "Web Development Bootcamp", 2_500_000.0, 250_000.0, PaymentMethod::BankTransfer, PaymentStatus::Paid),
        (6, "Data Science Fundamentals", 3_000_000.0, 0.0, PaymentMethod::EWallet, PaymentStatus::Pending),
        (7, "Data Science Fundamentals", 3_000_000.0, 500_000.0, PaymentMethod::CreditCard, PaymentStatus::Failed),
        (8, "UI/UX Design Essentials", 1_750_000.0, 0.0, PaymentMethod::Cash, PaymentStatus::Refunded),
    ];

    rows.into_iter()
        .zip(1..)
        .map(|((student, course, price, discount, method, status), n)| {
            Payment::create(
                PaymentForm {
                    student_id: user_id(student),
                    student_name: name_of(student),
                    course_name: course.to_string(),
                    price,
                    discount,
                    method,
                    status,
                },
                ids::id(ids::PAYMENTS, n),
                seeded_at(),
            )
        })
        .collect()
}

pub fn payroll() -> Vec<Payroll> {
    let rows = vec![
        (2, "Mathematics Teacher", "2024-06", 7_500_000.0, PayrollStatus::Paid),
        (3, "Physics Teacher", "2024-06", 7_000_000.0, PayrollStatus::Paid),
        (2, "Mathematics Teacher", "2024-07", 7_500_000.0, PayrollStatus::Approved),
        (3, "Physics Teacher", "2024-07", 7_000_000.0, PayrollStatus::Draft),
    ];

    rows.into_iter()
        .zip(1..)
        .map(|((teacher, position, period, base_salary, status), n)| {
            Payroll::create(
                PayrollForm {
                    teacher_id: user_id(teacher),
                    teacher_name: name_of(teacher),
                    position: position.to_string(),
                    period: period.to_string(),
                    base_salary,
                    allowances: vec![
                        SalaryComponent::new("Transport", 500_000.0),
                        SalaryComponent::new("Meal", 750_000.0),
                    ],
                    deductions: vec![SalaryComponent::new("BPJS", 280_000.0)],
                    status,
                },
                ids::id(ids::PAYROLL, n),
                seeded_at(),
            )
        })
        .collect()
}

pub fn attendance() -> Vec<Attendance> {
    let rows = vec![
        (5, "X-IPA-1", "Mathematics", date(2024, 7, 15), AttendanceStatus::Present, None),
        (6, "X-IPA-1", "Mathematics", date(2024, 7, 15), AttendanceStatus::Late, Some("Traffic")),
        (7, "XI-IPS-2", "Mathematics", date(2024, 7, 15), AttendanceStatus::Absent, None),
        (5, "X-IPA-1", "Mathematics", date(2024, 7, 22), AttendanceStatus::Present, None),
        (6, "X-IPA-1", "Mathematics", date(2024, 7, 22), AttendanceStatus::Present, None),
        (7, "XI-IPS-2", "Mathematics", date(2024, 7, 22), AttendanceStatus::Excused, Some("Family event")),
        (5, "X-IPA-1", "Physics", date(2024, 7, 23), AttendanceStatus::Late, None),
        (8, "XI-IPS-2", "History", date(2024, 7, 23), AttendanceStatus::Absent, None),
    ];

    rows.into_iter()
        .zip(1..)
        .map(|((student, class_name, subject, day, status, note), n)| {
            Attendance::create(
                AttendanceForm {
                    student_id: user_id(student),
                    student_name: name_of(student),
                    class_name: class_name.to_string(),
                    subject: subject.to_string(),
                    date: day,
                    status,
                    note: note.map(str::to_string),
                },
                ids::id(ids::ATTENDANCE, n),
                seeded_at(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use validator::Validate;

    fn student_ids() -> HashSet<Uuid> {
        users()
            .into_iter()
            .filter(|u| u.role == Role::Student)
            .map(|u| u.id)
            .collect()
    }

    #[test]
    fn test_ids_are_unique_across_collections() {
        let mut seen = HashSet::new();
        let all: Vec<Uuid> = users()
            .iter()
            .map(|r| r.id)
            .chain(courses().iter().map(|r| r.id))
            .chain(grades().iter().map(|r| r.id))
            .chain(schedules().iter().map(|r| r.id))
            .chain(certificates().iter().map(|r| r.id))
            .chain(vacancies().iter().map(|r| r.id))
            .chain(applications().iter().map(|r| r.id))
            .chain(payments().iter().map(|r| r.id))
            .chain(payroll().iter().map(|r| r.id))
            .chain(attendance().iter().map(|r| r.id))
            .collect();
        for id in all {
            assert!(seen.insert(id), "duplicate id {id}");
        }
    }

    #[test]
    fn test_owned_records_point_at_students() {
        let students = student_ids();
        assert!(grades().iter().all(|g| students.contains(&g.student_id)));
        assert!(attendance().iter().all(|a| students.contains(&a.student_id)));
        assert!(payments().iter().all(|p| students.contains(&p.student_id)));
        assert!(certificates().iter().all(|c| students.contains(&c.student_id)));
    }

    #[test]
    fn test_payroll_points_at_teachers() {
        let teachers: HashSet<Uuid> = users()
            .into_iter()
            .filter(|u| u.role == Role::Teacher)
            .map(|u| u.id)
            .collect();
        assert!(payroll().iter().all(|p| teachers.contains(&p.teacher_id)));
    }

    #[test]
    fn test_seed_forms_are_valid() {
        for record in users() {
            assert!(record.to_form().validate().is_ok(), "{}", record.name);
        }
        for record in courses() {
            assert!(record.to_form().validate().is_ok(), "{}", record.name);
        }
        for record in grades() {
            assert!(record.to_form().validate().is_ok());
        }
        for record in schedules() {
            assert!(record.to_form().validate().is_ok(), "{}", record.title);
        }
        for record in certificates() {
            assert!(record.to_form().validate().is_ok());
        }
        for record in vacancies() {
            assert!(record.to_form().validate().is_ok(), "{}", record.title);
        }
        for record in applications() {
            assert!(record.to_form().validate().is_ok());
        }
        for record in payments() {
            assert!(record.to_form().validate().is_ok());
        }
        for record in payroll() {
            assert!(record.to_form().validate().is_ok());
        }
        for record in attendance() {
            assert!(record.to_form().validate().is_ok());
        }
    }

    #[test]
    fn test_first_grade_is_worked_example() {
        assert_eq!(grades()[0].average_score(), 96.2);
    }
}
