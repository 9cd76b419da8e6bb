use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use domain::models::{
    Attendance, Certificate, Course, Grade, JobApplication, JobVacancy, Payment, Payroll,
    Schedule, UserRecord,
};
use domain::Record;
use persistence::seed;
use persistence::store::{seed_if_empty, MemoryStore, PgStore, RecordStore, StoreError};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{Config, StorageBackend};
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{applications, courses, health, records, summaries};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub stores: Stores,
}

impl AppState {
    /// The store serving records of type `R`.
    pub fn store<R: Record>(&self) -> Arc<dyn RecordStore<R>>
    where
        Stores: HasStore<R>,
    {
        HasStore::<R>::store_for(&self.stores)
    }
}

/// One record store per collection.
#[derive(Clone)]
pub struct Stores {
    pub backend: StorageBackend,
    pub users: Arc<dyn RecordStore<UserRecord>>,
    pub courses: Arc<dyn RecordStore<Course>>,
    pub grades: Arc<dyn RecordStore<Grade>>,
    pub schedules: Arc<dyn RecordStore<Schedule>>,
    pub certificates: Arc<dyn RecordStore<Certificate>>,
    pub vacancies: Arc<dyn RecordStore<JobVacancy>>,
    pub applications: Arc<dyn RecordStore<JobApplication>>,
    pub payments: Arc<dyn RecordStore<Payment>>,
    pub payroll: Arc<dyn RecordStore<Payroll>>,
    pub attendance: Arc<dyn RecordStore<Attendance>>,
}

impl Stores {
    /// Empty in-memory collections.
    pub fn memory() -> Self {
        Self {
            backend: StorageBackend::Memory,
            users: Arc::new(MemoryStore::new()),
            courses: Arc::new(MemoryStore::new()),
            grades: Arc::new(MemoryStore::new()),
            schedules: Arc::new(MemoryStore::new()),
            certificates: Arc::new(MemoryStore::new()),
            vacancies: Arc::new(MemoryStore::new()),
            applications: Arc::new(MemoryStore::new()),
            payments: Arc::new(MemoryStore::new()),
            payroll: Arc::new(MemoryStore::new()),
            attendance: Arc::new(MemoryStore::new()),
        }
    }

    /// Collections backed by the `records` table.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            backend: StorageBackend::Postgres,
            users: Arc::new(PgStore::new(pool.clone())),
            courses: Arc::new(PgStore::new(pool.clone())),
            grades: Arc::new(PgStore::new(pool.clone())),
            schedules: Arc::new(PgStore::new(pool.clone())),
            certificates: Arc::new(PgStore::new(pool.clone())),
            vacancies: Arc::new(PgStore::new(pool.clone())),
            applications: Arc::new(PgStore::new(pool.clone())),
            payments: Arc::new(PgStore::new(pool.clone())),
            payroll: Arc::new(PgStore::new(pool.clone())),
            attendance: Arc::new(PgStore::new(pool)),
        }
    }

    /// Loads the demo dataset into every empty collection.
    pub async fn seed_demo(&self) -> Result<usize, StoreError> {
        let mut total = 0;
        total += seed_if_empty(self.users.as_ref(), seed::users()).await?;
        total += seed_if_empty(self.courses.as_ref(), seed::courses()).await?;
        total += seed_if_empty(self.grades.as_ref(), seed::grades()).await?;
        total += seed_if_empty(self.schedules.as_ref(), seed::schedules()).await?;
        total += seed_if_empty(self.certificates.as_ref(), seed::certificates()).await?;
        total += seed_if_empty(self.vacancies.as_ref(), seed::vacancies()).await?;
        total += seed_if_empty(self.applications.as_ref(), seed::applications()).await?;
        total += seed_if_empty(self.payments.as_ref(), seed::payments()).await?;
        total += seed_if_empty(self.payroll.as_ref(), seed::payroll()).await?;
        total += seed_if_empty(self.attendance.as_ref(), seed::attendance()).await?;
        Ok(total)
    }

    /// Reachability of the backing store. All collections share one
    /// backend, so probing one is enough.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.users.ping().await
    }
}

/// Looks up the store serving records of type `R`.
pub trait HasStore<R: Record> {
    fn store_for(&self) -> Arc<dyn RecordStore<R>>;
}

macro_rules! has_store {
    ($($field:ident => $record:ty),* $(,)?) => {
        $(
            impl HasStore<$record> for Stores {
                fn store_for(&self) -> Arc<dyn RecordStore<$record>> {
                    self.$field.clone()
                }
            }
        )*
    };
}

has_store! {
    users => UserRecord,
    courses => Course,
    grades => Grade,
    schedules => Schedule,
    certificates => Certificate,
    vacancies => JobVacancy,
    applications => JobApplication,
    payments => Payment,
    payroll => Payroll,
    attendance => Attendance,
}

pub fn create_app(config: Config, stores: Stores) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        config: config.clone(),
        stores,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Aggregates and workflow routes sit next to the generic record routes;
    // static segments (`/grades/summary`) take priority over `/:id`.
    let record_routes = Router::new()
        .merge(records::routes::<UserRecord>())
        .merge(records::routes::<Course>())
        .merge(records::routes::<Grade>())
        .merge(records::routes::<Schedule>())
        .merge(records::routes::<Certificate>())
        .merge(records::routes::<JobVacancy>())
        .merge(records::routes::<JobApplication>())
        .merge(records::routes::<Payment>())
        .merge(records::routes::<Payroll>())
        .merge(records::routes::<Attendance>())
        .route("/api/v1/courses/:id/view", get(courses::view_course))
        .route(
            "/api/v1/applications/:id/status",
            post(applications::change_status),
        )
        .route("/api/v1/grades/summary", get(summaries::grade_summary))
        .route(
            "/api/v1/attendance/summary",
            get(summaries::attendance_summary),
        )
        .route("/api/v1/dashboard", get(summaries::dashboard));

    // Public routes
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(record_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
