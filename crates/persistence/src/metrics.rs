//! Record store metrics.

use domain::models::EntityKind;
use metrics::{gauge, histogram};
use sqlx::PgPool;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Record the duration of one store operation.
pub fn record_query_duration(kind: EntityKind, operation: &'static str, duration_secs: f64) {
    histogram!(
        "database_query_duration_seconds",
        "kind" => kind.as_str(),
        "operation" => operation
    )
    .record(duration_secs);
}

/// Record connection pool gauges.
pub fn record_pool_metrics(pool: &PgPool) {
    let size = pool.size() as usize;
    let idle = pool.num_idle();
    let active = size.saturating_sub(idle);

    gauge!("database_connections_active").set(active as f64);
    gauge!("database_connections_idle").set(idle as f64);
    gauge!("database_connections_total").set(size as f64);
}

/// Records pool gauges every `period` until the task is aborted.
pub fn spawn_pool_metrics(pool: PgPool, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            record_pool_metrics(&pool);
        }
    })
}

/// Times a store operation; [`QueryTimer::record`] reports the elapsed time.
///
/// ```ignore
/// let timer = QueryTimer::new(EntityKind::Grades, "list");
/// let rows = sqlx::query_scalar(...).fetch_all(&pool).await;
/// timer.record();
/// ```
pub struct QueryTimer {
    kind: EntityKind,
    operation: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(kind: EntityKind, operation: &'static str) -> Self {
        Self {
            kind,
            operation,
            start: Instant::now(),
        }
    }

    pub fn record(self) {
        let duration = self.start.elapsed().as_secs_f64();
        record_query_duration(self.kind, self.operation, duration);
    }
}
