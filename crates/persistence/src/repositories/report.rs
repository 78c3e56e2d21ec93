//! Read-side aggregate queries.

use sqlx::PgPool;

use crate::entities::{LabelCountEntity, SummaryEntity};
use crate::metrics::QueryTimer;

/// Repository for reporting aggregates. Nothing here is stored; every call
/// recomputes from current state.
#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    /// Creates a new ReportRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Dashboard counts over active assets plus pending procurement.
    pub async fn summary(&self) -> Result<SummaryEntity, sqlx::Error> {
        let timer = QueryTimer::new("report_summary");
        let result = sqlx::query_as::<_, SummaryEntity>(
            r#"
            SELECT
                COUNT(*) AS total_items,
                COUNT(*) FILTER (WHERE category = 'tanah') AS total_land,
                COUNT(*) FILTER (WHERE category = 'bangunan') AS total_building,
                COUNT(*) FILTER (WHERE condition <> 'baik') AS total_damaged,
                (SELECT COUNT(*) FROM procurement_requests WHERE status = 'pending')
                    AS procurement_pending
            FROM inventory_items
            WHERE status = 'aktif'
            "#,
        )
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Active assets per condition.
    pub async fn count_by_condition(&self) -> Result<Vec<LabelCountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("report_by_condition");
        let result = sqlx::query_as::<_, LabelCountEntity>(
            r#"
            SELECT condition::TEXT AS label, COUNT(*) AS count
            FROM inventory_items
            WHERE status = 'aktif'
            GROUP BY condition
            ORDER BY condition
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Active assets per category.
    pub async fn count_by_category(&self) -> Result<Vec<LabelCountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("report_by_category");
        let result = sqlx::query_as::<_, LabelCountEntity>(
            r#"
            SELECT category::TEXT AS label, COUNT(*) AS count
            FROM inventory_items
            WHERE status = 'aktif'
            GROUP BY category
            ORDER BY category
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Active assets per room; unassigned assets are reported under `-`.
    pub async fn count_by_room(&self) -> Result<Vec<LabelCountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("report_by_room");
        let result = sqlx::query_as::<_, LabelCountEntity>(
            r#"
            SELECT COALESCE(r.name, '-') AS label, COUNT(*) AS count
            FROM inventory_items i
            LEFT JOIN rooms r ON r.id = i.room_id
            WHERE i.status = 'aktif'
            GROUP BY COALESCE(r.name, '-')
            ORDER BY count DESC, label
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
