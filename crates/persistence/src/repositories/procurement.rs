//! Procurement request repository.

use domain::models::procurement::SubmitProcurementRequest;
use domain::models::ProcurementStatus;
use sqlx::PgPool;

use crate::entities::{ProcurementRequestEntity, ProcurementStatusDb};
use crate::error::LedgerError;
use crate::metrics::QueryTimer;

/// Repository for procurement requests.
#[derive(Clone)]
pub struct ProcurementRepository {
    pool: PgPool,
}

impl ProcurementRepository {
    /// Creates a new ProcurementRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Submit a request in `pending` status.
    pub async fn submit(
        &self,
        request: &SubmitProcurementRequest,
        requester_id: i64,
    ) -> Result<i64, LedgerError> {
        let timer = QueryTimer::new("submit_procurement");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO procurement_requests
                (item_name, quantity, estimated_price, purpose, status, requester_id)
            VALUES ($1, $2, $3, $4, 'pending', $5)
            RETURNING id
            "#,
        )
        .bind(request.item_name.trim())
        .bind(request.quantity)
        .bind(request.estimated_price)
        .bind(request.purpose.as_deref())
        .bind(requester_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?)
    }

    /// Set the status of a request.
    ///
    /// With `strict` set, the change must follow
    /// [`ProcurementStatus::can_transition_to`]; otherwise any value is accepted.
    /// Returns the previous status.
    pub async fn set_status(
        &self,
        id: i64,
        status: ProcurementStatus,
        strict: bool,
    ) -> Result<ProcurementStatus, LedgerError> {
        let timer = QueryTimer::new("set_procurement_status");
        let mut tx = self.pool.begin().await?;

        let current: ProcurementStatus = sqlx::query_scalar::<_, ProcurementStatusDb>(
            "SELECT status FROM procurement_requests WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| LedgerError::not_found("Procurement request"))?
        .into();

        if strict && !current.can_transition_to(status) {
            return Err(LedgerError::Validation(format!(
                "Cannot change procurement status from {} to {}",
                current, status
            )));
        }

        sqlx::query("UPDATE procurement_requests SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(ProcurementStatusDb::from(status))
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        timer.record();
        Ok(current)
    }

    /// List all requests with the requester's name, ordered by id.
    pub async fn list(&self) -> Result<Vec<ProcurementRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_procurement");
        let result = sqlx::query_as::<_, ProcurementRequestEntity>(
            r#"
            SELECT p.id, p.item_name, p.quantity, p.estimated_price, p.purpose, p.status,
                   p.requester_id, u.name AS requester_name, p.request_date
            FROM procurement_requests p
            JOIN users u ON u.id = p.requester_id
            ORDER BY p.id
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
