//! PostgreSQL implementation of AssessmentResultStore.
//!
//! Records live in `dna_assessment_results`. The conditional append runs in a
//! transaction that first takes a per-user advisory lock, so two submissions
//! for the same user are serialized while other users proceed in parallel.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::assessment::{AnswerSet, ClassificationResult, DnaType, SubtypeSlug};
use crate::domain::foundation::{
    AssessmentResultId, DomainError, ErrorCode, Percentage, Timestamp, UserId,
};
use crate::ports::{AppendOutcome, AssessmentResultStore};

/// PostgreSQL implementation of the AssessmentResultStore port.
///
/// # Example
///
/// ```ignore
/// let pool = connect_pool(&config.database).await?;
/// let store = Arc::new(PostgresResultStore::new(pool));
/// ```
pub struct PostgresResultStore {
    pool: PgPool,
}

impl PostgresResultStore {
    /// Creates a new PostgresResultStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, user_id, dominant_type, awareness_percentage, architect_score,
           alchemist_score, subtype, responses, created_at
    FROM dna_assessment_results
"#;

/// Database row representation of a classification record.
#[derive(Debug, sqlx::FromRow)]
struct ResultRow {
    id: Uuid,
    user_id: String,
    dominant_type: String,
    awareness_percentage: i16,
    architect_score: i16,
    alchemist_score: i16,
    subtype: String,
    responses: Json<Vec<String>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ResultRow> for ClassificationResult {
    type Error = DomainError;

    fn try_from(row: ResultRow) -> Result<Self, Self::Error> {
        Ok(ClassificationResult {
            id: AssessmentResultId::from_uuid(row.id),
            user_id: UserId::new(row.user_id).map_err(|e| corrupt("user_id", e))?,
            dominant_type: row
                .dominant_type
                .parse::<DnaType>()
                .map_err(|e| corrupt("dominant_type", e))?,
            awareness_percentage: small_to_u8("awareness_percentage", row.awareness_percentage)
                .and_then(|v| Percentage::try_new(v).map_err(|e| corrupt("awareness_percentage", e)))?,
            architect_score: small_to_u8("architect_score", row.architect_score)?,
            alchemist_score: small_to_u8("alchemist_score", row.alchemist_score)?,
            subtype: row
                .subtype
                .parse::<SubtypeSlug>()
                .map_err(|e| corrupt("subtype", e))?,
            raw_responses: AnswerSet::parse(row.responses.0.as_slice()).map_err(|e| corrupt("responses", e))?,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

fn corrupt(column: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Invalid {} value in dna_assessment_results: {}", column, err),
    )
    .with_detail("column", column)
}

fn small_to_u8(column: &str, value: i16) -> Result<u8, DomainError> {
    u8::try_from(value).map_err(|e| corrupt(column, e))
}

/// Maps a sqlx failure onto the port error.
///
/// Connectivity problems, deadlocks and serialization failures are transient;
/// everything else is a database error.
fn store_error(context: &str, err: sqlx::Error) -> DomainError {
    let transient = match &err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => true,
        sqlx::Error::Database(db_err) => {
            matches!(db_err.code().as_deref(), Some("40001") | Some("40P01"))
        }
        _ => false,
    };

    let message = format!("{}: {}", context, err);
    if transient {
        DomainError::store_unavailable(message)
    } else {
        DomainError::new(ErrorCode::DatabaseError, message)
    }
}

fn clamp_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

#[async_trait]
impl AssessmentResultStore for PostgresResultStore {
    async fn find_latest_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ClassificationResult>, DomainError> {
        let sql = format!(
            "{} WHERE user_id = $1 ORDER BY created_at DESC, id DESC LIMIT 1",
            SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, ResultRow>(&sql)
            .bind(user_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Failed to fetch latest assessment result", e))?;

        row.map(ClassificationResult::try_from).transpose()
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<ClassificationResult>, DomainError> {
        let sql = format!(
            "{} WHERE user_id = $1 ORDER BY created_at DESC, id DESC LIMIT $2",
            SELECT_COLUMNS
        );
        let rows = sqlx::query_as::<_, ResultRow>(&sql)
            .bind(user_id.as_str())
            .bind(clamp_limit(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error("Failed to list assessment results", e))?;

        rows.into_iter().map(ClassificationResult::try_from).collect()
    }

    async fn append_if_latest(
        &self,
        expected: Option<AssessmentResultId>,
        record: &ClassificationResult,
    ) -> Result<AppendOutcome, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| store_error("Failed to start transaction", e))?;

        // Held until commit or rollback.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(record.user_id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| store_error("Failed to lock user results", e))?;

        let sql = format!(
            "{} WHERE user_id = $1 ORDER BY created_at DESC, id DESC LIMIT 1",
            SELECT_COLUMNS
        );
        let current = sqlx::query_as::<_, ResultRow>(&sql)
            .bind(record.user_id.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| store_error("Failed to fetch latest assessment result", e))?
            .map(ClassificationResult::try_from)
            .transpose()?;

        if current.as_ref().map(|latest| latest.id) != expected {
            tx.rollback()
                .await
                .map_err(|e| store_error("Failed to roll back transaction", e))?;
            return Ok(AppendOutcome::Conflict { current });
        }

        let responses: Vec<String> = record
            .raw_responses
            .as_slice()
            .iter()
            .map(|label| label.as_str().to_string())
            .collect();

        sqlx::query(
            r#"
            INSERT INTO dna_assessment_results (
                id, user_id, dominant_type, awareness_percentage, architect_score,
                alchemist_score, subtype, responses, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(*record.id.as_uuid())
        .bind(record.user_id.as_str())
        .bind(record.dominant_type.as_str())
        .bind(i16::from(record.awareness_percentage.value()))
        .bind(i16::from(record.architect_score))
        .bind(i16::from(record.alchemist_score))
        .bind(record.subtype.as_str())
        .bind(Json(responses))
        .bind(*record.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| store_error("Failed to insert assessment result", e))?;

        tx.commit()
            .await
            .map_err(|e| store_error("Failed to commit transaction", e))?;

        Ok(AppendOutcome::Appended)
    }
}
