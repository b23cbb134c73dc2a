//! PostgreSQL implementation of VoteStore.
//!
//! The cast is one transaction: upsert the vote row by its
//! `(choice_id, voter_id)` unique key, then recompute the choice's `votes`
//! aggregate from the vote table inside the same transaction. The aggregate
//! is therefore never derived from a snapshot a concurrent writer could have
//! invalidated.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::casting::{Vote, VoteValue};
use crate::domain::foundation::{
    ChoiceId, DomainError, ErrorCode, EventId, Timestamp, VoteId, VoterId,
};
use crate::ports::VoteStore;

/// PostgreSQL implementation of VoteStore.
#[derive(Clone)]
pub struct PostgresVoteStore {
    pool: PgPool,
}

impl PostgresVoteStore {
    /// Creates a new PostgresVoteStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs one cast attempt as a single transaction.
    async fn cast_once(
        &self,
        choice_id: ChoiceId,
        voter_id: &VoterId,
        value: VoteValue,
        justification: Option<&str>,
    ) -> Result<Vote, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to begin transaction: {}", e))
        })?;

        let row = sqlx::query(
            r#"
            INSERT INTO votes (id, choice_id, voter_id, value, justification, cast_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (choice_id, voter_id) DO UPDATE SET
                value = EXCLUDED.value,
                justification = EXCLUDED.justification,
                cast_at = EXCLUDED.cast_at
            RETURNING id, choice_id, voter_id, value, justification, cast_at
            "#,
        )
        .bind(VoteId::new().as_uuid())
        .bind(choice_id.as_uuid())
        .bind(voter_id.as_str())
        .bind(value.value() as i16)
        .bind(justification)
        .bind(Timestamp::now().as_datetime())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if foreign_key_violation(&e) {
                DomainError::new(
                    ErrorCode::ChoiceNotFound,
                    format!("Choice not found: {}", choice_id),
                )
            } else {
                map_sqlx_error("Failed to upsert vote", e)
            }
        })?;

        // Recompute the aggregate in the same transaction as the write
        let result = sqlx::query(
            r#"
            UPDATE choices
            SET votes = (SELECT COALESCE(SUM(value), 0) FROM votes WHERE choice_id = $1)
            WHERE id = $1
            "#,
        )
        .bind(choice_id.as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("Failed to recompute vote aggregate", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ChoiceNotFound,
                format!("Choice not found: {}", choice_id),
            ));
        }

        tx.commit().await.map_err(|e| {
            map_sqlx_error("Failed to commit vote transaction", e)
        })?;

        row_to_vote(row)
    }
}

#[async_trait]
impl VoteStore for PostgresVoteStore {
    async fn cast_vote(
        &self,
        choice_id: ChoiceId,
        voter_id: VoterId,
        value: VoteValue,
        justification: Option<String>,
    ) -> Result<Vote, DomainError> {
        match self
            .cast_once(choice_id, &voter_id, value, justification.as_deref())
            .await
        {
            Err(err) if err.code == ErrorCode::ConcurrentVoteConflict => {
                // One retry; the unique key makes the replay an update
                tracing::warn!(
                    choice_id = %choice_id,
                    voter_id = %voter_id,
                    "vote cast hit a write-write conflict, retrying once"
                );
                self.cast_once(choice_id, &voter_id, value, justification.as_deref())
                    .await
            }
            other => other,
        }
        .map(|vote| {
            tracing::debug!(
                choice_id = %choice_id,
                voter_id = %voter_id,
                value = value.value(),
                "vote cast recorded"
            );
            vote
        })
    }

    async fn list_votes_for_choice(&self, choice_id: ChoiceId) -> Result<Vec<Vote>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, choice_id, voter_id, value, justification, cast_at
            FROM votes
            WHERE choice_id = $1
            ORDER BY cast_at DESC
            "#,
        )
        .bind(choice_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to fetch votes", e))?;

        rows.into_iter().map(row_to_vote).collect()
    }

    async fn list_votes_for_event(&self, event_id: EventId) -> Result<Vec<Vote>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT v.id, v.choice_id, v.voter_id, v.value, v.justification, v.cast_at
            FROM votes v
            JOIN choices c ON c.id = v.choice_id
            WHERE c.event_id = $1
            ORDER BY v.cast_at DESC
            "#,
        )
        .bind(event_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to fetch event votes", e))?;

        rows.into_iter().map(row_to_vote).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Helper Functions
// ════════════════════════════════════════════════════════════════════════════════

fn row_to_vote(row: sqlx::postgres::PgRow) -> Result<Vote, DomainError> {
    let id: Uuid = row.get("id");
    let choice_id: Uuid = row.get("choice_id");
    let voter_id: String = row.get("voter_id");
    let value: i16 = row.get("value");
    let justification: Option<String> = row.get("justification");
    let cast_at: chrono::DateTime<chrono::Utc> = row.get("cast_at");

    Ok(Vote::reconstitute(
        VoteId::from_uuid(id),
        ChoiceId::from_uuid(choice_id),
        VoterId::new(voter_id)
            .map_err(|e| DomainError::new(ErrorCode::InvalidFormat, e.to_string()))?,
        vote_value_from_db(value)?,
        justification,
        Timestamp::from_datetime(cast_at),
    ))
}

fn vote_value_from_db(value: i16) -> Result<VoteValue, DomainError> {
    i8::try_from(value)
        .ok()
        .and_then(|v| VoteValue::try_from_i8(v).ok())
        .ok_or_else(|| {
            DomainError::new(
                ErrorCode::InvalidFormat,
                format!("Invalid vote value in storage: {}", value),
            )
        })
}

fn foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == "23503")
        .unwrap_or(false)
}

/// Serialization failures and deadlocks are retryable write-write conflicts.
fn map_sqlx_error(context: &str, err: sqlx::Error) -> DomainError {
    let retryable = err
        .as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == "40001" || code == "40P01")
        .unwrap_or(false);

    if retryable {
        DomainError::new(
            ErrorCode::ConcurrentVoteConflict,
            format!("{}: {}", context, err),
        )
    } else {
        DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_value_from_db_accepts_stored_values() {
        assert_eq!(vote_value_from_db(1).unwrap(), VoteValue::For);
        assert_eq!(vote_value_from_db(-1).unwrap(), VoteValue::Against);
    }

    #[test]
    fn vote_value_from_db_rejects_corrupt_values() {
        for corrupt in [0i16, 2, -2, 300] {
            let err = vote_value_from_db(corrupt).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidFormat);
        }
    }
}
