//! PostgreSQL implementation of ChoiceReader.
//!
//! Joins choices with their applicant and character rows so the domain
//! receives fully resolved `Choice` values.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::casting::{ApplicantRef, CharacterRef, Choice, Priority};
use crate::domain::foundation::{
    ApplicantId, CharacterId, ChoiceId, DomainError, ErrorCode, EventId, Timestamp,
};
use crate::ports::ChoiceReader;

/// PostgreSQL implementation of ChoiceReader.
#[derive(Clone)]
pub struct PostgresChoiceReader {
    pool: PgPool,
}

impl PostgresChoiceReader {
    /// Creates a new PostgresChoiceReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_CHOICE: &str = r#"
    SELECT ch.id, ch.event_id, ch.priority, ch.votes, ch.created_at,
           a.id AS applicant_id, a.name AS applicant_name,
           c.id AS character_id, c.title AS character_title
    FROM choices ch
    JOIN applicants a ON a.id = ch.applicant_id
    JOIN characters c ON c.id = ch.character_id
"#;

#[async_trait]
impl ChoiceReader for PostgresChoiceReader {
    async fn find_by_event(&self, event_id: EventId) -> Result<Vec<Choice>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE ch.event_id = $1 ORDER BY c.title ASC, ch.priority ASC",
            SELECT_CHOICE
        ))
        .bind(event_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to fetch choices: {}", e))
        })?;

        rows.into_iter().map(row_to_choice).collect()
    }

    async fn find_by_id(&self, id: ChoiceId) -> Result<Option<Choice>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE ch.id = $1", SELECT_CHOICE))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Failed to fetch choice: {}", e))
            })?;

        row.map(row_to_choice).transpose()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Helper Functions
// ════════════════════════════════════════════════════════════════════════════════

fn row_to_choice(row: sqlx::postgres::PgRow) -> Result<Choice, DomainError> {
    let id: Uuid = row.get("id");
    let event_id: Uuid = row.get("event_id");
    let priority: i16 = row.get("priority");
    let votes: i32 = row.get("votes");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");
    let applicant_id: Uuid = row.get("applicant_id");
    let applicant_name: String = row.get("applicant_name");
    let character_id: Uuid = row.get("character_id");
    let character_title: String = row.get("character_title");

    let priority = u8::try_from(priority)
        .ok()
        .and_then(|p| Priority::new(p).ok())
        .ok_or_else(|| {
            DomainError::new(
                ErrorCode::InvalidFormat,
                format!("Invalid priority in storage: {}", priority),
            )
        })?;

    Ok(Choice::reconstitute(
        ChoiceId::from_uuid(id),
        EventId::from_uuid(event_id),
        ApplicantRef {
            id: ApplicantId::from_uuid(applicant_id),
            name: applicant_name,
        },
        CharacterRef {
            id: CharacterId::from_uuid(character_id),
            title: character_title,
        },
        priority,
        votes,
        Timestamp::from_datetime(created_at),
    ))
}
