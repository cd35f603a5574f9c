use async_trait::async_trait;
use chrono::{DateTime, Utc};
use huddle_core::{ChatMessage, Meeting, NewChatMessage, NewNote, Note, ParticipantId, RoomCode};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

use crate::store::{MeetingStore, StoreError};

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS meetings (
        code TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        created_by TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS notes (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        id TEXT NOT NULL UNIQUE,
        participant_id TEXT NOT NULL,
        room_code TEXT NOT NULL,
        content TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS notes_room_created ON notes (room_code, created_at)",
    "CREATE TABLE IF NOT EXISTS messages (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        id TEXT NOT NULL UNIQUE,
        participant_id TEXT NOT NULL,
        text TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
];

type NoteRow = (String, String, String, String, DateTime<Utc>);
type MessageRow = (String, String, String, DateTime<Utc>);
type MeetingRow = (String, String, String, DateTime<Utc>);

/// SQLite-backed store. Tables are created on connect.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        // Every connection to `:memory:` is its own database, so pin one.
        let pool = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(8)
                .connect_with(options)
                .await?
        };

        let store = Self { pool };
        store.migrate().await?;
        info!("SQLite store ready at {}", url);
        Ok(store)
    }

    async fn migrate(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

fn parse_id(raw: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(raw).map_err(|e| StoreError::Corrupt(format!("id {raw:?}: {e}")))
}

fn note_from_row((id, participant_id, room_code, content, created_at): NoteRow) -> Result<Note, StoreError> {
    Ok(Note {
        id: parse_id(&id)?,
        participant_id: ParticipantId(participant_id),
        room_code: RoomCode(room_code),
        content,
        created_at,
    })
}

fn message_from_row((id, participant_id, text, created_at): MessageRow) -> Result<ChatMessage, StoreError> {
    Ok(ChatMessage {
        id: parse_id(&id)?,
        participant_id: ParticipantId(participant_id),
        text,
        created_at,
    })
}

fn meeting_from_row((code, title, created_by, created_at): MeetingRow) -> Meeting {
    Meeting {
        code: RoomCode(code),
        title,
        created_by: ParticipantId(created_by),
        created_at,
    }
}

#[async_trait]
impl MeetingStore for SqliteStore {
    async fn save_note(&self, note: NewNote) -> Result<Note, StoreError> {
        let note = note.stamp(Uuid::new_v4(), Utc::now());
        sqlx::query(
            "INSERT INTO notes (id, participant_id, room_code, content, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(note.id.to_string())
        .bind(note.participant_id.as_str())
        .bind(note.room_code.as_str())
        .bind(&note.content)
        .bind(note.created_at)
        .execute(&self.pool)
        .await?;
        Ok(note)
    }

    async fn notes_for_room(&self, room_code: &RoomCode) -> Result<Vec<Note>, StoreError> {
        sqlx::query_as::<_, NoteRow>(
            "SELECT id, participant_id, room_code, content, created_at FROM notes
             WHERE room_code = ? ORDER BY created_at ASC, seq ASC",
        )
        .bind(room_code.as_str())
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(note_from_row)
        .collect()
    }

    async fn save_message(&self, message: NewChatMessage) -> Result<ChatMessage, StoreError> {
        let message = message.stamp(Uuid::new_v4(), Utc::now());
        sqlx::query("INSERT INTO messages (id, participant_id, text, created_at) VALUES (?, ?, ?, ?)")
            .bind(message.id.to_string())
            .bind(message.participant_id.as_str())
            .bind(&message.text)
            .bind(message.created_at)
            .execute(&self.pool)
            .await?;
        Ok(message)
    }

    async fn messages(&self) -> Result<Vec<ChatMessage>, StoreError> {
        sqlx::query_as::<_, MessageRow>(
            "SELECT id, participant_id, text, created_at FROM messages ORDER BY created_at ASC, seq ASC",
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(message_from_row)
        .collect()
    }

    async fn save_meeting(&self, meeting: Meeting) -> Result<Meeting, StoreError> {
        let result = sqlx::query(
            "INSERT INTO meetings (code, title, created_by, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(meeting.code.as_str())
        .bind(&meeting.title)
        .bind(meeting.created_by.as_str())
        .bind(meeting.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(meeting),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::Conflict(format!("meeting {}", meeting.code)))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_meeting(&self, code: &RoomCode) -> Result<Option<Meeting>, StoreError> {
        let row = sqlx::query_as::<_, MeetingRow>(
            "SELECT code, title, created_by, created_at FROM meetings WHERE code = ?",
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(meeting_from_row))
    }

    async fn list_meetings(&self) -> Result<Vec<Meeting>, StoreError> {
        let rows = sqlx::query_as::<_, MeetingRow>(
            "SELECT code, title, created_by, created_at FROM meetings ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(meeting_from_row).collect())
    }

    async fn ensure_meeting(&self, meeting: Meeting) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "INSERT INTO meetings (code, title, created_by, created_at) VALUES (?, ?, ?, ?)
             ON CONFLICT(code) DO NOTHING",
        )
        .bind(meeting.code.as_str())
        .bind(&meeting.title)
        .bind(meeting.created_by.as_str())
        .bind(meeting.created_at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
