//! NoteRepository implementation for SqliteStore.

use super::{SqliteStore, decode_timestamp, encode_timestamp};
use crate::domain::{Note, NoteDraft, NoteId, NoteQuery, UserId};
use crate::store::{NoteRepository, StoreError, StoreResult};
use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, Row, params};

const NOTE_COLUMNS: &str = "id, title, content, author_id, created, updated";

/// Raw column values of a `notes` row, before timestamp decoding.
struct NoteRow {
    id: i64,
    title: String,
    content: Option<String>,
    author_id: i64,
    created: String,
    updated: String,
}

impl NoteRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            author_id: row.get(3)?,
            created: row.get(4)?,
            updated: row.get(5)?,
        })
    }

    fn into_note(self) -> StoreResult<Note> {
        let created = decode_timestamp("created", &self.created)?;
        let updated = decode_timestamp("updated", &self.updated)?;
        Ok(Note::from_parts(
            NoteId::new(self.id),
            self.title,
            self.content,
            UserId::new(self.author_id),
            created,
            updated,
        ))
    }
}

impl NoteRepository for SqliteStore {
    fn create_note(
        &mut self,
        author: UserId,
        draft: &NoteDraft,
        at: DateTime<Utc>,
    ) -> StoreResult<Note> {
        let stamp = encode_timestamp(at);
        self.conn.execute(
            "INSERT INTO notes (title, content, author_id, created, updated)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![draft.title(), draft.content(), author.get(), stamp],
        )?;
        let id = NoteId::new(self.conn.last_insert_rowid());

        // Re-read so the returned value carries exactly what was stored.
        self.get_note(id)?
            .ok_or(StoreError::NoteNotFound { id })
    }

    fn get_note(&self, id: NoteId) -> StoreResult<Option<Note>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1"),
                [id.get()],
                NoteRow::read,
            )
            .optional()?;

        row.map(NoteRow::into_note).transpose()
    }

    fn update_note(
        &mut self,
        id: NoteId,
        draft: &NoteDraft,
        at: DateTime<Utc>,
    ) -> StoreResult<Note> {
        let rows = self.conn.execute(
            "UPDATE notes SET title = ?1, content = ?2, updated = ?3 WHERE id = ?4",
            params![draft.title(), draft.content(), encode_timestamp(at), id.get()],
        )?;
        if rows == 0 {
            return Err(StoreError::NoteNotFound { id });
        }

        self.get_note(id)?
            .ok_or(StoreError::NoteNotFound { id })
    }

    fn delete_note(&mut self, id: NoteId) -> StoreResult<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1", [id.get()])?;
        Ok(rows > 0)
    }

    fn list_notes(&self, query: &NoteQuery) -> StoreResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes
             WHERE author_id = ?1
               AND (?2 IS NULL OR icontains(title, ?2) OR icontains(content, ?2))
             ORDER BY created DESC, id DESC"
        ))?;

        let rows = stmt
            .query_map(
                params![query.owner().get(), query.search_term()],
                NoteRow::read,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter().map(NoteRow::into_note).collect()
    }

    fn count_notes(&self, owner: UserId) -> StoreResult<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM notes WHERE author_id = ?1",
            [owner.get()],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}
