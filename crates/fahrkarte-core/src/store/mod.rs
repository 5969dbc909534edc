//! Local ticket storage over SQLite.

use std::path::Path;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Row};
use tracing::debug;

use crate::error::StoreError;
use crate::models::{Ticket, TravelMode};

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS tickets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    file_name TEXT NOT NULL,
    file_path TEXT NOT NULL,
    file_hash TEXT NOT NULL,
    passenger_name TEXT,
    travel_mode TEXT NOT NULL,
    departure_location TEXT,
    arrival_location TEXT,
    departure_time TEXT,
    arrival_time TEXT,
    train_number TEXT,
    seat_number TEXT,
    carriage_number TEXT,
    barcode_data TEXT,
    raw_text TEXT,
    processed_at TEXT NOT NULL,
    is_processed INTEGER NOT NULL,
    error_message TEXT
);
CREATE INDEX IF NOT EXISTS idx_tickets_file_hash ON tickets(file_hash);
CREATE INDEX IF NOT EXISTS idx_tickets_processed_at ON tickets(processed_at);
";

const TICKET_COLUMNS: &str = "id, file_name, file_path, file_hash, passenger_name, travel_mode,
     departure_location, arrival_location, departure_time, arrival_time,
     train_number, seat_number, carriage_number, barcode_data, raw_text,
     processed_at, is_processed, error_message";

/// SQLite-backed ticket store.
///
/// Uniqueness on the content fingerprint is enforced by the processing
/// gate, not by a schema constraint — the persistence id and the
/// fingerprint are independent keys.
pub struct TicketStore {
    conn: Connection,
}

impl TicketStore {
    /// Open (creating if needed) the database at `path` and ensure the
    /// schema exists.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| StoreError::Open(e.to_string()))?;
        Self::with_connection(conn)
    }

    /// In-memory store, mainly for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| StoreError::Open(e.to_string()))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| StoreError::Open(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Insert a record and return its assigned id.
    pub fn insert(&self, ticket: &Ticket) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO tickets (file_name, file_path, file_hash, passenger_name, travel_mode,
             departure_location, arrival_location, departure_time, arrival_time,
             train_number, seat_number, carriage_number, barcode_data, raw_text,
             processed_at, is_processed, error_message)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
            params![
                ticket.file_name,
                ticket.file_path,
                ticket.file_hash,
                ticket.passenger_name,
                ticket.travel_mode.as_str(),
                ticket.departure_location,
                ticket.arrival_location,
                ticket.departure_time,
                ticket.arrival_time,
                ticket.train_number,
                ticket.seat_number,
                ticket.carriage_number,
                ticket.barcode_data,
                ticket.raw_text,
                ticket.processed_at,
                ticket.is_processed as i32,
                ticket.error_message,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("inserted ticket {id} ({})", ticket.file_name);
        Ok(id)
    }

    /// Overwrite the stored fields of the record with `ticket.id`.
    pub fn update(&self, ticket: &Ticket) -> Result<()> {
        self.conn.execute(
            "UPDATE tickets SET file_name = ?2, file_path = ?3, file_hash = ?4,
             passenger_name = ?5, travel_mode = ?6, departure_location = ?7,
             arrival_location = ?8, departure_time = ?9, arrival_time = ?10,
             train_number = ?11, seat_number = ?12, carriage_number = ?13,
             barcode_data = ?14, raw_text = ?15, processed_at = ?16,
             is_processed = ?17, error_message = ?18
             WHERE id = ?1",
            params![
                ticket.id,
                ticket.file_name,
                ticket.file_path,
                ticket.file_hash,
                ticket.passenger_name,
                ticket.travel_mode.as_str(),
                ticket.departure_location,
                ticket.arrival_location,
                ticket.departure_time,
                ticket.arrival_time,
                ticket.train_number,
                ticket.seat_number,
                ticket.carriage_number,
                ticket.barcode_data,
                ticket.raw_text,
                ticket.processed_at,
                ticket.is_processed as i32,
                ticket.error_message,
            ],
        )?;
        Ok(())
    }

    /// Delete a record outright. No tombstone is kept.
    pub fn delete_by_id(&self, id: i64) -> Result<()> {
        self.conn.execute("DELETE FROM tickets WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// Delete all failed (unprocessed) records; returns how many were
    /// removed.
    pub fn delete_unprocessed(&self) -> Result<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM tickets WHERE is_processed = 0", [])?;
        Ok(removed)
    }

    /// Look up a record by its id.
    pub fn find_by_id(&self, id: i64) -> Result<Option<Ticket>> {
        self.query_single(
            &format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE id = ?1"),
            params![id],
        )
    }

    /// Look up a record by its content fingerprint.
    pub fn find_by_fingerprint(&self, fingerprint: &str) -> Result<Option<Ticket>> {
        self.query_single(
            &format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE file_hash = ?1 LIMIT 1"),
            params![fingerprint],
        )
    }

    /// All records, most recently processed first.
    pub fn list_all(&self) -> Result<Vec<Ticket>> {
        self.query_list(
            &format!("SELECT {TICKET_COLUMNS} FROM tickets ORDER BY processed_at DESC, id DESC"),
            params![],
        )
    }

    /// Records of one travel mode, most recently processed first.
    pub fn list_by_mode(&self, mode: TravelMode) -> Result<Vec<Ticket>> {
        self.query_list(
            &format!(
                "SELECT {TICKET_COLUMNS} FROM tickets WHERE travel_mode = ?1
                 ORDER BY processed_at DESC, id DESC"
            ),
            params![mode.as_str()],
        )
    }

    /// Records whose departure or arrival location contains `location`.
    pub fn list_by_location(&self, location: &str) -> Result<Vec<Ticket>> {
        let needle = format!("%{location}%");
        self.query_list(
            &format!(
                "SELECT {TICKET_COLUMNS} FROM tickets
                 WHERE departure_location LIKE ?1 OR arrival_location LIKE ?1
                 ORDER BY processed_at DESC, id DESC"
            ),
            params![needle],
        )
    }

    /// Records departing within the given range, earliest first.
    pub fn list_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<Ticket>> {
        self.query_list(
            &format!(
                "SELECT {TICKET_COLUMNS} FROM tickets
                 WHERE departure_time >= ?1 AND departure_time <= ?2
                 ORDER BY departure_time ASC"
            ),
            params![start, end],
        )
    }

    /// Failed records only, most recently processed first.
    pub fn list_unprocessed(&self) -> Result<Vec<Ticket>> {
        self.query_list(
            &format!(
                "SELECT {TICKET_COLUMNS} FROM tickets WHERE is_processed = 0
                 ORDER BY processed_at DESC, id DESC"
            ),
            params![],
        )
    }

    /// Total number of records.
    pub fn count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM tickets", [], |row| row.get(0))?)
    }

    /// Number of successfully processed records.
    pub fn count_processed(&self) -> Result<i64> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM tickets WHERE is_processed = 1",
            [],
            |row| row.get(0),
        )?)
    }

    /// Number of failed records.
    pub fn count_unprocessed(&self) -> Result<i64> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM tickets WHERE is_processed = 0",
            [],
            |row| row.get(0),
        )?)
    }

    fn query_single(&self, sql: &str, params: impl rusqlite::Params) -> Result<Option<Ticket>> {
        let mut stmt = self.conn.prepare(sql)?;
        match stmt.query_row(params, ticket_from_row) {
            Ok(ticket) => Ok(Some(ticket)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn query_list(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Ticket>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, ticket_from_row)?;
        let mut tickets = Vec::new();
        for row in rows {
            tickets.push(row?);
        }
        Ok(tickets)
    }
}

fn ticket_from_row(row: &Row<'_>) -> rusqlite::Result<Ticket> {
    Ok(Ticket {
        id: row.get(0)?,
        file_name: row.get(1)?,
        file_path: row.get(2)?,
        file_hash: row.get(3)?,
        passenger_name: row.get(4)?,
        travel_mode: TravelMode::from_str(&row.get::<_, String>(5)?),
        departure_location: row.get(6)?,
        arrival_location: row.get(7)?,
        departure_time: row.get(8)?,
        arrival_time: row.get(9)?,
        train_number: row.get(10)?,
        seat_number: row.get(11)?,
        carriage_number: row.get(12)?,
        barcode_data: row.get(13)?,
        raw_text: row.get(14)?,
        processed_at: row.get(15)?,
        is_processed: row.get::<_, i32>(16)? != 0,
        error_message: row.get(17)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn at(h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 12, 15).unwrap().and_hms_opt(h, mi, 0).unwrap()
    }

    fn sample(name: &str, hash: &str, processed_at: NaiveDateTime) -> Ticket {
        let mut ticket = Ticket::processed(name, format!("/t/{name}"), hash, processed_at);
        ticket.travel_mode = TravelMode::Train;
        ticket.departure_location = Some("Berlin Hbf".into());
        ticket.arrival_location = Some("München Hbf".into());
        ticket.departure_time = Some(at(10, 30));
        ticket
    }

    #[test]
    fn insert_assigns_ids_and_roundtrips() {
        let store = TicketStore::open_in_memory().unwrap();
        let id1 = store.insert(&sample("a.pdf", "fp-a", at(9, 0))).unwrap();
        let id2 = store.insert(&sample("b.pdf", "fp-b", at(9, 5))).unwrap();
        assert!(id2 > id1);

        let stored = store.find_by_id(id1).unwrap().unwrap();
        assert_eq!(stored.file_name, "a.pdf");
        assert_eq!(stored.file_hash, "fp-a");
        assert_eq!(stored.travel_mode, TravelMode::Train);
        assert_eq!(stored.departure_time, Some(at(10, 30)));
        assert!(stored.is_processed);
        assert_eq!(stored.error_message, None);
    }

    #[test]
    fn find_by_fingerprint() {
        let store = TicketStore::open_in_memory().unwrap();
        store.insert(&sample("a.pdf", "fp-a", at(9, 0))).unwrap();

        assert!(store.find_by_fingerprint("fp-a").unwrap().is_some());
        assert!(store.find_by_fingerprint("fp-x").unwrap().is_none());
    }

    #[test]
    fn list_all_is_most_recent_first() {
        let store = TicketStore::open_in_memory().unwrap();
        store.insert(&sample("old.pdf", "fp-1", at(8, 0))).unwrap();
        store.insert(&sample("new.pdf", "fp-2", at(11, 0))).unwrap();
        store.insert(&sample("mid.pdf", "fp-3", at(9, 30))).unwrap();

        let names: Vec<String> =
            store.list_all().unwrap().into_iter().map(|t| t.file_name).collect();
        assert_eq!(names, vec!["new.pdf", "mid.pdf", "old.pdf"]);
    }

    #[test]
    fn update_overwrites_in_place() {
        let store = TicketStore::open_in_memory().unwrap();
        let id = store.insert(&sample("a.pdf", "fp-a", at(9, 0))).unwrap();

        let mut changed = sample("a.pdf", "fp-a", at(12, 0));
        changed.id = id;
        changed.seat_number = Some("42C".into());
        store.update(&changed).unwrap();

        let stored = store.find_by_id(id).unwrap().unwrap();
        assert_eq!(stored.seat_number.as_deref(), Some("42C"));
        assert_eq!(stored.processed_at, at(12, 0));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn counts_partition_by_processed_flag() {
        let store = TicketStore::open_in_memory().unwrap();
        store.insert(&sample("ok.pdf", "fp-1", at(9, 0))).unwrap();
        store
            .insert(&Ticket::failed("bad.pdf", "/t/bad.pdf", "could not read file", at(9, 1)))
            .unwrap();

        assert_eq!(store.count().unwrap(), 2);
        assert_eq!(store.count_processed().unwrap(), 1);
        assert_eq!(store.count_unprocessed().unwrap(), 1);
    }

    #[test]
    fn delete_unprocessed_keeps_good_records() {
        let store = TicketStore::open_in_memory().unwrap();
        store.insert(&sample("ok.pdf", "fp-1", at(9, 0))).unwrap();
        store
            .insert(&Ticket::failed("bad.pdf", "/t/bad.pdf", "boom", at(9, 1)))
            .unwrap();
        store
            .insert(&Ticket::failed("worse.pdf", "/t/worse.pdf", "boom", at(9, 2)))
            .unwrap();

        assert_eq!(store.delete_unprocessed().unwrap(), 2);
        assert_eq!(store.count().unwrap(), 1);
        assert!(store.list_unprocessed().unwrap().is_empty());
    }

    #[test]
    fn filtered_lists() {
        let store = TicketStore::open_in_memory().unwrap();
        store.insert(&sample("train.pdf", "fp-1", at(9, 0))).unwrap();

        let mut bus = sample("bus.pdf", "fp-2", at(9, 5));
        bus.travel_mode = TravelMode::Bus;
        bus.departure_location = Some("Berlin ZOB".into());
        bus.arrival_location = Some("Prague".into());
        bus.departure_time = Some(at(15, 0));
        store.insert(&bus).unwrap();

        let trains = store.list_by_mode(TravelMode::Train).unwrap();
        assert_eq!(trains.len(), 1);
        assert_eq!(trains[0].file_name, "train.pdf");

        let prague = store.list_by_location("Prague").unwrap();
        assert_eq!(prague.len(), 1);
        assert_eq!(prague[0].file_name, "bus.pdf");

        let morning = store.list_between(at(10, 0), at(11, 0)).unwrap();
        assert_eq!(morning.len(), 1);
        assert_eq!(morning[0].file_name, "train.pdf");
    }

    #[test]
    fn delete_by_id_removes_row() {
        let store = TicketStore::open_in_memory().unwrap();
        let id = store.insert(&sample("a.pdf", "fp-a", at(9, 0))).unwrap();
        store.delete_by_id(id).unwrap();
        assert!(store.find_by_id(id).unwrap().is_none());
    }
}
