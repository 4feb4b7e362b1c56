// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Loyalty CRM.
//!
//! This crate stores clients and their card change history in `SQLite`
//! through Diesel. The schema is embedded and migrated on open.
//!
//! ## Guarantees
//!
//! - At most one client holds a given card number (`UNIQUE` constraint)
//! - A card reassignment and its audit record commit together or not at all
//! - The change history is append-only
//!
//! ## Testing
//!
//! Every test opens its own shared-cache in-memory database, so tests are
//! isolated and need no external infrastructure.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use loyalty_crm::{CardReassignment, ClientRegistration};
use loyalty_crm_audit::CardChangeRecord;
use loyalty_crm_domain::{CardNumber, Client, ClientKey};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// The store client.
///
/// Owns one `SQLite` connection. Callers construct it once and pass it to
/// whatever needs the store; there is no global instance.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a store backed by a fresh in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_crm_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a store backed by a `SQLite` database file.
    ///
    /// The file is created if it does not exist.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Clients
    // ========================================================================

    /// Registers a client, issuing a card number if none was supplied.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateClient`, `CardAlreadyAssigned`, or a database error.
    pub fn register_client(
        &mut self,
        registration: &ClientRegistration,
    ) -> Result<Client, PersistenceError> {
        mutations::register_client(&mut self.conn, registration)
    }

    /// Retrieves a client by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_client(&mut self, client_key: &ClientKey) -> Result<Option<Client>, PersistenceError> {
        queries::clients::get_client(&mut self.conn, client_key)
    }

    /// Retrieves every client, ordered by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_clients(&mut self) -> Result<Vec<Client>, PersistenceError> {
        queries::clients::list_clients(&mut self.conn)
    }

    /// Returns true if any client holds the card.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn card_exists(&mut self, card: &CardNumber) -> Result<bool, PersistenceError> {
        queries::clients::card_exists(&mut self.conn, card)
    }

    // ========================================================================
    // Card reassignment
    // ========================================================================

    /// Replaces a client's card and records the change, atomically.
    ///
    /// # Errors
    ///
    /// Returns `CardAlreadyAssigned`, `ClientNotFound`, or a database error.
    /// On any error the store is unchanged.
    pub fn reassign_card(
        &mut self,
        reassignment: &CardReassignment,
    ) -> Result<CardChangeRecord, PersistenceError> {
        mutations::reassign_card(&mut self.conn, reassignment)
    }

    /// Retrieves a client's card changes, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_change_history(
        &mut self,
        client_key: &ClientKey,
    ) -> Result<Vec<CardChangeRecord>, PersistenceError> {
        queries::history::get_change_history(&mut self.conn, client_key)
    }
}
