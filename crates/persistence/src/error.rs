// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The card is already held by a client.
    CardAlreadyAssigned(String),
    /// No client has the given key.
    ClientNotFound(String),
    /// A client with the given key is already registered.
    DuplicateClient(String),
    /// No further card number can be issued.
    CardSequenceExhausted(String),
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// A stored row could not be turned back into a domain value.
    SerializationError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested resource was not found.
    NotFound(String),
}

impl PersistenceError {
    /// Classifies a failed write against the `clients` table.
    ///
    /// `UNIQUE` violations on the card column become `CardAlreadyAssigned`,
    /// and on the key column become `DuplicateClient`.
    pub(crate) fn from_client_write(err: DieselError, client_key: &str, card: Option<&str>) -> Self {
        if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &err {
            let message: &str = info.message();
            if message.contains("clients.card_number") {
                return Self::CardAlreadyAssigned(card.unwrap_or_default().to_string());
            }
            if message.contains("clients.client_key") {
                return Self::DuplicateClient(client_key.to_string());
            }
        }
        Self::from(err)
    }
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CardAlreadyAssigned(card) => {
                write!(f, "Card {card} is already assigned to a client")
            }
            Self::ClientNotFound(key) => write!(f, "Client not found: {key}"),
            Self::DuplicateClient(key) => write!(f, "Client already registered: {key}"),
            Self::CardSequenceExhausted(msg) => write!(f, "Card sequence exhausted: {msg}"),
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<DieselError> for PersistenceError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}
