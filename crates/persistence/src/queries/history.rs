// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Card change history queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use loyalty_crm_audit::CardChangeRecord;
use loyalty_crm_domain::ClientKey;
use tracing::debug;

use crate::data_models::CardChangeRow;
use crate::diesel_schema::card_change_history;
use crate::error::PersistenceError;

/// Retrieves a client's card changes, most recent first.
///
/// Changes stored within the same second are ordered by insertion,
/// newest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `client_key` - The client whose history is requested
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
/// An unknown client has an empty history.
pub fn get_change_history(
    conn: &mut SqliteConnection,
    client_key: &ClientKey,
) -> Result<Vec<CardChangeRecord>, PersistenceError> {
    let rows: Vec<CardChangeRow> = card_change_history::table
        .filter(card_change_history::client_key.eq(client_key.value()))
        .order((
            card_change_history::changed_at.desc(),
            card_change_history::history_id.desc(),
        ))
        .select(CardChangeRow::as_select())
        .load(conn)?;

    debug!(
        client_key = client_key.value(),
        count = rows.len(),
        "Loaded card change history"
    );

    rows.into_iter().map(CardChangeRecord::try_from).collect()
}

/// Retrieves a single card change by ID.
///
/// # Errors
///
/// Returns `NotFound` if no change has the ID.
pub fn get_change_record(
    conn: &mut SqliteConnection,
    history_id: i64,
) -> Result<CardChangeRecord, PersistenceError> {
    let row: CardChangeRow = card_change_history::table
        .find(history_id)
        .select(CardChangeRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Card change {history_id}")))?;

    CardChangeRecord::try_from(row)
}
