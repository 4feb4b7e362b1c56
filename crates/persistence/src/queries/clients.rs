// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Client and card ownership queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use loyalty_crm_domain::{CardNumber, Client, ClientKey};
use tracing::debug;

use crate::data_models::ClientRow;
use crate::diesel_schema::clients;
use crate::error::PersistenceError;

/// Retrieves a client by key.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
/// Returns `Ok(None)` if no client has the key.
pub fn get_client(
    conn: &mut SqliteConnection,
    client_key: &ClientKey,
) -> Result<Option<Client>, PersistenceError> {
    debug!(client_key = client_key.value(), "Looking up client");

    let row: Option<ClientRow> = clients::table
        .filter(clients::client_key.eq(client_key.value()))
        .select(ClientRow::as_select())
        .first(conn)
        .optional()?;

    row.map(Client::try_from).transpose()
}

/// Retrieves every client, ordered by key.
///
/// # Errors
///
/// Returns an error if the query fails or any stored row is invalid.
pub fn list_clients(conn: &mut SqliteConnection) -> Result<Vec<Client>, PersistenceError> {
    let rows: Vec<ClientRow> = clients::table
        .order(clients::client_key.asc())
        .select(ClientRow::as_select())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded clients");
    rows.into_iter().map(Client::try_from).collect()
}

/// Returns the key of the client holding a card, if any.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_card_holder(
    conn: &mut SqliteConnection,
    card: &CardNumber,
) -> Result<Option<String>, PersistenceError> {
    Ok(clients::table
        .filter(clients::card_number.eq(card.value()))
        .select(clients::client_key)
        .first::<String>(conn)
        .optional()?)
}

/// Returns true if any client holds the card.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn card_exists(conn: &mut SqliteConnection, card: &CardNumber) -> Result<bool, PersistenceError> {
    let exists: bool = diesel::select(diesel::dsl::exists(
        clients::table.filter(clients::card_number.eq(card.value())),
    ))
    .get_result(conn)?;

    debug!(card = card.value(), exists, "Checked card existence");
    Ok(exists)
}

/// Returns every card number currently assigned.
///
/// # Errors
///
/// Returns an error if the query fails or a stored card number is invalid.
pub fn assigned_card_numbers(
    conn: &mut SqliteConnection,
) -> Result<Vec<CardNumber>, PersistenceError> {
    let values: Vec<Option<String>> = clients::table
        .filter(clients::card_number.is_not_null())
        .select(clients::card_number)
        .load(conn)?;

    values
        .into_iter()
        .flatten()
        .map(|value| {
            CardNumber::parse(&value).map_err(|e| {
                PersistenceError::SerializationError(format!("Stored card number is invalid: {e}"))
            })
        })
        .collect()
}
