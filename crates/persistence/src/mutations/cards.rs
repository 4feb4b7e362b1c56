// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Card reassignment.

use diesel::prelude::*;
use diesel::SqliteConnection;
use loyalty_crm::CardReassignment;
use loyalty_crm_audit::CardChangeRecord;
use tracing::{debug, info, warn};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::NewCardChange;
use crate::diesel_schema::{card_change_history, clients};
use crate::error::PersistenceError;
use crate::queries::clients::find_card_holder;
use crate::queries::history::get_change_record;

/// Replaces a client's card and appends the audit record, atomically.
///
/// Runs in one `IMMEDIATE` transaction:
/// 1. Reject if any client (including this one) already holds the new card
/// 2. Update the client's card
/// 3. Insert the change record
///
/// If any step fails the transaction is rolled back and the store is
/// unchanged. A `UNIQUE` violation on the card column is reported as
/// `CardAlreadyAssigned` even if the pre-check passed.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `reassignment` - The validated reassignment
///
/// # Returns
///
/// The stored change record, with its ID and timestamp.
///
/// # Errors
///
/// Returns an error if:
/// - The new card is already held (`CardAlreadyAssigned`)
/// - No client has the key (`ClientNotFound`)
/// - Any write or the commit fails
pub fn reassign_card(
    conn: &mut SqliteConnection,
    reassignment: &CardReassignment,
) -> Result<CardChangeRecord, PersistenceError> {
    let client_key: &str = reassignment.client_key.value();
    let new_card: &str = reassignment.new_card.value();

    let result: Result<CardChangeRecord, PersistenceError> = conn.immediate_transaction(|conn| {
        if let Some(holder) = find_card_holder(conn, &reassignment.new_card)? {
            debug!(card = new_card, holder = holder.as_str(), "Card already held");
            return Err(PersistenceError::CardAlreadyAssigned(new_card.to_string()));
        }

        let updated: usize = diesel::update(clients::table.find(client_key))
            .set(clients::card_number.eq(Some(new_card)))
            .execute(conn)
            .map_err(|e| PersistenceError::from_client_write(e, client_key, Some(new_card)))?;

        if updated == 0 {
            return Err(PersistenceError::ClientNotFound(client_key.to_string()));
        }

        diesel::insert_into(card_change_history::table)
            .values(NewCardChange::from_record(&reassignment.audit_record))
            .execute(conn)?;

        let history_id: i64 = get_last_insert_rowid(conn)?;
        get_change_record(conn, history_id)
    });

    match &result {
        Ok(record) => info!(
            client_key,
            previous_card = record.previous_card(),
            new_card,
            reason = record.reason().text(),
            history_id = record.record_id(),
            "Card reassigned"
        ),
        Err(e) => warn!(client_key, new_card, error = %e, "Card reassignment rolled back"),
    }

    result
}
