// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Client registration.

use diesel::prelude::*;
use diesel::SqliteConnection;
use loyalty_crm::ClientRegistration;
use loyalty_crm_domain::{CardNumber, Client, next_card_number};
use tracing::info;

use crate::data_models::NewClient;
use crate::diesel_schema::clients;
use crate::error::PersistenceError;
use crate::queries::clients::{assigned_card_numbers, find_card_holder};

/// Inserts a new client, issuing the next card number if none was supplied.
///
/// The card number is computed inside the same transaction as the insert,
/// so two registrations can never be issued the same number.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `registration` - The validated registration
///
/// # Returns
///
/// The client as stored, including the issued card number.
///
/// # Errors
///
/// Returns an error if:
/// - A client with the same key exists (`DuplicateClient`)
/// - The supplied card is already held (`CardAlreadyAssigned`)
/// - The card number sequence is exhausted
/// - The database write fails
pub fn register_client(
    conn: &mut SqliteConnection,
    registration: &ClientRegistration,
) -> Result<Client, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let client: &Client = &registration.client;

        let card_number: CardNumber = match &client.card_number {
            Some(card) => {
                if find_card_holder(conn, card)?.is_some() {
                    return Err(PersistenceError::CardAlreadyAssigned(card.value().to_string()));
                }
                card.clone()
            }
            None => {
                let assigned: Vec<CardNumber> = assigned_card_numbers(conn)?;
                next_card_number(&assigned)
                    .map_err(|e| PersistenceError::CardSequenceExhausted(e.to_string()))?
            }
        };

        diesel::insert_into(clients::table)
            .values(NewClient::from_client(client, Some(&card_number)))
            .execute(conn)
            .map_err(|e| {
                PersistenceError::from_client_write(e, client.key.value(), Some(card_number.value()))
            })?;

        info!(
            client_key = client.key.value(),
            card_number = card_number.value(),
            "Registered client"
        );

        let mut stored: Client = client.clone();
        stored.card_number = Some(card_number);
        Ok(stored)
    })
}
