// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{CardReassignment, ClientRegistration, Transition};
use loyalty_crm_audit::CardChangeRecord;
use loyalty_crm_domain::validate_client_fields;

/// Applies a command, producing the writes it requires.
///
/// This function is pure: it validates the command and prepares the
/// pending writes, but never touches the store. Checks that need the store
/// (card uniqueness, client existence) happen when the transition is
/// persisted.
///
/// # Arguments
///
/// * `command` - The command to apply
///
/// # Returns
///
/// * `Ok(Transition)` containing the pending writes
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - A registered client's fields violate domain rules
pub fn apply(command: Command) -> Result<Transition, CoreError> {
    match command {
        Command::RegisterClient { mut client } => {
            validate_client_fields(&client)?;

            client.name = client.name.trim().to_string();
            client.origin = client.origin.trim().to_string();
            client.preferences = client.preferences.trim().to_string();

            Ok(Transition::RegisterClient(ClientRegistration { client }))
        }
        Command::ReassignCard {
            client_key,
            previous_card,
            new_card,
            reason,
        } => {
            let previous_card: Option<String> = normalize_previous_card(previous_card);

            let audit_record: CardChangeRecord = CardChangeRecord::new(
                client_key.clone(),
                previous_card,
                new_card.clone(),
                reason,
            );

            Ok(Transition::ReassignCard(CardReassignment {
                client_key,
                new_card,
                audit_record,
            }))
        }
    }
}

/// Trims the supplied previous card. Blank means the client had no card.
fn normalize_previous_card(previous_card: Option<String>) -> Option<String> {
    previous_card
        .map(|card| card.trim().to_string())
        .filter(|card| !card.is_empty())
}
