// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every handler receives the store explicitly. Input is validated before
//! the store is touched.

use loyalty_crm::{Command, Transition, apply};
use loyalty_crm_audit::CardChangeRecord;
use loyalty_crm_domain::{
    Allergies, BirthDay, CardNumber, ChangeReason, Client, ClientKey, parse_card_issue_date,
};
use loyalty_crm_persistence::Persistence;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};
use tracing::{debug, info};

use crate::error::{
    ApiError, invalid_input, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
use crate::request_response::{
    ChangeHistoryEntry, ChangeHistoryRequest, ChangeHistoryResponse, ClientInfo,
    GetClientRequest, ListClientsResponse, ReassignCardRequest, ReassignCardResponse,
    RegisterClientRequest, RegisterClientResponse, VerifyCardRequest, VerifyCardResponse,
};

/// Display format for change history timestamps.
const HISTORY_TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day]/[month]/[year] [hour]:[minute]");

/// Replaces a client's loyalty card and records the change.
///
/// This function:
/// - Validates the new card, the reason, and the client key, in that order
/// - Applies the reassignment command
/// - Persists the card update and its audit record in one transaction
///
/// # Arguments
///
/// * `persistence` - The store
/// * `request` - The reassignment request
///
/// # Returns
///
/// * `Ok(ReassignCardResponse)` on success
/// * `Err(ApiError)` if validation or persistence fails
///
/// # Errors
///
/// Returns an error if:
/// - The new card is not 1-10 digits (`InvalidInput`)
/// - The reason is blank, or `Otro` is chosen without a description (`InvalidInput`)
/// - The client key is blank (`InvalidInput`)
/// - Any client already holds the new card (`CardAlreadyAssigned`)
/// - No client has the key (`ResourceNotFound`)
/// - The store fails (`StorageFailure`)
pub fn reassign_card(
    persistence: &mut Persistence,
    request: ReassignCardRequest,
) -> Result<ReassignCardResponse, ApiError> {
    let new_card: CardNumber = CardNumber::parse(&request.new_card)
        .map_err(|e| invalid_input("tarjeta_nueva", &e))?;
    let reason: ChangeReason =
        ChangeReason::from_selection(&request.reason, request.other_reason.as_deref())
            .map_err(|e| invalid_input("motivo", &e))?;
    let client_key: ClientKey =
        ClientKey::parse(&request.client_key).map_err(|e| invalid_input("cedula", &e))?;

    let command: Command = Command::ReassignCard {
        client_key,
        previous_card: request.previous_card,
        new_card,
        reason,
    };
    debug!(command = command.name(), "Applying command");

    let Transition::ReassignCard(reassignment) = apply(command).map_err(translate_core_error)?
    else {
        return Err(ApiError::StorageFailure {
            message: String::from("Reassignment produced an unexpected transition"),
        });
    };

    let record: CardChangeRecord = persistence
        .reassign_card(&reassignment)
        .map_err(translate_persistence_error)?;

    info!(
        client_key = reassignment.client_key.value(),
        new_card = reassignment.new_card.value(),
        "Card reassignment committed"
    );

    Ok(ReassignCardResponse {
        message: String::from("Tarjeta reasignada correctamente"),
        history_id: record.record_id().unwrap_or_default(),
    })
}

/// Checks whether any client holds a card.
///
/// A value that is not a valid card number cannot be held, so it is
/// reported as not existing.
///
/// # Errors
///
/// Returns an error if the card number is blank or the store fails.
pub fn verify_card(
    persistence: &mut Persistence,
    request: &VerifyCardRequest,
) -> Result<VerifyCardResponse, ApiError> {
    let value: &str = request.card_number.trim();
    if value.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("numero"),
            message: String::from("A card number is required"),
        });
    }

    let exists: bool = match CardNumber::parse(value) {
        Ok(card) => persistence
            .card_exists(&card)
            .map_err(translate_persistence_error)?,
        Err(_) => false,
    };

    Ok(VerifyCardResponse { exists })
}

/// Retrieves a client's card change history, most recent first.
///
/// An unknown client has an empty history.
///
/// # Errors
///
/// Returns an error if the client key is blank or the store fails.
pub fn get_change_history(
    persistence: &mut Persistence,
    request: &ChangeHistoryRequest,
) -> Result<ChangeHistoryResponse, ApiError> {
    let client_key: ClientKey =
        ClientKey::parse(&request.client_key).map_err(|e| invalid_input("cedula", &e))?;

    let records: Vec<CardChangeRecord> = persistence
        .get_change_history(&client_key)
        .map_err(translate_persistence_error)?;

    let entries: Vec<ChangeHistoryEntry> = records
        .iter()
        .map(to_history_entry)
        .collect::<Result<_, _>>()?;

    Ok(ChangeHistoryResponse { entries })
}

/// Registers a new VIP client.
///
/// When no card number is supplied the next number in sequence is issued.
/// When no issue date is supplied today's date (UTC) is used.
///
/// # Errors
///
/// Returns an error if:
/// - Any field fails validation (`InvalidInput`)
/// - The key is already registered (`DuplicateClient`)
/// - The supplied card is already held (`CardAlreadyAssigned`)
/// - The store fails (`StorageFailure`)
pub fn register_client(
    persistence: &mut Persistence,
    request: RegisterClientRequest,
) -> Result<RegisterClientResponse, ApiError> {
    let key: ClientKey = ClientKey::parse(&request.client_key).map_err(translate_domain_error)?;
    let birthday: BirthDay = BirthDay::parse(&request.birthday).map_err(translate_domain_error)?;
    let card_number: Option<CardNumber> = non_blank(request.card_number.as_deref())
        .map(CardNumber::parse)
        .transpose()
        .map_err(translate_domain_error)?;
    let card_issued_on: Date = match non_blank(request.card_issued_on.as_deref()) {
        Some(value) => parse_card_issue_date(value).map_err(translate_domain_error)?,
        None => OffsetDateTime::now_utc().date(),
    };

    let client: Client = Client {
        key,
        name: request.name,
        phone: request.phone.trim().to_string(),
        birthday,
        origin: request.origin,
        allergies: Allergies::parse(request.allergies.as_deref().unwrap_or_default()),
        preferences: request.preferences.unwrap_or_default(),
        card_number,
        card_issued_on,
    };

    let Transition::RegisterClient(registration) =
        apply(Command::RegisterClient { client }).map_err(translate_core_error)?
    else {
        return Err(ApiError::StorageFailure {
            message: String::from("Registration produced an unexpected transition"),
        });
    };

    let stored: Client = persistence
        .register_client(&registration)
        .map_err(translate_persistence_error)?;

    let card_number: String = stored
        .card_number
        .as_ref()
        .map(|card| card.value().to_string())
        .unwrap_or_default();

    info!(
        client_key = stored.key.value(),
        card_number = card_number.as_str(),
        "Client registered"
    );

    Ok(RegisterClientResponse {
        message: String::from("Cliente registrado correctamente"),
        client_key: stored.key.value().to_string(),
        card_number,
    })
}

/// Retrieves one client by key.
///
/// # Errors
///
/// Returns an error if the key is blank, no client has it, or the store fails.
pub fn get_client(
    persistence: &mut Persistence,
    request: &GetClientRequest,
) -> Result<ClientInfo, ApiError> {
    let client_key: ClientKey =
        ClientKey::parse(&request.client_key).map_err(|e| invalid_input("cedula", &e))?;

    persistence
        .get_client(&client_key)
        .map_err(translate_persistence_error)?
        .map(|client| to_client_info(&client))
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Client"),
            message: format!("No client has key {client_key}"),
        })
}

/// Retrieves every client, ordered by key.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_clients(persistence: &mut Persistence) -> Result<ListClientsResponse, ApiError> {
    let clients: Vec<ClientInfo> = persistence
        .list_clients()
        .map_err(translate_persistence_error)?
        .iter()
        .map(to_client_info)
        .collect();

    Ok(ListClientsResponse { clients })
}

fn to_history_entry(record: &CardChangeRecord) -> Result<ChangeHistoryEntry, ApiError> {
    let changed_at: String = record
        .changed_at()
        .map(format_history_timestamp)
        .transpose()?
        .unwrap_or_default();

    Ok(ChangeHistoryEntry {
        previous_card: record.previous_card().map(String::from),
        new_card: record.new_card().value().to_string(),
        reason: record.reason().text().to_string(),
        changed_at,
    })
}

fn format_history_timestamp(timestamp: PrimitiveDateTime) -> Result<String, ApiError> {
    timestamp
        .format(HISTORY_TIMESTAMP_FORMAT)
        .map_err(|e| ApiError::StorageFailure {
            message: format!("Cannot format change timestamp: {e}"),
        })
}

fn to_client_info(client: &Client) -> ClientInfo {
    ClientInfo {
        client_key: client.key.value().to_string(),
        name: client.name.clone(),
        phone: client.phone.clone(),
        birthday: client.birthday.to_string(),
        origin: client.origin.clone(),
        allergies: client.allergies.to_storage(),
        preferences: client.preferences.clone(),
        card_number: client.card_number.as_ref().map(|card| card.value().to_string()),
        card_issued_on: client.card_issued_on.to_string(),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
