// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Responses serialize with the field names of the HTTP contract.

use serde::{Deserialize, Serialize};

/// API request to replace a client's loyalty card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReassignCardRequest {
    /// The client whose card is replaced.
    pub client_key: String,
    /// The card being replaced, as entered by staff.
    pub previous_card: Option<String>,
    /// The replacement card.
    pub new_card: String,
    /// The selected reason category, or free text.
    pub reason: String,
    /// The description required when the reason is `Otro`.
    pub other_reason: Option<String>,
}

/// API response for a successful card reassignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReassignCardResponse {
    /// A success message.
    pub message: String,
    /// The ID of the new history record.
    pub history_id: i64,
}

/// API request to check whether a card is held by any client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyCardRequest {
    /// The card number to look up.
    pub card_number: String,
}

/// API response for a card existence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyCardResponse {
    /// Whether any client holds the card.
    #[serde(rename = "existe")]
    pub exists: bool,
}

/// API request for a client's card change history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeHistoryRequest {
    /// The client whose history is requested.
    pub client_key: String,
}

/// One entry of a client's card change history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeHistoryEntry {
    /// The replaced card, if the client had one.
    #[serde(rename = "tarjeta_anterior")]
    pub previous_card: Option<String>,
    /// The replacement card.
    #[serde(rename = "tarjeta_nueva")]
    pub new_card: String,
    /// The recorded reason.
    #[serde(rename = "motivo")]
    pub reason: String,
    /// When the change was stored, as `DD/MM/YYYY HH:MM`.
    #[serde(rename = "fecha")]
    pub changed_at: String,
}

/// API response for a client's card change history, most recent first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeHistoryResponse {
    /// The history entries.
    pub entries: Vec<ChangeHistoryEntry>,
}

/// API request to register a new VIP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterClientRequest {
    /// The client key (cedula).
    pub client_key: String,
    /// The client's full name.
    pub name: String,
    /// The client's phone number.
    pub phone: String,
    /// The client's birthday as `DD/MM`.
    pub birthday: String,
    /// Where the client is from.
    pub origin: String,
    /// The card to issue; the next number in sequence when absent.
    pub card_number: Option<String>,
    /// The card issue date as `YYYY-MM-DD`; today when absent.
    pub card_issued_on: Option<String>,
    /// Comma-delimited allergy tags.
    pub allergies: Option<String>,
    /// Free-text preferences.
    pub preferences: Option<String>,
}

/// API response for a successful client registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterClientResponse {
    /// A success message.
    pub message: String,
    /// The registered client key.
    #[serde(rename = "id")]
    pub client_key: String,
    /// The card issued to the client.
    #[serde(rename = "num_tarjeta")]
    pub card_number: String,
}

/// A client as returned by lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    /// The client key.
    #[serde(rename = "cedula")]
    pub client_key: String,
    /// The client's full name.
    #[serde(rename = "nombre")]
    pub name: String,
    /// The client's phone number.
    #[serde(rename = "telefono")]
    pub phone: String,
    /// The client's birthday as `DD/MM`.
    #[serde(rename = "fecha_cumpleanos")]
    pub birthday: String,
    /// Where the client is from.
    #[serde(rename = "lugar_origen")]
    pub origin: String,
    /// Allergy tags in storage form.
    #[serde(rename = "alergias")]
    pub allergies: String,
    /// Free-text preferences.
    #[serde(rename = "gustos_especiales")]
    pub preferences: String,
    /// The active card, if any.
    #[serde(rename = "num_tarjeta")]
    pub card_number: Option<String>,
    /// The card issue date as `YYYY-MM-DD`.
    #[serde(rename = "fecha_entrega_tarjeta")]
    pub card_issued_on: String,
}

/// API request to look up one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetClientRequest {
    /// The client key.
    pub client_key: String,
}

/// API response listing every client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListClientsResponse {
    /// All clients, ordered by key.
    pub clients: Vec<ClientInfo>,
}
