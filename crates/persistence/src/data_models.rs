// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types mapping the `clients` and `card_change_history` tables
//! to and from domain values.

use diesel::prelude::*;
use loyalty_crm_audit::CardChangeRecord;
use loyalty_crm_domain::{
    Allergies, BirthDay, CardNumber, ChangeReason, Client, ClientKey, parse_card_issue_date,
};
use time::PrimitiveDateTime;
use time::macros::format_description;

use crate::diesel_schema::{card_change_history, clients};
use crate::error::PersistenceError;

/// A client row as stored.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = clients)]
pub struct ClientRow {
    pub client_key: String,
    pub name: String,
    pub phone: String,
    pub birthday: String,
    pub origin: String,
    pub allergies: String,
    pub preferences: String,
    pub card_number: Option<String>,
    pub card_issued_on: String,
}

/// A client row ready to be inserted.
#[derive(Debug, Insertable)]
#[diesel(table_name = clients)]
pub struct NewClient<'a> {
    pub client_key: &'a str,
    pub name: &'a str,
    pub phone: &'a str,
    pub birthday: String,
    pub origin: &'a str,
    pub allergies: String,
    pub preferences: &'a str,
    pub card_number: Option<&'a str>,
    pub card_issued_on: String,
}

/// A change history row as stored.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = card_change_history)]
pub struct CardChangeRow {
    pub history_id: i64,
    pub client_key: String,
    pub previous_card: Option<String>,
    pub new_card: String,
    pub reason: String,
    pub changed_at: String,
}

/// A change history row ready to be inserted.
///
/// `changed_at` is left to the column default.
#[derive(Debug, Insertable)]
#[diesel(table_name = card_change_history)]
pub struct NewCardChange<'a> {
    pub client_key: &'a str,
    pub previous_card: Option<&'a str>,
    pub new_card: &'a str,
    pub reason: &'a str,
}

impl<'a> NewClient<'a> {
    /// Builds the insert row for a client.
    ///
    /// `card_number` is passed separately so a generated card can be used.
    pub fn from_client(client: &'a Client, card_number: Option<&'a CardNumber>) -> Self {
        Self {
            client_key: client.key.value(),
            name: &client.name,
            phone: &client.phone,
            birthday: client.birthday.to_string(),
            origin: &client.origin,
            allergies: client.allergies.to_storage(),
            preferences: &client.preferences,
            card_number: card_number.map(CardNumber::value),
            card_issued_on: client.card_issued_on.to_string(),
        }
    }
}

impl<'a> NewCardChange<'a> {
    /// Builds the insert row for a pending audit record.
    pub fn from_record(record: &'a CardChangeRecord) -> Self {
        Self {
            client_key: record.client_key().value(),
            previous_card: record.previous_card(),
            new_card: record.new_card().value(),
            reason: record.reason().text(),
        }
    }
}

impl TryFrom<ClientRow> for Client {
    type Error = PersistenceError;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        let corrupt = |field: &str, err: &dyn std::fmt::Display| {
            PersistenceError::SerializationError(format!(
                "Stored client {} has an invalid {field}: {err}",
                row.client_key
            ))
        };

        let key: ClientKey = ClientKey::parse(&row.client_key).map_err(|e| corrupt("key", &e))?;
        let birthday: BirthDay =
            BirthDay::parse(&row.birthday).map_err(|e| corrupt("birthday", &e))?;
        let card_number: Option<CardNumber> = row
            .card_number
            .as_deref()
            .map(CardNumber::parse)
            .transpose()
            .map_err(|e| corrupt("card number", &e))?;
        let card_issued_on = parse_card_issue_date(&row.card_issued_on)
            .map_err(|e| corrupt("card issue date", &e))?;

        Ok(Self {
            key,
            name: row.name,
            phone: row.phone,
            birthday,
            origin: row.origin,
            allergies: Allergies::parse(&row.allergies),
            preferences: row.preferences,
            card_number,
            card_issued_on,
        })
    }
}

impl TryFrom<CardChangeRow> for CardChangeRecord {
    type Error = PersistenceError;

    fn try_from(row: CardChangeRow) -> Result<Self, Self::Error> {
        let corrupt = |field: &str, err: &dyn std::fmt::Display| {
            PersistenceError::SerializationError(format!(
                "Stored card change {} has an invalid {field}: {err}",
                row.history_id
            ))
        };

        let client_key: ClientKey =
            ClientKey::parse(&row.client_key).map_err(|e| corrupt("client key", &e))?;
        let new_card: CardNumber =
            CardNumber::parse(&row.new_card).map_err(|e| corrupt("new card", &e))?;
        let changed_at: PrimitiveDateTime = PrimitiveDateTime::parse(
            &row.changed_at,
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        )
        .map_err(|e| corrupt("timestamp", &e))?;

        Ok(Self::recorded(
            row.history_id,
            client_key,
            row.previous_card,
            new_card,
            ChangeReason::from_record(row.reason),
            changed_at,
        ))
    }
}
