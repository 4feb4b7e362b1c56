// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{CardNumber, Client, ClientKey};
use time::Date;
use time::macros::format_description;

/// Validates that a client's basic field constraints are met.
///
/// This function checks formats only.
/// It does NOT check for uniqueness (that requires the store).
///
/// # Arguments
///
/// * `client` - The client to validate
///
/// # Errors
///
/// Returns an error if:
/// - The client key is not 8-15 decimal digits
/// - The name is shorter than two characters
/// - The phone number is not 8-15 decimal digits
pub fn validate_client_fields(client: &Client) -> Result<(), DomainError> {
    validate_client_key_format(&client.key)?;

    // Rule: name must have at least two characters
    if client.name.trim().chars().count() < 2 {
        return Err(DomainError::InvalidName(String::from(
            "Name must be at least 2 characters long",
        )));
    }

    // Rule: phone must be 8-15 digits
    if !is_digit_string(&client.phone, 8, 15) {
        return Err(DomainError::InvalidPhone(String::from(
            "Phone must be 8-15 digits",
        )));
    }

    Ok(())
}

/// Validates the registration format of a client key.
///
/// # Errors
///
/// Returns an error if the key is not 8-15 decimal digits.
pub fn validate_client_key_format(key: &ClientKey) -> Result<(), DomainError> {
    if !is_digit_string(key.value(), 8, 15) {
        return Err(DomainError::InvalidClientKey(format!(
            "Client key must be 8-15 digits, got '{}'",
            key.value()
        )));
    }
    Ok(())
}

/// Parses a card issue date in `YYYY-MM-DD` form.
///
/// # Errors
///
/// Returns an error if the value is not a valid calendar date.
pub fn parse_card_issue_date(value: &str) -> Result<Date, DomainError> {
    let value: &str = value.trim();
    Date::parse(value, format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Computes the card number to issue when a client registers without one.
///
/// This is one past the highest existing card number, or `1` if none exist.
/// This function is pure, deterministic, and has no side effects.
///
/// # Arguments
///
/// * `existing` - Every card number currently assigned
///
/// # Errors
///
/// Returns an error if the next number would need more than ten digits.
pub fn next_card_number<'a, I>(existing: I) -> Result<CardNumber, DomainError>
where
    I: IntoIterator<Item = &'a CardNumber>,
{
    let highest: u64 = existing
        .into_iter()
        .map(CardNumber::numeric_value)
        .max()
        .unwrap_or(0);

    CardNumber::from_sequence(highest + 1)
        .map_err(|_| DomainError::CardNumberSpaceExhausted { highest })
}

fn is_digit_string(value: &str, min_len: usize, max_len: usize) -> bool {
    (min_len..=max_len).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit())
}
