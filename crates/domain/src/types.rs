// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::{Date, Month};

/// Maximum number of digits in a loyalty card identifier.
pub const MAX_CARD_DIGITS: usize = 10;

/// Storage marker for a client with no recorded allergies.
const NO_ALLERGIES: &str = "Ninguna";

/// Identifies a client (the national-id-like cedula).
///
/// Client keys are immutable once a client is registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClientKey {
    value: String,
}

impl ClientKey {
    /// Parses a client key, trimming surrounding whitespace.
    ///
    /// Only emptiness is checked here; the registration format rule lives in
    /// `validate_client_key_format`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty after trimming.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidClientKey(String::from(
                "Client key cannot be empty",
            )));
        }
        Ok(Self {
            value: trimmed.to_string(),
        })
    }

    /// Returns the key value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for ClientKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

/// A loyalty card identifier: 1 to 10 decimal digits.
///
/// Leading zeros are significant; `"007"` and `"7"` are different cards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardNumber {
    value: String,
}

impl CardNumber {
    /// Parses a card number, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is empty, longer than ten characters,
    /// or contains anything other than ASCII decimal digits.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        let reject = |reason: &'static str| DomainError::InvalidCardNumber {
            value: trimmed.to_string(),
            reason,
        };

        if trimmed.is_empty() {
            return Err(reject("a card number is required"));
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(reject("only decimal digits are allowed"));
        }
        if trimmed.len() > MAX_CARD_DIGITS {
            return Err(reject("card numbers have at most 10 digits"));
        }

        Ok(Self {
            value: trimmed.to_string(),
        })
    }

    /// Builds the card number for a numeric sequence value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value needs more than ten digits.
    pub fn from_sequence(sequence: u64) -> Result<Self, DomainError> {
        Self::parse(&sequence.to_string())
    }

    /// Returns the card number as stored.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the numeric value of the card number.
    ///
    /// Ten decimal digits always fit in a `u64`.
    #[must_use]
    pub fn numeric_value(&self) -> u64 {
        self.value
            .bytes()
            .fold(0_u64, |acc, b| acc * 10 + u64::from(b - b'0'))
    }
}

impl std::fmt::Display for CardNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

/// A client's birthday as a day of the year (no birth year is kept).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthDay {
    day: u8,
    month: Month,
}

impl BirthDay {
    /// Creates a birthday from a day and month number.
    ///
    /// February 29th is accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the month is not 1-12 or the day does not exist in that month.
    pub fn new(day: u8, month: u8) -> Result<Self, DomainError> {
        let month: Month = Month::try_from(month)
            .map_err(|_| DomainError::InvalidBirthday(format!("Month {month} does not exist")))?;

        // 2024 is a leap year, so 29/02 is allowed.
        let max_day: u8 = time::util::days_in_year_month(2024, month);
        if day == 0 || day > max_day {
            return Err(DomainError::InvalidBirthday(format!(
                "Day {day} does not exist in {month}"
            )));
        }

        Ok(Self { day, month })
    }

    /// Parses a birthday in `DD/MM` form.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not two digits, a slash, and two digits,
    /// or if the date does not exist.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        let malformed = || {
            DomainError::InvalidBirthday(format!("'{trimmed}' is not in DD/MM format"))
        };

        let (day, month) = trimmed.split_once('/').ok_or_else(malformed)?;
        let is_two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
        if !is_two_digits(day) || !is_two_digits(month) {
            return Err(malformed());
        }

        let day: u8 = day.parse().map_err(|_| malformed())?;
        let month: u8 = month.parse().map_err(|_| malformed())?;
        Self::new(day, month)
    }

    /// Returns the day of the month.
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Returns the month.
    #[must_use]
    pub const fn month(&self) -> Month {
        self.month
    }
}

impl std::fmt::Display for BirthDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}/{:02}", self.day, u8::from(self.month))
    }
}

/// Allergy tags for a client.
///
/// Stored as a single comma-delimited string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allergies {
    tags: Vec<String>,
}

impl Allergies {
    /// Parses a comma-delimited list of allergy tags.
    ///
    /// Blank entries and the "none" marker are dropped.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let tags: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty() && !tag.eq_ignore_ascii_case(NO_ALLERGIES))
            .map(String::from)
            .collect();
        Self { tags }
    }

    /// Returns the individual tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns true if no allergies are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Returns the storage form of the tag list.
    #[must_use]
    pub fn to_storage(&self) -> String {
        if self.tags.is_empty() {
            String::from(NO_ALLERGIES)
        } else {
            self.tags.join(", ")
        }
    }
}

/// A VIP client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// The client's key (cedula).
    pub key: ClientKey,
    /// The client's full name.
    pub name: String,
    /// The client's phone number.
    pub phone: String,
    /// The client's birthday.
    pub birthday: BirthDay,
    /// Where the client is from.
    pub origin: String,
    /// Allergy tags.
    pub allergies: Allergies,
    /// Free-text preferences.
    pub preferences: String,
    /// The active loyalty card, if one is assigned.
    pub card_number: Option<CardNumber>,
    /// The date the current card was handed over.
    pub card_issued_on: Date,
}
