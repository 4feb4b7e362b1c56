// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Card number is empty, non-numeric, or too long.
    InvalidCardNumber {
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },
    /// Change reason is empty, or the "other" escape hatch was chosen without text.
    InvalidReason(String),
    /// Client key (cedula) is empty or malformed.
    InvalidClientKey(String),
    /// Client name is empty or too short.
    InvalidName(String),
    /// Phone number is malformed.
    InvalidPhone(String),
    /// Birthday is not a valid `DD/MM` day of the year.
    InvalidBirthday(String),
    /// Failed to parse a date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// The next generated card number would not fit the card format.
    CardNumberSpaceExhausted {
        /// The highest card number currently issued.
        highest: u64,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCardNumber { value, reason } => {
                write!(f, "Invalid card number '{value}': {reason}")
            }
            Self::InvalidReason(msg) => write!(f, "Invalid change reason: {msg}"),
            Self::InvalidClientKey(msg) => write!(f, "Invalid client key: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidPhone(msg) => write!(f, "Invalid phone: {msg}"),
            Self::InvalidBirthday(msg) => write!(f, "Invalid birthday: {msg}"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::CardNumberSpaceExhausted { highest } => {
                write!(
                    f,
                    "Cannot generate a card number after {highest}: card numbers are limited to 10 digits"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
