// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod reason;
mod types;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types
pub use error::DomainError;
pub use reason::{ChangeReason, ReasonCategory};
pub use types::{Allergies, BirthDay, CardNumber, Client, ClientKey, MAX_CARD_DIGITS};
pub use validation::{
    next_card_number, parse_card_issue_date, validate_client_fields, validate_client_key_format,
};
