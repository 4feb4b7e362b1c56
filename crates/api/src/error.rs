// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use loyalty_crm::CoreError;
use loyalty_crm_domain::DomainError;
use loyalty_crm_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain, core, and persistence errors and
/// represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The request field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The requested card is already held by a client.
    CardAlreadyAssigned {
        /// The contested card number.
        card_number: String,
    },
    /// A client with the same key is already registered.
    DuplicateClient {
        /// The contested client key.
        client_key: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The store failed; nothing was changed.
    StorageFailure {
        /// A description of the failure.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::CardAlreadyAssigned { card_number } => {
                write!(f, "Card {card_number} is already assigned to another client")
            }
            Self::DuplicateClient { client_key } => {
                write!(f, "A client with key {client_key} is already registered")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::StorageFailure { message } => {
                write!(f, "Storage failure: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// Fields are named as they appear in requests.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let field: &str = match &err {
        DomainError::InvalidCardNumber { .. } | DomainError::CardNumberSpaceExhausted { .. } => {
            "num_tarjeta"
        }
        DomainError::InvalidReason(_) => "motivo",
        DomainError::InvalidClientKey(_) => "cedula",
        DomainError::InvalidName(_) => "nombre",
        DomainError::InvalidPhone(_) => "telefono",
        DomainError::InvalidBirthday(_) => "fecha_cumpleanos",
        DomainError::DateParseError { .. } => "fecha_entrega_tarjeta",
    };
    invalid_input(field, &err)
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
///
/// Conflicts and missing clients keep their meaning; every other failure
/// is a storage failure.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::CardAlreadyAssigned(card_number) => {
            ApiError::CardAlreadyAssigned { card_number }
        }
        PersistenceError::DuplicateClient(client_key) => ApiError::DuplicateClient { client_key },
        PersistenceError::ClientNotFound(client_key) => ApiError::ResourceNotFound {
            resource_type: String::from("Client"),
            message: format!("No client has key {client_key}"),
        },
        PersistenceError::CardSequenceExhausted(message) => ApiError::InvalidInput {
            field: String::from("num_tarjeta"),
            message,
        },
        other => ApiError::StorageFailure {
            message: other.to_string(),
        },
    }
}

/// Builds an `InvalidInput` error for a specific request field.
pub(crate) fn invalid_input(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}
