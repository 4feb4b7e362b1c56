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
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    get_change_history, get_client, list_clients, reassign_card, register_client, verify_card,
};
pub use request_response::{
    ChangeHistoryEntry, ChangeHistoryRequest, ChangeHistoryResponse, ClientInfo,
    GetClientRequest, ListClientsResponse, ReassignCardRequest, ReassignCardResponse,
    RegisterClientRequest, RegisterClientResponse, VerifyCardRequest, VerifyCardResponse,
};
