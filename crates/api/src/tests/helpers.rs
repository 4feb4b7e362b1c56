// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use loyalty_crm_persistence::Persistence;

use crate::{ReassignCardRequest, RegisterClientRequest, register_client};

pub fn create_register_request(client_key: &str, card_number: Option<&str>) -> RegisterClientRequest {
    RegisterClientRequest {
        client_key: String::from(client_key),
        name: String::from("Ana Torres"),
        phone: String::from("5512345678"),
        birthday: String::from("14/02"),
        origin: String::from("Guadalajara"),
        card_number: card_number.map(String::from),
        card_issued_on: Some(String::from("2025-03-01")),
        allergies: Some(String::from("Mariscos, Nueces")),
        preferences: Some(String::from("Mesa junto a la ventana")),
    }
}

pub fn create_reassign_request(
    client_key: &str,
    previous_card: &str,
    new_card: &str,
    reason: &str,
) -> ReassignCardRequest {
    ReassignCardRequest {
        client_key: String::from(client_key),
        previous_card: Some(String::from(previous_card)),
        new_card: String::from(new_card),
        reason: String::from(reason),
        other_reason: None,
    }
}

/// Opens a store holding client 101200300 with card 55
/// and client 900111222 with card 77.
pub fn setup_store() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    register_client(&mut persistence, create_register_request("101200300", Some("55"))).unwrap();
    register_client(&mut persistence, create_register_request("900111222", Some("77"))).unwrap();
    persistence
}
