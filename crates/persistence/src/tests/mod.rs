// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::Persistence;
use loyalty_crm::{CardReassignment, ClientRegistration, Command, Transition, apply};
use loyalty_crm_domain::{Allergies, BirthDay, CardNumber, ChangeReason, Client, ClientKey};
use time::macros::date;

pub fn create_test_client(key: &str, card: Option<&str>) -> Client {
    Client {
        key: ClientKey::parse(key).unwrap(),
        name: String::from("Ana Torres"),
        phone: String::from("5512345678"),
        birthday: BirthDay::parse("14/02").unwrap(),
        origin: String::from("Guadalajara"),
        allergies: Allergies::parse("Mariscos, Nueces"),
        preferences: String::from("Mesa junto a la ventana"),
        card_number: card.map(|c| CardNumber::parse(c).unwrap()),
        card_issued_on: date!(2025 - 03 - 01),
    }
}

pub fn create_test_registration(key: &str, card: Option<&str>) -> ClientRegistration {
    match apply(Command::RegisterClient {
        client: create_test_client(key, card),
    })
    .unwrap()
    {
        Transition::RegisterClient(registration) => registration,
        Transition::ReassignCard(_) => panic!("expected a registration"),
    }
}

pub fn create_test_reassignment(
    key: &str,
    previous_card: Option<&str>,
    new_card: &str,
    reason: &str,
) -> CardReassignment {
    match apply(Command::ReassignCard {
        client_key: ClientKey::parse(key).unwrap(),
        previous_card: previous_card.map(String::from),
        new_card: CardNumber::parse(new_card).unwrap(),
        reason: ChangeReason::from_selection(reason, None).unwrap(),
    })
    .unwrap()
    {
        Transition::ReassignCard(reassignment) => reassignment,
        Transition::RegisterClient(_) => panic!("expected a reassignment"),
    }
}

/// Opens a store holding client 101200300 with card 55
/// and client 900111222 with card 77.
pub fn setup_store_with_clients() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence
        .register_client(&create_test_registration("101200300", Some("55")))
        .unwrap();
    persistence
        .register_client(&create_test_registration("900111222", Some("77")))
        .unwrap();
    persistence
}

pub fn card_of(persistence: &mut Persistence, key: &str) -> Option<String> {
    persistence
        .get_client(&ClientKey::parse(key).unwrap())
        .unwrap()
        .unwrap()
        .card_number
        .map(|card| card.value().to_string())
}
