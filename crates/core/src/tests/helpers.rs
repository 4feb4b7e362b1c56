// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use loyalty_crm_domain::{Allergies, BirthDay, CardNumber, ChangeReason, Client, ClientKey};
use time::macros::date;

pub fn create_test_client() -> Client {
    Client {
        key: ClientKey::parse("101200300").unwrap(),
        name: String::from("Ana Torres"),
        phone: String::from("5512345678"),
        birthday: BirthDay::parse("14/02").unwrap(),
        origin: String::from("Guadalajara"),
        allergies: Allergies::parse("Mariscos, Nueces"),
        preferences: String::from("Mesa junto a la ventana"),
        card_number: Some(CardNumber::parse("55").unwrap()),
        card_issued_on: date!(2025 - 03 - 01),
    }
}

pub fn create_test_reason() -> ChangeReason {
    ChangeReason::from_selection("Tarjeta dañada", None).unwrap()
}
