// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::create_test_client;
use crate::{Command, CoreError, Transition, apply};
use loyalty_crm_domain::{Client, ClientKey, DomainError};

#[test]
fn test_valid_registration_returns_client() {
    let command: Command = Command::RegisterClient {
        client: create_test_client(),
    };

    let result: Result<Transition, CoreError> = apply(command);

    let Transition::RegisterClient(registration) = result.unwrap() else {
        panic!("expected a registration");
    };
    assert_eq!(registration.client.key.value(), "101200300");
    assert_eq!(registration.client.name, "Ana Torres");
    assert_eq!(registration.client.card_number.unwrap().value(), "55");
}

#[test]
fn test_registration_without_card_is_accepted() {
    let mut client: Client = create_test_client();
    client.card_number = None;

    let transition: Transition = apply(Command::RegisterClient { client }).unwrap();

    let Transition::RegisterClient(registration) = transition else {
        panic!("expected a registration");
    };
    assert_eq!(registration.client.card_number, None);
}

#[test]
fn test_registration_trims_free_text() {
    let mut client: Client = create_test_client();
    client.name = String::from("  Ana Torres ");
    client.origin = String::from(" Guadalajara ");
    client.preferences = String::from("   ");

    let transition: Transition = apply(Command::RegisterClient { client }).unwrap();

    let Transition::RegisterClient(registration) = transition else {
        panic!("expected a registration");
    };
    assert_eq!(registration.client.name, "Ana Torres");
    assert_eq!(registration.client.origin, "Guadalajara");
    assert_eq!(registration.client.preferences, "");
}

#[test]
fn test_registration_rejects_short_client_key() {
    let mut client: Client = create_test_client();
    client.key = ClientKey::parse("1234").unwrap();

    let result: Result<Transition, CoreError> = apply(Command::RegisterClient { client });

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidClientKey(_)))
    ));
}

#[test]
fn test_registration_rejects_short_name() {
    let mut client: Client = create_test_client();
    client.name = String::from("A");

    let result: Result<Transition, CoreError> = apply(Command::RegisterClient { client });

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidName(_)))
    ));
}

#[test]
fn test_registration_rejects_bad_phone() {
    let mut client: Client = create_test_client();
    client.phone = String::from("55-1234-5678");

    let result: Result<Transition, CoreError> = apply(Command::RegisterClient { client });

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidPhone(_)))
    ));
}

#[test]
fn test_core_error_display_wraps_domain_error() {
    let err: CoreError = CoreError::from(DomainError::InvalidName(String::from("too short")));

    assert_eq!(err.to_string(), "Domain violation: Invalid name: too short");
}
