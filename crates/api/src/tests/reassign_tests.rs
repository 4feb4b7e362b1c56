// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the card reassignment and verification handlers.

use loyalty_crm_persistence::Persistence;

use crate::{
    ApiError, ChangeHistoryRequest, ChangeHistoryResponse, GetClientRequest, ReassignCardRequest,
    ReassignCardResponse, VerifyCardRequest, get_change_history, get_client, reassign_card,
    verify_card,
};

use super::helpers::{create_reassign_request, setup_store};

fn card_of(persistence: &mut Persistence, client_key: &str) -> Option<String> {
    get_client(
        persistence,
        &GetClientRequest {
            client_key: String::from(client_key),
        },
    )
    .unwrap()
    .card_number
}

fn history_of(persistence: &mut Persistence, client_key: &str) -> ChangeHistoryResponse {
    get_change_history(
        persistence,
        &ChangeHistoryRequest {
            client_key: String::from(client_key),
        },
    )
    .unwrap()
}

#[test]
fn test_reassign_card_succeeds() {
    let mut persistence: Persistence = setup_store();

    let response: ReassignCardResponse = reassign_card(
        &mut persistence,
        create_reassign_request("101200300", "55", "78", "Tarjeta dañada"),
    )
    .unwrap();

    assert_eq!(response.message, "Tarjeta reasignada correctamente");
    assert!(response.history_id > 0);
    assert_eq!(card_of(&mut persistence, "101200300").as_deref(), Some("78"));

    let history: ChangeHistoryResponse = history_of(&mut persistence, "101200300");
    assert_eq!(history.entries.len(), 1);
    assert_eq!(history.entries[0].previous_card.as_deref(), Some("55"));
    assert_eq!(history.entries[0].new_card, "78");
    assert_eq!(history.entries[0].reason, "Tarjeta dañada");
}

#[test]
fn test_reassign_to_held_card_conflicts() {
    let mut persistence: Persistence = setup_store();

    let result: Result<ReassignCardResponse, ApiError> = reassign_card(
        &mut persistence,
        create_reassign_request("101200300", "55", "77", "Perdida"),
    );

    assert_eq!(
        result,
        Err(ApiError::CardAlreadyAssigned {
            card_number: String::from("77")
        })
    );
    assert_eq!(card_of(&mut persistence, "101200300").as_deref(), Some("55"));
    assert!(history_of(&mut persistence, "101200300").entries.is_empty());
}

#[test]
fn test_reassign_to_free_card_matching_previous_card_succeeds() {
    let mut persistence: Persistence = setup_store();

    let response: ReassignCardResponse = reassign_card(
        &mut persistence,
        create_reassign_request("101200300", "88", "88", "Perdida"),
    )
    .unwrap();

    assert_eq!(response.message, "Tarjeta reasignada correctamente");
    assert_eq!(card_of(&mut persistence, "101200300").as_deref(), Some("88"));

    let history: ChangeHistoryResponse = history_of(&mut persistence, "101200300");
    assert_eq!(history.entries.len(), 1);
    assert_eq!(history.entries[0].previous_card.as_deref(), Some("88"));
    assert_eq!(history.entries[0].new_card, "88");
}

#[test]
fn test_reassign_with_non_numeric_card_is_invalid() {
    let mut persistence: Persistence = setup_store();

    let result: Result<ReassignCardResponse, ApiError> = reassign_card(
        &mut persistence,
        create_reassign_request("101200300", "55", "abc123", "Perdida"),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "tarjeta_nueva"
    ));
    assert_eq!(card_of(&mut persistence, "101200300").as_deref(), Some("55"));
}

#[test]
fn test_reassign_with_eleven_digit_card_is_invalid() {
    let mut persistence: Persistence = setup_store();

    let result: Result<ReassignCardResponse, ApiError> = reassign_card(
        &mut persistence,
        create_reassign_request("101200300", "55", "12345678901", "Perdida"),
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_reassign_with_blank_reason_is_invalid() {
    let mut persistence: Persistence = setup_store();

    let result: Result<ReassignCardResponse, ApiError> = reassign_card(
        &mut persistence,
        create_reassign_request("101200300", "55", "78", "   "),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "motivo"
    ));
}

#[test]
fn test_reassign_with_other_requires_description() {
    let mut persistence: Persistence = setup_store();

    let result: Result<ReassignCardResponse, ApiError> = reassign_card(
        &mut persistence,
        create_reassign_request("101200300", "55", "78", "Otro"),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "motivo"
    ));
}

#[test]
fn test_reassign_with_other_records_description() {
    let mut persistence: Persistence = setup_store();
    let request: ReassignCardRequest = ReassignCardRequest {
        other_reason: Some(String::from("Cambio de diseño")),
        ..create_reassign_request("101200300", "55", "78", "Otro")
    };

    reassign_card(&mut persistence, request).unwrap();

    let history: ChangeHistoryResponse = history_of(&mut persistence, "101200300");
    assert_eq!(history.entries[0].reason, "Cambio de diseño");
}

#[test]
fn test_reassign_with_blank_client_key_is_invalid() {
    let mut persistence: Persistence = setup_store();

    let result: Result<ReassignCardResponse, ApiError> = reassign_card(
        &mut persistence,
        create_reassign_request("  ", "55", "78", "Perdida"),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "cedula"
    ));
}

#[test]
fn test_reassign_for_unknown_client_is_not_found() {
    let mut persistence: Persistence = setup_store();

    let result: Result<ReassignCardResponse, ApiError> = reassign_card(
        &mut persistence,
        create_reassign_request("123456789", "", "78", "Perdida"),
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_verify_card_reports_existence() {
    let mut persistence: Persistence = setup_store();
    let check = |persistence: &mut Persistence, card: &str| {
        verify_card(
            persistence,
            &VerifyCardRequest {
                card_number: String::from(card),
            },
        )
        .unwrap()
        .exists
    };

    assert!(check(&mut persistence, "77"));
    assert!(check(&mut persistence, " 55 "));
    assert!(!check(&mut persistence, "78"));
    assert!(!check(&mut persistence, "abc"));
}

#[test]
fn test_verify_blank_card_is_invalid() {
    let mut persistence: Persistence = setup_store();

    let result = verify_card(
        &mut persistence,
        &VerifyCardRequest {
            card_number: String::from("  "),
        },
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}
