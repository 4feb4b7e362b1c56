// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the change history handler.

use loyalty_crm_persistence::Persistence;

use crate::{
    ApiError, ChangeHistoryRequest, ChangeHistoryResponse, get_change_history, reassign_card,
};

use super::helpers::{create_reassign_request, setup_store};

fn request(client_key: &str) -> ChangeHistoryRequest {
    ChangeHistoryRequest {
        client_key: String::from(client_key),
    }
}

#[test]
fn test_history_empty_for_client_without_changes() {
    let mut persistence: Persistence = setup_store();

    let response: ChangeHistoryResponse =
        get_change_history(&mut persistence, &request("101200300")).unwrap();

    assert!(response.entries.is_empty());
}

#[test]
fn test_history_empty_for_unknown_client() {
    let mut persistence: Persistence = setup_store();

    let response: ChangeHistoryResponse =
        get_change_history(&mut persistence, &request("555000111")).unwrap();

    assert!(response.entries.is_empty());
}

#[test]
fn test_history_requires_client_key() {
    let mut persistence: Persistence = setup_store();

    let result: Result<ChangeHistoryResponse, ApiError> =
        get_change_history(&mut persistence, &request(""));

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_history_lists_most_recent_first_with_display_timestamps() {
    let mut persistence: Persistence = setup_store();
    reassign_card(
        &mut persistence,
        create_reassign_request("101200300", "55", "60", "Perdida"),
    )
    .unwrap();
    reassign_card(
        &mut persistence,
        create_reassign_request("101200300", "60", "61", "Robo"),
    )
    .unwrap();

    let response: ChangeHistoryResponse =
        get_change_history(&mut persistence, &request("101200300")).unwrap();

    let reasons: Vec<&str> = response
        .entries
        .iter()
        .map(|entry| entry.reason.as_str())
        .collect();
    assert_eq!(reasons, ["Robo", "Perdida"]);

    // DD/MM/YYYY HH:MM
    let fecha: &str = &response.entries[0].changed_at;
    assert_eq!(fecha.len(), 16);
    assert_eq!(&fecha[2..3], "/");
    assert_eq!(&fecha[5..6], "/");
    assert_eq!(&fecha[10..11], " ");
    assert_eq!(&fecha[13..14], ":");
}
