// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ChangeReason, DomainError, ReasonCategory};

#[test]
fn test_known_category_is_recorded_with_canonical_label() {
    let reason: ChangeReason = ChangeReason::from_selection(" tarjeta DAÑADA ", None).unwrap();
    assert_eq!(reason.category(), ReasonCategory::Damaged);
    assert_eq!(reason.text(), "Tarjeta dañada");
}

#[test]
fn test_other_requires_description() {
    let result: Result<ChangeReason, DomainError> = ChangeReason::from_selection("Otro", None);
    assert!(matches!(result, Err(DomainError::InvalidReason(_))));

    let result: Result<ChangeReason, DomainError> =
        ChangeReason::from_selection("Otro", Some("   "));
    assert!(matches!(result, Err(DomainError::InvalidReason(_))));
}

#[test]
fn test_other_records_description() {
    let reason: ChangeReason =
        ChangeReason::from_selection("Otro", Some(" Cambio de diseño ")).unwrap();
    assert_eq!(reason.category(), ReasonCategory::Other);
    assert_eq!(reason.text(), "Cambio de diseño");
}

#[test]
fn test_english_other_alias_is_the_escape_hatch() {
    assert!(ChangeReason::from_selection("Other", None).is_err());
    let reason: ChangeReason = ChangeReason::from_selection("other", Some("Upgrade")).unwrap();
    assert_eq!(reason.text(), "Upgrade");
}

#[test]
fn test_blank_reason_is_rejected() {
    assert!(matches!(
        ChangeReason::from_selection("  ", Some("ignored")),
        Err(DomainError::InvalidReason(_))
    ));
}

#[test]
fn test_free_text_reason_is_accepted() {
    let reason: ChangeReason = ChangeReason::from_selection("Cliente la regaló", None).unwrap();
    assert_eq!(reason.category(), ReasonCategory::Other);
    assert_eq!(reason.text(), "Cliente la regaló");
}

#[test]
fn test_from_record_restores_category() {
    assert_eq!(
        ChangeReason::from_record(String::from("Perdida")).category(),
        ReasonCategory::Lost
    );
    assert_eq!(
        ChangeReason::from_record(String::from("Se mojó")).category(),
        ReasonCategory::Other
    );
}

#[test]
fn test_every_label_resolves_to_its_category() {
    for category in ReasonCategory::ALL {
        assert_eq!(ReasonCategory::from_label(category.label()), Some(category));
    }
}
