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
    clippy::all
)]

use loyalty_crm_domain::{CardNumber, ChangeReason, ClientKey};
use time::PrimitiveDateTime;

/// An immutable audit record of one card reassignment.
///
/// Every successful reassignment must produce exactly one record.
/// Records are append-only: once stored they are never updated or deleted.
/// A record captures:
/// - Whose card changed (client key)
/// - The card being replaced and its replacement
/// - Why the card was replaced
/// - When the change was stored (assigned by the store)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardChangeRecord {
    record_id: Option<i64>,
    client_key: ClientKey,
    previous_card: Option<String>,
    new_card: CardNumber,
    reason: ChangeReason,
    changed_at: Option<PrimitiveDateTime>,
}

impl CardChangeRecord {
    /// Creates a pending record that has not been stored yet.
    ///
    /// The record ID and timestamp are assigned by the store.
    ///
    /// # Arguments
    ///
    /// * `client_key` - The client whose card changed
    /// * `previous_card` - The card being replaced, if the client had one
    /// * `new_card` - The replacement card
    /// * `reason` - Why the card was replaced
    #[must_use]
    pub const fn new(
        client_key: ClientKey,
        previous_card: Option<String>,
        new_card: CardNumber,
        reason: ChangeReason,
    ) -> Self {
        Self {
            record_id: None,
            client_key,
            previous_card,
            new_card,
            reason,
            changed_at: None,
        }
    }

    /// Rebuilds a record that was read back from the store.
    #[must_use]
    pub const fn recorded(
        record_id: i64,
        client_key: ClientKey,
        previous_card: Option<String>,
        new_card: CardNumber,
        reason: ChangeReason,
        changed_at: PrimitiveDateTime,
    ) -> Self {
        Self {
            record_id: Some(record_id),
            client_key,
            previous_card,
            new_card,
            reason,
            changed_at: Some(changed_at),
        }
    }

    /// Returns the store-assigned record ID, if stored.
    #[must_use]
    pub const fn record_id(&self) -> Option<i64> {
        self.record_id
    }

    /// Returns the client whose card changed.
    #[must_use]
    pub const fn client_key(&self) -> &ClientKey {
        &self.client_key
    }

    /// Returns the replaced card, if the client had one.
    #[must_use]
    pub fn previous_card(&self) -> Option<&str> {
        self.previous_card.as_deref()
    }

    /// Returns the replacement card.
    #[must_use]
    pub const fn new_card(&self) -> &CardNumber {
        &self.new_card
    }

    /// Returns the reason for the change.
    #[must_use]
    pub const fn reason(&self) -> &ChangeReason {
        &self.reason
    }

    /// Returns the store-assigned timestamp, if stored.
    #[must_use]
    pub const fn changed_at(&self) -> Option<PrimitiveDateTime> {
        self.changed_at
    }

    /// Returns true once the store has assigned an ID and timestamp.
    #[must_use]
    pub const fn is_recorded(&self) -> bool {
        self.record_id.is_some() && self.changed_at.is_some()
    }
}

/// Checks that a change history is ordered most recent first.
///
/// Records stored within the same second are ordered by descending record ID.
/// Pending records never belong to a history and fail the check.
#[must_use]
pub fn is_most_recent_first(history: &[CardChangeRecord]) -> bool {
    history.iter().all(CardChangeRecord::is_recorded)
        && history.windows(2).all(|pair| {
            let newer = (pair[0].changed_at, pair[0].record_id);
            let older = (pair[1].changed_at, pair[1].record_id);
            newer > older
        })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use time::macros::datetime;

    fn create_test_reason() -> ChangeReason {
        ChangeReason::from_selection("Tarjeta dañada", None).unwrap()
    }

    fn create_recorded(record_id: i64, changed_at: PrimitiveDateTime) -> CardChangeRecord {
        CardChangeRecord::recorded(
            record_id,
            ClientKey::parse("101200300").unwrap(),
            Some(String::from("55")),
            CardNumber::parse("77").unwrap(),
            create_test_reason(),
            changed_at,
        )
    }

    #[test]
    fn test_pending_record_has_no_id_or_timestamp() {
        let record: CardChangeRecord = CardChangeRecord::new(
            ClientKey::parse("101200300").unwrap(),
            Some(String::from("55")),
            CardNumber::parse("77").unwrap(),
            create_test_reason(),
        );

        assert_eq!(record.record_id(), None);
        assert_eq!(record.changed_at(), None);
        assert!(!record.is_recorded());
        assert_eq!(record.client_key().value(), "101200300");
        assert_eq!(record.previous_card(), Some("55"));
        assert_eq!(record.new_card().value(), "77");
        assert_eq!(record.reason().text(), "Tarjeta dañada");
    }

    #[test]
    fn test_record_without_previous_card() {
        let record: CardChangeRecord = CardChangeRecord::new(
            ClientKey::parse("101200300").unwrap(),
            None,
            CardNumber::parse("1").unwrap(),
            create_test_reason(),
        );

        assert_eq!(record.previous_card(), None);
    }

    #[test]
    fn test_recorded_record_exposes_store_fields() {
        let record: CardChangeRecord = create_recorded(3, datetime!(2026-10-19 14:05:00));

        assert_eq!(record.record_id(), Some(3));
        assert_eq!(record.changed_at(), Some(datetime!(2026-10-19 14:05:00)));
        assert!(record.is_recorded());
    }

    #[test]
    fn test_history_order_most_recent_first() {
        let history: Vec<CardChangeRecord> = vec![
            create_recorded(3, datetime!(2026-10-19 14:05:00)),
            create_recorded(2, datetime!(2026-10-19 14:05:00)),
            create_recorded(1, datetime!(2026-01-02 09:00:00)),
        ];

        assert!(is_most_recent_first(&history));
    }

    #[test]
    fn test_history_order_rejects_oldest_first() {
        let history: Vec<CardChangeRecord> = vec![
            create_recorded(1, datetime!(2026-01-02 09:00:00)),
            create_recorded(2, datetime!(2026-10-19 14:05:00)),
        ];

        assert!(!is_most_recent_first(&history));
    }

    #[test]
    fn test_history_order_rejects_pending_records() {
        let pending: CardChangeRecord = CardChangeRecord::new(
            ClientKey::parse("101200300").unwrap(),
            None,
            CardNumber::parse("1").unwrap(),
            create_test_reason(),
        );

        assert!(!is_most_recent_first(&[pending]));
    }

    #[test]
    fn test_empty_history_is_ordered() {
        assert!(is_most_recent_first(&[]));
    }
}
