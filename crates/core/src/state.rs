// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use loyalty_crm_audit::CardChangeRecord;
use loyalty_crm_domain::{CardNumber, Client, ClientKey};

/// A validated client registration, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRegistration {
    /// The client to insert.
    pub client: Client,
}

/// A validated card reassignment, ready to be written.
///
/// The card update and the audit record must be committed together
/// or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardReassignment {
    /// The client whose card changes.
    pub client_key: ClientKey,
    /// The card the client will hold.
    pub new_card: CardNumber,
    /// The pending audit record for this change.
    pub audit_record: CardChangeRecord,
}

/// The writes produced by applying a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Insert a new client.
    RegisterClient(ClientRegistration),
    /// Replace a client's card and append to the change history.
    ReassignCard(CardReassignment),
}
