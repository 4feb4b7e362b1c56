// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use loyalty_crm_domain::{CardNumber, ChangeReason, Client, ClientKey};

/// A command represents staff intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register a new VIP client.
    RegisterClient {
        /// The client to register.
        /// A missing card number means one is issued from the sequence.
        client: Client,
    },
    /// Replace a client's loyalty card.
    ReassignCard {
        /// The client whose card is replaced.
        client_key: ClientKey,
        /// The card being replaced, as supplied by staff.
        previous_card: Option<String>,
        /// The replacement card.
        new_card: CardNumber,
        /// Why the card is replaced.
        reason: ChangeReason,
    },
}

impl Command {
    /// Returns the name used for this command in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RegisterClient { .. } => "RegisterClient",
            Self::ReassignCard { .. } => "ReassignCard",
        }
    }
}
