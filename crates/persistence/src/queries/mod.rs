// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `clients`: Client lookup, listing, and card ownership
//! - `history`: Card change history

pub mod clients;
pub mod history;
