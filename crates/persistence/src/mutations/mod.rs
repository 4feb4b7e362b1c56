// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! Each public mutation runs in its own `IMMEDIATE` transaction so the
//! checks it makes still hold when it writes.
//!
//! ## Module Organization
//!
//! - `clients`: Client registration and card issue
//! - `cards`: Card reassignment with its audit record

pub mod cards;
pub mod clients;

pub use cards::reassign_card;
pub use clients::register_client;
