// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database setup that Diesel DSL cannot express.
//!
//! Client and history reads live in `queries/`, writes in `mutations/`.

pub mod sqlite;
