// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Place model from the external places catalog.

use serde::{Deserialize, Serialize};

/// A visitable place from the catalog dataset.
///
/// Read-only to this service; the catalog is loaded at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    /// Dataset ID
    pub id: u64,
    /// Place name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Category (e.g. "Bahari", "Budaya", "Taman Hiburan")
    pub category: String,
    /// City the place is in
    pub city: String,
    /// Entry price (IDR)
    pub price: f64,
    /// Average visitor rating
    pub rating: f64,
    /// Coordinates or free-form location string
    pub location: String,
}
