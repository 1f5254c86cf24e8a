// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Places catalog loading and consensus-driven filtering.

use std::fs;
use std::path::Path;

use crate::models::{Consensus, Place};

/// Service holding the loaded places dataset.
#[derive(Default, Clone)]
pub struct PlaceCatalog {
    places: Vec<Place>,
}

impl PlaceCatalog {
    /// Build a catalog from already-loaded places (tests, fixtures).
    pub fn from_places(places: Vec<Place>) -> Self {
        Self { places }
    }

    /// Load the catalog from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| CatalogError::Io(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Fetch the catalog from a remote URL (JSON array of places).
    pub async fn load_from_url(url: &str) -> Result<Self, CatalogError> {
        let response = reqwest::get(url)
            .await
            .map_err(|e| CatalogError::Fetch(e.to_string()))?;
        if !response.status().is_success() {
            return Err(CatalogError::Fetch(format!(
                "unexpected status {}",
                response.status()
            )));
        }
        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Fetch(e.to_string()))?;
        Self::load_from_json(&body)
    }

    /// Parse a catalog from a JSON string.
    pub fn load_from_json(json_data: &str) -> Result<Self, CatalogError> {
        let places: Vec<Place> =
            serde_json::from_str(json_data).map_err(|e| CatalogError::Parse(e.to_string()))?;

        tracing::info!(count = places.len(), "Loaded places catalog");
        Ok(Self { places })
    }

    /// Get the full catalog.
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Places matching the group consensus: city must equal the consensus
    /// destination exactly (case-sensitive) and the category must be one
    /// of the top consensus categories. An empty result is valid.
    pub fn filter_for_consensus(&self, consensus: &Consensus) -> Vec<Place> {
        self.places
            .iter()
            .filter(|place| {
                place.city == consensus.most_common_destination
                    && consensus
                        .most_common_categories
                        .iter()
                        .any(|c| c == &place.category)
            })
            .cloned()
            .collect()
    }

    /// Case-insensitive city/category search for the browse endpoint.
    pub fn search(&self, city: Option<&str>, category: Option<&str>) -> Vec<Place> {
        self.places
            .iter()
            .filter(|place| {
                city.map_or(true, |c| place.city.eq_ignore_ascii_case(c))
                    && category.map_or(true, |c| place.category.eq_ignore_ascii_case(c))
            })
            .cloned()
            .collect()
    }
}

/// Errors from catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read file: {0}")]
    Io(String),

    #[error("Failed to parse places JSON: {0}")]
    Parse(String),

    #[error("Failed to fetch places dataset: {0}")]
    Fetch(String),
}
