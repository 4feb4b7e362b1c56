// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reasons for replacing a client's loyalty card.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// The fixed set of reasons offered when a card is replaced.
///
/// `Other` is the escape hatch: choosing it requires a free-text description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReasonCategory {
    /// The card was lost.
    Lost,
    /// The card was damaged.
    Damaged,
    /// The card was stolen.
    Stolen,
    /// The card wore out through normal use.
    Worn,
    /// Anything else; described in free text.
    Other,
}

impl ReasonCategory {
    /// Every category, in the order they are offered.
    pub const ALL: [Self; 5] = [
        Self::Lost,
        Self::Damaged,
        Self::Stolen,
        Self::Worn,
        Self::Other,
    ];

    /// Returns the label shown to staff and stored in the history.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Lost => "Perdida",
            Self::Damaged => "Tarjeta dañada",
            Self::Stolen => "Robo",
            Self::Worn => "Deterioro",
            Self::Other => "Otro",
        }
    }

    /// Looks up a category by its label, ignoring case and surrounding whitespace.
    ///
    /// `"Other"` is accepted as an alias for the escape hatch.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label: String = label.trim().to_lowercase();
        if label == "other" {
            return Some(Self::Other);
        }
        Self::ALL
            .into_iter()
            .find(|category| category.label().to_lowercase() == label)
    }
}

impl std::fmt::Display for ReasonCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a card was replaced, as recorded in the change history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeReason {
    category: ReasonCategory,
    text: String,
}

impl ChangeReason {
    /// Builds a reason from the staff member's selection.
    ///
    /// A known category label is recorded using its canonical label. The
    /// `Other` sentinel records the supplementary text instead. Any other
    /// non-empty selection is treated as a free-text reason.
    ///
    /// # Arguments
    ///
    /// * `selection` - The selected category label, or free text
    /// * `other_text` - The description supplied when `Other` is selected
    ///
    /// # Errors
    ///
    /// Returns an error if the selection is blank, or if `Other` is selected
    /// without a non-blank description.
    pub fn from_selection(selection: &str, other_text: Option<&str>) -> Result<Self, DomainError> {
        let selection: &str = selection.trim();
        if selection.is_empty() {
            return Err(DomainError::InvalidReason(String::from(
                "A reason for the change is required",
            )));
        }

        match ReasonCategory::from_label(selection) {
            Some(ReasonCategory::Other) => {
                let text: &str = other_text.map(str::trim).unwrap_or_default();
                if text.is_empty() {
                    return Err(DomainError::InvalidReason(String::from(
                        "A description is required when the reason is 'Otro'",
                    )));
                }
                Ok(Self {
                    category: ReasonCategory::Other,
                    text: text.to_string(),
                })
            }
            Some(category) => Ok(Self {
                category,
                text: category.label().to_string(),
            }),
            None => Ok(Self {
                category: ReasonCategory::Other,
                text: selection.to_string(),
            }),
        }
    }

    /// Rebuilds a reason from its recorded text.
    #[must_use]
    pub fn from_record(text: String) -> Self {
        let category: ReasonCategory = ReasonCategory::from_label(&text)
            .filter(|category| *category != ReasonCategory::Other)
            .unwrap_or(ReasonCategory::Other);
        Self { category, text }
    }

    /// Returns the reason category.
    #[must_use]
    pub const fn category(&self) -> ReasonCategory {
        self.category
    }

    /// Returns the recorded text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for ChangeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
