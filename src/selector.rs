// 🎯 Selector Sync - resolve the next selected shape from a dropdown choice or a chart click
//
// The same click handler is wired to both chart views. Only clicks on the
// by-shape view carry shape labels; clicks on the per-year view carry years
// and must leave the selection untouched.

use crate::category::{capitalize, CategorySet, SelectedCategory, ALL};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// CLICK EVENT
// ============================================================================

/// Label of a clicked bar, typed by the axis it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClickLabel {
    /// Year axis value
    Year(i64),
    /// Any other numeric axis value
    Number(f64),
    /// Category axis value
    Text(String),
}

/// One clicked point. Extra fields sent by the plotting library are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickPoint {
    #[serde(default)]
    pub label: Option<ClickLabel>,
}

/// Click payload as emitted by the chart
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClickEvent {
    #[serde(default)]
    pub points: Vec<ClickPoint>,
}

impl ClickEvent {
    /// Event for a single clicked label
    pub fn single(label: ClickLabel) -> Self {
        Self {
            points: vec![ClickPoint { label: Some(label) }],
        }
    }

    pub fn text(label: &str) -> Self {
        Self::single(ClickLabel::Text(label.to_string()))
    }

    pub fn year(year: i64) -> Self {
        Self::single(ClickLabel::Year(year))
    }

    /// Label of the first clicked point
    pub fn first_label(&self) -> Option<&ClickLabel> {
        self.points.first().and_then(|p| p.label.as_ref())
    }
}

// ============================================================================
// RESOLUTION
// ============================================================================

/// Result of resolving a click: a new selection, or leave the state alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Select(SelectedCategory),
    Ignore,
}

impl ClickOutcome {
    pub fn selection(self) -> Option<SelectedCategory> {
        match self {
            ClickOutcome::Select(selected) => Some(selected),
            ClickOutcome::Ignore => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("unknown shape: {0}")]
    UnknownCategory(String),
}

/// Resolve the selection implied by a chart click.
///
/// No event (initial page load) selects ALL. Year labels and labels outside
/// the category set are ignored.
pub fn resolve_from_click(event: Option<&ClickEvent>, categories: &CategorySet) -> ClickOutcome {
    let Some(event) = event else {
        return ClickOutcome::Select(SelectedCategory::All);
    };

    match event.first_label() {
        Some(ClickLabel::Text(label)) if categories.contains(label) => {
            ClickOutcome::Select(SelectedCategory::shape(label))
        }
        label => {
            debug!("ignoring click on {:?}", label);
            ClickOutcome::Ignore
        }
    }
}

/// Validate an explicit dropdown value.
pub fn resolve_from_choice(
    value: &str,
    categories: &CategorySet,
) -> Result<SelectedCategory, SelectionError> {
    if capitalize(value) == ALL {
        Ok(SelectedCategory::All)
    } else if categories.contains(value) {
        Ok(SelectedCategory::shape(value))
    } else {
        Err(SelectionError::UnknownCategory(value.to_string()))
    }
}
