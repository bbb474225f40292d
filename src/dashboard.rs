// 🧭 Dashboard State - the selected shape as an explicit value
//
// Dropdown and chart are mutually reactive: a click resolves the selection
// first, then the chart is re-rendered from that selection.

use crate::category::SelectedCategory;
use crate::dataset::Dataset;
use crate::render::{aggregate, render, AggregateView, ChartSpec};
use crate::selector::{resolve_from_choice, resolve_from_click, ClickEvent, ClickOutcome, SelectionError};
use log::debug;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Arc<Dataset>,
    selected: SelectedCategory,
}

impl Dashboard {
    /// New dashboard showing every shape
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self::with_selection(dataset, SelectedCategory::All)
    }

    /// Resume from a selection the client already holds
    pub fn with_selection(dataset: Arc<Dataset>, selected: SelectedCategory) -> Self {
        Self { dataset, selected }
    }

    pub fn selected(&self) -> &SelectedCategory {
        &self.selected
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Dropdown change. Unknown values leave the selection unchanged.
    pub fn choose(&mut self, value: &str) -> Result<(), SelectionError> {
        self.selected = resolve_from_choice(value, self.dataset.categories())?;
        debug!("dropdown selected {}", self.selected);
        Ok(())
    }

    /// Chart click. Returns whether the selection was updated.
    pub fn click(&mut self, event: Option<&ClickEvent>) -> bool {
        match resolve_from_click(event, self.dataset.categories()) {
            ClickOutcome::Select(selected) => {
                debug!("click selected {}", selected);
                self.selected = selected;
                true
            }
            ClickOutcome::Ignore => false,
        }
    }

    pub fn view(&self) -> AggregateView {
        aggregate(&self.dataset, &self.selected)
    }

    pub fn figure(&self) -> ChartSpec {
        render(&self.dataset, &self.selected)
    }
}
