// 🛸 Shape Categories - normalized labels, the category set and the selection value
//
// Keys are lower case ("circle"), display labels are capitalized ("Circle").
// The ALL sentinel is kept verbatim in both forms.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Selector value meaning "do not filter by shape"
pub const ALL: &str = "All shapes";

/// Label used for records without a shape
pub const UNKNOWN_SHAPE: &str = "unknown";

// ============================================================================
// NORMALIZATION
// ============================================================================

/// Capitalize a label: first character upper case, the rest lower case.
pub fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Normalize a raw dataset shape to its canonical lower-case key.
///
/// Missing or blank shapes become "unknown"; the historical "changed" label
/// is folded into "changing".
pub fn normalize_shape(raw: Option<&str>) -> String {
    let shape = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_lowercase(),
        _ => return UNKNOWN_SHAPE.to_string(),
    };

    if shape == "changed" {
        "changing".to_string()
    } else {
        shape
    }
}

// ============================================================================
// CATEGORY SET
// ============================================================================

/// Sorted set of every normalized shape present in the dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySet {
    shapes: BTreeSet<String>,
}

/// One dropdown entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeOption {
    pub label: String,
    pub value: String,
}

impl CategorySet {
    pub fn new<I, S>(shapes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            shapes: shapes
                .into_iter()
                .map(|s| normalize_shape(Some(s.as_ref())))
                .collect(),
        }
    }

    /// Case-insensitive membership test
    pub fn contains(&self, label: &str) -> bool {
        self.shapes.contains(&label.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Shape keys in sorted order (sentinel excluded)
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().map(String::as_str)
    }

    /// Dropdown options: every shape plus the ALL sentinel, sorted by value.
    pub fn options(&self) -> Vec<ShapeOption> {
        let mut options: Vec<ShapeOption> = self
            .iter()
            .chain(std::iter::once(ALL))
            .map(|value| ShapeOption {
                label: capitalize(value),
                value: value.to_string(),
            })
            .collect();

        options.sort_by(|a, b| a.value.cmp(&b.value));
        options
    }
}

// ============================================================================
// SELECTED CATEGORY
// ============================================================================

/// The one piece of mutable UI state: no filter, or a single shape key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum SelectedCategory {
    #[default]
    All,
    Shape(String),
}

impl SelectedCategory {
    /// Build a selection for a shape label, lower-casing it.
    pub fn shape(label: &str) -> Self {
        SelectedCategory::Shape(label.to_lowercase())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, SelectedCategory::All)
    }

    /// Value as carried by the dropdown ("All shapes" or the lower-case key)
    pub fn as_value(&self) -> &str {
        match self {
            SelectedCategory::All => ALL,
            SelectedCategory::Shape(key) => key,
        }
    }

    /// Capitalized form used in titles and for comparing against ALL
    pub fn display(&self) -> String {
        capitalize(self.as_value())
    }
}

impl std::fmt::Display for SelectedCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_value())
    }
}
