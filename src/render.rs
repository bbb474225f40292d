// 📊 View Renderer - aggregate sightings for the current selection and lay out the bar chart
//
// Two views:
//   ALL     → one bar per shape, colored per shape
//   <shape> → one bar per year for that shape only
//
// The chart is emitted as a plotly figure (data + layout) for the page to draw.

use crate::category::{capitalize, SelectedCategory, ALL};
use crate::dataset::Dataset;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed chart height in layout units
pub const CHART_HEIGHT: u32 = 800;

/// Smallest font size allowed for the count labels
pub const MIN_TEXT_SIZE: u32 = 12;

/// Year spacing between ticks on the per-year view
pub const YEAR_TICK_INTERVAL: u32 = 2;

pub const ALL_TITLE: &str = "Shapes of All Reported UFO Sightings";

const SHAPE_HOVER: &str = "Shape: %{label}<br>Count: %{value}";
const YEAR_HOVER: &str = "Year: %{x}<br>Count: %{y}";

// Default qualitative palette of the plotting library
const PALETTE: [&str; 10] = [
    "#636efa", "#EF553B", "#00cc96", "#ab63fa", "#FFA15A", "#19d3f3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

// ============================================================================
// AGGREGATE VIEW
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeCount {
    /// Capitalized shape label
    pub shape: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// Count table behind the chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum AggregateView {
    /// Rows per shape, alphabetical by label
    ByShape { counts: Vec<ShapeCount> },
    /// Rows per year for one shape, ascending by year
    ByYear { shape: String, counts: Vec<YearCount> },
}

impl AggregateView {
    /// Number of bars the view produces
    pub fn len(&self) -> usize {
        match self {
            AggregateView::ByShape { counts } => counts.len(),
            AggregateView::ByYear { counts, .. } => counts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of sightings across all bars
    pub fn total(&self) -> usize {
        match self {
            AggregateView::ByShape { counts } => counts.iter().map(|c| c.count).sum(),
            AggregateView::ByYear { counts, .. } => counts.iter().map(|c| c.count).sum(),
        }
    }
}

/// Group the dataset for the given selection.
///
/// A shape that matches nothing yields an empty per-year view.
pub fn aggregate(dataset: &Dataset, selected: &SelectedCategory) -> AggregateView {
    let selected = selected.display();

    if selected == ALL {
        let mut by_shape: BTreeMap<String, usize> = BTreeMap::new();
        for record in dataset.records() {
            *by_shape.entry(capitalize(&record.shape)).or_insert(0) += 1;
        }

        AggregateView::ByShape {
            counts: by_shape
                .into_iter()
                .map(|(shape, count)| ShapeCount { shape, count })
                .collect(),
        }
    } else {
        let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();
        for record in dataset.records() {
            if capitalize(&record.shape) == selected {
                *by_year.entry(record.year).or_insert(0) += 1;
            }
        }

        AggregateView::ByYear {
            shape: selected,
            counts: by_year
                .into_iter()
                .map(|(year, count)| YearCount { year, count })
                .collect(),
        }
    }
}

// ============================================================================
// CHART SPEC
// ============================================================================

/// X value of a bar: a shape label or a year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    Year(i32),
    Label(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarTrace {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub x: Vec<AxisValue>,
    pub y: Vec<usize>,
    /// Count printed on each bar
    pub text: Vec<String>,
    pub textposition: String,
    pub hovertemplate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

impl BarTrace {
    fn new(x: Vec<AxisValue>, y: Vec<usize>, hovertemplate: &str) -> Self {
        let text = y.iter().map(|count| count.to_string()).collect();
        Self {
            kind: "bar".to_string(),
            name: None,
            x,
            y,
            text,
            textposition: "outside".to_string(),
            hovertemplate: hovertemplate.to_string(),
            marker: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
    /// Horizontal position, 0.5 = centered
    pub x: f64,
    pub font: Font,
}

impl Title {
    fn centered(text: String) -> Self {
        Self {
            text,
            x: 0.5,
            font: Font { size: 24 },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTitle {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: AxisTitle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tickangle: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dtick: Option<u32>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Axis {
    fn titled(text: &str) -> Self {
        Self {
            title: AxisTitle {
                text: text.to_string(),
            },
            tickangle: None,
            dtick: None,
            kind: None,
        }
    }

    fn rotated(mut self) -> Self {
        self.tickangle = Some(90);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub title: AxisTitle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniformText {
    pub minsize: u32,
    pub mode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub height: u32,
    pub title: Title,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub showlegend: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    pub uniformtext: UniformText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barmode: Option<String>,
}

impl Layout {
    fn new(title: String, xaxis: Axis, yaxis: Axis) -> Self {
        Self {
            height: CHART_HEIGHT,
            title: Title::centered(title),
            xaxis,
            yaxis,
            showlegend: false,
            legend: None,
            uniformtext: UniformText {
                minsize: MIN_TEXT_SIZE,
                mode: "show".to_string(),
            },
            barmode: None,
        }
    }
}

/// Bar chart figure: traces plus layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub data: Vec<BarTrace>,
    pub layout: Layout,
}

impl ChartSpec {
    /// Total number of bars across traces
    pub fn bar_count(&self) -> usize {
        self.data.iter().map(|trace| trace.x.len()).sum()
    }
}

/// Render the chart for the current selection. Pure in dataset + selection.
pub fn render(dataset: &Dataset, selected: &SelectedCategory) -> ChartSpec {
    let view = aggregate(dataset, selected);
    debug!("rendering {} bars for {}", view.len(), selected);
    chart_for(&view)
}

/// Lay out an already computed view.
pub fn chart_for(view: &AggregateView) -> ChartSpec {
    match view {
        AggregateView::ByShape { counts } => shapes_chart(counts),
        AggregateView::ByYear { shape, counts } => years_chart(shape, counts),
    }
}

fn shapes_chart(counts: &[ShapeCount]) -> ChartSpec {
    // One trace per shape so each gets its own color and legend entry
    let data = counts
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let mut trace = BarTrace::new(
                vec![AxisValue::Label(c.shape.clone())],
                vec![c.count],
                SHAPE_HOVER,
            );
            trace.name = Some(c.shape.clone());
            trace.marker = Some(Marker {
                color: PALETTE[i % PALETTE.len()].to_string(),
            });
            trace
        })
        .collect();

    let mut xaxis = Axis::titled("Shapes").rotated();
    xaxis.kind = Some("category".to_string());

    let mut layout = Layout::new(
        ALL_TITLE.to_string(),
        xaxis,
        Axis::titled("Total number of Sightings"),
    );
    layout.showlegend = true;
    layout.legend = Some(Legend {
        title: AxisTitle {
            text: "Shapes".to_string(),
        },
    });
    layout.barmode = Some("relative".to_string());

    ChartSpec { data, layout }
}

fn years_chart(shape: &str, counts: &[YearCount]) -> ChartSpec {
    let trace = BarTrace::new(
        counts.iter().map(|c| AxisValue::Year(c.year)).collect(),
        counts.iter().map(|c| c.count).collect(),
        YEAR_HOVER,
    );

    let mut xaxis = Axis::titled("Years").rotated();
    xaxis.dtick = Some(YEAR_TICK_INTERVAL);

    let layout = Layout::new(
        format!("Shape \"{}\" Across Years", shape),
        xaxis,
        Axis::titled("Number of Sightings"),
    );

    ChartSpec {
        data: vec![trace],
        layout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::SightingRecord;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            SightingRecord::new(Some("circle"), 2001),
            SightingRecord::new(None, 2002),
            SightingRecord::new(Some("circle"), 2003),
        ])
    }

    fn richer() -> Dataset {
        Dataset::from_records(vec![
            SightingRecord::new(Some("light"), 1999),
            SightingRecord::new(Some("light"), 2001),
            SightingRecord::new(Some("Light"), 2001),
            SightingRecord::new(Some("disk"), 2001),
            SightingRecord::new(Some("changed"), 2004),
            SightingRecord::new(Some("changing"), 2004),
            SightingRecord::new(Some("changing"), 2005),
        ])
    }

    #[test]
    fn test_all_view_counts_per_shape() {
        let view = aggregate(&dataset(), &SelectedCategory::All);

        assert_eq!(
            view,
            AggregateView::ByShape {
                counts: vec![
                    ShapeCount { shape: "Circle".to_string(), count: 2 },
                    ShapeCount { shape: "Unknown".to_string(), count: 1 },
                ]
            }
        );
        assert_eq!(view.total(), 3);
    }

    #[test]
    fn test_shape_view_counts_per_year() {
        let view = aggregate(&richer(), &SelectedCategory::shape("light"));

        assert_eq!(
            view,
            AggregateView::ByYear {
                shape: "Light".to_string(),
                counts: vec![
                    YearCount { year: 1999, count: 1 },
                    YearCount { year: 2001, count: 2 },
                ]
            }
        );
    }

    #[test]
    fn test_changed_counts_as_changing() {
        let dataset = richer();

        let all = aggregate(&dataset, &SelectedCategory::All);
        let AggregateView::ByShape { counts } = all else {
            panic!("expected by-shape view");
        };
        assert!(counts.iter().all(|c| c.shape != "Changed"));
        assert_eq!(
            counts.iter().find(|c| c.shape == "Changing").map(|c| c.count),
            Some(3)
        );

        let changing = aggregate(&dataset, &SelectedCategory::shape("changing"));
        assert_eq!(changing.total(), 3);
    }

    #[test]
    fn test_unknown_selection_renders_empty_chart() {
        let chart = render(&dataset(), &SelectedCategory::shape("saucer"));

        assert_eq!(chart.bar_count(), 0);
        assert_eq!(chart.layout.title.text, "Shape \"Saucer\" Across Years");
    }

    #[test]
    fn test_render_all_layout() {
        let chart = render(&richer(), &SelectedCategory::All);

        assert_eq!(chart.data.len(), 3);
        assert_eq!(chart.bar_count(), 3);
        assert_eq!(chart.layout.title.text, ALL_TITLE);
        assert_eq!(chart.layout.height, CHART_HEIGHT);
        assert_eq!(chart.layout.xaxis.tickangle, Some(90));
        assert_eq!(chart.layout.xaxis.dtick, None);
        assert!(chart.layout.showlegend);
        assert_eq!(chart.layout.uniformtext.minsize, MIN_TEXT_SIZE);

        let names: Vec<_> = chart.data.iter().filter_map(|t| t.name.clone()).collect();
        assert_eq!(names, vec!["Changing", "Disk", "Light"]);

        let colors: Vec<_> = chart
            .data
            .iter()
            .filter_map(|t| t.marker.as_ref().map(|m| m.color.clone()))
            .collect();
        assert_eq!(colors.len(), 3);
        assert_ne!(colors[0], colors[1]);

        let light = &chart.data[2];
        assert_eq!(light.y, vec![3]);
        assert_eq!(light.text, vec!["3"]);
        assert_eq!(light.textposition, "outside");
        assert_eq!(light.hovertemplate, "Shape: %{label}<br>Count: %{value}");
    }

    #[test]
    fn test_render_shape_layout() {
        let chart = render(&richer(), &SelectedCategory::shape("changing"));

        assert_eq!(chart.data.len(), 1);
        let trace = &chart.data[0];
        assert_eq!(trace.x, vec![AxisValue::Year(2004), AxisValue::Year(2005)]);
        assert_eq!(trace.y, vec![2, 1]);
        assert_eq!(trace.hovertemplate, "Year: %{x}<br>Count: %{y}");
        assert!(trace.marker.is_none());

        assert_eq!(chart.layout.title.text, "Shape \"Changing\" Across Years");
        assert_eq!(chart.layout.height, CHART_HEIGHT);
        assert_eq!(chart.layout.xaxis.dtick, Some(YEAR_TICK_INTERVAL));
        assert_eq!(chart.layout.xaxis.tickangle, Some(90));
        assert_eq!(chart.layout.xaxis.title.text, "Years");
        assert_eq!(chart.layout.yaxis.title.text, "Number of Sightings");
        assert!(!chart.layout.showlegend);
    }

    #[test]
    fn test_render_is_idempotent() {
        let dataset = richer();

        for selected in [SelectedCategory::All, SelectedCategory::shape("light")] {
            assert_eq!(aggregate(&dataset, &selected), aggregate(&dataset, &selected));
            assert_eq!(render(&dataset, &selected), render(&dataset, &selected));
        }
    }

    #[test]
    fn test_chart_json_shape() {
        let chart = render(&dataset(), &SelectedCategory::shape("circle"));
        let json = serde_json::to_value(&chart).unwrap();

        assert_eq!(json["data"][0]["type"], "bar");
        assert_eq!(json["data"][0]["x"], serde_json::json!([2001, 2003]));
        assert_eq!(json["layout"]["xaxis"]["dtick"], 2);
        assert!(json["layout"].get("legend").is_none());
    }
}
