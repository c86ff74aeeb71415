//! Chart capability table — the fixed palette of renderable chart types.
//!
//! DESIGN
//! ======
//! A static registry mapping each chart-type name to its renderer's
//! declared parameter names and a prose description. The pipeline uses the
//! key set to decide whether a model-proposed `chart_type` is renderable
//! and passes `chart_columns` through keyed by the declared parameters;
//! rendering itself happens elsewhere.

use tracing::warn;

use crate::pipeline::schema::{ChartPlan, ChartStep};

// =============================================================================
// CAPABILITIES
// =============================================================================

/// One renderable chart type and the parameters its renderer declares.
#[derive(Debug, Clone, Copy)]
pub struct ChartCapability {
    pub name: &'static str,
    pub params: &'static [&'static str],
    pub description: &'static str,
}

/// The fixed chart capability table.
#[must_use]
pub fn capabilities() -> &'static [ChartCapability] {
    const CAPABILITIES: &[ChartCapability] = &[
        ChartCapability {
            name: "line_chart",
            params: &["x_col", "y_col", "title"],
            description: "Plots a line chart using the specified columns from the dataframe.",
        },
        ChartCapability {
            name: "bar_chart",
            params: &["x_col", "y_col", "title"],
            description: "Plots a bar chart using the specified columns from the dataframe.",
        },
        ChartCapability {
            name: "scatter_chart",
            params: &["x_col", "y_col", "title"],
            description: "Plots a scatter chart using the specified columns from the dataframe.",
        },
        ChartCapability {
            name: "histogram",
            params: &["col", "title"],
            description: "Plots a histogram for the specified column of the dataframe.",
        },
        ChartCapability {
            name: "pie_chart",
            params: &["values", "names", "title"],
            description: "Plots a pie chart for the distribution of values in a specified column.",
        },
        ChartCapability {
            name: "area_chart",
            params: &["x_col", "y_col", "title"],
            description: "Plots an area chart based on cumulative values from the dataframe.",
        },
        ChartCapability {
            name: "box_plot",
            params: &["x_col", "y_col", "title"],
            description: "Plots a box plot showing the distribution of one column grouped by another.",
        },
        ChartCapability {
            name: "heatmap",
            params: &["x_col", "y_col", "values", "title"],
            description: "Plots a heatmap of the correlation matrix of numerical columns.",
        },
        ChartCapability {
            name: "bubble_chart",
            params: &["x_col", "y_col", "size_col", "title"],
            description: "Plots a bubble chart where bubble size is driven by a specified column.",
        },
        ChartCapability {
            name: "sunburst_chart",
            params: &["path", "values", "title"],
            description: "Plots a sunburst chart over a path of categorical columns.",
        },
        ChartCapability {
            name: "choropleth_map",
            params: &["hover_column", "location_column", "color_column", "title"],
            description: "Plots a choropleth map colored by a specified column.",
        },
        ChartCapability {
            name: "kde_plot",
            params: &["x_col", "group_labels"],
            description: "Plots a kernel density estimate of a continuous variable.",
        },
        ChartCapability {
            name: "violin_chart",
            params: &["x_col", "y_col", "color_col", "title"],
            description: "Plots a violin chart showing the distribution of data per category.",
        },
        ChartCapability {
            name: "funnel_chart",
            params: &["x_col", "y_col", "title"],
            description: "Plots a funnel chart using the provided data.",
        },
        ChartCapability {
            name: "treemap_chart",
            params: &["path", "values_col", "color_col", "title"],
            description: "Plots a treemap over a path of categorical columns.",
        },
        ChartCapability {
            name: "density_heatmap",
            params: &["x_col", "y_col", "title"],
            description: "Plots a density heatmap using the provided data.",
        },
        ChartCapability {
            name: "parallel_coordinates",
            params: &["dimensions", "color_col", "title"],
            description: "Plots parallel coordinates over a list of numeric columns.",
        },
        ChartCapability {
            name: "timeline_chart",
            params: &["x_start", "x_end", "y_col", "color_col", "title"],
            description: "Plots a timeline chart between start and end columns.",
        },
        ChartCapability {
            name: "3D_scatter_plot",
            params: &["x_col", "y_col", "z_col", "color_col", "title"],
            description: "Plots a 3D scatter plot using the provided data.",
        },
        ChartCapability {
            name: "radar_chart",
            params: &["unique_col", "aggregated_column", "color_col", "title"],
            description: "Plots a radar chart using the provided data.",
        },
    ];
    CAPABILITIES
}

/// Ordered chart-type names, for prompt interpolation.
#[must_use]
pub fn chart_type_names() -> Vec<&'static str> {
    capabilities().iter().map(|c| c.name).collect()
}

/// `true` when `name` is a key in the capability table.
#[must_use]
pub fn is_known(name: &str) -> bool {
    capabilities().iter().any(|c| c.name == name)
}

/// Capability table rendered for prompt interpolation: one line per chart
/// type with its declared parameters and description.
#[must_use]
pub fn capability_table_text() -> String {
    capabilities()
        .iter()
        .map(|c| format!("{}({}): {}", c.name, c.params.join(", "), c.description))
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// PLAN FILTERING
// =============================================================================

/// Keep the renderable steps of a chart plan.
///
/// A step proposing a chart type outside the capability table is dropped
/// (logged); the remaining steps still render, so one bad instruction
/// never aborts the whole plan.
#[must_use]
pub fn filter_plan(plan: ChartPlan) -> Vec<ChartStep> {
    plan.chart_content
        .into_iter()
        .filter(|step| {
            let known = is_known(&step.chart_type);
            if !known {
                warn!(chart_type = %step.chart_type, title = %step.chart_title, "unknown chart type, skipping");
            }
            known
        })
        .collect()
}

#[cfg(test)]
#[path = "charts_test.rs"]
mod tests;
