//! The category breakdown pie chart.
//!
//! The chart options are generated with `charming` and handed to ECharts in
//! the browser. A [ChartSlot] owns the chart that is currently displayed and
//! destroys it before anything new is drawn, so a re-render never stacks a
//! second chart on top of the first.

use charming::{
    Chart,
    component::Legend,
    element::{Color, Orient, Tooltip, Trigger},
    series::Pie,
};
use maud::{Markup, PreEscaped, html};

use crate::{dashboard::aggregation::CategoryTotals, html::HeadElement};

/// The colors assigned to pie slices, by slice index modulo the palette length.
pub const PALETTE: [&str; 6] = [
    "#3498db", // Blue
    "#2ecc71", // Green
    "#e74c3c", // Red
    "#f1c40f", // Yellow
    "#9b59b6", // Purple
    "#1abc9c", // Teal
];

/// The HTML element ID of the chart container.
pub const CHART_ID: &str = "expense-chart";

const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// Get the palette color for the slice at `index`.
///
/// The palette wraps around, so the seventh slice has the same color as the first.
pub fn slice_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// One slice of the pie chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    /// The category label shown in the legend.
    pub category: String,
    /// The summed amount for the category.
    pub total: f64,
    /// The fill color of the slice.
    pub color: &'static str,
}

/// Build one slice per category, in the iteration order of `totals`.
pub fn pie_slices(totals: &CategoryTotals) -> Vec<PieSlice> {
    totals
        .iter()
        .enumerate()
        .map(|(index, (category, total))| PieSlice {
            category: category.to_owned(),
            total,
            color: slice_color(index),
        })
        .collect()
}

/// Create the ECharts configuration for a pie chart of `slices`.
pub fn category_pie_chart(slices: &[PieSlice]) -> Chart {
    let colors: Vec<Color> = slices.iter().map(|slice| Color::from(slice.color)).collect();
    let data: Vec<(f64, &str)> = slices
        .iter()
        .map(|slice| (slice.total, slice.category.as_str()))
        .collect();

    Chart::new()
        .color(colors)
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(
            Legend::new()
                .orient(Orient::Vertical)
                .right("5%")
                .top("middle"),
        )
        .series(
            Pie::new()
                .name("Expenses by Category")
                .radius("70%")
                .center(vec!["40%", "50%"])
                .data(data),
        )
}

/// A drawn chart: the slices it shows and its serialized ECharts options.
#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    /// The slices in drawing order.
    pub slices: Vec<PieSlice>,
    /// The ECharts configuration as a JSON string.
    pub options: String,
}

/// Holds the chart that is currently displayed, if any.
#[derive(Debug, Default)]
pub struct ChartSlot {
    current: Option<PieChart>,
}

impl ChartSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Destroy the current chart and draw a new one for `totals`.
    ///
    /// Nothing is drawn if `totals` is empty, leaving the slot empty.
    pub fn draw(&mut self, totals: &CategoryTotals) {
        self.destroy();

        if totals.is_empty() {
            tracing::debug!("no categories to chart");
            return;
        }

        let slices = pie_slices(totals);
        let options = category_pie_chart(&slices).to_string();
        tracing::debug!("drew pie chart with {} slices", slices.len());

        self.current = Some(PieChart { slices, options });
    }

    /// Remove the current chart, returning it if there was one.
    pub fn destroy(&mut self) -> Option<PieChart> {
        let previous = self.current.take();

        if previous.is_some() {
            tracing::debug!("destroyed previous pie chart");
        }

        previous
    }

    /// The chart that is currently displayed.
    pub fn current(&self) -> Option<&PieChart> {
        self.current.as_ref()
    }
}

/// The script tag that loads ECharts, to be placed in the page head.
pub fn echarts_script_link() -> HeadElement {
    HeadElement::ScriptLink(ECHARTS_URL.to_owned())
}

/// Render the chart container and the script that draws the chart into it.
///
/// The script disposes of any ECharts instance already bound to the container
/// before creating a new one, so it is safe to run again after an htmx swap.
/// A placeholder message is shown instead when the slot is empty.
pub fn chart_view(slot: &ChartSlot) -> Markup {
    let Some(chart) = slot.current() else {
        return html!(
            p
                id="chart-placeholder"
                class="py-16 text-center text-gray-500 dark:text-gray-400"
            {
                "No expenses yet. Add one to see where your money goes."
            }
        );
    };

    let script = format!(
        r#"(function() {{
            const chartDom = document.getElementById("{CHART_ID}");
            const previous = echarts.getInstanceByDom(chartDom);
            if (previous) {{
                previous.dispose();
            }}
            const chart = echarts.init(chartDom);
            chart.setOption({});

            if (window.expenseChartResize) {{
                window.removeEventListener('resize', window.expenseChartResize);
            }}
            window.expenseChartResize = () => chart.resize();
            window.addEventListener('resize', window.expenseChartResize);
        }})();"#,
        // Category labels are user input. With no `<` left the HTML parser
        // cannot leave the script element early or miss its end tag.
        chart.options.replace('<', "\\u003c")
    );

    html!(
        div
            id=(CHART_ID)
            class="w-full rounded"
            style="height: 320px;"
        {}

        script { (PreEscaped(script)) }
    )
}
