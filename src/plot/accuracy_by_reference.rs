//! Distribution of alignment accuracies per reference sequence, for each
//! run.

use plotly::box_plot::BoxPoints;
use plotly::common::Title;
use plotly::layout::Axis;
use plotly::BoxPlot;
use plotly::Layout;
use tracing::error;

use crate::accuracy::results::Results;
use crate::plot::command::accuracy_axis_floor;
use crate::plot::command::AccuracyPlot;

/// Struct that represents the per-reference accuracy plot.
pub struct AccuracyByReferencePlot;

impl AccuracyPlot for AccuracyByReferencePlot {
    fn name(&self) -> &'static str {
        "Accuracy by Reference"
    }

    fn filename(&self) -> &'static str {
        "accuracy-by-reference"
    }

    fn generate(&self, results: &Results) -> anyhow::Result<plotly::Plot> {
        let mut plot = plotly::Plot::new();

        for run in &results.runs {
            if run.by_reference.is_empty() {
                error!(
                    "  [*] Run {} observed no reference sequences! Skipping...",
                    run.run_name
                );
                continue;
            }

            for reference in &run.by_reference {
                let trace = BoxPlot::new(reference.series.accuracies.clone())
                    .name(&format!("{} - {}", run.run_name, reference.reference_name))
                    .box_points(BoxPoints::False);
                plot.add_trace(trace);
            }
        }

        let layout = Layout::new().title(Title::new(self.name())).y_axis(
            Axis::new()
                .title(Title::new("Accuracy (%)"))
                .range(vec![accuracy_axis_floor(results), 102.0]),
        );

        plot.set_layout(layout);
        Ok(plot)
    }
}
