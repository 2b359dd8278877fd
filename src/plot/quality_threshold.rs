//! Alignment accuracy under a sweep of minimum read quality thresholds, for
//! each run.

use plotly::box_plot::BoxPoints;
use plotly::common::Title;
use plotly::layout::Axis;
use plotly::layout::BoxMode;
use plotly::BoxPlot;
use plotly::Layout;

use crate::accuracy::results::Results;
use crate::plot::command::accuracy_axis_floor;
use crate::plot::command::AccuracyPlot;

/// Struct that represents the accuracy by minimum read quality plot.
pub struct QualityThresholdPlot;

impl AccuracyPlot for QualityThresholdPlot {
    fn name(&self) -> &'static str {
        "Accuracy by Minimum Read Quality"
    }

    fn filename(&self) -> &'static str {
        "accuracy-by-minimum-quality"
    }

    fn generate(&self, results: &Results) -> anyhow::Result<plotly::Plot> {
        let mut plot = plotly::Plot::new();

        for run in &results.runs {
            // One grouped box per threshold: the x value of every accuracy is
            // the threshold whose filtered set it belongs to.
            let mut x = Vec::new();
            let mut y = Vec::new();

            for (threshold, accuracies) in run.quality_sweep.iter().enumerate() {
                x.extend(std::iter::repeat(threshold).take(accuracies.len()));
                y.extend_from_slice(accuracies);
            }

            let trace = BoxPlot::new_xy(x, y)
                .name(&run.run_name)
                .box_points(BoxPoints::False);
            plot.add_trace(trace);
        }

        let layout = Layout::new()
            .title(Title::new(self.name()))
            .box_mode(BoxMode::Group)
            .x_axis(Axis::new().title(Title::new("Minimum Read Quality")))
            .y_axis(
                Axis::new()
                    .title(Title::new("Alignment Accuracy (%)"))
                    .range(vec![accuracy_axis_floor(results), 102.0]),
            );

        plot.set_layout(layout);
        Ok(plot)
    }
}
