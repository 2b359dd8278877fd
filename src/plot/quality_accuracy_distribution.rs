//! Distribution of quality-derived accuracies for each run.

use plotly::box_plot::BoxPoints;
use plotly::common::Title;
use plotly::layout::Axis;
use plotly::BoxPlot;
use plotly::Layout;

use crate::accuracy::results::Results;
use crate::plot::command::accuracy_axis_floor;
use crate::plot::command::AccuracyPlot;

/// Struct that represents the quality-derived accuracy distribution plot.
pub struct QualityAccuracyDistributionPlot;

impl AccuracyPlot for QualityAccuracyDistributionPlot {
    fn name(&self) -> &'static str {
        "Q-score Accuracies"
    }

    fn filename(&self) -> &'static str {
        "quality-accuracy-distribution"
    }

    fn generate(&self, results: &Results) -> anyhow::Result<plotly::Plot> {
        let mut plot = plotly::Plot::new();

        for run in &results.runs {
            let trace = BoxPlot::new(run.overall.quality_accuracies.clone())
                .name(&run.run_name)
                .box_points(BoxPoints::False);
            plot.add_trace(trace);
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
