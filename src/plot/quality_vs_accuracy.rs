//! Quality-derived accuracy against alignment accuracy, for each run.
//!
//! Points near the diagonal are reads whose base caller's own quality
//! estimate agrees with what the alignment shows.

use plotly::common::Mode;
use plotly::common::Title;
use plotly::layout::Axis;
use plotly::Layout;
use plotly::Scatter;

use crate::accuracy::results::Results;
use crate::plot::command::accuracy_axis_floor;
use crate::plot::command::AccuracyPlot;

/// Struct that represents the quality accuracy vs alignment accuracy plot.
pub struct QualityVsAccuracyPlot;

impl AccuracyPlot for QualityVsAccuracyPlot {
    fn name(&self) -> &'static str {
        "Q-score Accuracy vs Alignment Accuracy"
    }

    fn filename(&self) -> &'static str {
        "quality-vs-accuracy"
    }

    fn generate(&self, results: &Results) -> anyhow::Result<plotly::Plot> {
        let mut plot = plotly::Plot::new();
        let floor = accuracy_axis_floor(results);

        for run in &results.runs {
            let trace = Scatter::new(
                run.overall.quality_accuracies.clone(),
                run.overall.accuracies.clone(),
            )
            .mode(Mode::Markers)
            .name(&run.run_name);
            plot.add_trace(trace);
        }

        let layout = Layout::new()
            .title(Title::new(self.name()))
            .x_axis(
                Axis::new()
                    .title(Title::new("Q-score Accuracy (%)"))
                    .range(vec![floor, 100.0]),
            )
            .y_axis(
                Axis::new()
                    .title(Title::new("Alignment Accuracy (%)"))
                    .range(vec![floor, 100.0]),
            );

        plot.set_layout(layout);
        Ok(plot)
    }
}
