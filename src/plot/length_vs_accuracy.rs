//! Alignment length against alignment accuracy, for each run.

use plotly::common::Mode;
use plotly::common::Title;
use plotly::layout::Axis;
use plotly::Layout;
use plotly::Scatter;

use crate::accuracy::results::Results;
use crate::plot::command::accuracy_axis_floor;
use crate::plot::command::AccuracyPlot;

/// Struct that represents the alignment length vs accuracy plot.
pub struct LengthVsAccuracyPlot;

impl AccuracyPlot for LengthVsAccuracyPlot {
    fn name(&self) -> &'static str {
        "Length vs Accuracy"
    }

    fn filename(&self) -> &'static str {
        "length-vs-accuracy"
    }

    fn generate(&self, results: &Results) -> anyhow::Result<plotly::Plot> {
        let mut plot = plotly::Plot::new();

        for run in &results.runs {
            let trace = Scatter::new(
                run.overall.alignment_lengths.clone(),
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
                    .title(Title::new("Alignment Length"))
                    .auto_range(true),
            )
            .y_axis(
                Axis::new()
                    .title(Title::new("Alignment Accuracy (%)"))
                    .range(vec![accuracy_axis_floor(results), 100.0]),
            );

        plot.set_layout(layout);
        Ok(plot)
    }
}
