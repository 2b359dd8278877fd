//! Functionality related to the aggregation of results across all runs.

use std::fs;
use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use super::aggregate::RunSummary;

/// Main struct for collecting the aggregated results of every run in an
/// invocation. This is what `alnqc eval` writes and `alnqc plot` reads.
#[derive(Default, Serialize, Deserialize)]
pub struct Results {
    /// The per-run summaries, in the order the runs were specified.
    pub runs: Vec<RunSummary>,
}

impl Results {
    /// The minimum accuracy observed across every run, used to scale the
    /// lower bound of accuracy axes when plotting.
    pub fn minimum_accuracy(&self) -> Option<f64> {
        self.runs
            .iter()
            .filter_map(|run| run.min_accuracy)
            .fold(None, |min, accuracy| match min {
                Some(min) if min <= accuracy => Some(min),
                _ => Some(accuracy),
            })
    }

    /// Attempts to write the [`Results`] struct to a file within the
    /// specified directory.
    pub fn write(&self, output_prefix: String, directory: &Path) -> Result<(), io::Error> {
        let results_filename = output_prefix + ".results.json";
        let mut results_filepath = PathBuf::from(directory);
        results_filepath.push(results_filename);

        let mut file = File::create(results_filepath)?;
        let output = serde_json::to_string_pretty(&self).unwrap();
        file.write_all(output.as_bytes())?;

        Ok(())
    }

    /// Attempts to read a [`Results`] struct from a file.
    pub fn read(filepath: impl AsRef<Path>) -> anyhow::Result<Results> {
        let path = filepath.as_ref();
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accuracy::aggregate::RunSummary;

    #[test]
    fn test_minimum_accuracy_reduces_across_runs() {
        let mut results = Results::default();
        assert!(results.minimum_accuracy().is_none());

        let mut one = RunSummary::empty("run1".into());
        one.min_accuracy = Some(92.5);
        let mut two = RunSummary::empty("run2".into());
        two.min_accuracy = Some(88.0);
        let three = RunSummary::empty("run3".into());

        results.runs = vec![one, two, three];
        assert_eq!(results.minimum_accuracy(), Some(88.0));
    }
}
