//! Invocation of the external aligner.
//!
//! Reads are aligned with `minimap2`, asking for base-level alignments
//! (`-c`) annotated with difference strings (`--cs`). The aligner's standard
//! output becomes the run's alignment record file and its standard error is
//! kept as a log next to it. Children for every run are spawned up front and
//! then awaited together, so no run's analysis begins before all alignments
//! exist.

use std::fs::File;
use std::path::Path;
use std::process::Child;
use std::process::Command;
use std::process::Stdio;

use anyhow::bail;
use anyhow::Context;
use tracing::debug;

/// Spawns the aligner for one run, leaving its output redirected into the
/// given alignment record file and log file.
pub fn spawn(reference: &Path, reads: &Path, alignments: &Path, log: &Path) -> anyhow::Result<Child> {
    let alignments_file = File::create(alignments)
        .with_context(|| format!("could not create alignment file: {}", alignments.display()))?;
    let log_file = File::create(log)
        .with_context(|| format!("could not create aligner log: {}", log.display()))?;

    debug!(
        "  [*] minimap2 -c --cs {} {} > {}",
        reference.display(),
        reads.display(),
        alignments.display()
    );

    Command::new("minimap2")
        .arg("-c")
        .arg("--cs")
        .arg(reference)
        .arg(reads)
        .stdout(Stdio::from(alignments_file))
        .stderr(Stdio::from(log_file))
        .spawn()
        .with_context(|| "could not launch minimap2. Is it on your PATH?")
}

/// Waits for one spawned aligner to finish, failing on a non-zero exit.
pub fn wait(mut child: Child, run_name: &str) -> anyhow::Result<()> {
    let status = child
        .wait()
        .with_context(|| format!("waiting on minimap2 for run {}", run_name))?;

    if !status.success() {
        bail!("minimap2 exited with {} for run {}", status, run_name);
    }

    Ok(())
}
