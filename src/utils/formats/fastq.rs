//! Utilities related to opening and manipulating FASTQ files.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use anyhow::bail;
use anyhow::Context;
use flate2::read::MultiGzDecoder;
use noodles::fastq;

/// Attempts to open a FASTQ file from a given source, transparently
/// decompressing gzipped files.
pub fn reader<P>(src: P) -> anyhow::Result<fastq::Reader<Box<dyn BufRead>>>
where
    P: AsRef<Path>,
{
    let path = src.as_ref();
    let file = File::open(path).with_context(|| format!("could not open file: {}", path.display()))?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("gz") => {
            let reader = BufReader::new(MultiGzDecoder::new(file));
            Ok(fastq::Reader::new(Box::new(reader)))
        }
        Some("fq") | Some("fastq") => {
            let reader = BufReader::new(file);
            Ok(fastq::Reader::new(Box::new(reader)))
        }
        _ => bail!("unknown extension for FASTQ file: {}", path.display()),
    }
}
