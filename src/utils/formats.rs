//! Utilities related to the file formats consumed by `alnqc`.

pub mod fastq;
pub mod paf;
