//! `alnqc` is a command line tool for assessing the accuracy of sequencing
//! reads. Reads are aligned against a reference assembly with an external
//! aligner, the resulting per-base difference annotations are reduced to
//! accuracy statistics, and those statistics are reconciled with the base
//! caller's own quality estimates. This package is composed of both a library
//! crate, as well as a binary crate.
//!
//! This documentation generally refers to the library crate documentation for
//! use by developers of `alnqc`. If you're interested in details about using
//! the `alnqc` command line tool (much more common), please see the help text
//! for the `eval` and `plot` subcommands.
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]

pub mod accuracy;
pub mod aligner;
pub mod eval;
pub mod plot;
pub mod utils;
