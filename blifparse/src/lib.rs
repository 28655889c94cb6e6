//! A BLIF (Berkeley Logic Interchange Format) parser written in Rust.
//!
//! Supports the structural subset: `.model`, `.inputs`, `.outputs`,
//! `.names` with sum-of-products cover rows, and `.end`, plus comments
//! and backslash line continuations.
//!
//! # Usage
//!
//! Just pass a `&str` to [Blif::parse_str]. Example:
//! ```
//! use blifparse::Blif;
//!
//! let _parsed = Blif::parse_str(r#"
//! .model simple
//! .inputs a b
//! .outputs f
//! .names a b f
//! 11 1
//! .end
//! "#).expect("parse error");
//! ```
//!
//! A comment of the form `# tlg weights=[1,1] threshold=2` immediately
//! before a `.names` block attaches threshold-gate metadata to it, so
//! files written by the threshold converter round-trip through this
//! parser without losing the gate parameters.

use compact_str::CompactString;

/// Packages all content of a BLIF file, in an unmodified manner.
#[derive(Debug, Clone)]
pub struct Blif {
    /// A vector of model names and parsed model objects.
    /// The first model is the main one, as in BLIF.
    pub models: Vec<(CompactString, BlifModel)>,
}

/// A parsed BLIF model.
#[derive(Debug, Clone, Default)]
pub struct BlifModel {
    /// Line number of the `.model` directive (1-based).
    pub line: usize,
    /// Primary input net names, in declaration order.
    pub inputs: Vec<CompactString>,
    /// Primary output net names, in declaration order.
    pub outputs: Vec<CompactString>,
    /// Logic blocks (`.names`) in declaration order.
    pub names: Vec<BlifNames>,
}

/// A `.names` logic block: a gate defined by a sum-of-products cover.
#[derive(Debug, Clone)]
pub struct BlifNames {
    /// Line number of the `.names` directive (1-based).
    pub line: usize,
    /// The nets on the `.names` line: inputs first, output last.
    pub ionets: Vec<CompactString>,
    /// Cover rows in declaration order.
    pub rows: Vec<BlifRow>,
    /// Threshold-gate annotation attached from a preceding
    /// `# tlg ...` comment, if any.
    pub tlg: Option<BlifTlg>,
}

impl BlifNames {
    /// Input nets of this block (all ionets except the last).
    #[inline]
    pub fn input_nets(&self) -> &[CompactString] {
        &self.ionets[..self.ionets.len() - 1]
    }

    /// The output net of this block (the last ionet).
    #[inline]
    pub fn output_net(&self) -> &CompactString {
        self.ionets.last().unwrap()
    }

    /// Number of inputs.
    #[inline]
    pub fn arity(&self) -> usize {
        self.ionets.len() - 1
    }
}

/// One cover row: an input mask over `{0,1,-}` plus the output bit.
/// A constant block (zero inputs) has an empty mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlifRow {
    pub mask: CompactString,
    pub output: bool,
}

/// Threshold-gate parameters carried by a `# tlg ...` annotation:
/// the gate fires iff the weighted input sum reaches the threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlifTlg {
    /// One signed weight per block input, in ionet order.
    pub weights: Vec<i64>,
    pub threshold: i64,
}

mod blifnom;
pub use blifnom::{ParseError, ParseErrorKind};

impl Blif {
    /// Parses a string of BLIF code, and returns a [Result] with the
    /// parsed content or a [ParseError] locating the offending line.
    #[inline]
    pub fn parse_str(s: &str) -> Result<Blif, ParseError> {
        blifnom::parse_blif(s.as_bytes())
    }

    /// Parses a u8 slice of BLIF code.
    #[inline]
    pub fn parse_u8slice(s: &[u8]) -> Result<Blif, ParseError> {
        blifnom::parse_blif(s)
    }

    /// Parses the BLIF file at the specified path.
    #[inline]
    pub fn parse_file(path: impl AsRef<std::path::Path>) -> Result<Blif, ParseError> {
        let s = match std::fs::read(&path) {
            Ok(s) => s,
            Err(e) => return Err(ParseError::io(e))
        };
        Blif::parse_u8slice(&s)
    }
}

mod fmt;
