//! BLIF to threshold-logic-gate netlist conversion.
//!
//! The pipeline: parse BLIF ([blifparse]), build the netlist
//! database ([tlgdb]), extract each gate's truth table, synthesize a
//! threshold realization per gate ([synth]), rebuild the netlist and
//! emit it as annotated BLIF.

use std::fmt;
use std::path::{Path, PathBuf};
use compact_str::CompactString;
use rayon::prelude::*;
use tlgdb::{ExtractError, NameAlloc, NetlistDB, NetlistError, TlgNetwork};

pub mod synth;
pub use synth::{SynthConfig, synthesize};

/// Anything that can go wrong between BLIF text in and BLIF text out.
#[derive(Debug)]
pub enum ConvertError {
    /// parse or netlist construction failure.
    Netlist(NetlistError),
    /// function extraction failure, attributed to the gate driving
    /// `gate_output`.
    Extract { gate_output: CompactString, err: ExtractError },
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Netlist(e) => write!(f, "{}", e),
            ConvertError::Extract { gate_output, err } => write!(
                f, "gate driving `{}`: {}", gate_output, err)
        }
    }
}

impl From<NetlistError> for ConvertError {
    fn from(e: NetlistError) -> ConvertError {
        ConvertError::Netlist(e)
    }
}

/// Synthesize every gate of `db` into threshold gates and build the
/// replacement netlist. Per-gate synthesis is independent and runs
/// in parallel; results are reassembled in declaration order, so the
/// output is reproducible.
pub fn convert_db(
    db: &NetlistDB, config: &SynthConfig
) -> Result<NetlistDB, ConvertError> {
    let time_synth = clilog::stimer!("synthesize_tlg");
    let networks = (0..db.num_gates)
        .into_par_iter()
        .map(|g| {
            let table = db.gate_table(g).map_err(|err| {
                ConvertError::Extract {
                    gate_output: db.netnames[db.gates[g].output].clone(),
                    err
                }
            })?;
            Ok(synthesize(&table, config))
        })
        .collect::<Result<Vec<TlgNetwork>, ConvertError>>()?;
    let alloc = NameAlloc::new();
    let out = db.rebuild_with_networks(&networks, &alloc);
    clilog::finish!(time_synth);
    Ok(out)
}

/// Full text-to-text conversion of the main model of `source`.
pub fn convert_source(
    source: &str, config: &SynthConfig
) -> Result<String, ConvertError> {
    let db = NetlistDB::from_blif_source(source, None)?;
    let out = convert_db(&db, config)?;
    Ok(format!("{}", out.to_blif()))
}

/// Output path rule: a `.blif` suffix becomes `_tlg.blif`; otherwise
/// `_tlg` lands before any existing extension.
pub fn output_path(input: &Path) -> PathBuf {
    let name = input.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let new_name = match name.strip_suffix(".blif") {
        Some(stem) => format!("{}_tlg.blif", stem),
        None => match name.rsplit_once('.') {
            Some((stem, ext)) => format!("{}_tlg.{}", stem, ext),
            None => format!("{}_tlg", name)
        }
    };
    input.with_file_name(new_name)
}
