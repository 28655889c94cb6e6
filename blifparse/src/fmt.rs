use std::fmt;
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;

use super::*;

lazy_static! {
    static ref RE_SAFE_IDENT: Regex = Regex::new(r"^[^\s#\\]+$").unwrap();
}

pub struct BlifIdentFmt<'i>(&'i str);

impl fmt::Display for BlifIdentFmt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !RE_SAFE_IDENT.is_match(self.0) {
            // BLIF has no escape syntax. the name goes out as-is and
            // will not survive a re-parse.
            clilog::warn!(BLIF_BAD_IDENT,
                          "identifier {:?} is not writable in BLIF",
                          self.0);
        }
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Blif {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (m_name, m) in &self.models {
            writeln!(f, ".model {}", BlifIdentFmt(m_name))?;
            if !m.inputs.is_empty() {
                writeln!(f, ".inputs {}", m.inputs.iter()
                         .map(|s| BlifIdentFmt(s)).format(" "))?;
            }
            if !m.outputs.is_empty() {
                writeln!(f, ".outputs {}", m.outputs.iter()
                         .map(|s| BlifIdentFmt(s)).format(" "))?;
            }
            for block in &m.names {
                write!(f, "{}", block)?;
            }
            writeln!(f, ".end")?;
        }
        Ok(())
    }
}

impl fmt::Display for BlifNames {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(tlg) = &self.tlg {
            writeln!(f, "# tlg weights=[{}] threshold={}",
                     tlg.weights.iter().format(","), tlg.threshold)?;
        }
        writeln!(f, ".names {}", self.ionets.iter()
                 .map(|s| BlifIdentFmt(s)).format(" "))?;
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

impl fmt::Display for BlifRow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.mask.is_empty() {
            true => write!(f, "{}", self.output as u8),
            false => write!(f, "{} {}", self.mask, self.output as u8)
        }
    }
}
