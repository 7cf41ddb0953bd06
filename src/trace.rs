//! Loading and stepping through an execution trace produced by the
//! external MIPS32 simulator: one JSON snapshot per executed instruction,
//! numbered `0.json`, `1.json`, ... in a single directory.

pub mod session;
#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

pub use session::{InstructionRow, RegisterFile, Session, StepOutcome};

/// First word of the text segment (MARS memory layout).
pub const TEXT_BEGIN: u32 = 0x0040_0000;
/// Last word of the text segment, inclusive.
pub const TEXT_END: u32 = 0x0FFF_FFFC;

/// Whether `address` falls in the text segment, i.e. holds an instruction
/// rather than data.
pub fn is_text_address(address: u32) -> bool {
    (TEXT_BEGIN..=TEXT_END).contains(&address)
}

/// Canonical display form of a 32-bit word: `0x` plus exactly 8 lowercase
/// hex digits.
pub fn word_hex(word: u32) -> String {
    format!("{word:#010x}")
}

/// Parse a `0x`-prefixed hex encoding as written by the simulator. The
/// simulator does not zero-pad, so `"0xc"` and `"0x0000000c"` both decode
/// to the same word.
pub fn parse_word_hex(hex: &str) -> Option<u32> {
    let digits = hex.strip_prefix("0x").or_else(|| hex.strip_prefix("0X"))?;
    u32::from_str_radix(digits, 16).ok()
}

/// Memory map keys are decimal address strings. The simulator prints them
/// as signed 32-bit integers, so high (kernel) addresses come out negative.
pub fn parse_address(key: &str) -> Option<u32> {
    key.trim().parse::<i64>().ok().map(|v| v as u32)
}

/// Full machine state after one executed instruction, as serialized by the
/// simulator. All fields are optional: the initial snapshot carries no
/// `hex`/`text`, and registers holding zero may be omitted entirely.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub hex: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub regs: BTreeMap<String, i64>,
    // IndexMap keeps the file's key order, which is the order the memory
    // tables grow in.
    #[serde(default)]
    pub mem: IndexMap<String, i64>,
}

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read snapshot {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed snapshot {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("no snapshots found in {} (expected at least 0.json)", .0.display())]
    Empty(PathBuf),
}

/// Load `<dir>/0.json`, `<dir>/1.json`, ... stopping at the first index
/// with no file. A directory yielding zero snapshots is an error.
pub fn load_trace(dir: &Path) -> Result<Vec<Snapshot>, TraceError> {
    let mut steps = Vec::new();

    loop {
        let path = dir.join(format!("{}.json", steps.len()));
        if !path.exists() {
            break;
        }

        let raw = fs::read_to_string(&path).map_err(|source| TraceError::Read {
            path: path.clone(),
            source,
        })?;
        let snapshot: Snapshot =
            serde_json::from_str(&raw).map_err(|source| TraceError::Malformed { path, source })?;

        tracing::debug!(step = steps.len(), hex = %snapshot.hex, "loaded snapshot");
        steps.push(snapshot);
    }

    if steps.is_empty() {
        return Err(TraceError::Empty(dir.to_path_buf()));
    }

    tracing::info!(steps = steps.len(), dir = %dir.display(), "trace loaded");
    Ok(steps)
}
