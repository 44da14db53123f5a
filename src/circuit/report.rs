#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Rendering of a satisfying assignment.
//!
//! Output shape: `[a: 1, b: 0], Z = 1`, with one `name: value` pair per
//! requested input signal in the requested order, then the designated
//! output's value.

use crate::circuit::registry::SignalRegistry;
use crate::sat::engine::Model;
use core::fmt;
use itertools::Itertools;
use std::error::Error;
use std::io::{self, Write};

#[derive(Debug)]
pub enum ReportError {
    /// A requested signal name never appeared in the parsed expression.
    MissingSignal(String),
    Io(io::Error),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSignal(name) => write!(f, "unknown signal `{name}`"),
            Self::Io(e) => write!(f, "failed to write result: {e}"),
        }
    }
}

impl Error for ReportError {}

impl From<io::Error> for ReportError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Writes the rendered assignment to `sink`.
///
/// `output` designates the signal whose value is reported as `Z`; `None`
/// means the circuit output itself, which a satisfying model makes true
/// by construction.
///
/// # Errors
///
/// [`ReportError::MissingSignal`] if any requested name was never
/// interned; nothing is written in that case. [`ReportError::Io`] if the
/// sink fails.
pub fn report<W: Write>(
    sink: &mut W,
    inputs: &[String],
    output: Option<&str>,
    model: &Model,
    registry: &SignalRegistry,
) -> Result<(), ReportError> {
    // Resolve every name before writing so a missing signal produces no
    // partial output.
    let resolved: Vec<(&str, bool)> = inputs
        .iter()
        .map(|name| {
            registry
                .lookup(name)
                .map(|var| (name.as_str(), model.value(var)))
                .ok_or_else(|| ReportError::MissingSignal(name.clone()))
        })
        .collect::<Result<_, _>>()?;

    let output_value = match output {
        Some(name) => registry
            .lookup(name)
            .map(|var| model.value(var))
            .ok_or_else(|| ReportError::MissingSignal(name.to_owned()))?,
        None => true,
    };

    let pairs = resolved
        .iter()
        .map(|(name, value)| format!("{name}: {}", u8::from(*value)))
        .join(", ");
    writeln!(sink, "[{pairs}], Z = {}", u8::from(output_value))?;

    Ok(())
}
