//! Report writers
//!
//! Every writer takes any [`Write`] so the same code serves files, stdout and
//! in-memory buffers in tests. Callers attach file paths to I/O errors.

use std::io::{self, Write};

use ltcs_core::{BitVector, ModeSet, ReactionSummary};

/// Write one line per set with one membership digit per mode
///
/// `csv` separates digits with commas (`1,0,1`), otherwise they are packed
/// (`101`).
pub fn write_sets<W: Write, S: ModeSet>(out: &mut W, sets: &[S], csv: bool) -> io::Result<()> {
    for set in sets {
        write_membership(out, set, csv)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Write the internal-loop flags of all modes as a single line
pub fn write_loops<W: Write>(out: &mut W, loops: &BitVector, csv: bool) -> io::Result<()> {
    write_membership(out, loops, csv)?;
    writeln!(out)
}

fn write_membership<W: Write, S: ModeSet>(out: &mut W, set: &S, csv: bool) -> io::Result<()> {
    let mut line = String::with_capacity(if csv { 2 * set.universe() } else { set.universe() });
    for mode in 0..set.universe() {
        if csv && mode > 0 {
            line.push(',');
        }
        line.push(if set.contains(mode) { '1' } else { '0' });
    }
    out.write_all(line.as_bytes())
}

/// Write `name,v1,v2,...` per reaction with two decimals per value
pub fn write_analysis<W: Write>(
    out: &mut W,
    names: &[String],
    summary: &ReactionSummary,
) -> io::Result<()> {
    for (reaction, name) in names.iter().enumerate().take(summary.reactions()) {
        write!(out, "{name}")?;
        for value in summary.row(reaction) {
            write!(out, ",{value:.2}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Counts reported at the end of a run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    /// Number of EFMs read, loops included
    pub efms: usize,
    /// Number of LTCS after filtering
    pub ltcs: usize,
    /// Number of internal loops, when loop detection ran
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub internal_loops: Option<usize>,
    /// Cardinality of each LTCS, in output order
    pub sizes: Vec<usize>,
}

impl RunSummary {
    /// Summarize a finished computation
    pub fn new<S: ModeSet>(efms: usize, sets: &[S], internal_loops: Option<usize>) -> Self {
        Self {
            efms,
            ltcs: sets.len(),
            internal_loops,
            sizes: sets.iter().map(ModeSet::cardinality).collect(),
        }
    }
}

/// Print the console summary
pub fn write_summary<W: Write>(out: &mut W, summary: &RunSummary) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Nr of EFMS:           {}", summary.efms)?;
    writeln!(out, "Nr of LTCS:           {}", summary.ltcs)?;
    if let Some(loops) = summary.internal_loops {
        writeln!(out, "Nr of internal loops: {loops}")?;
    }
    writeln!(out)?;
    writeln!(out, "Sizes of LTCS:")?;
    let sizes: Vec<String> = summary.sizes.iter().map(usize::to_string).collect();
    writeln!(out, "{}", sizes.join(","))?;
    writeln!(out)
}

/// Serialize the summary as pretty-printed JSON
#[cfg(feature = "serde")]
pub fn write_json_summary<W: Write>(out: &mut W, summary: &RunSummary) -> crate::Result<()> {
    serde_json::to_writer_pretty(&mut *out, summary)?;
    writeln!(out).map_err(serde_json::Error::io)?;
    Ok(())
}
