//! End-to-end LTCS runs: load, partition, filter, analyse and report

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use ltcs_core::{filter_maximal, summarize, BitVector, LoadedMatrix, ReactionMasks, ReactionSummary};

use crate::input::{
    efm_reaction_count, load_efms, read_exchange_mask, read_reaction_names, read_reversibility,
};
use crate::report::{write_analysis, write_loops, write_sets, RunSummary};
use crate::{Error, LtcsConfig, PartitionEngine, Result};

/// Input and output locations of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFiles {
    /// EFM file, one mode per line
    pub efms: PathBuf,
    /// Optional reversibility flags; all reactions reversible when absent
    pub reversibility: Option<PathBuf>,
    /// Optional reaction names, needed for the analysis
    pub reactions: Option<PathBuf>,
    /// Optional stoichiometric matrix; enables loop detection
    pub stoichiometry: Option<PathBuf>,
    /// LTCS membership output
    pub ltcs_out: PathBuf,
    /// Internal-loop flags output
    pub loops_out: PathBuf,
    /// Per-reaction analysis output
    pub analysis_out: Option<PathBuf>,
    /// JSON summary output
    pub summary_json: Option<PathBuf>,
}

impl RunFiles {
    /// Read `efms` and write to the default output names
    pub fn new<P: Into<PathBuf>>(efms: P) -> Self {
        Self {
            efms: efms.into(),
            reversibility: None,
            reactions: None,
            stoichiometry: None,
            ltcs_out: PathBuf::from("ltcs.out"),
            loops_out: PathBuf::from("loops.out"),
            analysis_out: None,
            summary_json: None,
        }
    }

    /// Set the reversibility file
    pub fn with_reversibility<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.reversibility = Some(path.into());
        self
    }

    /// Set the reaction name file
    pub fn with_reactions<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.reactions = Some(path.into());
        self
    }

    /// Set the stoichiometric matrix file
    pub fn with_stoichiometry<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.stoichiometry = Some(path.into());
        self
    }

    /// Set the LTCS output file
    pub fn with_ltcs_out<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.ltcs_out = path.into();
        self
    }

    /// Set the loops output file
    pub fn with_loops_out<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.loops_out = path.into();
        self
    }

    /// Set the analysis output file
    pub fn with_analysis_out<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.analysis_out = Some(path.into());
        self
    }

    /// Set the JSON summary output file
    pub fn with_summary_json<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.summary_json = Some(path.into());
        self
    }
}

/// Outcome of partitioning and filtering one EFM matrix
#[derive(Debug, Clone)]
pub struct LtcsResult {
    sets: Vec<BitVector>,
    candidates: usize,
    loops: BitVector,
    checks_loops: bool,
    analysis: Option<ReactionSummary>,
}

impl LtcsResult {
    /// Surviving LTCS in output order
    pub fn sets(&self) -> &[BitVector] {
        &self.sets
    }

    /// Consume the result, keeping only the LTCS
    pub fn into_sets(self) -> Vec<BitVector> {
        self.sets
    }

    /// Number of candidate sets before filtering
    pub fn candidates(&self) -> usize {
        self.candidates
    }

    /// Internal-loop flag per mode
    pub fn loops(&self) -> &BitVector {
        &self.loops
    }

    /// Total number of modes, loops included
    pub fn mode_count(&self) -> usize {
        self.loops.len()
    }

    /// Number of internal loops, when loop detection ran
    pub fn loop_count(&self) -> Option<usize> {
        self.checks_loops.then(|| self.loops.count_ones())
    }

    /// Per-reaction usage, when the analysis ran
    pub fn analysis(&self) -> Option<&ReactionSummary> {
        self.analysis.as_ref()
    }

    /// Counts for the console and JSON summaries
    pub fn run_summary(&self) -> RunSummary {
        RunSummary::new(self.mode_count(), &self.sets, self.loop_count())
    }
}

/// Partition the non-loop modes of `loaded` and keep the maximal sets
///
/// A matrix without modes or reactions to partition gives no LTCS. The
/// analysis runs when `config.analysis` is set and `loaded` kept its full
/// encoding.
pub fn compute(loaded: &LoadedMatrix, config: &LtcsConfig) -> Result<LtcsResult> {
    config.validate()?;

    let (sets, candidates) = if loaded.is_empty() {
        warn!(
            "nothing to partition: {} EFMs, {} internal loops, {} reactions",
            loaded.mode_count(),
            loaded.loop_count(),
            loaded.reaction_count()
        );
        (Vec::new(), 0)
    } else {
        let engine = PartitionEngine::new(config.threads)?;
        info!(
            "partitioning {} EFMs over {} reactions with {} threads",
            loaded.mode_count() - loaded.loop_count(),
            loaded.cleaned().reactions(),
            engine.workers()
        );
        let candidates = engine.refine(loaded.universe(), loaded.cleaned())?;
        let count = candidates.len();
        info!("filter LTCS to remove subsets");
        (filter_maximal(candidates), count)
    };

    let analysis = if config.analysis {
        match loaded.full() {
            Some(full) => Some(summarize(&sets, full)),
            None => {
                warn!("analysis requested but the full EFM encoding was not kept");
                None
            }
        }
    } else {
        None
    };

    Ok(LtcsResult {
        sets,
        candidates,
        loops: loaded.loops().clone(),
        checks_loops: loaded.checks_loops(),
        analysis,
    })
}

/// Run the whole computation from input files and write every report
pub fn run(files: &RunFiles, config: &LtcsConfig) -> Result<LtcsResult> {
    config.validate()?;
    if config.analysis && (files.reactions.is_none() || files.analysis_out.is_none()) {
        return Err(Error::Config(
            "the analysis needs a reaction file and an analysis output file".into(),
        ));
    }

    let reactions = efm_reaction_count(&files.efms)?;
    info!("{reactions} reactions in {}", files.efms.display());

    let mut masks = ReactionMasks::all_reversible(reactions);
    if let Some(path) = &files.reversibility {
        masks = masks.with_reversible(read_reversibility(path, reactions)?)?;
    }
    if let Some(path) = &files.stoichiometry {
        masks = masks.with_exchange(read_exchange_mask(path, reactions, config.zero_threshold)?)?;
    }
    let names = match &files.reactions {
        Some(path) => Some(read_reaction_names(path, reactions)?),
        None => None,
    };

    info!("loading EFMs");
    let loaded = load_efms(&files.efms, masks, config.load_options())?;
    let result = compute(&loaded, config)?;
    drop(loaded);

    if config.full_output {
        info!("save ltcs");
        write_file(&files.ltcs_out, |out| write_sets(out, result.sets(), config.csv))?;
        if result.loop_count().is_some() {
            info!("save internal loops");
            write_file(&files.loops_out, |out| write_loops(out, result.loops(), config.csv))?;
        }
    }

    if let (Some(summary), Some(names), Some(path)) =
        (result.analysis(), &names, &files.analysis_out)
    {
        info!("save analysis of LTCS");
        write_file(path, |out| write_analysis(out, names, summary))?;
    }

    if let Some(path) = &files.summary_json {
        write_json(path, &result.run_summary())?;
    }

    Ok(result)
}

#[cfg(feature = "serde")]
fn write_json(path: &Path, summary: &RunSummary) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut out = BufWriter::new(file);
    crate::report::write_json_summary(&mut out, summary)?;
    out.flush().map_err(|e| Error::io(path, e))
}

#[cfg(not(feature = "serde"))]
fn write_json(_path: &Path, _summary: &RunSummary) -> Result<()> {
    warn!("JSON summary requested but the serde feature is disabled");
    Ok(())
}

fn write_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut out = BufWriter::new(file);
    write(&mut out)
        .and_then(|()| out.flush())
        .map_err(|e| Error::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ltcs_core::{LoadOptions, SignMatrix};

    fn members(set: &BitVector) -> Vec<usize> {
        set.iter_ones().collect()
    }

    #[test]
    fn test_compute_filters_candidates() {
        // m2 carries no flux on r1, so it lands in both children of r1 and
        // the {2} remainder never shows up as its own set
        let rows = vec![vec![1.0, 1.0], vec![1.0, -1.0], vec![1.0, 0.0], vec![-1.0, 1.0]];
        let loaded =
            SignMatrix::load(&rows, ReactionMasks::all_reversible(2), LoadOptions::default())
                .unwrap();
        let result = compute(&loaded, &LtcsConfig::default()).unwrap();
        let sets: Vec<Vec<usize>> = result.sets().iter().map(members).collect();
        assert_eq!(sets, vec![vec![0, 2], vec![1, 2], vec![3]]);
        assert_eq!(result.candidates(), 3);
        assert_eq!(result.loop_count(), None);
    }

    #[test]
    fn test_compute_empty_input() {
        let rows: Vec<Vec<f64>> = Vec::new();
        let loaded =
            SignMatrix::load(&rows, ReactionMasks::all_reversible(3), LoadOptions::default())
                .unwrap();
        let result = compute(&loaded, &LtcsConfig::default()).unwrap();
        assert!(result.sets().is_empty());
        assert_eq!(result.run_summary().ltcs, 0);
    }

    #[test]
    fn test_compute_with_analysis() {
        let rows = vec![vec![1.0, 3.0], vec![-1.0, 3.0]];
        let config = LtcsConfig::default().with_analysis(true);
        let loaded =
            SignMatrix::load(&rows, ReactionMasks::all_reversible(2), config.load_options())
                .unwrap();
        let result = compute(&loaded, &config).unwrap();
        let analysis = result.analysis().unwrap();
        assert_eq!(analysis.sets(), 2);
        assert_eq!(analysis.row(0), &[100.0, -100.0]);
        assert_eq!(analysis.row(1), &[100.0, 100.0]);
    }

    #[test]
    fn test_run_requires_reaction_file_for_analysis() {
        let files = RunFiles::new("efms.txt");
        let config = LtcsConfig::default().with_analysis(true);
        assert!(matches!(run(&files, &config), Err(Error::Config(_))));
    }
}
