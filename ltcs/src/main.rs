use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use log::{error, info, LevelFilter};
use ltcs::report::write_summary;
use ltcs::{run, LtcsConfig, RunFiles};
use ltcs_core::format::{DEFAULT_FLUX_THRESHOLD, DEFAULT_LOOP_THRESHOLD, DEFAULT_ZERO_THRESHOLD};
use ltcs_core::validation::parse_switch;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
#[command(
    about = "calc-ltcs - Compute largest thermodynamically consistent sets of elementary flux modes"
)]
struct Cli {
    /// EFM file, one flux mode per line
    #[arg(short, long)]
    input: PathBuf,

    /// LTCS output file
    #[arg(short, long, default_value = "ltcs.out")]
    output: PathBuf,

    /// Stoichiometric matrix file; enables internal loop detection
    #[arg(short, long)]
    stoichiometry: Option<PathBuf>,

    /// Reaction name file
    #[arg(short, long)]
    reactions: Option<PathBuf>,

    /// Reversibility file of 0/1 flags
    #[arg(short = 'v', long)]
    reversibility: Option<PathBuf>,

    /// Internal loops output file
    #[arg(short, long, default_value = "loops.out")]
    loops: PathBuf,

    /// Stoichiometric coefficients within this magnitude count as zero
    #[arg(short, long, default_value_t = DEFAULT_ZERO_THRESHOLD)]
    zero: f64,

    /// Number of worker threads
    #[arg(short, long, default_value_t = 1)]
    threads: usize,

    /// Write the LTCS and loops files (yes/no)
    #[arg(short, long, default_value = "yes", value_parser = switch, action = ArgAction::Set)]
    full_output: bool,

    /// Comma separated membership digits (yes/no)
    #[arg(short, long, default_value = "yes", value_parser = switch, action = ArgAction::Set)]
    csv: bool,

    /// Per-reaction analysis output file
    #[arg(short, long, requires = "reactions")]
    analysis: Option<PathBuf>,

    /// Magnitude at or above which a flux value has a sign
    #[arg(long, default_value_t = DEFAULT_FLUX_THRESHOLD)]
    flux_threshold: f64,

    /// Magnitude at or above which an exchange flux rules out an internal loop
    #[arg(long, default_value_t = DEFAULT_LOOP_THRESHOLD)]
    loop_threshold: f64,

    /// JSON summary output file
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Log verbosity (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn switch(value: &str) -> Result<bool, String> {
    parse_switch(value).map_err(|e| e.to_string())
}

impl Cli {
    fn files(&self) -> RunFiles {
        let mut files = RunFiles::new(&self.input)
            .with_ltcs_out(&self.output)
            .with_loops_out(&self.loops);
        files.reversibility = self.reversibility.clone();
        files.reactions = self.reactions.clone();
        files.stoichiometry = self.stoichiometry.clone();
        files.analysis_out = self.analysis.clone();
        files.summary_json = self.summary_json.clone();
        files
    }

    fn config(&self) -> LtcsConfig {
        LtcsConfig::with_threads(self.threads)
            .with_flux_threshold(self.flux_threshold)
            .with_loop_threshold(self.loop_threshold)
            .with_zero_threshold(self.zero)
            .with_csv(self.csv)
            .with_full_output(self.full_output)
            .with_analysis(self.analysis.is_some())
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    let log_config = ConfigBuilder::new().set_target_level(LevelFilter::Off).build();
    if TermLogger::init(cli.log_level, log_config, TerminalMode::Stderr, ColorChoice::Auto).is_err() {
        eprintln!("logger already initialized");
    }

    let files = cli.files();
    let config = cli.config();
    info!("input: {}", files.efms.display());
    info!("output: {}", files.ltcs_out.display());
    info!(
        "zero threshold: {:.2e}, threads: {}, full output: {}, csv: {}",
        config.zero_threshold,
        config.threads,
        if config.full_output { "yes" } else { "no" },
        if config.csv { "yes" } else { "no" }
    );

    let start_time = Instant::now();
    let result = match run(&files, &config) {
        Ok(result) => result,
        Err(e) => {
            error!("{e}");
            return ExitCode::from(e.exit_code() as u8);
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = write_summary(&mut out, &result.run_summary()).and_then(|()| out.flush()) {
        error!("failed to print summary: {e}");
        return ExitCode::from(3);
    }
    info!("finished in {:.2?}", start_time.elapsed());
    ExitCode::SUCCESS
}
