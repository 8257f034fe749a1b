//! Full runs from input files to reports

use std::fs;
use std::path::{Path, PathBuf};

use ltcs::{run, Error, LtcsConfig, RunFiles};
use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn files(&self, efms: &Path) -> RunFiles {
        RunFiles::new(efms)
            .with_ltcs_out(self.path("ltcs.out"))
            .with_loops_out(self.path("loops.out"))
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_run_writes_csv_ltcs() {
    let fixture = Fixture::new();
    let efms = fixture.file("efms.txt", "1\t1\n1\t-1\n-1\t1\n-1\t-1\n");
    let files = fixture.files(&efms);

    let result = run(&files, &LtcsConfig::default()).unwrap();
    assert_eq!(result.sets().len(), 4);
    assert_eq!(
        read(&files.ltcs_out),
        "1,0,0,0\n0,1,0,0\n0,0,1,0\n0,0,0,1\n"
    );
    // no stoichiometry, no loop detection
    assert!(!files.loops_out.exists());
    assert_eq!(result.run_summary().internal_loops, None);
}

#[test]
fn test_run_packed_output_with_loops() {
    let fixture = Fixture::new();
    // reactions: R1 internal, R2 internal, EX exchange
    let efms = fixture.file(
        "efms.txt",
        "1 1 1\n1 -1 0\n-1 1 -1\n-1 -1 1\n-1 1 0\n",
    );
    let stoich = fixture.file("stoich.txt", "1 -1 1\n-1 1 0\n");
    let files = fixture.files(&efms).with_stoichiometry(&stoich);
    let config = LtcsConfig::with_threads(2).with_csv(false);

    let result = run(&files, &config).unwrap();
    assert_eq!(result.loop_count(), Some(2));
    assert_eq!(read(&files.loops_out), "01001\n");
    assert_eq!(read(&files.ltcs_out), "10000\n00010\n00100\n");
}

#[test]
fn test_run_with_analysis_and_reversibility() {
    let fixture = Fixture::new();
    let efms = fixture.file("efms.txt", "1 2 0\n1 -1 0\n-1 3 -2\n");
    let reversibility = fixture.file("rev.txt", "1 0 1\n");
    let reactions = fixture.file("reactions.txt", "\"R1\" \"R2\" \"R3\"\n");
    let analysis = fixture.path("analysis.csv");
    let files = fixture
        .files(&efms)
        .with_reversibility(&reversibility)
        .with_reactions(&reactions)
        .with_analysis_out(&analysis);
    let config = LtcsConfig::default().with_analysis(true);

    let result = run(&files, &config).unwrap();
    // R2 is irreversible, so only R1 separates the modes
    assert_eq!(read(&files.ltcs_out), "1,1,0\n0,0,1\n");
    assert_eq!(result.run_summary().sizes, vec![2, 1]);
    assert_eq!(
        read(&analysis),
        "R1,100.00,-100.00\nR2,-100.00,100.00\nR3,0.00,-100.00\n"
    );
}

#[test]
fn test_run_without_full_output() {
    let fixture = Fixture::new();
    let efms = fixture.file("efms.txt", "1\n-1\n");
    let files = fixture.files(&efms);
    let config = LtcsConfig::default().with_full_output(false);

    let result = run(&files, &config).unwrap();
    assert_eq!(result.sets().len(), 2);
    assert!(!files.ltcs_out.exists());
}

#[test]
fn test_run_empty_efm_file() {
    let fixture = Fixture::new();
    let efms = fixture.file("efms.txt", "");
    let files = fixture.files(&efms);

    let result = run(&files, &LtcsConfig::default()).unwrap();
    assert!(result.sets().is_empty());
    assert_eq!(result.mode_count(), 0);
    assert_eq!(read(&files.ltcs_out), "");
}

#[test]
fn test_run_reports_bad_lines() {
    let fixture = Fixture::new();
    let efms = fixture.file("efms.txt", "1 0 -1\n1 0\n");
    let files = fixture.files(&efms);

    let error = run(&files, &LtcsConfig::default()).unwrap_err();
    assert!(matches!(error, Error::Parse { line: 2, .. }));
    assert_eq!(error.exit_code(), 3);
    assert!(error.to_string().ends_with(":2: expected 3 values, found 2"));
}

#[test]
fn test_run_rejects_mismatched_reaction_file() {
    let fixture = Fixture::new();
    let efms = fixture.file("efms.txt", "1 -1\n-1 1\n");
    let reactions = fixture.file("reactions.txt", "R1 R2 R3\n");
    let files = fixture.files(&efms).with_reactions(&reactions);

    let error = run(&files, &LtcsConfig::default()).unwrap_err();
    assert!(matches!(error, Error::Format { .. }));
}

#[test]
fn test_run_missing_input() {
    let fixture = Fixture::new();
    let files = fixture.files(&fixture.path("missing.txt"));
    let error = run(&files, &LtcsConfig::default()).unwrap_err();
    assert!(matches!(error, Error::Io { .. }));
}

#[cfg(feature = "serde")]
#[test]
fn test_run_writes_json_summary() {
    let fixture = Fixture::new();
    let efms = fixture.file("efms.txt", "1 1\n1 -1\n0 1\n");
    let summary = fixture.path("summary.json");
    let files = fixture.files(&efms).with_summary_json(&summary);

    run(&files, &LtcsConfig::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&read(&summary)).unwrap();
    assert_eq!(value["efms"], 3);
    assert_eq!(value["ltcs"], 2);
    assert_eq!(value["sizes"], serde_json::json!([2, 1]));
}
