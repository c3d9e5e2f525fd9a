//! Step outputs and workflow annotations

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use tracing::warn;

/// Writes step outputs to the results file and annotations to stdout
#[derive(Debug, Clone)]
pub struct ActionOutput {
    /// Path from `GITHUB_OUTPUT`; outputs are skipped when unset
    results_file: Option<PathBuf>,
}

impl ActionOutput {
    pub fn new(results_file: Option<PathBuf>) -> Self {
        Self { results_file }
    }

    /// Publishes the build URL as the `build_url` output and as a notice
    pub fn report_build_url(&self, url: &str) -> io::Result<()> {
        self.set_output("build_url", url)?;
        println!("::notice title=build_url::{}", url);
        Ok(())
    }

    /// Appends `name=value` to the results file
    fn set_output(&self, name: &str, value: &str) -> io::Result<()> {
        let Some(path) = &self.results_file else {
            warn!("GITHUB_OUTPUT is not set, skipping output `{}`", name);
            return Ok(());
        };

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}={}", name, value)
    }
}
