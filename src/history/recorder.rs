//! History recorder writing transcript and CSV files

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::{debug, info};

use crate::cost::format_cost;
use crate::domain::InvocationResult;
use crate::error::Result;

/// File-name timestamp format, local time
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Column names of the comparison CSV
pub const SUMMARY_HEADER: [&str; 6] = [
    "Prompt File",
    "Prompt Tokens",
    "Completion Tokens",
    "Total Tokens",
    "Estimated Cost",
    "Response",
];

const SEPARATOR_WIDTH: usize = 40;

pub fn timestamp(at: DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

pub fn timestamp_now() -> String {
    timestamp(Local::now())
}

/// Writes run records into the history directory
#[derive(Debug, Clone)]
pub struct HistoryRecorder {
    dir: PathBuf,
}

impl HistoryRecorder {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Write the transcript of a single run to `<prompt-id>-<timestamp>.txt`
    pub fn record_run(&self, input: &str, result: &InvocationResult, timestamp: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self
            .dir
            .join(format!("{}-{}.txt", file_stem_for(&result.prompt_id), timestamp));

        let mut file = File::create(&path)?;
        write!(
            file,
            "Input: {}\n\nPrompt:\n{}\n\nResponse:\n{}\n",
            input, result.rendered_prompt, result.output
        )?;
        writeln!(
            file,
            "\nToken usage: {} (Prompt: {}, Completion: {})",
            result.total_tokens, result.prompt_tokens, result.completion_tokens
        )?;
        writeln!(file, "Estimated cost: ${}", format_cost(result.cost_usd))?;
        file.flush()?;

        info!("Recorded run of {} to {}", result.prompt_id, path.display());
        Ok(path)
    }

    /// Open `compare-<timestamp>.txt` and `.csv`, writing their headers
    pub fn start_comparison(&self, input: &str, timestamp: &str) -> Result<ComparisonLog> {
        fs::create_dir_all(&self.dir)?;
        let transcript_path = self.dir.join(format!("compare-{}.txt", timestamp));
        let summary_path = self.dir.join(format!("compare-{}.csv", timestamp));

        let mut transcript = File::create(&transcript_path)?;
        write!(transcript, "Input: {}\n\n", input)?;
        transcript.flush()?;

        let mut summary = csv::Writer::from_path(&summary_path)?;
        summary.write_record(SUMMARY_HEADER)?;
        summary.flush()?;

        debug!(
            "Started comparison log at {} / {}",
            transcript_path.display(),
            summary_path.display()
        );

        Ok(ComparisonLog {
            transcript,
            summary,
            transcript_path,
            summary_path,
        })
    }
}

/// Open transcript and summary of an in-progress comparison
pub struct ComparisonLog {
    transcript: File,
    summary: csv::Writer<File>,
    transcript_path: PathBuf,
    summary_path: PathBuf,
}

impl ComparisonLog {
    /// Append one result to both files and flush them
    pub fn append(&mut self, result: &InvocationResult) -> Result<()> {
        writeln!(self.transcript, "Prompt: {}", result.prompt_id)?;
        writeln!(self.transcript, "Prompt Text:\n{}", result.rendered_prompt)?;
        writeln!(self.transcript, "Response:\n{}", result.output)?;
        writeln!(
            self.transcript,
            "Tokens: {} (Prompt: {}, Completion: {})",
            result.total_tokens, result.prompt_tokens, result.completion_tokens
        )?;
        writeln!(self.transcript, "Estimated cost: ${}", format_cost(result.cost_usd))?;
        write!(self.transcript, "\n{}\n\n", "-".repeat(SEPARATOR_WIDTH))?;
        self.transcript.flush()?;

        self.summary.write_record([
            result.prompt_id.clone(),
            result.prompt_tokens.to_string(),
            result.completion_tokens.to_string(),
            result.total_tokens.to_string(),
            format_cost(result.cost_usd),
            result.output.clone(),
        ])?;
        self.summary.flush()?;
        Ok(())
    }

    pub fn transcript_path(&self) -> &Path {
        &self.transcript_path
    }

    pub fn summary_path(&self) -> &Path {
        &self.summary_path
    }
}

/// Prompt ids may contain path separators; keep transcripts flat in the history dir
fn file_stem_for(prompt_id: &str) -> String {
    prompt_id.replace(['/', '\\'], "_")
}
