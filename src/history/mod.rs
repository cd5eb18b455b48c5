//! Run history - transcripts and comparison summaries
//!
//! Every run writes a uniquely timestamped transcript into the history
//! directory; comparisons also write a CSV summary with one row per prompt.

mod recorder;

pub use recorder::{ComparisonLog, HistoryRecorder, SUMMARY_HEADER, TIMESTAMP_FORMAT, timestamp, timestamp_now};
