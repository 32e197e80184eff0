/*!
 * Common test utilities for the subtrans test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Sample sequential-cue file: a one-liner, a two-line cue, a caption
/// marker and a music line
pub fn sample_srt_content() -> &'static str {
    "1\n\
     00:00:01,000 --> 00:00:04,000\n\
     Hello there.\n\
     \n\
     2\n\
     00:00:05,000 --> 00:00:09,000\n\
     How are you\n\
     doing today?\n\
     \n\
     3\n\
     00:00:10,000 --> 00:00:14,000\n\
     [door slams]\n\
     \n\
     4\n\
     00:00:15,000 --> 00:00:18,000\n\
     ♪ la la la ♪\n"
}

/// Sample styled-dialogue file with a Format declaration, an embedded
/// comma in the payload, a hard line break, a caption and a music line
pub fn sample_ssa_content() -> &'static str {
    "[Script Info]\n\
     Title: sample\n\
     \n\
     [Events]\n\
     Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n\
     Dialogue: 0,0:00:01.00,0:00:04.00,Default,,0,0,0,,Hello, there!\n\
     Dialogue: 0,0:00:05.00,0:00:09.00,Default,,0,0,0,,How are you?\\NFine.\n\
     Dialogue: 0,0:00:10.00,0:00:12.00,Default,,0,0,0,,[door slams]\n\
     Dialogue: 0,0:00:13.00,0:00:15.00,Default,,0,0,0,,♪ la la ♪\n"
}

/// Splits raw content the way the pipeline reads files: trimmed lines
pub fn to_lines(content: &str) -> Vec<String> {
    content.lines().map(|l| l.trim().to_string()).collect()
}
