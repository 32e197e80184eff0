use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::language_utils;

// @module: File and path utilities

/// Subtitle extensions the tool knows how to translate
pub const SUBTITLE_EXTENSIONS: &[&str] = &["srt", "ssa", "ass"];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    /// Read a file into trimmed lines, stripping a leading byte-order mark
    pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))?;
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
        Ok(content.lines().map(|line| line.trim().to_string()).collect())
    }

    /// Write lines to a file, one per line with a trailing newline
    pub fn write_lines<P: AsRef<Path>>(path: P, lines: &[String]) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }
        let mut content = lines.join("\n");
        content.push('\n');
        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))
    }

    /// Whether the filename already carries the `.<lang><ext>` suffix of a
    /// finished translation
    pub fn is_translated_filename<P: AsRef<Path>>(path: P, lang: &str) -> bool {
        let path = path.as_ref();
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
            return false;
        };
        let ext = Self::extension_with_dot(path);
        name.ends_with(&format!(".{}{}", lang, ext))
    }

    /// File extension including the leading dot, lowercased
    pub fn extension_with_dot<P: AsRef<Path>>(path: P) -> String {
        path.as_ref()
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default()
    }

    /// Strips a trailing language component from a file stem, so that
    /// `movie.pt` becomes `movie` while `dr.who` stays intact
    fn remove_language_suffix(stem: &str) -> &str {
        match stem.rsplit_once('.') {
            Some((base, suffix)) if language_utils::is_language_suffix(suffix) => base,
            _ => stem,
        }
    }

    // @generates: Output path for a translated subtitle
    // @params: input file, destination language, optional output directory
    pub fn output_path<P: AsRef<Path>>(
        input: P,
        dest_lang: &str,
        output_dir: Option<&Path>,
    ) -> PathBuf {
        let input = input.as_ref();
        let ext = Self::extension_with_dot(input);
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let base = Self::remove_language_suffix(&stem);

        let file_name = format!("{}.{}{}", base, dest_lang, ext);
        let dir = output_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| input.parent().unwrap_or_else(|| Path::new(".")).to_path_buf());
        dir.join(file_name)
    }

    /// Find subtitle files under a directory, skipping names that already
    /// carry the destination-language suffix
    pub fn find_subtitle_files<P: AsRef<Path>>(dir: P, dest_lang: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(ext) = path.extension() else { continue };
            let ext = ext.to_string_lossy().to_lowercase();
            if !SUBTITLE_EXTENSIONS.contains(&ext.as_str()) {
                continue;
            }
            if Self::is_translated_filename(path, dest_lang) {
                continue;
            }
            result.push(path.to_path_buf());
        }

        Ok(result)
    }
}
