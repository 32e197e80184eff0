/*!
 * Per-file translation pipeline.
 *
 * A `TranslationJob` owns one subtitle file's run end to end: up-front
 * guards, parsing, batch packing, concurrent dispatch, reassembly, output
 * writing, marking the origin as translated, and the keep/replace file
 * policy. Configuration is threaded in as an explicit value; there is no
 * process-wide options state.
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};

use crate::app_config::Config;
use crate::batch::{self, BATCH_CHAR_LIMIT, TRANSLATED_MARKER};
use crate::classifier;
use crate::dispatcher::Dispatcher;
use crate::errors::SubtitleError;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::providers::TranslationBackend;
use crate::srt::SrtDocument;
use crate::ssa::{self, SsaDocument};

/// One file's translation run
pub struct TranslationJob {
    input_file: PathBuf,
    output_file: PathBuf,
    file_ext: String,
    dest_lang: String,
    configured_source: String,
    remove_captions: bool,
    keep_source: bool,
    save_as_main: bool,
    dispatcher: Dispatcher,
}

impl TranslationJob {
    /// Builds a job for one input file from the resolved configuration
    pub fn new<P: AsRef<Path>>(
        input: P,
        config: &Config,
        backend: Arc<dyn TranslationBackend>,
    ) -> Self {
        let input_file = input.as_ref().to_path_buf();
        let file_ext = FileManager::extension_with_dot(&input_file);
        let output_file = FileManager::output_path(
            &input_file,
            &config.target_language,
            config.output_dir.as_deref(),
        );

        TranslationJob {
            input_file,
            output_file,
            file_ext,
            dest_lang: config.target_language.clone(),
            configured_source: config.source_language.clone(),
            remove_captions: config.remove_closed_captions,
            keep_source: config.keep_source_file,
            save_as_main: config.save_output_as_main,
            dispatcher: Dispatcher::new(backend, config.retries),
        }
    }

    /// Path the translated file is written to (before the file policy
    /// possibly renames it)
    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    /// Runs the whole pipeline for this file
    pub async fn run(&self) -> Result<(), SubtitleError> {
        let dest_name = language_utils::language_name(&self.dest_lang)
            .unwrap_or_else(|_| self.dest_lang.clone());
        info!("translating {:?} to {}", self.input_file, dest_name);
        match self.file_ext.as_str() {
            ".srt" => self.translate_srt().await,
            ".ssa" | ".ass" => self.translate_ssa().await,
            other => Err(SubtitleError::UnsupportedExtension(other.to_string())),
        }
    }

    async fn translate_srt(&self) -> Result<(), SubtitleError> {
        let lines = self.read_source_lines()?;
        let mut doc = SrtDocument::parse(&lines, self.remove_captions);
        debug!(
            "{:?}: {} lines, {} dialogue fragments",
            self.input_file,
            doc.originals.len(),
            doc.fragments.len()
        );

        let batches = batch::pack(&doc.fragments, BATCH_CHAR_LIMIT);
        let source = self
            .dispatcher
            .resolve_source_language(&batches, &self.configured_source, &self.dest_lang)
            .await?;
        let translated = self.dispatcher.translate_all(batches, &source, &self.dest_lang).await;
        doc.merge(&translated);

        self.finish(doc.originals, &source)
    }

    async fn translate_ssa(&self) -> Result<(), SubtitleError> {
        let lines = self.read_source_lines()?;
        let column_count = ssa::resolve_column_count(&lines)
            .ok_or_else(|| SubtitleError::UnrecognizedFormat(self.input_file.clone()))?;
        let mut doc = SsaDocument::extract(&lines, column_count, self.remove_captions);
        debug!(
            "{:?}: {} columns, {} dialogue fragments",
            self.input_file,
            column_count,
            doc.fragments.len()
        );

        let batches = batch::pack(&doc.fragments, BATCH_CHAR_LIMIT);
        let source = self
            .dispatcher
            .resolve_source_language(&batches, &self.configured_source, &self.dest_lang)
            .await?;
        let translated = self.dispatcher.translate_all(batches, &source, &self.dest_lang).await;
        doc.merge(&translated);

        self.finish(doc.originals, &source)
    }

    /// Validates the source/destination pair and reads the input lines
    fn read_source_lines(&self) -> Result<Vec<String>, SubtitleError> {
        if !FileManager::file_exists(&self.input_file) {
            return Err(SubtitleError::UnreadableFile {
                path: self.input_file.clone(),
                reason: "no such file".to_string(),
            });
        }
        if FileManager::is_translated_filename(&self.input_file, &self.dest_lang) {
            return Err(SubtitleError::AlreadyTranslated(self.input_file.clone()));
        }
        if self.output_file.exists() {
            return Err(SubtitleError::OutputExists(self.output_file.clone()));
        }

        let lines = FileManager::read_lines(&self.input_file).map_err(|e| {
            SubtitleError::UnreadableFile {
                path: self.input_file.clone(),
                reason: e.to_string(),
            }
        })?;
        if lines.is_empty() {
            return Err(SubtitleError::EmptyFile(self.input_file.clone()));
        }

        self.check_translated_marker(&lines)?;
        Ok(lines)
    }

    /// Scans from the end for the translated marker, stopping at the first
    /// cue-index line (everything above it is regular subtitle content)
    fn check_translated_marker(&self, lines: &[String]) -> Result<(), SubtitleError> {
        for line in lines.iter().rev() {
            if line.starts_with(TRANSLATED_MARKER) {
                return Err(SubtitleError::AlreadyTranslated(self.input_file.clone()));
            }
            if classifier::is_index(line) {
                break;
            }
        }
        Ok(())
    }

    fn finish(&self, translated_lines: Vec<String>, source: &str) -> Result<(), SubtitleError> {
        self.write_output(translated_lines, source)?;
        self.mark_origin_translated(source)?;
        self.apply_file_policy(source)?;
        info!("finished {:?} -> {:?}", self.input_file, self.output_file);
        Ok(())
    }

    /// Writes the reassembled lines plus the trailing marker line
    fn write_output(&self, mut lines: Vec<String>, source: &str) -> Result<(), SubtitleError> {
        lines.push(String::new());
        lines.push(format!("{};{}", TRANSLATED_MARKER, source));
        FileManager::write_lines(&self.output_file, &lines)
            .map_err(|e| SubtitleError::Io(std::io::Error::other(e.to_string())))
    }

    /// Rewrites the source file with the marker appended so a second run
    /// rejects it. Caption lines are blanked here only for sequential-cue
    /// sources; styled-dialogue stripping already happened in the output
    /// buffer at parse time.
    fn mark_origin_translated(&self, source: &str) -> Result<(), SubtitleError> {
        let mut lines = FileManager::read_lines(&self.input_file).map_err(|e| {
            SubtitleError::UnreadableFile {
                path: self.input_file.clone(),
                reason: e.to_string(),
            }
        })?;

        if self.remove_captions && self.file_ext == ".srt" {
            for line in &mut lines {
                if classifier::is_caption(line) {
                    *line = classifier::strip_caption(line);
                }
            }
        }

        lines.push(String::new());
        lines.push(format!("{};{}", TRANSLATED_MARKER, source));

        fs::remove_file(&self.input_file)?;
        FileManager::write_lines(&self.input_file, &lines)
            .map_err(|e| SubtitleError::Io(std::io::Error::other(e.to_string())))
    }

    /// Applies the keep/replace policy to the origin and output files
    fn apply_file_policy(&self, source: &str) -> Result<(), SubtitleError> {
        match (self.save_as_main, self.keep_source) {
            // translation takes the original's name; original is dropped
            (true, false) => {
                fs::remove_file(&self.input_file)?;
                fs::rename(&self.output_file, &self.input_file)?;
            }
            // translation takes the original's name; original is renamed
            // to <base>.<srcLang><ext>
            (true, true) => {
                let renamed = self.language_suffixed_path(source);
                fs::rename(&self.input_file, &renamed)?;
                fs::rename(&self.output_file, &self.input_file)?;
            }
            // translation keeps its own name; original is dropped
            (false, false) => {
                fs::remove_file(&self.input_file)?;
            }
            // keep both
            (false, true) => {}
        }
        Ok(())
    }

    fn language_suffixed_path(&self, lang: &str) -> PathBuf {
        let base = self.input_file.with_extension("");
        PathBuf::from(format!("{}.{}{}", base.display(), lang, self.file_ext))
    }
}
