/*!
 * Styled-dialogue (SSA/ASS) parsing and reassembly.
 *
 * The format carries header sections, a `Format:` column declaration and
 * `Dialogue:` lines whose first N-1 comma-separated fields are styling
 * metadata (layer, timing, style, actor, margins, effect) followed by the
 * free-text payload. Only the payload is translated; the meta prefix is
 * captured at parse time and re-prepended on merge.
 */

use crate::batch::{parse_tagged_line, LINE_SEPARATOR, TaggedFragment};
use crate::classifier;

const DIALOGUE_PREFIX: &str = "dialogue:";
const FORMAT_PREFIX: &str = "format:";

/// Hard line break escape used inside styled dialogue payloads
pub const SSA_LINE_BREAK: &str = "\\N";

/// One styled-dialogue file split into untouched originals, per-line meta
/// prefixes and the translatable fragments
#[derive(Debug)]
pub struct SsaDocument {
    /// Full line sequence of the source file, mutated in place on merge
    /// (and, with caption stripping on, already at parse time)
    pub originals: Vec<String>,
    /// Tagged dialogue payloads in file order
    pub fragments: Vec<TaggedFragment>,
    /// Meta prefix captured per line index; `None` for non-dialogue lines
    metas: Vec<Option<String>>,
}

/// Case-insensitive prefix match after trimming, used for the `Format:`
/// and `Dialogue:` keywords
fn has_keyword(line: &str, keyword: &str) -> bool {
    line.trim().to_lowercase().starts_with(keyword)
}

fn is_dialogue_line(line: &str) -> bool {
    has_keyword(line, DIALOGUE_PREFIX)
}

/// Resolves the declared column count of the file's dialogue lines.
///
/// The line immediately preceding the first dialogue line is checked for a
/// `Format:` declaration; failing that, the minimum comma count over every
/// dialogue line is taken as a one-shot guess. Returns `None` when the
/// file has no dialogue lines at all or the guess degenerates below two
/// columns — callers report that as an unrecognized format, there is no
/// second guess.
pub fn resolve_column_count(lines: &[String]) -> Option<usize> {
    let first_dialogue = lines.iter().position(|l| is_dialogue_line(l))?;

    if first_dialogue > 0 && has_keyword(&lines[first_dialogue - 1], FORMAT_PREFIX) {
        let declared = lines[first_dialogue - 1].split(',').count();
        if declared >= 2 {
            return Some(declared);
        }
    }

    let guessed = lines
        .iter()
        .filter(|l| is_dialogue_line(l))
        .map(|l| l.split(',').count())
        .min()?;
    (guessed >= 2).then_some(guessed)
}

impl SsaDocument {
    /// Single-pass extraction with a resolved column count.
    ///
    /// Non-dialogue lines pass through unchanged. With caption stripping
    /// on, the stripped payload is written back into the originals buffer
    /// immediately — the sequential-cue path deliberately does not do this.
    pub fn extract(lines: &[String], column_count: usize, strip_captions: bool) -> Self {
        let mut originals = lines.to_vec();
        let mut fragments = Vec::new();
        let mut metas: Vec<Option<String>> = vec![None; originals.len()];

        for idx in 0..originals.len() {
            if !is_dialogue_line(&originals[idx]) {
                continue;
            }

            let fields: Vec<&str> = originals[idx].split(',').collect();
            if fields.len() < column_count {
                // malformed dialogue line; leave untouched
                continue;
            }
            let meta = fields[..column_count - 1].join(",");
            let mut payload = fields[column_count - 1..].join(",");

            if strip_captions && classifier::is_caption(payload.trim()) {
                payload = classifier::strip_caption(payload.trim());
                originals[idx] = format!("{},{}", meta, payload);
            }

            metas[idx] = Some(meta);

            if classifier::is_music(payload.trim_start()) {
                continue;
            }
            if !classifier::is_translatable(&payload, strip_captions) {
                continue;
            }

            let text = payload.replace(SSA_LINE_BREAK, LINE_SEPARATOR);
            fragments.push(TaggedFragment::new(idx, &text));
        }

        SsaDocument { originals, fragments, metas }
    }

    /// Meta prefix captured for a dialogue line, if any
    pub fn meta(&self, position: usize) -> Option<&str> {
        self.metas.get(position).and_then(|m| m.as_deref())
    }

    /// Writes translated batches back into the originals buffer,
    /// re-prepending the captured meta prefix and restoring the native
    /// `\N` line break escape.
    pub fn merge(&mut self, batches: &[String]) {
        for batch in batches {
            for tagged in batch.lines() {
                let Some((position, text)) = parse_tagged_line(tagged) else {
                    continue;
                };
                let Some(Some(meta)) = self.metas.get(position) else {
                    continue;
                };
                let restored = text.replace(LINE_SEPARATOR, SSA_LINE_BREAK);
                self.originals[position] = format!("{},{}", meta, restored.trim());
            }
        }
    }
}
