/*!
 * Sequential-cue (SRT) parsing and reassembly.
 *
 * A cue is an index line, a timestamp line and one or more text lines,
 * terminated by a blank line. Index and timestamp lines pass through
 * untouched; the text lines of one cue are merged into a single tagged
 * fragment so a multi-line cue is translated as one unit.
 */

use crate::batch::{parse_tagged_line, LINE_SEPARATOR, TaggedFragment};
use crate::classifier;

/// One sequential-cue file split into untouched originals and the
/// translatable fragments extracted from them
#[derive(Debug)]
pub struct SrtDocument {
    /// Full line sequence of the source file, mutated in place on merge
    pub originals: Vec<String>,
    /// Tagged dialogue fragments in file order
    pub fragments: Vec<TaggedFragment>,
}

impl SrtDocument {
    /// Walks the raw lines and extracts dialogue fragments.
    ///
    /// Caption stripping only decides what gets translated here; the
    /// originals buffer is never mutated at parse time (unlike the
    /// styled-dialogue path, which writes stripped captions back).
    pub fn parse(lines: &[String], strip_captions: bool) -> Self {
        let originals = lines.to_vec();
        let mut fragments = Vec::new();

        let mut accumulator: Vec<String> = Vec::new();
        let mut cue_position = 0usize;

        let mut flush = |acc: &mut Vec<String>, position: usize, out: &mut Vec<TaggedFragment>| {
            if !acc.is_empty() {
                out.push(TaggedFragment::new(position, &acc.join(LINE_SEPARATOR)));
                acc.clear();
            }
        };

        for (idx, line) in originals.iter().enumerate() {
            if classifier::is_index(line) || classifier::is_timestamp(line) {
                continue;
            }
            if classifier::is_blank(line) {
                flush(&mut accumulator, cue_position, &mut fragments);
                continue;
            }
            if !classifier::is_translatable(line, strip_captions) {
                continue;
            }
            if accumulator.is_empty() {
                cue_position = idx;
            }
            accumulator.push(line.trim().to_string());
        }
        flush(&mut accumulator, cue_position, &mut fragments);

        SrtDocument { originals, fragments }
    }

    /// Writes translated batches back into the originals buffer.
    ///
    /// Batches arrive in no particular order; each tagged line names the
    /// slot it belongs to. A fragment carrying the internal separator is
    /// split back into its original physical lines at consecutive indices.
    /// Mismatched piece counts are aligned best-effort: out-of-range
    /// pieces are dropped, untranslated slots keep their original text.
    pub fn merge(&mut self, batches: &[String]) {
        for batch in batches {
            for tagged in batch.lines() {
                let Some((position, text)) = parse_tagged_line(tagged) else {
                    continue;
                };
                for (offset, piece) in text.split(LINE_SEPARATOR).enumerate() {
                    if let Some(slot) = self.originals.get_mut(position + offset) {
                        *slot = piece.trim().to_string();
                    }
                }
            }
        }
    }
}
