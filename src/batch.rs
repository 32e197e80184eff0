/*!
 * Positional tagging and size-bounded batch packing.
 *
 * Translatable fragments cross the translation boundary as plain text in
 * the form `<position>;<text>`, one tagged line per fragment, joined by a
 * line break. The tag is what restores ordering after the concurrent
 * dispatch: result order is never relied upon.
 */

use log::debug;

/// Maximum serialized characters per translation call
pub const BATCH_CHAR_LIMIT: usize = 5_000;

/// Separator standing in for a physical line break inside one fragment.
/// Distinct from the `\n` used to join tagged lines within a batch.
pub const LINE_SEPARATOR: &str = " /// ";

/// Sentinel prefix of the trailing marker line of translated files
pub const TRANSLATED_MARKER: &str = "meta=translated";

/// One translatable unit tied back to the line it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedFragment {
    /// Zero-based index of the fragment's first physical line in the
    /// originals buffer
    pub position: usize,
    /// Normalized text; multi-line cues are joined with [`LINE_SEPARATOR`]
    pub text: String,
}

impl TaggedFragment {
    /// Creates a fragment after normalizing the delimiter: any literal `;`
    /// in dialogue becomes `,` so the first `;` of the serialized form is
    /// always the id/text boundary.
    pub fn new(position: usize, text: &str) -> Self {
        TaggedFragment {
            position,
            text: text.replace(';', ",").trim().to_string(),
        }
    }

    /// Serialized wire form sent to the translation backend
    pub fn serialize(&self) -> String {
        format!("{};{}", self.position, self.text)
    }
}

/// Splits a translated tagged line back into `(position, text)`.
///
/// Returns `None` for lines that do not carry a parsable integer id;
/// callers skip those defensively.
pub fn parse_tagged_line(line: &str) -> Option<(usize, &str)> {
    let (id, text) = line.split_once(';')?;
    let position = id.trim().parse::<usize>().ok()?;
    Some((position, text.trim()))
}

/// Greedily packs fragments into batches bounded by `limit` characters.
///
/// A fragment whose serialized form would push the running batch to or
/// over the limit closes the batch and opens a new one. A single fragment
/// larger than the limit still becomes its own batch: fragments are never
/// dropped or split. Empty trailing batches are discarded rather than
/// dispatched.
pub fn pack(fragments: &[TaggedFragment], limit: usize) -> Vec<String> {
    let mut batches: Vec<String> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_len = 0usize;

    for fragment in fragments {
        if fragment.text.is_empty() {
            continue;
        }
        let line = fragment.serialize();
        if !current.is_empty() && current_len + line.len() >= limit {
            batches.push(current.join("\n"));
            current.clear();
            current_len = 0;
        }
        current_len += line.len() + 1;
        current.push(line);
    }

    if !current.is_empty() {
        batches.push(current.join("\n"));
    }

    debug!("packed {} fragments into {} batches", fragments.len(), batches.len());
    batches
}
