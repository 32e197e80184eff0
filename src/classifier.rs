use once_cell::sync::Lazy;
use regex::Regex;

// @module: Line classification for subtitle files

/// Glyph marking song lyrics in closed-caption subtitles
pub const MUSIC_NOTE: char = '♪';

// @const: Bracketed caption span regex
static CAPTION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.*?\]").unwrap());

/// Returns true for empty lines or lines made of bare CR/LF
pub fn is_blank(line: &str) -> bool {
    line.is_empty() || line == "\n" || line == "\r" || line == "\r\n"
}

/// Returns true when the entire line parses as an integer (a cue index)
pub fn is_index(line: &str) -> bool {
    !line.is_empty() && line.parse::<i64>().is_ok()
}

/// Returns true when the first two characters are ASCII digits.
///
/// This is the sequential-cue heuristic for `HH:MM:SS,mmm --> HH:MM:SS,mmm`
/// lines; no full timestamp grammar is needed because no dialogue line in
/// that format starts with two digits.
pub fn is_timestamp(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_digit() && bytes[1].is_ascii_digit()
}

/// Returns true for closed-caption marker lines, i.e. lines wrapped in
/// square brackets such as `[door slams]`
pub fn is_caption(line: &str) -> bool {
    line.starts_with('[') && line.ends_with(']')
}

/// Returns true for song-lyric lines prefixed with the music-note glyph.
/// Music lines are never stripped and never translated.
pub fn is_music(line: &str) -> bool {
    line.starts_with(MUSIC_NOTE)
}

/// Decides whether a line carries translatable dialogue.
///
/// Blank, index, timestamp and music lines are structural and never
/// translated. Caption markers are excluded only when `strip_captions`
/// is enabled.
pub fn is_translatable(line: &str, strip_captions: bool) -> bool {
    let structural = is_blank(line) || is_timestamp(line) || is_index(line) || is_music(line);
    if structural {
        return false;
    }
    if strip_captions {
        return !is_caption(line);
    }
    true
}

/// Removes bracketed caption spans from a caption marker line.
///
/// Lines that are not caption markers are returned unchanged, so partial
/// markers embedded in dialogue (`[sigh] Hello`) survive intact.
pub fn strip_caption(line: &str) -> String {
    if !is_caption(line) {
        return line.to_string();
    }
    CAPTION_REGEX.replace_all(line, "").trim().to_string()
}
