/*!
 * Unit tests for file and path utilities
 */

use std::path::Path;

use subtrans::file_utils::FileManager;

use crate::common;

#[test]
fn test_output_path_shouldInsertDestinationLanguage() {
    let out = FileManager::output_path(Path::new("/subs/movie.srt"), "fr", None);
    assert_eq!(out, Path::new("/subs/movie.fr.srt"));
}

#[test]
fn test_output_path_withLanguageSuffixedInput_shouldReplaceSuffix() {
    let out = FileManager::output_path(Path::new("/subs/movie.pt.srt"), "fr", None);
    assert_eq!(out, Path::new("/subs/movie.fr.srt"));
}

#[test]
fn test_output_path_withDottedName_shouldKeepNonLanguageSuffix() {
    let out = FileManager::output_path(Path::new("/subs/dr.who.srt"), "fr", None);
    assert_eq!(out, Path::new("/subs/dr.who.fr.srt"));
}

#[test]
fn test_output_path_withOutputDir_shouldRedirect() {
    let out = FileManager::output_path(Path::new("/subs/movie.srt"), "es", Some(Path::new("/out")));
    assert_eq!(out, Path::new("/out/movie.es.srt"));
}

#[test]
fn test_is_translated_filename_shouldMatchLanguageSuffix() {
    assert!(FileManager::is_translated_filename("movie.fr.srt", "fr"));
    assert!(!FileManager::is_translated_filename("movie.srt", "fr"));
    assert!(!FileManager::is_translated_filename("movie.fr.srt", "es"));
}

#[test]
fn test_extension_with_dot_shouldLowercase() {
    assert_eq!(FileManager::extension_with_dot("MOVIE.SRT"), ".srt");
    assert_eq!(FileManager::extension_with_dot("clip.ass"), ".ass");
    assert_eq!(FileManager::extension_with_dot("no_extension"), "");
}

#[test]
fn test_read_lines_shouldStripBomAndTrim() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "bom.srt", "\u{feff}1\r\n  hello  \r\n").unwrap();

    let lines = FileManager::read_lines(&path).unwrap();
    assert_eq!(lines, vec!["1".to_string(), "hello".to_string()]);
}

#[test]
fn test_write_lines_shouldCreateParentDirs() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("nested/deeper/out.srt");

    FileManager::write_lines(&path, &["a".to_string(), "b".to_string()]).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\nb\n");
}

#[test]
fn test_find_subtitle_files_shouldSkipTranslatedAndForeign() {
    let dir = common::create_temp_dir().unwrap();
    common::create_test_file(dir.path(), "a.srt", "1\n").unwrap();
    common::create_test_file(dir.path(), "b.ass", "x\n").unwrap();
    common::create_test_file(dir.path(), "a.fr.srt", "1\n").unwrap();
    common::create_test_file(dir.path(), "notes.txt", "n\n").unwrap();

    let mut found = FileManager::find_subtitle_files(dir.path(), "fr").unwrap();
    found.sort();

    let names: Vec<String> = found
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .collect();
    assert_eq!(names, vec!["a.srt".to_string(), "b.ass".to_string()]);
}
