/*!
 * Unit tests for the error type hierarchy
 */

use std::path::PathBuf;

use subtrans::errors::{AppError, ProviderError, SubtitleError};

#[test]
fn test_subtitle_error_display_shouldNameTheFile() {
    let err = SubtitleError::EmptyFile(PathBuf::from("a.srt"));
    assert_eq!(err.to_string(), "empty subtitle file: \"a.srt\"");

    let err = SubtitleError::UnreadableFile {
        path: PathBuf::from("b.srt"),
        reason: "no such file".to_string(),
    };
    assert_eq!(err.to_string(), "unreachable subtitle file \"b.srt\": no such file");

    let err = SubtitleError::SameLanguage("en".to_string());
    assert_eq!(
        err.to_string(),
        "file is already written in the destination language 'en'"
    );
}

#[test]
fn test_provider_error_display_shouldCarryStatus() {
    let err = ProviderError::ApiError {
        status_code: 429,
        message: "slow down".to_string(),
    };
    assert_eq!(err.to_string(), "API responded with error: 429 - slow down");
}

#[test]
fn test_app_error_shouldWrapDomainErrors() {
    let err = AppError::from(SubtitleError::EmptyFile(PathBuf::from("a.srt")));
    assert!(matches!(err, AppError::Subtitle(_)));
    assert_eq!(err.to_string(), "Subtitle error: empty subtitle file: \"a.srt\"");

    let err = AppError::from(ProviderError::ConnectionError("refused".to_string()));
    assert!(matches!(err, AppError::Provider(_)));
    assert_eq!(err.to_string(), "Provider error: Connection error: refused");
}

#[test]
fn test_app_error_fromAnyhow_shouldBecomeUnknown() {
    let err = AppError::from(anyhow::anyhow!("boom"));
    assert!(matches!(err, AppError::Unknown(_)));
    assert_eq!(err.to_string(), "Unknown error: boom");
}
