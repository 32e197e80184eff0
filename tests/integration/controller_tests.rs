/*!
 * Tests for the file/directory orchestration layer
 */

use std::sync::Arc;

use subtrans::app_config::Config;
use subtrans::app_controller::Controller;
use subtrans::providers::mock::MockBackend;

use crate::common;

fn test_config() -> Config {
    Config {
        target_language: "fr".to_string(),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_run_withSingleFile_shouldTranslateIt() {
    let dir = common::create_temp_dir().unwrap();
    let input =
        common::create_test_file(dir.path(), "movie.srt", common::sample_srt_content()).unwrap();

    let controller = Controller::new(test_config(), Arc::new(MockBackend::uppercasing()));
    controller.run(&input).await.unwrap();

    assert!(dir.path().join("movie.fr.srt").exists());
}

#[tokio::test]
async fn test_run_withDirectory_shouldTranslateEveryFile() {
    let dir = common::create_temp_dir().unwrap();
    common::create_test_file(dir.path(), "one.srt", common::sample_srt_content()).unwrap();
    common::create_test_file(dir.path(), "two.ass", common::sample_ssa_content()).unwrap();
    common::create_test_file(dir.path(), "skip.txt", "not a subtitle\n").unwrap();

    let controller = Controller::new(test_config(), Arc::new(MockBackend::uppercasing()));
    controller.run(dir.path()).await.unwrap();

    assert!(dir.path().join("one.fr.srt").exists());
    assert!(dir.path().join("two.fr.ass").exists());
    assert!(!dir.path().join("skip.fr.txt").exists());
}

#[tokio::test]
async fn test_run_withAlreadyTranslatedFile_shouldSkipWithoutFailing() {
    let dir = common::create_temp_dir().unwrap();
    let mut marked = common::sample_srt_content().to_string();
    marked.push_str("\nmeta=translated;en\n");
    common::create_test_file(dir.path(), "done.srt", &marked).unwrap();

    let controller = Controller::new(test_config(), Arc::new(MockBackend::uppercasing()));
    // a skip is not a failure, the run reports success
    controller.run(dir.path()).await.unwrap();
    assert!(!dir.path().join("done.fr.srt").exists());
}

#[tokio::test]
async fn test_run_withMissingPath_shouldFail() {
    let controller = Controller::new(test_config(), Arc::new(MockBackend::uppercasing()));
    assert!(controller.run("/no/such/path").await.is_err());
}

#[tokio::test]
async fn test_run_withEmptyDirectory_shouldSucceedDoingNothing() {
    let dir = common::create_temp_dir().unwrap();
    let controller = Controller::new(test_config(), Arc::new(MockBackend::uppercasing()));
    controller.run(dir.path()).await.unwrap();
}
