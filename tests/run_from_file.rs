//! Full runs driven by a target list on disk.

use std::io::Write;

use http_fanout::dispatch::StartupError;
use http_fanout::input::InputError;

mod common;

#[tokio::test]
async fn runs_target_list_from_file() {
    let backend = common::start_mock_backend("ok").await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"location":"{0}"}},{{"location":"http://other.com"}},{{"location":"::::not a url"}},{{"location":"{0}"}}]"#,
        backend.url()
    )
    .unwrap();

    let mut config = common::config_for(&backend.url());
    config.dispatch.input_path = file.path().display().to_string();

    let summary = http_fanout::run(&config).await.unwrap();

    assert_eq!(summary.delivered, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.invalid_url, 1);
    assert_eq!(backend.hits(), 2);
}

#[tokio::test]
async fn malformed_list_aborts_before_dispatch() {
    let backend = common::start_mock_backend("ok").await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"[{{"location": "{}"}}"#, backend.url()).unwrap();

    let mut config = common::config_for(&backend.url());
    config.dispatch.input_path = file.path().display().to_string();

    let err = http_fanout::run(&config).await.unwrap_err();

    assert!(matches!(err, StartupError::Input(InputError::Parse(_))));
    assert_eq!(backend.hits(), 0);
}
