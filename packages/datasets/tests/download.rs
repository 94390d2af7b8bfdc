//! Integration tests for the dataset download helper.

use std::sync::Mutex;

use aigis_api::{ApiClient, ApiConfig};
use aigis_datasets::{CSV_CONTENT_TYPE, FileSaver, Notifier, download_dataset, find};
use aigis_mock_backend::MockBackend;

#[derive(Default)]
struct RecordingSaver {
    saved: Mutex<Vec<(String, String, Vec<u8>)>>,
    fail: bool,
}

impl RecordingSaver {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn saved(&self) -> Vec<(String, String, Vec<u8>)> {
        self.saved.lock().unwrap().clone()
    }
}

impl FileSaver for RecordingSaver {
    fn save(&self, file_name: &str, content_type: &str, contents: &[u8]) -> std::io::Result<()> {
        if self.fail {
            return Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            ));
        }
        self.saved.lock().unwrap().push((
            file_name.to_string(),
            content_type.to_string(),
            contents.to_vec(),
        ));
        Ok(())
    }
}

#[derive(Default)]
struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

fn client_for(backend: &MockBackend) -> ApiClient {
    ApiClient::new(&ApiConfig::new(&backend.base_url()).unwrap())
}

const CSV: &str = "Well ID,STATE,pH\nW-1,Tamil Nadu,7.4\nW-2,Kerala,6.9\n";

#[actix_rt::test]
async fn downloads_and_saves_csv() {
    let backend = MockBackend::builder()
        .post("/get_dataset", 200, "\"blobs/gwq.csv\"")
        .get("/blobs/gwq.csv", 200, CSV)
        .start()
        .unwrap();
    let saver = RecordingSaver::default();
    let notifier = RecordingNotifier::default();
    let dataset = find("gwq").unwrap();

    let saved = download_dataset(&client_for(&backend), dataset, &saver, &notifier).await;

    assert_eq!(saved.as_deref(), Some("ground-water-quality-dataset.csv"));
    assert!(notifier.alerts().is_empty());

    let files = saver.saved();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].0, "ground-water-quality-dataset.csv");
    assert_eq!(files[0].1, CSV_CONTENT_TYPE);
    assert_eq!(files[0].2, CSV.as_bytes());

    let lookups = backend.requests_to("/get_dataset");
    assert_eq!(lookups.len(), 1);
    assert_eq!(lookups[0].body, r#"{"id":"gwq"}"#);
}

#[actix_rt::test]
async fn missing_blob_notifies_once_and_does_not_propagate() {
    let backend = MockBackend::builder()
        .post("/get_dataset", 200, "\"blobs/gwr.csv\"")
        .start()
        .unwrap();
    let saver = RecordingSaver::default();
    let notifier = RecordingNotifier::default();
    let dataset = find("gwr").unwrap();

    let saved = download_dataset(&client_for(&backend), dataset, &saver, &notifier).await;

    assert!(saved.is_none());
    assert!(saver.saved().is_empty());
    assert_eq!(
        notifier.alerts(),
        vec!["Failed to download Ground Water Resource Dataset. Please try again."]
    );
    assert_eq!(backend.requests_to("/blobs/gwr.csv").len(), 1);
}

#[actix_rt::test]
async fn api_failure_notifies_once() {
    let backend = MockBackend::builder()
        .post("/get_dataset", 500, "storage account unavailable")
        .start()
        .unwrap();
    let saver = RecordingSaver::default();
    let notifier = RecordingNotifier::default();

    let saved = download_dataset(
        &client_for(&backend),
        find("gwq").unwrap(),
        &saver,
        &notifier,
    )
    .await;

    assert!(saved.is_none());
    assert_eq!(notifier.alerts().len(), 1);
    assert!(backend.requests_to("/blobs/gwq.csv").is_empty());
}

#[actix_rt::test]
async fn save_failure_notifies_once() {
    let backend = MockBackend::builder()
        .post("/get_dataset", 200, "\"blobs/gwq.csv\"")
        .get("/blobs/gwq.csv", 200, CSV)
        .start()
        .unwrap();
    let saver = RecordingSaver::failing();
    let notifier = RecordingNotifier::default();

    let saved = download_dataset(
        &client_for(&backend),
        find("gwq").unwrap(),
        &saver,
        &notifier,
    )
    .await;

    assert!(saved.is_none());
    assert_eq!(
        notifier.alerts(),
        vec!["Failed to download Ground Water Quality Dataset. Please try again."]
    );
}
