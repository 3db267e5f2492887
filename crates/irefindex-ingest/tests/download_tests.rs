//! Archive download and the download-then-convert path over HTTP

mod common;

use common::{mitab, RecordBuilder};
use irefindex_common::IrefError;
use irefindex_ingest::config::{ConvertConfig, FileSelection};
use irefindex_ingest::{download, pipeline};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

fn zip_bytes(member: &str, content: &str) -> Vec<u8> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("archive.zip");
    common::write_archive(&path, member, content);
    std::fs::read(&path).unwrap()
}

#[tokio::test]
async fn test_fetch_http() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/MITAB2.6/9606.mitab.03022013.txt.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"zipdata".to_vec()))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("9606.mitab.03022013.txt.zip");
    let bytes = download::fetch(
        &format!("{}/MITAB2.6", mock_server.uri()),
        "9606.mitab.03022013.txt.zip",
        &dest,
    )
    .await
    .unwrap();

    assert_eq!(bytes, 7);
    assert_eq!(std::fs::read(&dest).unwrap(), b"zipdata");
    assert!(!dir.path().join("9606.mitab.03022013.txt.zip.part").exists());
}

#[tokio::test]
async fn test_fetch_http_error_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("missing.zip");
    let err = download::fetch(&mock_server.uri(), "missing.zip", &dest)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("404"));
    assert!(matches!(
        err.downcast_ref::<IrefError>(),
        Some(IrefError::Network(_))
    ));
    assert!(!dest.exists());
    assert!(!dir.path().join("missing.zip.part").exists());
}

#[tokio::test]
async fn test_missing_archive_is_downloaded_then_converted() {
    let config_member = "Other.mitab.03022013.txt";
    let body = zip_bytes(config_member, &mitab(&[RecordBuilder::pairwise("d1")]));

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mitab/Other.mitab.03022013.txt.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = ConvertConfig::default()
        .with_files("other".parse::<FileSelection>().unwrap())
        .with_indir(dir.path().join("in"))
        .with_outdir(dir.path().join("out"))
        .with_gzip(false)
        .with_download_url(format!("{}/mitab/", mock_server.uri()));
    assert_eq!(config.member_name("other"), config_member);

    let summary = pipeline::run(&config).await.unwrap();
    assert!(config.archive_path("other").exists());
    assert_eq!(summary.totals.records, 1);

    // present now, so a second run converts without downloading
    pipeline::run(&config).await.unwrap();
}
