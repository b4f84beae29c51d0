#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use zip::write::SimpleFileOptions;

use docdelta::application::ports::{FileLoader, LlmClient};
use docdelta::application::services::{
    AnalysisService, ComparisonService, GenerationSettings, PromptBuilder, UploadPolicy,
};
use docdelta::domain::{Document, FileFormat};
use docdelta::presentation::{AppState, Settings, create_router};

pub const BOUNDARY: &str = "docdelta-test-boundary";

pub const SAMPLE_PDF: &[u8] = include_bytes!("../fixtures/sample.pdf");
pub const BLANK_PAGE_PDF: &[u8] = include_bytes!("../fixtures/blank_page.pdf");

/// Hand-assembled `multipart/form-data` request body.
#[derive(Default)]
pub struct MultipartBody {
    bytes: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, name: &str, filename: &str, data: &[u8]) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.bytes.extend_from_slice(data);
        self.bytes.extend_from_slice(b"\r\n");
        self
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn into_request(mut self, uri: &str) -> Request<Body> {
        self.bytes
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(self.bytes))
            .unwrap()
    }
}

pub fn document(filename: &str, format: FileFormat, data: &[u8]) -> Document {
    Document::new(filename.to_string(), format, data.len() as u64)
}

/// Wraps `body` (the contents of `<w:body>`) in a minimal `.docx` package.
pub fn docx_with_body(body: &str) -> Vec<u8> {
    let document_xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    writer.start_file("[Content_Types].xml", options).unwrap();
    writer
        .write_all(
            br#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#,
        )
        .unwrap();
    writer.start_file("word/document.xml", options).unwrap();
    writer.write_all(document_xml.as_bytes()).unwrap();

    writer.finish().unwrap().into_inner()
}

pub fn paragraph(text: &str) -> String {
    format!("<w:p><w:r><w:t>{text}</w:t></w:r></w:p>")
}

pub fn create_test_state<F, L>(
    file_loader: Arc<F>,
    llm_client: Option<Arc<L>>,
    policy: UploadPolicy,
) -> AppState<F, L>
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    let analysis_service = Arc::new(AnalysisService::new(
        llm_client,
        GenerationSettings::default(),
    ));
    let comparison_service = Arc::new(ComparisonService::new(
        file_loader,
        Arc::clone(&analysis_service),
        PromptBuilder::default(),
        policy,
    ));

    AppState {
        comparison_service,
        analysis_service,
        settings: Arc::new(Settings::default()),
    }
}

pub fn create_test_app<F, L>(file_loader: Arc<F>, llm_client: Option<Arc<L>>) -> Router
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    create_router(create_test_state(
        file_loader,
        llm_client,
        UploadPolicy::default(),
    ))
}

pub async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
