//! Puzzle sources - where new puzzles come from.
//!
//! [`HttpPuzzleSource`] asks the generation service; [`FilePuzzleSource`] reads
//! a saved response from disk. Both yield fully validated puzzles.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::time::Duration;

use anyhow::Context;
use tracing::{debug, info, warn};

use crate::core::{LoadError, Puzzle};
use crate::protocol::{parse_response, GenerateRequest};

/// Future returned by [`PuzzleSource::fetch`].
pub type PuzzleFuture = Pin<Box<dyn Future<Output = Result<Puzzle, LoadError>> + Send + 'static>>;

/// Anything that can produce a puzzle for a generation request.
pub trait PuzzleSource: Send + Sync {
    fn fetch(&self, request: GenerateRequest) -> PuzzleFuture;

    /// Short description for logs and the status line.
    fn describe(&self) -> String;
}

/// Generation service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPuzzleSource {
    url: String,
    client: reqwest::Client,
}

impl HttpPuzzleSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

impl PuzzleSource for HttpPuzzleSource {
    fn fetch(&self, request: GenerateRequest) -> PuzzleFuture {
        let client = self.client.clone();
        let url = self.url.clone();
        Box::pin(async move {
            let request = request.normalized();
            info!(
                url = %url,
                theme = %request.theme,
                size = request.size,
                word_count = request.word_count,
                "requesting puzzle"
            );

            let response = client.post(&url).json(&request).send().await.map_err(|e| {
                warn!(error = %e, url = %url, "puzzle request failed");
                LoadError::request(e.to_string())
            })?;

            let status = response.status();
            if !status.is_success() {
                warn!(status = %status, "puzzle service returned an error");
                return Err(LoadError::request(format!("service returned {status}")));
            }

            let body = response
                .text()
                .await
                .map_err(|e| LoadError::request(format!("failed to read response: {e}")))?;
            debug!(bytes = body.len(), "puzzle response received");
            parse_response(&body)
        })
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// A saved generation response on disk. The request is ignored.
#[derive(Debug, Clone)]
pub struct FilePuzzleSource {
    path: PathBuf,
}

impl FilePuzzleSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PuzzleSource for FilePuzzleSource {
    fn fetch(&self, _request: GenerateRequest) -> PuzzleFuture {
        let path = self.path.clone();
        Box::pin(async move {
            info!(path = %path.display(), "loading puzzle file");
            let body = tokio::fs::read_to_string(&path).await.map_err(|e| {
                LoadError::request(format!("cannot read {}: {e}", path.display()))
            })?;
            parse_response(&body)
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    const CAT_TAN: &str = r#"{"size":3,"grid":[["C","A","T"],["","","A"],["","","N"]],"placements":[{"row":0,"col":0,"dir":"across","length":3,"word":"CAT","clue":"feline"},{"row":0,"col":2,"dir":"down","length":3,"word":"TAN","clue":"color"}]}"#;

    async fn read_request_body(sock: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = sock.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(head_end) = text.find("\r\n\r\n") {
                let len = text[..head_end]
                    .lines()
                    .find_map(|l| {
                        l.to_ascii_lowercase()
                            .strip_prefix("content-length:")
                            .map(|v| v.trim().parse::<usize>().unwrap())
                    })
                    .unwrap_or(0);
                if buf.len() >= head_end + 4 + len {
                    break;
                }
            }
        }
        let text = String::from_utf8_lossy(&buf).into_owned();
        text.split_once("\r\n\r\n")
            .map(|(_, body)| body.to_string())
            .unwrap_or_default()
    }

    /// One-shot HTTP server. Resolves to the request body it received.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let task = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let request = read_request_body(&mut sock).await;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            sock.write_all(response.as_bytes()).await.unwrap();
            let _ = sock.shutdown().await;
            request
        });
        (format!("http://{addr}/api/new_crossword"), task)
    }

    #[tokio::test]
    async fn test_http_source_posts_normalized_request() {
        let (url, server) = serve_once("200 OK", CAT_TAN).await;
        let source = HttpPuzzleSource::new(url, Duration::from_secs(5)).unwrap();

        let puzzle = source
            .fetch(GenerateRequest::new("cats", 3, 99))
            .await
            .unwrap();
        assert_eq!(puzzle.placements().len(), 2);

        let body: serde_json::Value = serde_json::from_str(&server.await.unwrap()).unwrap();
        assert_eq!(body["theme"], "cats");
        assert_eq!(body["size"], 5);
        assert_eq!(body["wordCount"], 6);
    }

    #[tokio::test]
    async fn test_http_error_status_is_request_error() {
        let (url, _server) = serve_once("500 Internal Server Error", r#"{"detail":"boom"}"#).await;
        let source = HttpPuzzleSource::new(url, Duration::from_secs(5)).unwrap();
        let err = source.fetch(GenerateRequest::default()).await.unwrap_err();
        assert!(matches!(err, LoadError::Request { .. }));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_http_malformed_body() {
        let (url, _server) = serve_once("200 OK", r#"{"grid":"nope"}"#).await;
        let source = HttpPuzzleSource::new(url, Duration::from_secs(5)).unwrap();
        let err = source.fetch(GenerateRequest::default()).await.unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let source =
            HttpPuzzleSource::new(format!("http://{addr}/api"), Duration::from_secs(5)).unwrap();
        let err = source.fetch(GenerateRequest::default()).await.unwrap_err();
        assert!(matches!(err, LoadError::Request { .. }));
    }

    #[test]
    fn test_file_source() {
        let path = std::env::temp_dir().join(format!("crossword-source-{}.json", std::process::id()));
        std::fs::write(&path, CAT_TAN).unwrap();
        let source = FilePuzzleSource::new(&path);
        assert!(source.describe().ends_with(".json"));

        let puzzle = tokio_test::block_on(source.fetch(GenerateRequest::default())).unwrap();
        assert_eq!(puzzle.rows(), 3);
        std::fs::remove_file(&path).unwrap();

        let missing = tokio_test::block_on(source.fetch(GenerateRequest::default()));
        assert!(matches!(missing, Err(LoadError::Request { .. })));
    }
}
