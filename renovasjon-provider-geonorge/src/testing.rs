//! Single-request HTTP server with a canned JSON answer, for exercising ports end to end.

use reqwest::Client;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub(crate) const OK: &str = "200 OK";
pub(crate) const SERVER_ERROR: &str = "500 Internal Server Error";

/// Client that ignores proxy settings from the environment.
pub(crate) fn client() -> Client {
    Client::builder().no_proxy().build().expect("client builds")
}

/// Answers exactly one request on a local port, then closes the connection.
pub(crate) struct CannedServer {
    base: String,
    request: JoinHandle<String>,
}

impl CannedServer {
    pub(crate) async fn start(status: &'static str, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind local port");
        let base = format!("http://{}", listener.local_addr().expect("local address"));

        let request = tokio::spawn(async move {
            let (mut stream, _peer) = listener.accept().await.expect("client connects");

            let mut head = Vec::new();
            let mut chunk = [0_u8; 1024];
            while !head.windows(4).any(|window| window == b"\r\n\r\n") {
                let read = stream.read(&mut chunk).await.expect("read request");
                if read == 0 {
                    break;
                }
                head.extend_from_slice(chunk.get(..read).unwrap_or_default());
            }

            let response = format!(
                "HTTP/1.1 {status}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\
                 \r\n\
                 {body}",
                body.len()
            );
            stream
                .write_all(response.as_bytes())
                .await
                .expect("write response");

            String::from_utf8_lossy(&head).to_lowercase()
        });

        Self { base, request }
    }

    /// Absolute URL of `path` on this server.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// Request line and headers as received, lowercased.
    pub(crate) async fn received(self) -> String {
        self.request.await.expect("server task finishes")
    }
}
