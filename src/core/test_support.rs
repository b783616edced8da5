// ─── Test Support ───
// A tiny HTTP/1.1 server on 127.0.0.1 serving fixed bodies per path.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Ok(Vec<u8>),
    /// Announce `declared` bytes, send `body`, then hang up.
    Truncated { declared: usize, body: Vec<u8> },
}

pub(crate) struct FixtureServer {
    listener: TcpListener,
    base: String,
}

impl FixtureServer {
    pub(crate) async fn bind() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        Self { listener, base }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Start answering requests in the background. Unknown paths get a 404.
    pub(crate) fn serve(self, routes: Vec<(String, Reply)>) -> String {
        let routes: Arc<HashMap<String, Reply>> = Arc::new(routes.into_iter().collect());
        let listener = self.listener;

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = Arc::clone(&routes);
                tokio::spawn(async move {
                    let _ = answer(stream, &routes).await;
                });
            }
        });

        self.base
    }
}

/// Client that never goes through an environment proxy.
pub(crate) fn local_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

async fn answer(mut stream: TcpStream, routes: &HashMap<String, Reply>) -> std::io::Result<()> {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            return Ok(());
        }
        request.extend_from_slice(&buf[..n]);
    }

    let head = String::from_utf8_lossy(&request);
    let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();

    let (status, declared, body) = match routes.get(&path) {
        Some(Reply::Ok(body)) => ("200 OK", body.len(), body.clone()),
        Some(Reply::Truncated { declared, body }) => ("200 OK", *declared, body.clone()),
        None => ("404 Not Found", 0, Vec::new()),
    };

    let header = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status, declared
    );
    stream.write_all(header.as_bytes()).await?;
    stream.write_all(&body).await?;
    stream.flush().await?;
    stream.shutdown().await
}
