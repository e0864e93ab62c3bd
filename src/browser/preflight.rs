//! Target reachability probe
//!
//! WebDriver cannot report HTTP status codes, and some drivers
//! "navigate" to a browser error page. A plain GET before navigation turns
//! an unreachable origin or a non-success response into a navigation error.
//! An origin that accepts the connection but never answers is a timeout.

use std::time::Duration;

use crate::common::{Error, Result};

/// Probe `url` with a GET request
pub async fn probe(url: &str, limit: Duration) -> Result<()> {
    let client = reqwest::Client::builder()
        .timeout(limit)
        .build()
        .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {}", e)))?;

    tracing::debug!(url, "Probing target");

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            // A silent origin counts against the navigation deadline
            Error::timeout("goto", limit)
        } else if e.is_connect() {
            Error::navigation(url, "origin unreachable (connection failed)")
        } else {
            Error::navigation(url, e)
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::navigation(url, format!("server responded {}", status)));
    }

    tracing::debug!(url, %status, "Target reachable");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one canned HTTP response and return the origin URL
    async fn serve_once(status_line: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                    status_line
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn test_probe_success() {
        let url = serve_once("200 OK").await;
        probe(&url, Duration::from_secs(5)).await.unwrap();
    }

    #[tokio::test]
    async fn test_probe_non_success_status_is_navigation_error() {
        let url = serve_once("503 Service Unavailable").await;
        let err = probe(&url, Duration::from_secs(5)).await.unwrap_err();
        assert_eq!(err.kind(), "NavigationError");
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_probe_silent_origin_is_timeout_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let err = probe(&format!("http://{}/", addr), Duration::from_millis(200))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "TimeoutError");
        assert!(err.to_string().starts_with("goto timed out after 200 ms"));
    }

    #[tokio::test]
    async fn test_probe_unreachable_is_navigation_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let err = probe(&format!("http://127.0.0.1:{}/", port), Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Navigation { .. }));
    }
}
