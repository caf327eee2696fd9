use bytes::{Bytes, BytesMut};
use reqwest::Client;

use crate::error::AppError;

/// Fetches a workbook from a (signed) URL, refusing bodies over `max_size`.
///
/// The limit is enforced on the bytes actually received, so a missing or
/// understated `Content-Length` cannot push the body past it.
pub async fn load_file_from_url(url: &str, max_size: usize) -> Result<Bytes, AppError> {
    let client = Client::new();
    let mut response = client
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::DownloadError(format!("Failed to fetch file: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::DownloadError(format!(
            "Failed to fetch file. Status: {}",
            response.status()
        )));
    }

    if let Some(size) = response.content_length() {
        if size as usize > max_size {
            return Err(AppError::FileTooLarge { size: size as usize, max: max_size });
        }
    }

    let mut buf = BytesMut::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| AppError::DownloadError(format!("Failed to read response bytes: {}", e)))?
    {
        let size = buf.len() + chunk.len();
        if size > max_size {
            return Err(AppError::FileTooLarge { size, max: max_size });
        }
        buf.extend_from_slice(&chunk);
    }

    Ok(buf.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one response of `chunks` x 1024 bytes with chunked encoding and
    /// no `Content-Length`.
    async fn serve_chunked(chunks: usize) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;

            let mut response =
                b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n"
                    .to_vec();
            for _ in 0..chunks {
                response.extend_from_slice(b"400\r\n");
                response.extend_from_slice(&[b'x'; 1024]);
                response.extend_from_slice(b"\r\n");
            }
            response.extend_from_slice(b"0\r\n\r\n");
            let _ = socket.write_all(&response).await;
            let _ = socket.shutdown().await;
        });
        format!("http://{}/sheet.xlsx", addr)
    }

    #[tokio::test]
    async fn chunked_body_over_limit_is_refused() {
        let url = serve_chunked(4).await;
        let err = load_file_from_url(&url, 16).await.unwrap_err();
        assert!(matches!(err, AppError::FileTooLarge { max: 16, .. }), "{err:?}");
    }

    #[tokio::test]
    async fn chunked_body_within_limit_is_read() {
        let url = serve_chunked(4).await;
        let body = load_file_from_url(&url, 8192).await.unwrap();
        assert_eq!(body.len(), 4096);
    }
}
