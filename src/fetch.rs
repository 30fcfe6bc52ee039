use crate::error::LoadFailure;
use futures_util::StreamExt;
use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA};
use reqwest::Url;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where the catalog document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Http(Url),
    File(PathBuf),
}

impl CatalogSource {
    /// Resolve `path` against a base that is either an `http(s)://` URL, a
    /// `file://` URL or a plain directory.
    pub fn resolve(base: &str, path: &str) -> Result<Self, LoadFailure> {
        if base.starts_with("http://") || base.starts_with("https://") {
            let base = if base.ends_with('/') {
                base.to_string()
            } else {
                format!("{base}/")
            };
            let url = Url::parse(&base)
                .and_then(|u| u.join(path))
                .map_err(|e| LoadFailure::InvalidUrl(format!("{base}{path}: {e}")))?;
            Ok(CatalogSource::Http(url))
        } else {
            let dir = base.strip_prefix("file://").unwrap_or(base);
            Ok(CatalogSource::File(Path::new(dir).join(path)))
        }
    }

    pub fn location(&self) -> String {
        match self {
            CatalogSource::Http(url) => url.to_string(),
            CatalogSource::File(path) => path.display().to_string(),
        }
    }
}

/// Retrieve the raw catalog bytes, bypassing any HTTP cache.
///
/// `on_progress` receives the bytes read so far and the total when the
/// server announced one.
pub async fn fetch_catalog<F>(
    source: &CatalogSource,
    timeout: Duration,
    mut on_progress: F,
) -> Result<Vec<u8>, LoadFailure>
where
    F: FnMut(u64, Option<u64>),
{
    match source {
        CatalogSource::File(path) => {
            let bytes = tokio::fs::read(path).await.map_err(|source| LoadFailure::Io {
                path: path.clone(),
                source,
            })?;
            on_progress(bytes.len() as u64, Some(bytes.len() as u64));
            Ok(bytes)
        }
        CatalogSource::Http(url) => {
            let mut headers = HeaderMap::new();
            headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache, no-store"));
            headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

            let client = reqwest::Client::builder()
                .timeout(timeout)
                .default_headers(headers)
                .build()?;

            log::debug!("fetching catalog from {}", url);
            let response = client.get(url.clone()).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(LoadFailure::Status {
                    status: status.as_u16(),
                    location: url.to_string(),
                });
            }

            // the announced length only drives progress; the body grows as
            // chunks arrive
            let total = response.content_length();
            let mut body = Vec::new();
            let mut stream = response.bytes_stream();
            while let Some(chunk) = stream.next().await {
                let chunk = chunk?;
                body.extend_from_slice(&chunk);
                on_progress(body.len() as u64, total);
            }
            Ok(body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_http_adds_trailing_slash() {
        let src = CatalogSource::resolve("http://localhost:8000/site", "data/games.json").unwrap();
        assert_eq!(src.location(), "http://localhost:8000/site/data/games.json");
    }

    #[test]
    fn test_resolve_file_sources() {
        assert_eq!(
            CatalogSource::resolve("file:///srv/www", "data/games.json").unwrap(),
            CatalogSource::File(PathBuf::from("/srv/www/data/games.json"))
        );
        assert_eq!(
            CatalogSource::resolve("public", "data/games.json").unwrap(),
            CatalogSource::File(PathBuf::from("public/data/games.json"))
        );
    }

    #[tokio::test]
    async fn test_fetch_missing_file_is_io_failure() {
        let src = CatalogSource::File(PathBuf::from("/nonexistent/dir/games.json"));
        let err = fetch_catalog(&src, Duration::from_secs(1), |_, _| {}).await.unwrap_err();
        assert!(matches!(err, LoadFailure::Io { .. }));
    }
}
