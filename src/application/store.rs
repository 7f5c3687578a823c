//! In-memory post store, populated once from the static feed.

use std::{fmt, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::domain::posts::Post;

pub const DEFAULT_FEED_LOCATION: &str = "posts.json";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read feed `{location}`: {source}")]
    Read {
        location: String,
        source: std::io::Error,
    },
    #[error("failed to fetch feed `{location}`: {source}")]
    Fetch {
        location: String,
        source: reqwest::Error,
    },
    #[error("feed `{location}` is not a valid post list: {source}")]
    Payload {
        location: String,
        source: serde_json::Error,
    },
}

/// Where the raw feed bytes come from.
#[async_trait]
pub trait PostSource: Send + Sync {
    fn location(&self) -> String;

    async fn fetch(&self) -> Result<Vec<u8>, LoadError>;
}

#[derive(Debug, Clone)]
pub struct FilePostSource {
    path: PathBuf,
}

impl FilePostSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PostSource for FilePostSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|source| LoadError::Read {
                location: self.location(),
                source,
            })
    }
}

#[derive(Debug, Clone)]
pub struct HttpPostSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpPostSource {
    pub fn new(url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl PostSource for HttpPostSource {
    fn location(&self) -> String {
        self.url.to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        let fetch_error = |source| LoadError::Fetch {
            location: self.location(),
            source,
        };

        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(fetch_error)?;
        let bytes = response.bytes().await.map_err(fetch_error)?;
        Ok(bytes.to_vec())
    }
}

/// A configured feed location, resolved to either a local file or a remote URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedLocation {
    File(PathBuf),
    Remote(Url),
}

impl FeedLocation {
    /// Absolute `http(s)` and `file` URLs are taken as-is. Anything else is a
    /// relative reference, joined onto `base` when one is configured and read
    /// from disk otherwise.
    pub fn resolve(location: &str, base: Option<&Url>) -> Result<Self, String> {
        let location = location.trim();
        if location.is_empty() {
            return Err("feed location must not be empty".to_string());
        }

        if let Ok(url) = Url::parse(location) {
            match url.scheme() {
                "http" | "https" => return Ok(FeedLocation::Remote(url)),
                "file" => {
                    return url
                        .to_file_path()
                        .map(FeedLocation::File)
                        .map_err(|_| format!("`{location}` is not a local file URL"));
                }
                _ => {}
            }
        }

        match base {
            Some(base) => base
                .join(location)
                .map(FeedLocation::Remote)
                .map_err(|err| format!("cannot join `{location}` onto `{base}`: {err}")),
            None => Ok(FeedLocation::File(PathBuf::from(location))),
        }
    }

    pub fn source(&self) -> Box<dyn PostSource> {
        match self {
            FeedLocation::File(path) => Box::new(FilePostSource::new(path.clone())),
            FeedLocation::Remote(url) => Box::new(HttpPostSource::new(url.clone())),
        }
    }
}

impl fmt::Display for FeedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedLocation::File(path) => write!(f, "{}", path.display()),
            FeedLocation::Remote(url) => write!(f, "{url}"),
        }
    }
}

/// Posts fetched at startup. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct PostStore {
    posts: Arc<[Post]>,
}

impl PostStore {
    pub async fn load(source: &dyn PostSource) -> Result<Self, LoadError> {
        let location = source.location();
        debug!(target = "blogview::store", %location, "fetching post feed");

        let bytes = source.fetch().await?;
        let posts: Vec<Post> =
            serde_json::from_slice(&bytes).map_err(|source| LoadError::Payload {
                location: location.clone(),
                source,
            })?;

        info!(
            target = "blogview::store",
            %location,
            posts = posts.len(),
            "loaded post feed"
        );
        Ok(Self::from_posts(posts))
    }

    pub fn from_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: posts.into(),
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_plain_paths_to_files() {
        let location = FeedLocation::resolve("posts.json", None).expect("file location");
        assert_eq!(location, FeedLocation::File(PathBuf::from("posts.json")));
    }

    #[test]
    fn resolves_absolute_urls_to_remote() {
        let location =
            FeedLocation::resolve("https://example.com/posts.json", None).expect("remote location");
        assert_eq!(
            location,
            FeedLocation::Remote(Url::parse("https://example.com/posts.json").expect("url"))
        );
    }

    #[test]
    fn joins_relative_locations_onto_base() {
        let base = Url::parse("https://example.com/blog/index.html").expect("base");
        let location = FeedLocation::resolve("./posts.json", Some(&base)).expect("joined");
        assert_eq!(location.to_string(), "https://example.com/blog/posts.json");
    }

    #[test]
    fn rejects_empty_location() {
        assert!(FeedLocation::resolve("  ", None).is_err());
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let source = FilePostSource::new("/nonexistent/blogview/posts.json");
        let err = PostStore::load(&source).await.expect_err("missing file");
        assert!(matches!(err, LoadError::Read { .. }));
    }
}
