use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use image::DynamicImage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Where the image comes from, as given on the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    Url(String),
    Path(PathBuf),
}

impl ImageSource {
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location.to_owned())
        } else if let Some(path) = location.strip_prefix("file://") {
            Self::Path(PathBuf::from(path))
        } else {
            Self::Path(PathBuf::from(location))
        }
    }

    fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        match self {
            Self::Url(url) => {
                let http = |source| LoadError::Http {
                    url: url.clone(),
                    source,
                };
                let resp = reqwest::blocking::get(url)
                    .and_then(|r| r.error_for_status())
                    .map_err(http)?;
                Ok(resp.bytes().map_err(http)?.to_vec())
            }
            Self::Path(path) => std::fs::read(path).map_err(|source| LoadError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    pub fn load(&self) -> Result<DynamicImage, LoadError> {
        let bytes = self.fetch()?;
        Ok(image::load_from_memory(&bytes)?)
    }
}

/// A load running on a worker thread. Dropping it discards the result.
pub struct PendingImage {
    source: ImageSource,
    rx: Receiver<Result<DynamicImage, LoadError>>,
}

impl PendingImage {
    /// Start loading `source`; `on_done` runs on the worker once the result
    /// has been handed over.
    pub fn spawn(source: ImageSource, on_done: impl FnOnce() + Send + 'static) -> Self {
        let (tx, rx) = mpsc::channel();
        let worker_source = source.clone();
        thread::spawn(move || {
            let result = worker_source.load();
            if tx.send(result).is_ok() {
                on_done();
            }
        });
        Self { source, rx }
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    /// `None` while the worker is still busy.
    pub fn poll(&self) -> Option<Result<DynamicImage, LoadError>> {
        self.rx.try_recv().ok()
    }
}
