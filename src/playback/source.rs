use std::collections::BTreeMap;
use std::sync::Arc;

use crate::foundation::error::{TourError, TourResult};

#[derive(Clone, Debug, PartialEq)]
/// Where the video comes from.
pub enum VideoSource {
    /// A URL the playback surface can load directly.
    Url(String),
    /// In-memory media bytes; playable only through a handle minted by a [`SourceProvider`].
    Blob(Arc<[u8]>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A playable reference to a video source.
pub struct SourceHandle {
    url: String,
    owned: bool,
}

impl SourceHandle {
    /// URL handed to the playback surface.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// `true` when the handle was minted for a blob and must be released.
    pub fn is_owned(&self) -> bool {
        self.owned
    }
}

/// Turns [`VideoSource`]s into playable handles and releases the ones it minted.
pub trait SourceProvider {
    /// Produce a playable handle for `source`.
    fn acquire(&mut self, source: &VideoSource) -> TourResult<SourceHandle>;

    /// Release a handle previously returned by [`SourceProvider::acquire`].
    fn release(&mut self, handle: SourceHandle);
}

impl<P: SourceProvider + ?Sized> SourceProvider for &mut P {
    fn acquire(&mut self, source: &VideoSource) -> TourResult<SourceHandle> {
        (**self).acquire(source)
    }

    fn release(&mut self, handle: SourceHandle) {
        (**self).release(handle);
    }
}

/// In-process registry that mints `blob:` URLs for in-memory media and revokes them on release.
#[derive(Debug, Default)]
pub struct BlobUrlRegistry {
    next_id: u64,
    live: BTreeMap<String, Arc<[u8]>>,
}

impl BlobUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of minted URLs not yet released.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Bytes behind a live blob URL.
    pub fn resolve(&self, url: &str) -> Option<&[u8]> {
        self.live.get(url).map(|b| &b[..])
    }
}

impl SourceProvider for BlobUrlRegistry {
    fn acquire(&mut self, source: &VideoSource) -> TourResult<SourceHandle> {
        match source {
            VideoSource::Url(url) => {
                if url.trim().is_empty() {
                    return Err(TourError::source("video URL must be non-empty"));
                }
                Ok(SourceHandle {
                    url: url.clone(),
                    owned: false,
                })
            }
            VideoSource::Blob(bytes) => {
                if bytes.is_empty() {
                    return Err(TourError::source("video blob must be non-empty"));
                }
                self.next_id += 1;
                let url = format!("blob:vidtour/{}", self.next_id);
                self.live.insert(url.clone(), Arc::clone(bytes));
                tracing::debug!(%url, bytes = bytes.len(), "minted blob url");
                Ok(SourceHandle { url, owned: true })
            }
        }
    }

    fn release(&mut self, handle: SourceHandle) {
        if !handle.owned {
            return;
        }
        if self.live.remove(&handle.url).is_some() {
            tracing::debug!(url = %handle.url, "revoked blob url");
        } else {
            tracing::warn!(url = %handle.url, "release of unknown blob url");
        }
    }
}
