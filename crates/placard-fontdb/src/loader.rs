//! Asynchronous display-face loading
//!
//! Loading is a small state machine published on a watch channel:
//!
//! ```text
//! NotLoaded -> Loading -> Loaded(font)
//!                      -> Failed(error)
//! ```
//!
//! Parsing runs on a background thread. Loaded faces are cached for the
//! life of the process, so asking for the same source again settles at
//! once. Starting a new load supersedes the previous one: a late result
//! from an older load is dropped instead of overwriting the newer state.

use std::{
    collections::HashMap,
    fmt,
    path::PathBuf,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use placard_core::{error::FontLoadError, traits::Face, FontBook};
use tokio::sync::{oneshot, watch};

use crate::{block::BlockFace, font::Font, system, LoadResult};

/// Faces loaded so far, keyed by [`FontSource::cache_key`]
static FACE_CACHE: Lazy<Mutex<HashMap<String, Arc<Font>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// The system fallback, looked up at most once
static SYSTEM_FALLBACK: Lazy<Option<Arc<Font>>> = Lazy::new(|| match system::sans_bold() {
    Ok(font) => Some(Arc::new(font)),
    Err(e) => {
        log::warn!("No system sans-serif bold available: {}", e);
        None
    },
});

/// Where a display face comes from
#[derive(Clone)]
pub enum FontSource {
    /// A font file on disk
    File(PathBuf),
    /// Font bytes already in memory, named for caching and logs
    Memory { name: String, data: Arc<Vec<u8>> },
    /// An installed face, looked up through fontdb
    System { family: String, weight: u16 },
    /// Font bytes still on their way, e.g. from a download
    ///
    /// The load stays in flight until the bytes arrive; dropping the sender
    /// fails it with [`FontLoadError::Interrupted`].
    Pending {
        name: String,
        bytes: Arc<Mutex<Option<oneshot::Receiver<Vec<u8>>>>>,
    },
}

impl FontSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn system(family: impl Into<String>, weight: u16) -> Self {
        Self::System {
            family: family.into(),
            weight,
        }
    }

    /// A source that loads once bytes are sent on the returned channel
    pub fn pending(name: impl Into<String>) -> (Self, oneshot::Sender<Vec<u8>>) {
        let (tx, rx) = oneshot::channel();
        let source = Self::Pending {
            name: name.into(),
            bytes: Arc::new(Mutex::new(Some(rx))),
        };
        (source, tx)
    }

    /// Identity of the source in the process-wide face cache
    pub fn cache_key(&self) -> String {
        match self {
            Self::File(path) => format!("file:{}", path.display()),
            Self::Memory { name, .. } => format!("memory:{}", name),
            Self::System { family, weight } => format!("system:{}:{}", family, weight),
            Self::Pending { name, .. } => format!("pending:{}", name),
        }
    }

    fn load(&self) -> LoadResult<Font> {
        match self {
            Self::File(path) => Font::from_file(path),
            Self::Memory { data, .. } => Font::from_data(data.to_vec()),
            Self::System { family, weight } => system::find(family, *weight),
            Self::Pending { bytes, .. } => {
                // A pending source can only be waited on once
                let rx = bytes.lock().take().ok_or(FontLoadError::Interrupted)?;
                let data = rx.blocking_recv().map_err(|_| FontLoadError::Interrupted)?;
                Font::from_data(data)
            },
        }
    }
}

impl fmt::Debug for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cache_key())
    }
}

/// Where the display face is in its lifecycle
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    NotLoaded,
    Loading,
    Loaded(Arc<Font>),
    Failed(FontLoadError),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn font(&self) -> Option<&Arc<Font>> {
        match self {
            Self::Loaded(font) => Some(font),
            _ => None,
        }
    }
}

/// Loads the display face in the background and reports progress
pub struct FontLoader {
    state: Arc<watch::Sender<LoadState>>,
    generation: Arc<AtomicU64>,
}

impl FontLoader {
    pub fn new() -> Self {
        let (state, _) = watch::channel(LoadState::NotLoaded);
        Self {
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Start loading `source`, superseding any load in flight
    ///
    /// Returns immediately. A cached source settles before returning.
    pub fn load(&self, source: FontSource) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let key = source.cache_key();

        if let Some(font) = FACE_CACHE.lock().get(&key).cloned() {
            log::debug!("FontLoader: {} served from cache", key);
            self.state.send_replace(LoadState::Loaded(font));
            return;
        }

        log::debug!("FontLoader: loading {} (generation {})", key, generation);
        self.state.send_replace(LoadState::Loading);

        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);
        let spawned = std::thread::Builder::new()
            .name("placard-font-load".into())
            .spawn(move || {
                let next = match source.load() {
                    Ok(font) => {
                        let font = Arc::new(font);
                        FACE_CACHE.lock().insert(key.clone(), Arc::clone(&font));
                        LoadState::Loaded(font)
                    },
                    Err(e) => {
                        log::warn!("FontLoader: {} failed: {}", key, e);
                        LoadState::Failed(e)
                    },
                };

                // Checked under the channel lock so a newer load always wins
                let published = state.send_if_modified(|s| {
                    if current.load(Ordering::SeqCst) == generation {
                        *s = next;
                        true
                    } else {
                        false
                    }
                });
                if !published {
                    log::debug!("FontLoader: dropped superseded result for {}", key);
                }
            });

        if let Err(e) = spawned {
            log::warn!("FontLoader: could not start loader thread: {}", e);
            self.state
                .send_replace(LoadState::Failed(FontLoadError::Interrupted));
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// Watch state transitions directly
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    /// Resolves once no load is in flight
    pub async fn settled(&self) -> LoadState {
        let mut rx = self.subscribe();
        let state = match rx.wait_for(|s| !s.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => LoadState::Failed(FontLoadError::Interrupted),
        };
        state
    }

    /// The loaded face, or the fallback when nothing loaded
    pub fn face_or_fallback(&self) -> Arc<dyn Face> {
        let loaded = self.state.borrow().font().cloned();
        match loaded {
            Some(font) => font as Arc<dyn Face>,
            None => fallback_face(),
        }
    }

    /// A font book for the current state
    ///
    /// The loaded face comes first when there is one, then the system
    /// sans-serif bold, then [`BlockFace`].
    pub fn font_book(&self) -> FontBook {
        let loaded = self.state.borrow().font().cloned();
        let mut book = FontBook::new(Arc::new(BlockFace));
        if let Some(font) = loaded {
            book.register(font as Arc<dyn Face>);
        }
        if let Some(font) = SYSTEM_FALLBACK.as_ref() {
            book.register(Arc::clone(font) as Arc<dyn Face>);
        }
        book
    }
}

impl Default for FontLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// The system sans-serif bold, or [`BlockFace`] when there is none
pub fn fallback_face() -> Arc<dyn Face> {
    match SYSTEM_FALLBACK.as_ref() {
        Some(font) => Arc::clone(font) as Arc<dyn Face>,
        None => Arc::new(BlockFace),
    }
}

/// A font book holding only fallbacks: system sans-serif bold, then blocks
pub fn fallback_book() -> FontBook {
    let mut book = FontBook::new(Arc::new(BlockFace));
    if let Some(font) = SYSTEM_FALLBACK.as_ref() {
        book.register(Arc::clone(font) as Arc<dyn Face>);
    }
    book
}
