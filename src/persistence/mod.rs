//! High score storage
//!
//! The score is stored as decimal text. Storage is best effort:
//! - Missing or malformed content reads as 0
//! - Write failures are logged and dropped, never retried
//!
//! Backends: text file (native), LocalStorage (wasm), memory (tests/tools).

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Default high score file, relative to the working directory
pub const HIGH_SCORE_FILE: &str = "highscore.txt";

/// Where the high score lives between sessions
pub trait ScoreStore {
    /// Stored high score (0 when missing or unreadable)
    fn load(&self) -> u64;
    /// Store a new high score; failures must not propagate
    fn save(&mut self, score: u64);
}

/// Parse stored text, treating anything unusable as 0
pub fn parse_score(text: &str) -> u64 {
    text.trim().parse().unwrap_or(0)
}

/// Plain text file holding the score
#[derive(Debug, Clone)]
pub struct TextFileStore {
    path: PathBuf,
}

impl TextFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl ScoreStore for TextFileStore {
    fn load(&self) -> u64 {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => {
                let score = parse_score(&text);
                log::info!("Loaded high score {} from {}", score, self.path.display());
                score
            }
            Err(e) => {
                log::info!("No high score at {} ({}), starting fresh", self.path.display(), e);
                0
            }
        }
    }

    fn save(&mut self, score: u64) {
        if let Err(e) = std::fs::write(&self.path, score.to_string()) {
            log::warn!("Could not save high score to {}: {}", self.path.display(), e);
        }
    }
}

/// In-memory store; clones share the same slot
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<String>>>,
    /// Simulate an unavailable backend
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn with_contents(text: &str) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(text.to_string()))),
            fail_writes: false,
        }
    }

    /// Raw stored text
    pub fn contents(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> u64 {
        self.slot.borrow().as_deref().map_or(0, parse_score)
    }

    fn save(&mut self, score: u64) {
        if self.fail_writes {
            log::warn!("Could not save high score: store unavailable");
            return;
        }
        *self.slot.borrow_mut() = Some(score.to_string());
    }
}

/// Browser LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "zach_platformer_highscore";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn load(&self) -> u64 {
        Self::storage()
            .and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten())
            .map_or(0, |text| parse_score(&text))
    }

    fn save(&mut self, score: u64) {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, high score not saved");
            return;
        };
        if storage
            .set_item(Self::STORAGE_KEY, &score.to_string())
            .is_err()
        {
            log::warn!("Could not save high score to LocalStorage");
        }
    }
}

/// Platform default store
#[cfg(not(target_arch = "wasm32"))]
pub fn default_store() -> Box<dyn ScoreStore> {
    Box::new(TextFileStore::new(HIGH_SCORE_FILE))
}

#[cfg(target_arch = "wasm32")]
pub fn default_store() -> Box<dyn ScoreStore> {
    Box::new(LocalStorageStore)
}
