//! Persistent storage for the current game and the best score.
//!
//! One storage instance serves a single ruleset; games of different rulesets
//! never see each other's state.

use std::fs;
use std::path::{Path, PathBuf};

use tui_tiles_core::GameSnapshot;
use tui_tiles_types::Ruleset;

use crate::error::{Result, StorageError};

/// Key-value contract the session persists through
pub trait Storage {
    /// Best score recorded so far; 0 when nothing was ever stored
    fn best_score(&self) -> Result<u64>;

    fn set_best_score(&mut self, score: u64) -> Result<()>;

    /// The game left in progress, if any
    fn game_state(&self) -> Result<Option<GameSnapshot>>;

    fn set_game_state(&mut self, snapshot: &GameSnapshot) -> Result<()>;

    fn clear_game_state(&mut self) -> Result<()>;
}

/// In-memory storage, lost when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    best_score: u64,
    game_state: Option<GameSnapshot>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with a game in progress
    pub fn with_game_state(snapshot: GameSnapshot) -> Self {
        Self {
            best_score: 0,
            game_state: Some(snapshot),
        }
    }
}

impl Storage for MemoryStorage {
    fn best_score(&self) -> Result<u64> {
        Ok(self.best_score)
    }

    fn set_best_score(&mut self, score: u64) -> Result<()> {
        self.best_score = score;
        Ok(())
    }

    fn game_state(&self) -> Result<Option<GameSnapshot>> {
        Ok(self.game_state.clone())
    }

    fn set_game_state(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        self.game_state = Some(snapshot.clone());
        Ok(())
    }

    fn clear_game_state(&mut self) -> Result<()> {
        self.game_state = None;
        Ok(())
    }
}

/// JSON files under a data directory, one pair per ruleset.
///
/// # File Format
///
/// - `{ruleset}-state.json`: the serialized [`GameSnapshot`]
/// - `{ruleset}-best.json`: the best score as a bare JSON number
///
/// Writes go to a temporary file first and are renamed into place.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    base_dir: PathBuf,
    ruleset: Ruleset,
}

impl JsonFileStorage {
    /// Open (and create if needed) the storage directory for `ruleset`
    pub fn new(base_dir: impl AsRef<Path>, ruleset: Ruleset) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir, ruleset })
    }

    pub fn ruleset(&self) -> Ruleset {
        self.ruleset
    }

    fn state_path(&self) -> PathBuf {
        self.base_dir
            .join(format!("{}-state.json", self.ruleset.as_str()))
    }

    fn best_path(&self) -> PathBuf {
        self.base_dir
            .join(format!("{}-best.json", self.ruleset.as_str()))
    }

    fn read(path: &Path) -> Result<Option<Vec<u8>>> {
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(path)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(StorageError::CorruptedData(format!(
                "{} is empty",
                path.display()
            )));
        }
        Ok(Some(bytes))
    }

    fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }
}

impl Storage for JsonFileStorage {
    fn best_score(&self) -> Result<u64> {
        match Self::read(&self.best_path())? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(0),
        }
    }

    fn set_best_score(&mut self, score: u64) -> Result<()> {
        let path = self.best_path();
        Self::write_atomic(&path, &serde_json::to_vec(&score)?)?;
        tracing::debug!(score, "saved best score to {}", path.display());
        Ok(())
    }

    fn game_state(&self) -> Result<Option<GameSnapshot>> {
        let path = self.state_path();
        let Some(bytes) = Self::read(&path)? else {
            return Ok(None);
        };
        let snapshot = serde_json::from_slice(&bytes)?;
        tracing::debug!("loaded game state from {}", path.display());
        Ok(Some(snapshot))
    }

    fn set_game_state(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        let path = self.state_path();
        Self::write_atomic(&path, &serde_json::to_vec(snapshot)?)?;
        tracing::debug!("saved game state to {}", path.display());
        Ok(())
    }

    fn clear_game_state(&mut self) -> Result<()> {
        let path = self.state_path();
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("cleared game state at {}", path.display());
        }
        Ok(())
    }
}
