use std::path::{Path, PathBuf};

use super::TierBoard;
use super::drop_sanitize::SanitizeReport;
use super::types::{BoardState, Tier, Tile};

pub const BOARD_SNAPSHOT_VERSION: u32 = 1;

/// Why a board snapshot could not be saved or loaded.
#[derive(Debug)]
pub enum PersistenceError {
    /// The snapshot was written in a format this build cannot read.
    UnsupportedVersion { found: u32, expected: u32 },

    /// The board could not be encoded as ron.
    Encode(ron::Error),

    /// The text is not a board snapshot.
    Decode(ron::error::SpannedError),

    /// Reading or writing the snapshot file failed.
    File {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedVersion { found, expected } => {
                write!(
                    f,
                    "board snapshot version {found} is not supported (expected {expected})"
                )
            }
            Self::Encode(err) => write!(f, "could not encode board snapshot: {err}"),
            Self::Decode(err) => write!(f, "not a board snapshot: {err}"),
            Self::File { path, source } => {
                write!(f, "board snapshot file {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnsupportedVersion { .. } => None,
            Self::Encode(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::File { source, .. } => Some(source),
        }
    }
}

impl From<ron::Error> for PersistenceError {
    fn from(err: ron::Error) -> Self {
        Self::Encode(err)
    }
}

impl From<ron::error::SpannedError> for PersistenceError {
    fn from(err: ron::error::SpannedError) -> Self {
        Self::Decode(err)
    }
}

impl PersistenceError {
    fn file(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::File {
            path: path.to_owned(),
            source,
        }
    }
}

/// A saved board: the tiers top to bottom, and the pool as `tiles`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct BoardSnapshot {
    pub version: u32,
    pub tiers: Vec<Tier>,
    pub tiles: Vec<Tile>,
}

impl BoardSnapshot {
    pub fn from_state(state: &BoardState) -> Self {
        Self {
            version: BOARD_SNAPSHOT_VERSION,
            tiers: state.tiers.clone(),
            tiles: state.pool.clone(),
        }
    }

    fn into_state(self) -> BoardState {
        BoardState {
            pool: self.tiles,
            tiers: self.tiers,
        }
    }
}

fn pretty_ron_config() -> ron::ser::PrettyConfig {
    ron::ser::PrettyConfig::new()
        .depth_limit(16)
        .separate_tuple_members(true)
        .enumerate_arrays(true)
}

impl TierBoard {
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_state(self.state())
    }

    pub fn snapshot_to_ron_string(&self) -> Result<String, PersistenceError> {
        let snapshot = self.snapshot();
        Ok(ron::ser::to_string_pretty(&snapshot, pretty_ron_config())?)
    }

    pub fn save_to_ron_file(&self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        let path = path.as_ref();
        let ron = self.snapshot_to_ron_string()?;
        std::fs::write(path, ron).map_err(PersistenceError::file(path))
    }

    /// Replace the board with `snapshot`. Any drag in progress is aborted.
    ///
    /// The snapshot is sanitized like [`TierBoard::override_state`]. The report says what was
    /// fixed.
    pub fn load_snapshot(
        &mut self,
        snapshot: BoardSnapshot,
    ) -> Result<SanitizeReport, PersistenceError> {
        if snapshot.version != BOARD_SNAPSHOT_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: snapshot.version,
                expected: BOARD_SNAPSHOT_VERSION,
            });
        }
        Ok(self.override_state(snapshot.into_state()))
    }

    pub fn load_from_ron_str(&mut self, ron: &str) -> Result<SanitizeReport, PersistenceError> {
        let snapshot: BoardSnapshot = ron::from_str(ron)?;
        self.load_snapshot(snapshot)
    }

    pub fn load_from_ron_file(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<SanitizeReport, PersistenceError> {
        let path = path.as_ref();
        let ron = std::fs::read_to_string(path).map_err(PersistenceError::file(path))?;
        self.load_from_ron_str(&ron)
    }
}
