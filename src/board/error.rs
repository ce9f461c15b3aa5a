use super::types::TileContent;

/// A lifecycle request was rejected. No state was changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardError {
    EmptyTitle,
    DuplicateTitle { title: String },
    EmptyTile,
    DuplicateTile { content: TileContent },
}

impl std::fmt::Display for BoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "cannot add a tier with an empty title"),
            Self::DuplicateTitle { title } => write!(f, "tier {title:?} already exists"),
            Self::EmptyTile => write!(f, "fill in the name or paste an image url"),
            Self::DuplicateTile { content } => write!(f, "tile {content} already exists"),
        }
    }
}

impl std::error::Error for BoardError {}
