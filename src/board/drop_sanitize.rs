use ahash::HashSet;

use super::types::{BoardState, Tile, TileId};

/// What had to be fixed to make an externally supplied [`BoardState`] valid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    /// Tiers dropped for an empty or (case-insensitively) repeated title.
    pub dropped_tiers: Vec<String>,

    /// Tiles from dropped tiers, appended to the pool.
    pub tiles_moved_to_pool: usize,

    /// Repeated tile ids; only the first occurrence (pool first, then tiers top to bottom) is kept.
    pub duplicate_tiles: Vec<TileId>,
}

impl SanitizeReport {
    pub fn is_clean(&self) -> bool {
        self.dropped_tiers.is_empty() && self.duplicate_tiles.is_empty()
    }
}

fn keep_first(
    tiles: Vec<Tile>,
    seen: &mut HashSet<TileId>,
    report: &mut SanitizeReport,
) -> Vec<Tile> {
    tiles
        .into_iter()
        .filter(|tile| {
            let fresh = seen.insert(tile.id.clone());
            if !fresh {
                report.duplicate_tiles.push(tile.id.clone());
            }
            fresh
        })
        .collect()
}

pub(super) fn sanitize_board_state(state: BoardState) -> (BoardState, SanitizeReport) {
    let BoardState { pool, tiers } = state;
    let mut report = SanitizeReport::default();
    let mut seen_ids: HashSet<TileId> = HashSet::default();
    let mut seen_titles: HashSet<String> = HashSet::default();

    let mut pool = keep_first(pool, &mut seen_ids, &mut report);
    let mut freed = Vec::new();
    let mut kept_tiers = Vec::with_capacity(tiers.len());

    for mut tier in tiers {
        tier.tiles = keep_first(std::mem::take(&mut tier.tiles), &mut seen_ids, &mut report);
        let valid = !tier.title.trim().is_empty() && seen_titles.insert(tier.title.to_lowercase());
        if valid {
            kept_tiers.push(tier);
        } else {
            report.tiles_moved_to_pool += tier.tiles.len();
            report.dropped_tiers.push(tier.title);
            freed.extend(tier.tiles);
        }
    }
    pool.extend(freed);

    if !report.is_clean() {
        log::warn!(
            "board state sanitized: dropped tiers {:?}, duplicate tiles {:?}",
            report.dropped_tiers,
            report.duplicate_tiles
        );
    }

    (
        BoardState {
            pool,
            tiers: kept_tiers,
        },
        report,
    )
}
