use std::hash::{Hash as _, Hasher as _};

use itertools::Itertools as _;

use super::types::{BoardState, Tile};

/// Human-readable violations of the board invariants. Empty means healthy.
pub(super) fn board_integrity_issues(state: &BoardState) -> Vec<String> {
    let mut issues: Vec<String> = Vec::new();

    for id in state.tile_ids().duplicates() {
        let places: Vec<String> = state
            .pool
            .iter()
            .filter(|t| &t.id == id)
            .map(|_| "pool".to_owned())
            .chain(state.tiers.iter().flat_map(|tier| {
                tier.tiles
                    .iter()
                    .filter(|t| &t.id == id)
                    .map(|_| format!("tier {:?}", tier.title))
            }))
            .collect();
        issues.push(format!(
            "integrity: tile {id} appears {} times ({})",
            places.len(),
            places.join(", ")
        ));
    }

    for tier in &state.tiers {
        if tier.title.trim().is_empty() {
            issues.push("integrity: tier with empty title".to_owned());
        }
    }

    for title in state
        .tiers
        .iter()
        .map(|t| t.title.to_lowercase())
        .duplicates()
    {
        issues.push(format!("integrity: tier title {title:?} is not unique"));
    }

    issues
}

pub(super) fn hash_issues(lines: &[String]) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    for line in lines {
        line.hash(&mut hasher);
    }
    hasher.finish()
}

fn tile_list(tiles: &[Tile], max_tiles: usize) -> String {
    let shown = tiles
        .iter()
        .take(max_tiles)
        .map(|t| t.id.as_str())
        .join(" ");
    if tiles.len() > max_tiles {
        format!("{shown} ... (+{})", tiles.len() - max_tiles)
    } else {
        shown
    }
}

/// One line per list, for pasting next to an integrity failure.
pub(super) fn board_summary(state: &BoardState, max_tiles: usize) -> String {
    std::iter::once(format!("pool: {}", tile_list(&state.pool, max_tiles)))
        .chain(
            state
                .tiers
                .iter()
                .map(|tier| format!("{:?}: {}", tier.title, tile_list(&tier.tiles, max_tiles))),
        )
        .join("\n")
}
