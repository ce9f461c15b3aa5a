use egui::Pos2;

use super::error::BoardError;
use super::store::CollectionStore;
use super::types::{
    Eviction, Placement, Region, RegionQuery, TileId, TileLocation, TransferOutcome,
};

fn insertion_index(anchor_index: usize, placement: Placement) -> usize {
    match placement {
        Placement::Before => anchor_index,
        Placement::After => anchor_index + 1,
    }
}

/// Drag-driven mutations. Every operation either applies completely or not at all, and always
/// removes before it inserts.
impl CollectionStore {
    /// Move tier `dragged` right before or after tier `target`.
    pub(crate) fn reposition_tier(
        &mut self,
        dragged: &str,
        target: &str,
        placement: Placement,
    ) -> TransferOutcome {
        if dragged == target {
            return TransferOutcome::SelfTarget;
        }
        let (Some(from), Some(_)) = (self.tier_index(dragged), self.tier_index(target)) else {
            log::debug!("reposition_tier: {dragged:?} or {target:?} not found");
            return TransferOutcome::NotFound;
        };

        let tier = self.state.tiers.remove(from);
        let Some(anchor) = self.tier_index(target) else {
            // Unreachable: `target` was present and isn't the removed tier.
            self.state.tiers.insert(from, tier);
            return TransferOutcome::NotFound;
        };
        let index = insertion_index(anchor, placement);
        log::debug!("reposition_tier {dragged:?} {placement:?} {target:?} ({from} -> {index})");
        self.state.tiers.insert(index, tier);
        TransferOutcome::Applied
    }

    /// Move a tile into `destination`, next to `anchor` or at the end.
    ///
    /// `origin` is only a hint: the tile is looked up by id, so a session that went stale
    /// (e.g. the tile was moved or deleted meanwhile) can never duplicate or lose it.
    pub(crate) fn move_tile(
        &mut self,
        tile_id: &TileId,
        origin: &TileLocation,
        destination: &TileLocation,
        anchor: Option<(&TileId, Placement)>,
    ) -> TransferOutcome {
        if anchor.is_some_and(|(anchor_id, _)| anchor_id == tile_id) {
            return TransferOutcome::SelfTarget;
        }
        if self.list(destination).is_none() {
            log::debug!("move_tile {tile_id}: destination {destination} not found");
            return TransferOutcome::NotFound;
        }
        let Some((tile, actual_origin)) = self.take_tile(tile_id) else {
            log::debug!("move_tile {tile_id}: tile not found");
            return TransferOutcome::NotFound;
        };
        if &actual_origin != origin {
            log::debug!(
                "move_tile {tile_id}: origin hint {origin} is stale, tile was in {actual_origin}"
            );
        }

        let Some(list) = self.list_mut(destination) else {
            // Unreachable: taking a tile never removes a tier.
            if let Some(list) = self.list_mut(&actual_origin) {
                list.push(tile);
            }
            return TransferOutcome::NotFound;
        };
        let index = anchor
            .and_then(|(anchor_id, placement)| {
                list.iter()
                    .position(|t| &t.id == anchor_id)
                    .map(|i| insertion_index(i, placement))
            })
            .unwrap_or(list.len());
        log::debug!("move_tile {tile_id}: {actual_origin} -> {destination} at {index}");
        list.insert(index, tile);
        TransferOutcome::Applied
    }

    /// Boundary policy for a tile released at `point` without a drop target.
    ///
    /// - tier tile outside both the pool and the tiers → back to the end of the pool
    /// - pool tile outside the pool → deleted (if `delete_pool_tiles` is set)
    pub(crate) fn evict_tile_if_outside(
        &mut self,
        tile_id: &TileId,
        origin: &TileLocation,
        point: Pos2,
        regions: &impl RegionQuery,
        delete_pool_tiles: bool,
    ) -> Eviction {
        let Some(location) = self.location_of(tile_id) else {
            log::debug!("evict {tile_id}: tile not found");
            return Eviction::Kept;
        };
        if &location != origin {
            log::debug!("evict {tile_id}: origin hint {origin} is stale, tile is in {location}");
        }

        let in_pool = regions.contains(Region::Pool, point);
        let in_tiers = regions.contains(Region::Tiers, point);
        match location {
            TileLocation::Tier(_) if !in_pool && !in_tiers => {
                let outcome = self.move_tile(tile_id, &location, &TileLocation::Pool, None);
                debug_assert_eq!(outcome, TransferOutcome::Applied, "tile was located");
                Eviction::ReturnedToPool
            }
            TileLocation::Pool if !in_pool && delete_pool_tiles => {
                self.delete_tile(tile_id);
                Eviction::Deleted
            }
            _ => Eviction::Kept,
        }
    }

    /// Delete a tier. Its tiles are appended to the pool, in order.
    pub(crate) fn remove_tier(&mut self, title: &str) -> TransferOutcome {
        let Some(index) = self.tier_index(title) else {
            return TransferOutcome::NotFound;
        };
        let tier = self.state.tiers.remove(index);
        log::debug!(
            "tier removed title={title:?}, {} tiles returned to pool",
            tier.tiles.len()
        );
        self.state.pool.extend(tier.tiles);
        TransferOutcome::Applied
    }

    /// Swap a tier's title in place. Membership and order are untouched.
    pub(crate) fn rename_tier(
        &mut self,
        old_title: &str,
        new_title: &str,
    ) -> Result<TransferOutcome, BoardError> {
        let Some(index) = self.tier_index(old_title) else {
            return Ok(TransferOutcome::NotFound);
        };
        if let Some(err) = self.title_conflicts(new_title, index) {
            return Err(err);
        }
        self.state.tiers[index].title = new_title.to_owned();
        Ok(TransferOutcome::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::types::{BoardState, Tier, Tile};
    use egui::{Rect, pos2};

    fn ids(tiles: &[Tile]) -> Vec<&str> {
        tiles.iter().map(|t| t.id.as_str()).collect()
    }

    fn tiles(names: &[&str]) -> Vec<Tile> {
        names.iter().map(|n| Tile::named(*n, *n)).collect()
    }

    fn tier_titles(store: &CollectionStore) -> Vec<&str> {
        store
            .state()
            .tiers
            .iter()
            .map(|t| t.title.as_str())
            .collect()
    }

    fn store(pool: &[&str], tiers: &[(&str, &[&str])]) -> CollectionStore {
        CollectionStore::new(BoardState {
            pool: tiles(pool),
            tiers: tiers
                .iter()
                .map(|(title, names)| Tier::with_tiles(*title, tiles(names)))
                .collect(),
        })
    }

    struct Regions {
        pool: Rect,
        tiers: Rect,
    }

    impl RegionQuery for Regions {
        fn contains(&self, region: Region, point: Pos2) -> bool {
            match region {
                Region::Pool => self.pool.contains(point),
                Region::Tiers => self.tiers.contains(point),
            }
        }
    }

    fn regions() -> Regions {
        Regions {
            tiers: Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 100.0)),
            pool: Rect::from_min_max(pos2(0.0, 200.0), pos2(100.0, 300.0)),
        }
    }

    #[test]
    fn drop_on_empty_tier_appends() {
        let mut store = store(&["T1", "T2"], &[("S", &[])]);
        let outcome = store.move_tile(
            &"T1".into(),
            &TileLocation::Pool,
            &TileLocation::tier("S"),
            None,
        );
        assert_eq!(outcome, TransferOutcome::Applied);
        assert_eq!(ids(&store.state().pool), ["T2"]);
        assert_eq!(ids(&store.state().tiers[0].tiles), ["T1"]);
    }

    #[test]
    fn reorder_within_tier_before_first() {
        let mut store = store(&[], &[("S", &["A", "B", "C"])]);
        let s = TileLocation::tier("S");
        let outcome = store.move_tile(&"C".into(), &s, &s, Some((&"A".into(), Placement::Before)));
        assert_eq!(outcome, TransferOutcome::Applied);
        assert_eq!(ids(&store.state().tiers[0].tiles), ["C", "A", "B"]);
    }

    #[test]
    fn reorder_within_tier_after_next_neighbour() {
        let mut store = store(&[], &[("S", &["A", "B", "C"])]);
        let s = TileLocation::tier("S");
        store.move_tile(&"A".into(), &s, &s, Some((&"B".into(), Placement::After)));
        assert_eq!(ids(&store.state().tiers[0].tiles), ["B", "A", "C"]);
    }

    #[test]
    fn dropping_next_to_own_neighbour_is_stable() {
        let mut store = store(&[], &[("S", &["A", "B", "C"])]);
        let s = TileLocation::tier("S");
        store.move_tile(&"B".into(), &s, &s, Some((&"A".into(), Placement::After)));
        assert_eq!(ids(&store.state().tiers[0].tiles), ["A", "B", "C"]);
        store.move_tile(&"B".into(), &s, &s, Some((&"C".into(), Placement::Before)));
        assert_eq!(ids(&store.state().tiers[0].tiles), ["A", "B", "C"]);
    }

    #[test]
    fn self_drop_is_a_no_op() {
        let mut store = store(&["A", "B", "C"], &[]);
        for placement in [Placement::Before, Placement::After] {
            let outcome = store.move_tile(
                &"B".into(),
                &TileLocation::Pool,
                &TileLocation::Pool,
                Some((&"B".into(), placement)),
            );
            assert_eq!(outcome, TransferOutcome::SelfTarget);
            assert_eq!(ids(&store.state().pool), ["A", "B", "C"]);
        }
    }

    #[test]
    fn pool_reorder() {
        let mut store = store(&["A", "B", "C"], &[]);
        store.move_tile(
            &"A".into(),
            &TileLocation::Pool,
            &TileLocation::Pool,
            Some((&"C".into(), Placement::After)),
        );
        assert_eq!(ids(&store.state().pool), ["B", "C", "A"]);
    }

    #[test]
    fn tier_to_pool_at_position() {
        let mut store = store(&["P", "Q"], &[("S", &["X"])]);
        store.move_tile(
            &"X".into(),
            &TileLocation::tier("S"),
            &TileLocation::Pool,
            Some((&"Q".into(), Placement::Before)),
        );
        assert_eq!(ids(&store.state().pool), ["P", "X", "Q"]);
        assert!(store.state().tiers[0].tiles.is_empty());
    }

    #[test]
    fn tier_to_tier_at_position() {
        let mut store = store(&[], &[("S", &["X"]), ("A", &["Y", "Z"])]);
        store.move_tile(
            &"X".into(),
            &TileLocation::tier("S"),
            &TileLocation::tier("A"),
            Some((&"Z".into(), Placement::Before)),
        );
        assert_eq!(ids(&store.state().tiers[1].tiles), ["Y", "X", "Z"]);
    }

    #[test]
    fn missing_destination_keeps_tile_in_place() {
        let mut store = store(&["A"], &[]);
        let outcome = store.move_tile(
            &"A".into(),
            &TileLocation::Pool,
            &TileLocation::tier("gone"),
            None,
        );
        assert_eq!(outcome, TransferOutcome::NotFound);
        assert_eq!(ids(&store.state().pool), ["A"]);
    }

    #[test]
    fn stale_origin_uses_actual_location() {
        let mut store = store(&[], &[("S", &["A"]), ("B", &[])]);
        let outcome = store.move_tile(
            &"A".into(),
            &TileLocation::Pool,
            &TileLocation::tier("B"),
            None,
        );
        assert_eq!(outcome, TransferOutcome::Applied);
        assert!(store.state().tiers[0].tiles.is_empty());
        assert_eq!(ids(&store.state().tiers[1].tiles), ["A"]);
    }

    #[test]
    fn reposition_tier_before_and_after() {
        let mut store = store(&[], &[("Tier1", &[]), ("Tier2", &[]), ("Tier3", &[])]);
        assert_eq!(
            store.reposition_tier("Tier2", "Tier1", Placement::Before),
            TransferOutcome::Applied
        );
        assert_eq!(tier_titles(&store), ["Tier2", "Tier1", "Tier3"]);

        store.reposition_tier("Tier2", "Tier3", Placement::After);
        assert_eq!(tier_titles(&store), ["Tier1", "Tier3", "Tier2"]);

        assert_eq!(
            store.reposition_tier("Tier1", "Tier1", Placement::After),
            TransferOutcome::SelfTarget
        );
        assert_eq!(
            store.reposition_tier("Tier1", "nope", Placement::After),
            TransferOutcome::NotFound
        );
        assert_eq!(tier_titles(&store), ["Tier1", "Tier3", "Tier2"]);
    }

    #[test]
    fn remove_tier_appends_tiles_to_pool() {
        let mut store = store(&["Z"], &[("S", &["X", "Y"])]);
        assert_eq!(store.remove_tier("S"), TransferOutcome::Applied);
        assert!(store.state().tiers.is_empty());
        assert_eq!(ids(&store.state().pool), ["Z", "X", "Y"]);
        assert_eq!(store.remove_tier("S"), TransferOutcome::NotFound);
    }

    #[test]
    fn rename_rejects_duplicates_of_other_tiers() {
        let mut store = store(&[], &[("S", &["X"]), ("A", &[])]);
        assert_eq!(
            store.rename_tier("S", "a"),
            Err(BoardError::DuplicateTitle {
                title: "a".to_owned()
            })
        );
        assert_eq!(store.rename_tier("S", ""), Err(BoardError::EmptyTitle));
        assert_eq!(store.rename_tier("S", "s"), Ok(TransferOutcome::Applied));
        assert_eq!(tier_titles(&store), ["s", "A"]);
        assert_eq!(ids(&store.state().tiers[0].tiles), ["X"]);
        assert_eq!(
            store.rename_tier("missing", "B"),
            Ok(TransferOutcome::NotFound)
        );
    }

    fn evict(store: &mut CollectionStore, id: &str, from: TileLocation, at: Pos2) -> Eviction {
        store.evict_tile_if_outside(&id.into(), &from, at, &regions(), true)
    }

    #[test]
    fn eviction_from_tier_returns_to_pool_end() {
        let mut store = store(&["P"], &[("S", &["X", "Y"])]);
        let outside = pos2(500.0, 500.0);
        let eviction = evict(&mut store, "X", TileLocation::tier("S"), outside);
        assert_eq!(eviction, Eviction::ReturnedToPool);
        assert_eq!(ids(&store.state().pool), ["P", "X"]);
        assert_eq!(ids(&store.state().tiers[0].tiles), ["Y"]);
    }

    #[test]
    fn eviction_from_pool_deletes() {
        let mut store = store(&["P", "Q"], &[]);
        let outside = pos2(500.0, 500.0);
        let eviction = evict(&mut store, "P", TileLocation::Pool, outside);
        assert_eq!(eviction, Eviction::Deleted);
        assert_eq!(ids(&store.state().pool), ["Q"]);
    }

    #[test]
    fn pool_tile_released_over_tiers_region_is_deleted() {
        let mut store = store(&["P"], &[]);
        let in_tiers = pos2(50.0, 50.0);
        let eviction = evict(&mut store, "P", TileLocation::Pool, in_tiers);
        assert_eq!(eviction, Eviction::Deleted);
    }

    #[test]
    fn eviction_keeps_tiles_inside_regions() {
        let mut store = store(&["P"], &[("S", &["X"])]);
        let in_tiers = pos2(50.0, 50.0);
        let in_pool = pos2(50.0, 250.0);
        let s = TileLocation::tier("S");
        assert_eq!(evict(&mut store, "X", s.clone(), in_tiers), Eviction::Kept);
        assert_eq!(evict(&mut store, "X", s, in_pool), Eviction::Kept);
        assert_eq!(
            evict(&mut store, "P", TileLocation::Pool, in_pool),
            Eviction::Kept
        );
        assert_eq!(
            evict(&mut store, "gone", TileLocation::Pool, in_pool),
            Eviction::Kept
        );
    }

    #[test]
    fn pool_deletion_can_be_disabled() {
        let mut store = store(&["P"], &[]);
        let outside = pos2(500.0, 500.0);
        let pool = TileLocation::Pool;
        let eviction = store.evict_tile_if_outside(&"P".into(), &pool, outside, &regions(), false);
        assert_eq!(eviction, Eviction::Kept);
        assert_eq!(ids(&store.state().pool), ["P"]);
    }
}
