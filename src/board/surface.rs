use egui::{Pos2, Rect};

use super::geometry::smallest_containing;
use super::types::{DropTarget, Region, RegionQuery, TileId};

/// Screen-space bounding boxes reported by the rendering layer.
///
/// The engine does no layout of its own: whatever was painted last frame is what drops are
/// resolved against. Missing rects simply make the corresponding target unreachable.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct BoardLayout {
    /// The whole pool section.
    pub pool_region: Option<Rect>,

    /// The whole tier list section.
    pub tiers_region: Option<Rect>,

    pub tier_rects: Vec<(String, Rect)>,
    pub tile_rects: Vec<(TileId, Rect)>,
}

impl BoardLayout {
    pub fn with_pool_region(mut self, rect: Rect) -> Self {
        self.pool_region = Some(rect);
        self
    }

    pub fn with_tiers_region(mut self, rect: Rect) -> Self {
        self.tiers_region = Some(rect);
        self
    }

    pub fn with_tier(mut self, title: impl Into<String>, rect: Rect) -> Self {
        self.tier_rects.push((title.into(), rect));
        self
    }

    pub fn with_tile(mut self, id: impl Into<TileId>, rect: Rect) -> Self {
        self.tile_rects.push((id.into(), rect));
        self
    }

    pub fn tier_rect(&self, title: &str) -> Option<Rect> {
        self.tier_rects
            .iter()
            .find(|(t, _)| t == title)
            .map(|(_, rect)| *rect)
    }

    pub fn tile_rect(&self, id: &TileId) -> Option<Rect> {
        self.tile_rects
            .iter()
            .find(|(t, _)| t == id)
            .map(|(_, rect)| *rect)
    }

    /// Hit-test a point: the innermost tile, else the innermost tier, else the pool.
    ///
    /// This is what the pointer path uses in place of the platform's "current drop target".
    pub fn target_at(&self, point: Pos2) -> Option<DropTarget> {
        if let Some(id) = smallest_containing(self.tile_rects.iter(), point) {
            return Some(DropTarget::Tile(id.clone()));
        }
        if let Some(title) = smallest_containing(self.tier_rects.iter(), point) {
            return Some(DropTarget::Tier(title.clone()));
        }
        self.pool_region
            .is_some_and(|r| r.contains(point))
            .then_some(DropTarget::Pool)
    }
}

impl RegionQuery for BoardLayout {
    fn contains(&self, region: Region, point: Pos2) -> bool {
        let rect = match region {
            Region::Pool => self.pool_region,
            Region::Tiers => self.tiers_region,
        };
        rect.is_some_and(|r| r.contains(point))
    }
}
