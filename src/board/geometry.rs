use egui::{Pos2, Rect, Vec2};

use super::types::{Axis, Placement};

/// Before/after decision against the midpoint of `target` along `axis`.
///
/// A pointer exactly on the midpoint counts as `Before`.
pub fn resolve_placement(pointer: Pos2, target: Rect, axis: Axis) -> Placement {
    let center = target.center();
    let delta = match axis {
        Axis::Horizontal => pointer.x - center.x,
        Axis::Vertical => pointer.y - center.y,
    };
    if delta <= 0.0 {
        Placement::Before
    } else {
        Placement::After
    }
}

/// Pointer position relative to the top-left corner of the grabbed element.
pub(super) fn offset_within(pointer: Pos2, element_rect: Rect) -> Vec2 {
    pointer - element_rect.min
}

/// Rect of a follower that keeps the initial grab point under the pointer.
pub(super) fn shadow_rect(pointer: Pos2, grab_offset: Vec2, size: Vec2) -> Rect {
    Rect::from_min_size(pointer - grab_offset, size)
}

pub(super) fn area(rect: Rect) -> f32 {
    rect.width() * rect.height()
}

/// The smallest rect containing `point`, if any.
pub(super) fn smallest_containing<'a, K: 'a>(
    candidates: impl Iterator<Item = &'a (K, Rect)>,
    point: Pos2,
) -> Option<&'a K> {
    candidates
        .filter(|(_, rect)| rect.contains(point))
        .min_by(|a, b| area(a.1).total_cmp(&area(b.1)))
        .map(|(key, _)| key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn tier_rect() -> Rect {
        Rect::from_min_size(pos2(0.0, 100.0), vec2(400.0, 80.0))
    }

    #[test]
    fn vertical_midpoint_splits_before_and_after() {
        let rect = tier_rect();
        assert_eq!(
            resolve_placement(pos2(10.0, 110.0), rect, Axis::Vertical),
            Placement::Before
        );
        assert_eq!(
            resolve_placement(pos2(10.0, 170.0), rect, Axis::Vertical),
            Placement::After
        );
    }

    #[test]
    fn exact_midpoint_is_before() {
        let rect = tier_rect();
        assert_eq!(
            resolve_placement(pos2(200.0, 140.0), rect, Axis::Vertical),
            Placement::Before
        );
        assert_eq!(
            resolve_placement(pos2(200.0, 140.0), rect, Axis::Horizontal),
            Placement::Before
        );
    }

    #[test]
    fn horizontal_axis_ignores_y() {
        let rect = Rect::from_min_size(pos2(50.0, 0.0), vec2(20.0, 20.0));
        assert_eq!(
            resolve_placement(pos2(65.0, -500.0), rect, Axis::Horizontal),
            Placement::After
        );
        assert_eq!(
            resolve_placement(pos2(55.0, 500.0), rect, Axis::Horizontal),
            Placement::Before
        );
    }

    #[test]
    fn shadow_keeps_grab_point_under_pointer() {
        let element = Rect::from_min_size(pos2(10.0, 20.0), vec2(64.0, 64.0));
        let grab = pos2(30.0, 25.0);
        let offset = offset_within(grab, element);
        assert_eq!(offset, vec2(20.0, 5.0));

        let moved = shadow_rect(pos2(200.0, 300.0), offset, element.size());
        assert_eq!(moved.min, pos2(180.0, 295.0));
        assert_eq!(moved.size(), element.size());
    }

    #[test]
    fn smallest_containing_prefers_inner_rect() {
        let outer = Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0));
        let inner = Rect::from_min_size(pos2(10.0, 10.0), vec2(10.0, 10.0));
        let rects = [("outer", outer), ("inner", inner)];
        assert_eq!(
            smallest_containing(rects.iter(), pos2(15.0, 15.0)),
            Some(&"inner")
        );
        assert_eq!(
            smallest_containing(rects.iter(), pos2(50.0, 50.0)),
            Some(&"outer")
        );
        assert_eq!(smallest_containing(rects.iter(), pos2(500.0, 0.0)), None);
    }
}
