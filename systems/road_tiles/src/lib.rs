#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that derives road tile variants from scene snapshots.
//!
//! A road's tile is a function of its four orthogonal neighbors and of the
//! city it connects to, recomputed from the current scene on every frame.
//! Nothing here is cached, so a freshly placed neighbor reshapes adjacent
//! roads on the very next render pass.

use voltgrid_core::{CellCoord, ElementKind, ElementSnapshot, SceneView, Side, TileVariant};
use voltgrid_system_city_link::{connected_city, AmbiguousConnection};

/// Presence pattern of a road's four orthogonal sides.
///
/// A side is present when a road occupies the neighboring cell there or when
/// the road's city connection points that way.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SidePresence {
    /// A connection exists toward decreasing x.
    pub left: bool,
    /// A connection exists toward increasing x.
    pub right: bool,
    /// A connection exists toward decreasing y.
    pub top: bool,
    /// A connection exists toward increasing y.
    pub bottom: bool,
}

/// Maps a presence pattern onto the tile drawn for it.
///
/// Corner tiles are deliberately cross-wired: they are named for the
/// direction the road curves toward, not for the sides that connect, so the
/// left+bottom pattern selects the top-right corner tile. An isolated road
/// falls through to the intersection tile, the game's documented default.
#[must_use]
pub const fn classify(sides: SidePresence) -> TileVariant {
    match (sides.left, sides.right, sides.top, sides.bottom) {
        (true, false, false, true) => TileVariant::TopRight,
        (false, true, false, true) => TileVariant::TopLeft,
        (true, false, true, false) => TileVariant::BottomRight,
        (false, true, true, false) => TileVariant::BottomLeft,
        (true, false, true, true) => TileVariant::VerticalOpenLeft,
        (false, true, true, true) => TileVariant::VerticalOpenRight,
        (true, true, true, false) => TileVariant::HorizontalOpenTop,
        (true, true, false, true) => TileVariant::HorizontalOpenBottom,
        (true, true, false, false) | (true, false, false, false) | (false, true, false, false) => {
            TileVariant::Horizontal
        }
        (false, false, true, true) | (false, false, true, false) | (false, false, false, true) => {
            TileVariant::Vertical
        }
        (false, false, false, false) | (true, true, true, true) => TileVariant::Intersection,
    }
}

/// Computes the presence pattern for the road at the provided snapshot.
///
/// Neighbor roads are matched by exact cell coordinate with a linear scan
/// over the scene; the city connection contributes its side through the
/// first-match resolution in the city-link system.
pub fn side_presence(
    road: &ElementSnapshot,
    scene: &SceneView,
) -> Result<SidePresence, AmbiguousConnection> {
    let anchor = road.region.origin();
    let mut sides = SidePresence {
        left: road_at(scene, anchor.offset(-1, 0)),
        right: road_at(scene, anchor.offset(1, 0)),
        top: road_at(scene, anchor.offset(0, -1)),
        bottom: road_at(scene, anchor.offset(0, 1)),
    };

    if let Some((_, side)) = connected_city(&road.region, scene)? {
        match side {
            Side::Left => sides.left = true,
            Side::Right => sides.right = true,
            Side::Top => sides.top = true,
            Side::Bottom => sides.bottom = true,
        }
    }

    Ok(sides)
}

/// Resolves the tile variant for the road at the provided snapshot.
pub fn resolve(
    road: &ElementSnapshot,
    scene: &SceneView,
) -> Result<TileVariant, AmbiguousConnection> {
    Ok(classify(side_presence(road, scene)?))
}

/// Resolves the tile-sheet asset name for the road, turbo set included.
pub fn resolve_asset(
    road: &ElementSnapshot,
    scene: &SceneView,
) -> Result<&'static str, AmbiguousConnection> {
    let turbo = matches!(road.kind, ElementKind::Road { turbo: true });
    Ok(resolve(road, scene)?.asset_name(turbo))
}

fn road_at(scene: &SceneView, cell: CellCoord) -> bool {
    scene.roads().any(|road| road.region.origin() == cell)
}

#[cfg(test)]
mod tests {
    use super::{classify, SidePresence};
    use voltgrid_core::TileVariant;

    fn sides(left: bool, right: bool, top: bool, bottom: bool) -> SidePresence {
        SidePresence {
            left,
            right,
            top,
            bottom,
        }
    }

    #[test]
    fn classification_covers_all_sixteen_patterns() {
        let table = [
            (sides(false, false, false, false), TileVariant::Intersection),
            (sides(true, false, false, false), TileVariant::Horizontal),
            (sides(false, true, false, false), TileVariant::Horizontal),
            (sides(true, true, false, false), TileVariant::Horizontal),
            (sides(false, false, true, false), TileVariant::Vertical),
            (sides(false, false, false, true), TileVariant::Vertical),
            (sides(false, false, true, true), TileVariant::Vertical),
            (sides(true, false, false, true), TileVariant::TopRight),
            (sides(false, true, false, true), TileVariant::TopLeft),
            (sides(true, false, true, false), TileVariant::BottomRight),
            (sides(false, true, true, false), TileVariant::BottomLeft),
            (sides(true, false, true, true), TileVariant::VerticalOpenLeft),
            (sides(false, true, true, true), TileVariant::VerticalOpenRight),
            (sides(true, true, true, false), TileVariant::HorizontalOpenTop),
            (sides(true, true, false, true), TileVariant::HorizontalOpenBottom),
            (sides(true, true, true, true), TileVariant::Intersection),
        ];

        for (pattern, expected) in table {
            assert_eq!(classify(pattern), expected, "pattern {pattern:?}");
        }
    }
}
