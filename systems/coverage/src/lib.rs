#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that computes service-center supply coverage.
//!
//! Coverage flows outward from a service center: the roads touching its
//! footprint seed a fixed-depth expansion along connected roads, the cities
//! linked to any reached road are collected, and the result is filtered down
//! to cities whose requirements match the center's battery tier. Everything
//! recomputes from the scene snapshot; nothing is incrementally maintained.

use std::collections::BTreeSet;

use voltgrid_core::{
    BatteryTier, CellCoord, CellRect, ElementId, ElementKind, ElementSnapshot, SceneView,
    SERVICE_RANGE,
};
use voltgrid_system_city_link::{connected_city, AmbiguousConnection};

/// Roads whose cell touches the service center footprint on any side.
///
/// The 1x2 footprint contributes two cells to each of its left and right
/// columns and one to each of its top and bottom rows.
#[must_use]
pub fn starter_roads<'scene>(
    center: &ElementSnapshot,
    scene: &'scene SceneView,
) -> Vec<&'scene ElementSnapshot> {
    let cells = adjacent_cells(&center.region);
    scene
        .roads()
        .filter(|road| cells.contains(&road.region.origin()))
        .collect()
}

/// Roads reachable from the service center within the supply range.
///
/// This is a level-bounded flood fill, not a shortest path: the expansion
/// runs exactly [`SERVICE_RANGE`] rounds, each round committing the current
/// frontier and gathering its orthogonal road neighbors for the next. An
/// empty round still consumes a step, and the frontier produced by the final
/// round is discarded. Roads deduplicate by identifier, so a segment reached
/// along two paths is counted once.
#[must_use]
pub fn affected_roads<'scene>(
    center: &ElementSnapshot,
    scene: &'scene SceneView,
) -> Vec<&'scene ElementSnapshot> {
    let mut seen: BTreeSet<ElementId> = BTreeSet::new();
    let mut frontier: Vec<&ElementSnapshot> = Vec::new();
    for road in starter_roads(center, scene) {
        if seen.insert(road.id) {
            frontier.push(road);
        }
    }

    let mut affected = Vec::new();
    for _round in 0..SERVICE_RANGE {
        let mut next = Vec::new();
        for road in frontier {
            affected.push(road);
            let anchor = road.region.origin();
            for neighbor_cell in [
                anchor.offset(-1, 0),
                anchor.offset(1, 0),
                anchor.offset(0, -1),
                anchor.offset(0, 1),
            ] {
                if let Some(neighbor) = road_at(scene, neighbor_cell) {
                    if seen.insert(neighbor.id) {
                        next.push(neighbor);
                    }
                }
            }
        }
        frontier = next;
    }

    affected
}

/// Unique cities connected to any road within the center's supply range.
///
/// City order follows the order roads were reached in; each city appears
/// once regardless of how many affected roads touch it.
pub fn connected_cities<'scene>(
    center: &ElementSnapshot,
    scene: &'scene SceneView,
) -> Result<Vec<&'scene ElementSnapshot>, AmbiguousConnection> {
    let mut seen: BTreeSet<ElementId> = BTreeSet::new();
    let mut cities = Vec::new();
    for road in affected_roads(center, scene) {
        if let Some((city, _)) = connected_city(&road.region, scene)? {
            if seen.insert(city.id) {
                cities.push(city);
            }
        }
    }
    Ok(cities)
}

/// Cities the service center fulfills: connected and matching its tier.
///
/// Fulfillment is evaluated per requirement tag, so a city listing several
/// tiers can be fulfilled by distinct centers independently; matching one
/// tag never satisfies another.
pub fn fulfilled_cities<'scene>(
    center: &ElementSnapshot,
    scene: &'scene SceneView,
) -> Result<Vec<&'scene ElementSnapshot>, AmbiguousConnection> {
    let Some(tier) = center_tier(center) else {
        return Ok(Vec::new());
    };

    let mut fulfilled = connected_cities(center, scene)?;
    fulfilled.retain(|city| city_requires(city, tier));
    Ok(fulfilled)
}

/// Reports whether the city lists a requirement for the provided tier.
#[must_use]
pub fn city_requires(city: &ElementSnapshot, tier: BatteryTier) -> bool {
    match &city.kind {
        ElementKind::City { requirements } => requirements.contains(&tier),
        _ => false,
    }
}

fn center_tier(center: &ElementSnapshot) -> Option<BatteryTier> {
    match center.kind {
        ElementKind::ServiceCenter { tier } => Some(tier),
        _ => None,
    }
}

fn road_at<'scene>(scene: &'scene SceneView, cell: CellCoord) -> Option<&'scene ElementSnapshot> {
    scene.roads().find(|road| road.region.origin() == cell)
}

fn adjacent_cells(region: &CellRect) -> BTreeSet<CellCoord> {
    let origin = region.origin();
    let width = region.size().width() as i32;
    let height = region.size().height() as i32;

    let mut cells = BTreeSet::new();
    for dy in 0..height {
        let _ = cells.insert(origin.offset(-1, dy));
        let _ = cells.insert(origin.offset(width, dy));
    }
    for dx in 0..width {
        let _ = cells.insert(origin.offset(dx, -1));
        let _ = cells.insert(origin.offset(dx, height));
    }
    cells
}
