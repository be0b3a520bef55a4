#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame-description layer shared by Voltgrid presentation adapters.
//!
//! Backends (a canvas, a windowed renderer, the ASCII CLI) do not touch the
//! scene directly. Each frame they request a [`FramePlan`]: an ordered list
//! of tile instances plus overlay data, composed from the current scene
//! snapshot by the resolver systems. Composition is read-only and rebuilt
//! from scratch every frame, so a plan can never go stale.

use anyhow::{Context, Result as AnyResult};
use glam::Vec2;
use voltgrid_core::{
    BatteryTier, CellCoord, CellRect, CellRectSize, ElementId, ElementKind, ElementSnapshot,
    SceneView, ToolKind,
};
use voltgrid_system_coverage as coverage;
use voltgrid_system_road_tiles as road_tiles;

/// Identifier used for hover previews that are not part of the scene.
const PREVIEW_ELEMENT_ID: ElementId = ElementId::new(u32::MAX);

/// Axis-aligned rectangle expressed in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldRect {
    /// Top-left corner of the rectangle in world units.
    pub position: Vec2,
    /// Extent of the rectangle in world units.
    pub size: Vec2,
}

/// Single draw call in a frame plan: an asset stamped at a world rect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileInstance {
    /// Canonical tile-sheet asset name to stamp.
    pub asset: &'static str,
    /// Destination rectangle in world units.
    pub rect: WorldRect,
}

/// Per-requirement supply badge displayed above a city.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FulfillmentBadge {
    /// City the badge belongs to.
    pub city: ElementId,
    /// Battery tier the badge tracks.
    pub tier: BatteryTier,
    /// Whether any in-range service center of the matching tier exists.
    pub fulfilled: bool,
    /// Destination rectangle in world units.
    pub rect: WorldRect,
}

impl FulfillmentBadge {
    /// Tile-sheet asset drawn for the badge.
    #[must_use]
    pub const fn asset(&self) -> &'static str {
        self.tier.requirement_tag()
    }
}

/// Declarative placement preview describing a potential element placement.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementPreview {
    /// Tool selection being hovered.
    pub tool: ToolKind,
    /// Region of cells the element would occupy if placed.
    pub region: CellRect,
    /// Indicates whether the preview represents a valid placement location.
    pub placeable: bool,
}

/// Cursor state gathered by an adapter before composing a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverState {
    /// Tool currently selected in the palette.
    pub tool: ToolKind,
    /// Cell the cursor points at.
    pub cell: CellCoord,
}

/// Complete renderable description of one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FramePlan {
    /// Tile instances in paint order: background, then elements in scene
    /// draw order (cities therefore after roads).
    pub tiles: Vec<TileInstance>,
    /// Per-city, per-requirement supply badges.
    pub badges: Vec<FulfillmentBadge>,
    /// Roads a service center placed at the hovered cell would supply.
    pub supplied_roads: Vec<ElementId>,
    /// Legality preview for the hovered placement, if any.
    pub preview: Option<PlacementPreview>,
}

/// Converts a cell coordinate to its world-space position.
#[must_use]
pub fn cell_to_world(cell: CellCoord, tile_length: f32) -> Vec2 {
    Vec2::new(cell.x() as f32 * tile_length, cell.y() as f32 * tile_length)
}

/// Converts a cell rectangle to its world-space rectangle.
#[must_use]
pub fn rect_to_world(rect: &CellRect, tile_length: f32) -> WorldRect {
    WorldRect {
        position: cell_to_world(rect.origin(), tile_length),
        size: Vec2::new(
            rect.size().width() as f32 * tile_length,
            rect.size().height() as f32 * tile_length,
        ),
    }
}

/// Composes the renderable description of the current scene.
///
/// Road tiles, coverage, and fulfillment are all recomputed here from the
/// provided snapshot; an ambiguous city connection anywhere in the scene
/// aborts composition with an error.
pub fn compose_frame(
    scene: &SceneView,
    background: &[CellRect],
    tile_length: f32,
    hover: Option<&HoverState>,
) -> AnyResult<FramePlan> {
    let mut plan = FramePlan::default();

    for plate in background {
        plan.tiles.push(TileInstance {
            asset: "nature_plate",
            rect: rect_to_world(plate, tile_length),
        });
    }

    for snapshot in scene.iter() {
        match &snapshot.kind {
            ElementKind::Road { .. } => {
                let asset = road_tiles::resolve_asset(snapshot, scene)
                    .context("resolving road tile variants")?;
                plan.tiles.push(TileInstance {
                    asset,
                    rect: rect_to_world(&snapshot.region, tile_length),
                });
            }
            ElementKind::City { .. } => {
                plan.tiles.push(TileInstance {
                    asset: "city_plate",
                    rect: rect_to_world(&snapshot.region, tile_length),
                });
                // The city sprite sits on the center cell of the plate.
                let center = CellRect::from_origin_and_size(
                    snapshot.region.origin().offset(1, 1),
                    CellRectSize::new(1, 1),
                );
                plan.tiles.push(TileInstance {
                    asset: "city",
                    rect: rect_to_world(&center, tile_length),
                });
            }
            ElementKind::ServiceCenter { tier } => {
                plan.tiles.push(TileInstance {
                    asset: tier.service_center_asset(),
                    rect: rect_to_world(&snapshot.region, tile_length),
                });
            }
            ElementKind::Grass | ElementKind::Probe => {}
        }
    }

    compose_badges(scene, tile_length, &mut plan).context("resolving city fulfillment")?;

    if let Some(hover) = hover {
        compose_hover(scene, hover, &mut plan);
    }

    Ok(plan)
}

/// One badge per requirement tag, fulfilled independently of the others.
fn compose_badges(
    scene: &SceneView,
    tile_length: f32,
    plan: &mut FramePlan,
) -> Result<(), voltgrid_system_city_link::AmbiguousConnection> {
    let mut fulfilled: Vec<(ElementId, BatteryTier)> = Vec::new();
    for center in scene.iter() {
        let ElementKind::ServiceCenter { tier } = center.kind else {
            continue;
        };
        for city in coverage::fulfilled_cities(center, scene)? {
            fulfilled.push((city.id, tier));
        }
    }

    let badge_side = tile_length / 2.0;
    for city in scene.cities() {
        let ElementKind::City { requirements } = &city.kind else {
            continue;
        };
        let anchor = cell_to_world(city.region.origin(), tile_length);
        for (index, tier) in requirements.iter().enumerate() {
            plan.badges.push(FulfillmentBadge {
                city: city.id,
                tier: *tier,
                fulfilled: fulfilled.contains(&(city.id, *tier)),
                rect: WorldRect {
                    position: anchor + Vec2::new(index as f32 * badge_side, -badge_side),
                    size: Vec2::splat(badge_side),
                },
            });
        }
    }

    Ok(())
}

fn compose_hover(scene: &SceneView, hover: &HoverState, plan: &mut FramePlan) {
    let region = CellRect::from_origin_and_size(hover.cell, hover.tool.footprint());
    let placeable = !scene
        .iter()
        .any(|snapshot| snapshot.kind.occupies() && snapshot.region.overlaps(&region));

    if let ToolKind::ServiceCenter { tier } = &hover.tool {
        let candidate = ElementSnapshot {
            id: PREVIEW_ELEMENT_ID,
            kind: ElementKind::ServiceCenter { tier: *tier },
            region,
        };
        plan.supplied_roads = coverage::affected_roads(&candidate, scene)
            .into_iter()
            .map(|road| road.id)
            .collect();
    }

    plan.preview = Some(PlacementPreview {
        tool: hover.tool.clone(),
        region,
        placeable,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use voltgrid_core::{CellCoord, CellRectSize};

    fn rect(x: i32, y: i32, width: u32, height: u32) -> CellRect {
        CellRect::from_origin_and_size(CellCoord::new(x, y), CellRectSize::new(width, height))
    }

    fn road(id: u32, x: i32, y: i32) -> ElementSnapshot {
        ElementSnapshot {
            id: ElementId::new(id),
            kind: ElementKind::Road { turbo: false },
            region: rect(x, y, 1, 1),
        }
    }

    fn city(id: u32, x: i32, y: i32, requirements: Vec<BatteryTier>) -> ElementSnapshot {
        ElementSnapshot {
            id: ElementId::new(id),
            kind: ElementKind::City { requirements },
            region: rect(x, y, 3, 3),
        }
    }

    fn center(id: u32, x: i32, y: i32, tier: BatteryTier) -> ElementSnapshot {
        ElementSnapshot {
            id: ElementId::new(id),
            kind: ElementKind::ServiceCenter { tier },
            region: rect(x, y, 1, 2),
        }
    }

    #[test]
    fn background_paints_before_elements() {
        let scene = SceneView::from_snapshots(vec![road(0, 1, 1)]);
        let background = [rect(0, 0, 3, 3)];

        let plan = compose_frame(&scene, &background, 30.0, None).expect("compose");
        assert_eq!(plan.tiles[0].asset, "nature_plate");
        assert_eq!(plan.tiles[1].asset, "road_intersection");
    }

    #[test]
    fn city_stamps_plate_and_sprite() {
        let scene = SceneView::from_snapshots(vec![city(0, 3, 3, Vec::new())]);
        let plan = compose_frame(&scene, &[], 30.0, None).expect("compose");

        assert_eq!(plan.tiles.len(), 2);
        assert_eq!(plan.tiles[0].asset, "city_plate");
        assert_eq!(plan.tiles[1].asset, "city");
        // The sprite occupies the plate's center cell.
        assert_eq!(plan.tiles[1].rect.position, Vec2::new(120.0, 120.0));
        assert_eq!(plan.tiles[1].rect.size, Vec2::new(30.0, 30.0));
    }

    #[test]
    fn badges_track_per_tag_fulfillment() {
        let scene = SceneView::from_snapshots(vec![
            center(0, 1, 4, BatteryTier::Tier1),
            road(1, 2, 5),
            city(9, 3, 4, vec![BatteryTier::Tier1, BatteryTier::Tier2]),
        ]);
        let plan = compose_frame(&scene, &[], 30.0, None).expect("compose");

        assert_eq!(plan.badges.len(), 2);
        let tier1 = &plan.badges[0];
        let tier2 = &plan.badges[1];
        assert_eq!(tier1.asset(), "battery_1");
        assert!(tier1.fulfilled);
        assert_eq!(tier2.asset(), "battery_2");
        assert!(!tier2.fulfilled);
    }

    #[test]
    fn hover_reports_placement_legality() {
        let scene = SceneView::from_snapshots(vec![city(0, 3, 3, Vec::new())]);

        let blocked = compose_frame(
            &scene,
            &[],
            30.0,
            Some(&HoverState {
                tool: ToolKind::Road { turbo: false },
                cell: CellCoord::new(4, 4),
            }),
        )
        .expect("compose");
        let preview = blocked.preview.expect("hover provided");
        assert!(!preview.placeable);

        let open = compose_frame(
            &scene,
            &[],
            30.0,
            Some(&HoverState {
                tool: ToolKind::Road { turbo: false },
                cell: CellCoord::new(0, 0),
            }),
        )
        .expect("compose");
        assert!(open.preview.expect("hover provided").placeable);
    }

    #[test]
    fn service_center_hover_highlights_reachable_roads() {
        let scene = SceneView::from_snapshots(vec![
            road(1, 1, 5),
            road(2, 2, 5),
            road(3, 9, 9),
        ]);
        let plan = compose_frame(
            &scene,
            &[],
            30.0,
            Some(&HoverState {
                tool: ToolKind::ServiceCenter {
                    tier: BatteryTier::Tier2,
                },
                cell: CellCoord::new(0, 5),
            }),
        )
        .expect("compose");

        assert_eq!(
            plan.supplied_roads,
            vec![ElementId::new(1), ElementId::new(2)]
        );
    }

    #[test]
    fn turbo_roads_use_the_turbo_sheet() {
        let scene = SceneView::from_snapshots(vec![
            ElementSnapshot {
                id: ElementId::new(0),
                kind: ElementKind::Road { turbo: true },
                region: rect(5, 5, 1, 1),
            },
            road(1, 6, 5),
        ]);
        let plan = compose_frame(&scene, &[], 30.0, None).expect("compose");
        assert_eq!(plan.tiles[0].asset, "turbo_road_horizontal");
    }
}
