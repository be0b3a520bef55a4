#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative scene state management for Voltgrid.
//!
//! The scene owns the ordered collection of placed elements and is the only
//! writer in the engine: adapters submit [`Command`] values through [`apply`],
//! and everything else reads immutable snapshots from [`query`]. Derived
//! state (road tiles, city connections, coverage) is never stored here; it is
//! recomputed from the current collection on every frame by the system
//! crates, which rules out stale-cache bugs by construction.

use voltgrid_core::{
    CellCoord, CellRect, CellRectSize, Command, ElementId, ElementKind, ElementSnapshot, Event,
    PlacementError, WELCOME_BANNER,
};

const DEFAULT_GRID_COLUMNS: u32 = 15;
const DEFAULT_GRID_ROWS: u32 = 15;
const DEFAULT_TILE_LENGTH: f32 = 30.0;

const GRASS_PLATE: CellRectSize = CellRectSize::new(3, 3);

/// Describes the visible cell grid the background is tiled over.
///
/// Placement itself is unbounded; the grid only scopes the grass tiling and
/// the presentation surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridDescription {
    columns: u32,
    rows: u32,
    tile_length: f32,
}

impl GridDescription {
    const fn new(columns: u32, rows: u32, tile_length: f32) -> Self {
        Self {
            columns,
            rows,
            tile_length,
        }
    }

    /// Number of cell columns in the visible area.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of cell rows in the visible area.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single square cell expressed in world units.
    #[must_use]
    pub const fn tile_length(&self) -> f32 {
        self.tile_length
    }

    /// Total width of the visible area measured in world units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Total height of the visible area measured in world units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.rows as f32 * self.tile_length
    }
}

/// Represents the authoritative Voltgrid scene state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: GridDescription,
    background: Vec<CellRect>,
    elements: Vec<Element>,
    next_element_id: u32,
}

impl World {
    /// Creates a new scene with the default grid and a fresh grass tiling.
    #[must_use]
    pub fn new() -> Self {
        let mut world = Self {
            banner: WELCOME_BANNER,
            grid: GridDescription::new(
                DEFAULT_GRID_COLUMNS,
                DEFAULT_GRID_ROWS,
                DEFAULT_TILE_LENGTH,
            ),
            background: Vec::new(),
            elements: Vec::new(),
            next_element_id: 0,
        };
        world.retile_background();
        world
    }

    fn configure(&mut self, columns: u32, rows: u32, tile_length: f32) {
        self.grid = GridDescription::new(columns, rows, tile_length);
        self.elements.clear();
        self.next_element_id = 0;
        self.retile_background();
    }

    /// Tiles the visible area with grass plates in footprint-sized steps.
    ///
    /// Plates may extend past the right and bottom edges when the grid
    /// dimensions are not multiples of the plate size; the presentation
    /// layer clips them.
    fn retile_background(&mut self) {
        self.background.clear();
        let columns = i64::from(self.grid.columns);
        let rows = i64::from(self.grid.rows);
        let mut y: i64 = 0;
        while y < rows {
            let mut x: i64 = 0;
            while x < columns {
                self.background.push(CellRect::from_origin_and_size(
                    CellCoord::new(x as i32, y as i32),
                    GRASS_PLATE,
                ));
                x += i64::from(GRASS_PLATE.width());
            }
            y += i64::from(GRASS_PLATE.height());
        }
    }

    fn allocate_element_id(&mut self) -> ElementId {
        let id = ElementId::new(self.next_element_id);
        self.next_element_id = self.next_element_id.saturating_add(1);
        id
    }

    fn placement_conflict(&self, candidate: &CellRect) -> bool {
        // Grass plates live in the background list and never conflict.
        self.elements
            .iter()
            .any(|element| element.region.overlaps(candidate))
    }

    /// Restores the draw-order invariant: every city after every road.
    ///
    /// The sort is stable, so relative order within each class is the
    /// insertion order.
    fn enforce_draw_order(&mut self) {
        self.elements
            .sort_by_key(|element| matches!(element.kind, ElementKind::City { .. }));
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the scene, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureGrid {
            columns,
            rows,
            tile_length,
        } => {
            world.configure(columns, rows, tile_length);
            out_events.push(Event::GridConfigured {
                columns,
                rows,
                tile_length,
            });
        }
        Command::PlaceElement { tool, origin } => {
            let region = CellRect::from_origin_and_size(origin, tool.footprint());
            if world.placement_conflict(&region) {
                out_events.push(Event::PlacementRejected {
                    tool,
                    origin,
                    reason: PlacementError::Overlap,
                });
                return;
            }

            let id = world.allocate_element_id();
            let kind = tool.element_kind();
            world.elements.push(Element {
                id,
                kind: kind.clone(),
                region,
            });
            world.enforce_draw_order();
            out_events.push(Event::ElementPlaced { id, kind, region });
        }
    }
}

/// Query functions that provide read-only access to the scene state.
pub mod query {
    use super::{Element, GridDescription, World};
    use voltgrid_core::{CellCoord, CellRect, ElementId, SceneView};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the scene's grid description.
    #[must_use]
    pub fn grid(world: &World) -> &GridDescription {
        &world.grid
    }

    /// Background grass plates tiled over the visible area, in draw order.
    #[must_use]
    pub fn background(world: &World) -> &[CellRect] {
        &world.background
    }

    /// Captures a read-only view of the placed elements in draw order.
    #[must_use]
    pub fn scene_view(world: &World) -> SceneView {
        SceneView::from_snapshots(world.elements.iter().map(Element::snapshot).collect())
    }

    /// Identifies the element whose footprint covers the provided cell.
    ///
    /// Background grass is not considered. The first match in draw order
    /// wins, which is unambiguous because occupying footprints never
    /// overlap.
    #[must_use]
    pub fn element_at(world: &World, cell: CellCoord) -> Option<ElementId> {
        world
            .elements
            .iter()
            .find(|element| element.region.contains(cell))
            .map(|element| element.id)
    }
}

#[derive(Clone, Debug)]
struct Element {
    id: ElementId,
    kind: ElementKind,
    region: CellRect,
}

impl Element {
    fn snapshot(&self) -> ElementSnapshot {
        ElementSnapshot {
            id: self.id,
            kind: self.kind.clone(),
            region: self.region,
        }
    }
}
