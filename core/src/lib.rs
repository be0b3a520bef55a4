#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Voltgrid engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative scene, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the scene executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems and
//! presentation layers to react to deterministically. Systems consume
//! immutable snapshots and never mutate the scene directly.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Voltgrid.";

/// Number of expansion rounds a service center's supply reaches along roads.
///
/// Shared by every service center regardless of tier; the bound counts simple
/// road-to-road steps, not a weighted distance.
pub const SERVICE_RANGE: u32 = 4;

/// Location of a single grid cell expressed as x and y coordinates.
///
/// The grid is an unbounded integer plane; negative coordinates are valid.
/// Elements anchor their footprint at the top-left cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    x: i32,
    y: i32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the cell offset by the provided deltas.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
        }
    }
}

/// Size of a [`CellRect`] measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRectSize {
    width: u32,
    height: u32,
}

impl CellRectSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width of the rectangle in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the rectangle in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }
}

/// Axis-aligned rectangle expressed in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    origin: CellCoord,
    size: CellRectSize,
}

impl CellRect {
    /// Constructs a rectangle from an origin cell and size.
    #[must_use]
    pub const fn from_origin_and_size(origin: CellCoord, size: CellRectSize) -> Self {
        Self { origin, size }
    }

    /// Upper-left cell that anchors the rectangle.
    #[must_use]
    pub const fn origin(&self) -> CellCoord {
        self.origin
    }

    /// Dimensions of the rectangle measured in whole cells.
    #[must_use]
    pub const fn size(&self) -> CellRectSize {
        self.size
    }

    /// Reports whether two rectangles share at least one cell.
    ///
    /// The test is half-open: rectangles that merely touch along an edge do
    /// not overlap. Symmetric, and false for any zero-area rectangle.
    /// Coordinates widen to `i64` so footprints near the `i32` extremes
    /// cannot overflow.
    #[must_use]
    pub fn overlaps(&self, other: &CellRect) -> bool {
        let (al, at, ar, ab) = self.bounds();
        let (bl, bt, br, bb) = other.bounds();
        al < br && ar > bl && at < bb && ab > bt
    }

    /// Reports whether the rectangle covers the provided cell.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        let (left, top, right, bottom) = self.bounds();
        let x = i64::from(cell.x());
        let y = i64::from(cell.y());
        x >= left && x < right && y >= top && y < bottom
    }

    fn bounds(&self) -> (i64, i64, i64, i64) {
        let left = i64::from(self.origin.x());
        let top = i64::from(self.origin.y());
        (
            left,
            top,
            left + i64::from(self.size.width()),
            top + i64::from(self.size.height()),
        )
    }
}

/// Unique identifier assigned to a placed element.
///
/// Identifiers are allocated by the scene from a monotonically incrementing
/// counter, so two elements placed in the same instant never collide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(u32);

impl ElementId {
    /// Creates a new element identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Battery tier offered by a service center and demanded by cities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BatteryTier {
    /// Entry-level battery service.
    Tier1,
    /// Mid-range battery service.
    Tier2,
    /// High-end battery service.
    Tier3,
}

impl BatteryTier {
    /// Requirement tag a city lists when it demands this tier.
    #[must_use]
    pub const fn requirement_tag(self) -> &'static str {
        match self {
            Self::Tier1 => "battery_1",
            Self::Tier2 => "battery_2",
            Self::Tier3 => "battery_3",
        }
    }

    /// Tile-sheet asset drawn for a service center of this tier.
    #[must_use]
    pub const fn service_center_asset(self) -> &'static str {
        match self {
            Self::Tier1 => "service_center_1",
            Self::Tier2 => "service_center_2",
            Self::Tier3 => "service_center_3",
        }
    }
}

/// Side of a city footprint a road may connect to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Connection on the city's left edge.
    Left,
    /// Connection on the city's right edge.
    Right,
    /// Connection on the city's top edge.
    Top,
    /// Connection on the city's bottom edge.
    Bottom,
}

/// Closed set of element variants the scene can hold.
///
/// Variants share only a footprint and a renderable identity; behavior is
/// dispatched by pattern match rather than a trait hierarchy because nothing
/// else is common between them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    /// Background plate tiling the visible area; exempt from occupancy.
    Grass,
    /// Single-cell road segment.
    Road {
        /// Selects the turbo tile set without altering adjacency or coverage.
        turbo: bool,
    },
    /// City demanding one battery tier per listed requirement.
    City {
        /// Ordered requirement tags; duplicates are permitted but meaningless.
        requirements: Vec<BatteryTier>,
    },
    /// Battery service center supplying one tier within [`SERVICE_RANGE`].
    ServiceCenter {
        /// Tier of battery service the center provides.
        tier: BatteryTier,
    },
    /// Transient hit-testing element; never placed into the scene.
    Probe,
}

impl ElementKind {
    /// Fixed footprint occupied by this variant.
    #[must_use]
    pub const fn footprint(&self) -> CellRectSize {
        match self {
            Self::Grass | Self::City { .. } => CellRectSize::new(3, 3),
            Self::Road { .. } | Self::Probe => CellRectSize::new(1, 1),
            Self::ServiceCenter { .. } => CellRectSize::new(1, 2),
        }
    }

    /// Reports whether the variant participates in occupancy checks.
    #[must_use]
    pub const fn occupies(&self) -> bool {
        !matches!(self, Self::Grass | Self::Probe)
    }
}

/// Immutable representation of a single placed element used for queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementSnapshot {
    /// Identifier allocated to the element by the scene.
    pub id: ElementId,
    /// Variant of the element, including per-variant data.
    pub kind: ElementKind,
    /// Region of cells occupied by the element.
    pub region: CellRect,
}

impl ElementSnapshot {
    /// Reports whether the snapshot describes a road segment.
    #[must_use]
    pub const fn is_road(&self) -> bool {
        matches!(self.kind, ElementKind::Road { .. })
    }

    /// Reports whether the snapshot describes a city.
    #[must_use]
    pub const fn is_city(&self) -> bool {
        matches!(self.kind, ElementKind::City { .. })
    }
}

/// Read-only snapshot describing all placed elements in draw order.
///
/// Unlike identifier-sorted views, the order here is semantic: it is the
/// order elements are drawn in, with every city following every road. Systems
/// that resolve ties by "first match in scene order" rely on it.
#[derive(Clone, Debug, Default)]
pub struct SceneView {
    snapshots: Vec<ElementSnapshot>,
}

impl SceneView {
    /// Creates a new scene view, preserving the provided draw order.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<ElementSnapshot>) -> Self {
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &ElementSnapshot> {
        self.snapshots.iter()
    }

    /// Iterator over the road segments in draw order.
    pub fn roads(&self) -> impl Iterator<Item = &ElementSnapshot> {
        self.snapshots.iter().filter(|snapshot| snapshot.is_road())
    }

    /// Iterator over the cities in draw order.
    pub fn cities(&self) -> impl Iterator<Item = &ElementSnapshot> {
        self.snapshots.iter().filter(|snapshot| snapshot.is_city())
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ElementSnapshot> {
        self.snapshots
    }
}

/// Placement tool selected by the player, handed to the scene verbatim.
///
/// Tool resolution (key presses, palette clicks) happens in adapters; the
/// scene only sees the final selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolKind {
    /// Places a road segment.
    Road {
        /// Whether the placed road uses the turbo tile set.
        turbo: bool,
    },
    /// Places a city with the provided requirements.
    City {
        /// Battery tiers the new city will demand.
        requirements: Vec<BatteryTier>,
    },
    /// Places a service center of the provided tier.
    ServiceCenter {
        /// Tier of battery service the new center provides.
        tier: BatteryTier,
    },
}

impl ToolKind {
    /// Element variant the tool produces when placement succeeds.
    #[must_use]
    pub fn element_kind(&self) -> ElementKind {
        match self {
            Self::Road { turbo } => ElementKind::Road { turbo: *turbo },
            Self::City { requirements } => ElementKind::City {
                requirements: requirements.clone(),
            },
            Self::ServiceCenter { tier } => ElementKind::ServiceCenter { tier: *tier },
        }
    }

    /// Footprint the produced element would occupy.
    #[must_use]
    pub fn footprint(&self) -> CellRectSize {
        self.element_kind().footprint()
    }
}

/// Visual tile resolved for a road from its 4-neighbor presence pattern.
///
/// Corner variants are named for the direction the road curves toward, not
/// for the sides it connects to: the left+bottom pattern renders the
/// top-right corner tile. This inversion is the game's established visual
/// convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileVariant {
    /// Straight road running left-right.
    Horizontal,
    /// Straight road running top-bottom.
    Vertical,
    /// Corner tile curving toward the top-left.
    TopLeft,
    /// Corner tile curving toward the top-right.
    TopRight,
    /// Corner tile curving toward the bottom-left.
    BottomLeft,
    /// Corner tile curving toward the bottom-right.
    BottomRight,
    /// Vertical road opening toward the left.
    VerticalOpenLeft,
    /// Vertical road opening toward the right.
    VerticalOpenRight,
    /// Horizontal road opening toward the top.
    HorizontalOpenTop,
    /// Horizontal road opening toward the bottom.
    HorizontalOpenBottom,
    /// Four-way crossing; also the default for an isolated road.
    Intersection,
}

impl TileVariant {
    /// Canonical tile-sheet asset name for the variant.
    ///
    /// Turbo roads select the `turbo_`-prefixed counterpart of the same
    /// variant.
    #[must_use]
    pub const fn asset_name(self, turbo: bool) -> &'static str {
        if turbo {
            match self {
                Self::Horizontal => "turbo_road_horizontal",
                Self::Vertical => "turbo_road_vertical",
                Self::TopLeft => "turbo_road_top_left",
                Self::TopRight => "turbo_road_top_right",
                Self::BottomLeft => "turbo_road_bottom_left",
                Self::BottomRight => "turbo_road_bottom_right",
                Self::VerticalOpenLeft => "turbo_road_vertical_open_left",
                Self::VerticalOpenRight => "turbo_road_vertical_open_right",
                Self::HorizontalOpenTop => "turbo_road_horizontal_open_top",
                Self::HorizontalOpenBottom => "turbo_road_horizontal_open_bottom",
                Self::Intersection => "turbo_road_intersection",
            }
        } else {
            match self {
                Self::Horizontal => "road_horizontal",
                Self::Vertical => "road_vertical",
                Self::TopLeft => "road_top_left",
                Self::TopRight => "road_top_right",
                Self::BottomLeft => "road_bottom_left",
                Self::BottomRight => "road_bottom_right",
                Self::VerticalOpenLeft => "road_vertical_open_left",
                Self::VerticalOpenRight => "road_vertical_open_right",
                Self::HorizontalOpenTop => "road_horizontal_open_top",
                Self::HorizontalOpenBottom => "road_horizontal_open_bottom",
                Self::Intersection => "road_intersection",
            }
        }
    }
}

/// Commands that express all permissible scene mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Rebuilds the scene for a grid of the provided dimensions.
    ConfigureGrid {
        /// Number of cell columns in the visible area.
        columns: u32,
        /// Number of cell rows in the visible area.
        rows: u32,
        /// Side length of a square cell expressed in world units.
        tile_length: f32,
    },
    /// Requests placement of a new element anchored at the provided origin.
    PlaceElement {
        /// Tool selection describing the element to create.
        tool: ToolKind,
        /// Upper-left cell of the candidate footprint.
        origin: CellCoord,
    },
}

/// Events broadcast by the scene after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that the scene was rebuilt around new grid dimensions.
    GridConfigured {
        /// Number of cell columns in the visible area.
        columns: u32,
        /// Number of cell rows in the visible area.
        rows: u32,
        /// Side length of a square cell expressed in world units.
        tile_length: f32,
    },
    /// Confirms that an element was placed into the scene.
    ElementPlaced {
        /// Identifier assigned to the element by the scene.
        id: ElementId,
        /// Variant of the element that was placed.
        kind: ElementKind,
        /// Region of cells occupied by the element.
        region: CellRect,
    },
    /// Reports that a placement request was rejected.
    PlacementRejected {
        /// Tool selection provided in the placement request.
        tool: ToolKind,
        /// Origin cell provided in the placement request.
        origin: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
}

/// Reasons a placement request may be rejected by the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The candidate footprint overlaps an occupying element.
    Overlap,
}

#[cfg(test)]
mod tests {
    use super::{
        BatteryTier, CellCoord, CellRect, CellRectSize, ElementId, ElementKind, PlacementError,
        TileVariant,
    };
    use serde::{de::DeserializeOwned, Serialize};

    fn rect(x: i32, y: i32, width: u32, height: u32) -> CellRect {
        CellRect::from_origin_and_size(CellCoord::new(x, y), CellRectSize::new(width, height))
    }

    #[test]
    fn overlap_is_symmetric_for_intersecting_rects() {
        let a = rect(0, 0, 3, 3);
        let b = rect(2, 2, 3, 3);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = rect(0, 0, 3, 3);
        let b = rect(3, 0, 1, 1);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn containment_counts_as_overlap() {
        let outer = rect(-2, -2, 5, 5);
        let inner = rect(0, 0, 1, 1);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn zero_area_rect_overlaps_nothing() {
        let empty = rect(1, 1, 0, 0);
        let full = rect(0, 0, 3, 3);
        assert!(!empty.overlaps(&full));
        assert!(!full.overlaps(&empty));
    }

    #[test]
    fn overlap_survives_extreme_coordinates() {
        let a = rect(i32::MAX - 1, i32::MAX - 1, 1, 1);
        let b = rect(i32::MAX - 2, i32::MAX - 2, 3, 3);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn contains_respects_half_open_bounds() {
        let region = rect(2, 2, 3, 3);
        assert!(region.contains(CellCoord::new(2, 2)));
        assert!(region.contains(CellCoord::new(4, 4)));
        assert!(!region.contains(CellCoord::new(5, 4)));
        assert!(!region.contains(CellCoord::new(1, 2)));
    }

    #[test]
    fn footprints_match_variant_definitions() {
        assert_eq!(ElementKind::Grass.footprint(), CellRectSize::new(3, 3));
        assert_eq!(
            ElementKind::Road { turbo: false }.footprint(),
            CellRectSize::new(1, 1)
        );
        assert_eq!(
            ElementKind::City {
                requirements: Vec::new()
            }
            .footprint(),
            CellRectSize::new(3, 3)
        );
        assert_eq!(
            ElementKind::ServiceCenter {
                tier: BatteryTier::Tier1
            }
            .footprint(),
            CellRectSize::new(1, 2)
        );
        assert_eq!(ElementKind::Probe.footprint(), CellRectSize::new(1, 1));
    }

    #[test]
    fn grass_and_probe_do_not_occupy() {
        assert!(!ElementKind::Grass.occupies());
        assert!(!ElementKind::Probe.occupies());
        assert!(ElementKind::Road { turbo: true }.occupies());
    }

    #[test]
    fn requirement_tags_follow_tier_numbering() {
        assert_eq!(BatteryTier::Tier1.requirement_tag(), "battery_1");
        assert_eq!(BatteryTier::Tier2.requirement_tag(), "battery_2");
        assert_eq!(BatteryTier::Tier3.requirement_tag(), "battery_3");
        assert_eq!(
            BatteryTier::Tier3.service_center_asset(),
            "service_center_3"
        );
    }

    #[test]
    fn turbo_assets_prefix_their_standard_counterparts() {
        for variant in [
            TileVariant::Horizontal,
            TileVariant::Vertical,
            TileVariant::TopLeft,
            TileVariant::TopRight,
            TileVariant::BottomLeft,
            TileVariant::BottomRight,
            TileVariant::VerticalOpenLeft,
            TileVariant::VerticalOpenRight,
            TileVariant::HorizontalOpenTop,
            TileVariant::HorizontalOpenBottom,
            TileVariant::Intersection,
        ] {
            let standard = variant.asset_name(false);
            let turbo = variant.asset_name(true);
            assert_eq!(turbo, format!("turbo_{standard}"));
        }
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn element_id_round_trips_through_bincode() {
        assert_round_trip(&ElementId::new(42));
    }

    #[test]
    fn placement_error_round_trips_through_bincode() {
        assert_round_trip(&PlacementError::Overlap);
    }

    #[test]
    fn cell_rect_round_trips_through_bincode() {
        assert_round_trip(&rect(-5, 7, 2, 3));
    }

    #[test]
    fn element_kind_round_trips_through_bincode() {
        assert_round_trip(&ElementKind::City {
            requirements: vec![BatteryTier::Tier1, BatteryTier::Tier2],
        });
    }
}
