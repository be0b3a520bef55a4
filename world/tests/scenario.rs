//! End-to-end placement scenarios driving the scene through its command
//! surface and checking the derived state the resolvers report.

use voltgrid_core::{
    BatteryTier, CellCoord, Command, ElementId, ElementSnapshot, Event, TileVariant, ToolKind,
};
use voltgrid_system_coverage::fulfilled_cities;
use voltgrid_system_road_tiles::resolve;
use voltgrid_world::{apply, query, World};

fn place(world: &mut World, tool: ToolKind, x: i32, y: i32) -> Option<ElementId> {
    let mut events = Vec::new();
    apply(
        world,
        Command::PlaceElement {
            tool,
            origin: CellCoord::new(x, y),
        },
        &mut events,
    );
    events.iter().find_map(|event| match event {
        Event::ElementPlaced { id, .. } => Some(*id),
        _ => None,
    })
}

fn road(world: &mut World, x: i32, y: i32) -> ElementId {
    place(world, ToolKind::Road { turbo: false }, x, y).expect("road placement succeeds")
}

fn snapshot_of(world: &World, id: ElementId) -> ElementSnapshot {
    query::scene_view(world)
        .into_vec()
        .into_iter()
        .find(|snapshot| snapshot.id == id)
        .expect("element exists")
}

#[test]
fn placing_neighbors_reshapes_existing_roads() {
    let mut world = World::new();

    let first = road(&mut world, 5, 5);
    let _ = road(&mut world, 6, 5);

    let scene = query::scene_view(&world);
    assert_eq!(
        resolve(&snapshot_of(&world, first), &scene),
        Ok(TileVariant::Horizontal)
    );

    // A third road above the first produces the right+top pattern, which
    // the corner table maps to the bottom-left corner tile.
    let _ = road(&mut world, 5, 4);
    let scene = query::scene_view(&world);
    assert_eq!(
        resolve(&snapshot_of(&world, first), &scene),
        Ok(TileVariant::BottomLeft)
    );
}

#[test]
fn supply_chain_built_by_placement_fulfills_the_city() {
    let mut world = World::new();

    let center = place(
        &mut world,
        ToolKind::ServiceCenter {
            tier: BatteryTier::Tier2,
        },
        0,
        5,
    )
    .expect("center placement succeeds");

    for x in 1..=4 {
        let _ = road(&mut world, x, 5);
    }

    let city = place(
        &mut world,
        ToolKind::City {
            requirements: vec![BatteryTier::Tier2],
        },
        5,
        4,
    )
    .expect("city placement succeeds");

    let scene = query::scene_view(&world);
    let fulfilled = fulfilled_cities(&snapshot_of(&world, center), &scene)
        .expect("scene is well formed");
    assert_eq!(
        fulfilled.iter().map(|city| city.id).collect::<Vec<_>>(),
        vec![city]
    );
}

#[test]
fn extending_the_chain_past_range_leaves_the_city_unsupplied() {
    let mut world = World::new();

    let center = place(
        &mut world,
        ToolKind::ServiceCenter {
            tier: BatteryTier::Tier2,
        },
        0,
        5,
    )
    .expect("center placement succeeds");

    for x in 1..=5 {
        let _ = road(&mut world, x, 5);
    }

    let _ = place(
        &mut world,
        ToolKind::City {
            requirements: vec![BatteryTier::Tier2],
        },
        6,
        4,
    )
    .expect("city placement succeeds");

    let scene = query::scene_view(&world);
    assert!(fulfilled_cities(&snapshot_of(&world, center), &scene)
        .expect("scene is well formed")
        .is_empty());
}
