#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that renders a scripted Voltgrid scene as ASCII.
//!
//! The binary stands in for the canvas presentation layer: it drives the
//! scene through the same command surface a pointer-driven adapter would,
//! composes a frame plan, and prints it as one glyph per cell together with
//! the per-city supply report.

use anyhow::Result;
use clap::Parser;
use voltgrid_core::{BatteryTier, CellCoord, Command, ElementKind, Event, ToolKind};
use voltgrid_rendering::{compose_frame, FramePlan};
use voltgrid_world::{apply, query, World};

/// Renders the Voltgrid demo scene to stdout.
#[derive(Debug, Parser)]
#[command(name = "voltgrid")]
struct Options {
    /// Number of cell columns in the visible grid.
    #[arg(long, default_value_t = 15)]
    columns: u32,
    /// Number of cell rows in the visible grid.
    #[arg(long, default_value_t = 15)]
    rows: u32,
    /// Skip the scripted demo placements and render an empty scene.
    #[arg(long)]
    empty: bool,
}

fn main() -> Result<()> {
    let options = Options::parse();

    let mut world = World::new();
    let mut events = Vec::new();
    apply(
        &mut world,
        Command::ConfigureGrid {
            columns: options.columns,
            rows: options.rows,
            tile_length: 30.0,
        },
        &mut events,
    );

    println!("{}", query::welcome_banner(&world));

    if !options.empty {
        for (tool, origin) in demo_script() {
            events.clear();
            apply(&mut world, Command::PlaceElement { tool, origin }, &mut events);
            for event in &events {
                if let Event::PlacementRejected { tool, origin, reason } = event {
                    println!(
                        "placement rejected: {tool:?} at ({}, {}): {reason:?}",
                        origin.x(),
                        origin.y()
                    );
                }
            }
        }
    }

    let scene = query::scene_view(&world);
    let grid = query::grid(&world);
    let plan = compose_frame(
        &scene,
        query::background(&world),
        grid.tile_length(),
        None,
    )?;

    print_canvas(&plan, grid.columns(), grid.rows(), grid.tile_length());
    print_supply_report(&plan, &scene);

    Ok(())
}

/// Placement sequence exercising roads, turbo roads, cities, and coverage.
fn demo_script() -> Vec<(ToolKind, CellCoord)> {
    let road = |x, y| (ToolKind::Road { turbo: false }, CellCoord::new(x, y));
    let turbo = |x, y| (ToolKind::Road { turbo: true }, CellCoord::new(x, y));

    vec![
        (
            ToolKind::City {
                requirements: vec![BatteryTier::Tier1, BatteryTier::Tier2, BatteryTier::Tier3],
            },
            CellCoord::new(5, 4),
        ),
        (
            ToolKind::ServiceCenter {
                tier: BatteryTier::Tier1,
            },
            CellCoord::new(0, 5),
        ),
        road(1, 5),
        road(2, 5),
        road(3, 5),
        road(4, 5),
        road(8, 5),
        road(9, 5),
        (
            ToolKind::ServiceCenter {
                tier: BatteryTier::Tier2,
            },
            CellCoord::new(10, 4),
        ),
        turbo(1, 9),
        turbo(2, 9),
        turbo(3, 9),
        // Lands inside the city plate and demonstrates overlap rejection.
        road(6, 5),
    ]
}

fn print_canvas(plan: &FramePlan, columns: u32, rows: u32, tile_length: f32) {
    let width = columns as usize;
    let height = rows as usize;
    let mut canvas = vec![vec!['.'; width]; height];

    for tile in &plan.tiles {
        let cell_x = (tile.rect.position.x / tile_length).round() as i64;
        let cell_y = (tile.rect.position.y / tile_length).round() as i64;
        let cell_w = (tile.rect.size.x / tile_length).round() as i64;
        let cell_h = (tile.rect.size.y / tile_length).round() as i64;
        let glyph = glyph_for(tile.asset);

        for dy in 0..cell_h {
            for dx in 0..cell_w {
                let x = cell_x + dx;
                let y = cell_y + dy;
                if x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height {
                    canvas[y as usize][x as usize] = glyph;
                }
            }
        }
    }

    for row in canvas {
        println!("{}", row.into_iter().collect::<String>());
    }
}

fn glyph_for(asset: &str) -> char {
    let base = asset.strip_prefix("turbo_").unwrap_or(asset);
    match base {
        "nature_plate" => '.',
        "road_horizontal" => '-',
        "road_vertical" => '|',
        "city_plate" => '#',
        "city" => 'C',
        "service_center_1" => '1',
        "service_center_2" => '2',
        "service_center_3" => '3',
        _ if base.starts_with("road_") => '+',
        _ => '?',
    }
}

fn print_supply_report(plan: &FramePlan, scene: &voltgrid_core::SceneView) {
    for city in scene.cities() {
        let ElementKind::City { requirements } = &city.kind else {
            continue;
        };
        if requirements.is_empty() {
            continue;
        }

        println!("city #{}:", city.id.get());
        for badge in plan.badges.iter().filter(|badge| badge.city == city.id) {
            let status = if badge.fulfilled { "supplied" } else { "missing" };
            println!("  {} {status}", badge.asset());
        }
    }
}
