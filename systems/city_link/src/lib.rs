#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that resolves road-to-city connections from scene snapshots.
//!
//! A road connects to a city when it touches one side of the city footprint
//! with zero gap and sits centered on that side. At most one side can hold
//! for the fixed footprints the scene places; observing two at once means the
//! scene itself is malformed, which is surfaced as a hard error rather than
//! silently resolved.

use thiserror::Error;
use voltgrid_core::{CellRect, ElementSnapshot, SceneView, Side};

/// Fatal modeling fault raised when a probe satisfies two connection sides.
///
/// Only degenerate footprint sizes can trigger this, so it signals a bug in
/// scene construction rather than a routine rejection.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("ambiguous city connection: probe matches both {first:?} and {second:?}")]
pub struct AmbiguousConnection {
    /// First side the probe matched.
    pub first: Side,
    /// Second, conflicting side the probe matched.
    pub second: Side,
}

/// Resolves the side on which the probe connects to the city, if any.
///
/// The probe must touch the city footprint with zero gap on the reported
/// side and be centered on it: its coordinate along the perpendicular axis
/// equals the city origin plus half the city's dimension on that axis
/// (integer floor). Two simultaneously matching sides yield
/// [`AmbiguousConnection`].
pub fn connection(
    city: &CellRect,
    probe: &CellRect,
) -> Result<Option<Side>, AmbiguousConnection> {
    let cx = i64::from(city.origin().x());
    let cy = i64::from(city.origin().y());
    let cw = i64::from(city.size().width());
    let ch = i64::from(city.size().height());
    let px = i64::from(probe.origin().x());
    let py = i64::from(probe.origin().y());
    let pw = i64::from(probe.size().width());
    let ph = i64::from(probe.size().height());

    let center_x = cx + cw / 2;
    let center_y = cy + ch / 2;

    let checks = [
        (Side::Left, px + pw == cx && py == center_y),
        (Side::Right, px == cx + cw && py == center_y),
        (Side::Top, py + ph == cy && px == center_x),
        (Side::Bottom, py == cy + ch && px == center_x),
    ];

    let mut resolved = None;
    for (side, matched) in checks {
        if !matched {
            continue;
        }
        match resolved {
            None => resolved = Some(side),
            Some(first) => {
                return Err(AmbiguousConnection {
                    first,
                    second: side,
                })
            }
        }
    }

    Ok(resolved)
}

/// Finds the first city in scene order the probe connects to.
///
/// First-match semantics are deliberate and observable: a road sitting
/// between two cities belongs to whichever city was drawn first, exactly as
/// the game has always behaved.
pub fn connected_city<'scene>(
    probe: &CellRect,
    scene: &'scene SceneView,
) -> Result<Option<(&'scene ElementSnapshot, Side)>, AmbiguousConnection> {
    for city in scene.cities() {
        if let Some(side) = connection(&city.region, probe)? {
            return Ok(Some((city, side)));
        }
    }
    Ok(None)
}
