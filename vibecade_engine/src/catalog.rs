//! The arcade's default contents: which cabinets exist and where they stand,
//! plus the static furniture manifest the viewer turns into geometry.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::bounds::BoundaryVolume;

/// Spacing between a corner and the nearest cabinet on a wall.
const CORNER_INSET: f32 = 9.0;
/// Spacing between cabinets that overflow onto the front wall.
const FRONT_WALL_SPACING: f32 = 6.0;
/// Walls stand this far outside the NPC bounds.
const WALL_CLEARANCE: f32 = 1.0;
const ROOM_HEIGHT: f32 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CabinetSpec {
    pub name: String,
    pub locator: String,
    pub cabinet_color: [f32; 3],
    pub frame_color: [f32; 3],
}

pub fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

fn cabinet(name: &str, locator: &str, cabinet_color: u32, frame_color: u32) -> CabinetSpec {
    CabinetSpec {
        name: name.to_string(),
        locator: locator.to_string(),
        cabinet_color: rgb(cabinet_color),
        frame_color: rgb(frame_color),
    }
}

/// The shipped lineup, in registration order.
pub fn default_cabinets() -> Vec<CabinetSpec> {
    vec![
        cabinet(
            "Hot Air Balloon",
            "https://www.hotairvibe.com/game",
            0xff6b6b,
            0xffd93d,
        ),
        cabinet("Shooter World", "http://ShooterWorldAi.com", 0x2ecc71, 0x27ae60),
        cabinet("Flight Sim", "https://fly.pieter.com/", 0x3498db, 0x2980b9),
        cabinet("Vibe Sail", "https://vibesail.com/", 0x9b59b6, 0x8e44ad),
        cabinet(
            "Bomberman",
            "https://bomberman-bice.vercel.app/",
            0xe74c3c,
            0xc0392b,
        ),
        cabinet("Duke", "https://duke.jobboardsearch.com/", 0xf1c40f, 0xf39c12),
        cabinet(
            "Space Shooter",
            "https://codepen.io/hyneuclx-the-looper/full/pvobrzL",
            0x1abc9c,
            0x16a085,
        ),
    ]
}

/// Position and heading for the `index`-th cabinet: two per wall (back,
/// left, right), then the remainder fanned out from the middle of the front
/// wall. Cabinets face into the room.
pub fn wall_placement(index: usize, bounds: &BoundaryVolume) -> (Vec3, f32) {
    let along_x = |slot: usize| {
        bounds.min_x + CORNER_INSET + slot as f32 * (bounds.width() - 2.0 * CORNER_INSET)
    };
    let along_z = |slot: usize| {
        bounds.min_z + CORNER_INSET + slot as f32 * (bounds.depth() - 2.0 * CORNER_INSET)
    };

    match index {
        0 | 1 => (Vec3::new(along_x(index), 0.0, bounds.min_z), 0.0),
        2 | 3 => (Vec3::new(bounds.min_x, 0.0, along_z(index - 2)), FRAC_PI_2),
        4 | 5 => (Vec3::new(bounds.max_x, 0.0, along_z(index - 4)), -FRAC_PI_2),
        _ => {
            let slot = index - 6;
            let rank = slot.div_ceil(2) as f32;
            let side = if slot % 2 == 1 { 1.0 } else { -1.0 };
            let x = bounds.center().x + side * rank * FRONT_WALL_SPACING;
            (Vec3::new(x, 0.0, bounds.max_z), PI)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropKind {
    Floor,
    Wall,
    Ceiling,
    Window,
    Chair,
    BarCounter,
    BarStool,
    Bartender,
    Drink,
}

/// A piece of static set dressing. `extent` is the prop's footprint in its
/// local frame; the viewer decides how to build it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneProp {
    pub kind: PropKind,
    pub position: [f32; 3],
    pub rotation_y: f32,
    pub extent: [f32; 3],
}

impl SceneProp {
    fn new(kind: PropKind, position: [f32; 3], rotation_y: f32, extent: [f32; 3]) -> Self {
        Self {
            kind,
            position,
            rotation_y,
            extent,
        }
    }
}

/// Shell of the room sized from `bounds`, the row of chairs, and the bar.
pub fn furnish(bounds: &BoundaryVolume) -> Vec<SceneProp> {
    let center = bounds.center();
    let width = bounds.width() + 2.0 * WALL_CLEARANCE;
    let depth = bounds.depth() + 2.0 * WALL_CLEARANCE;
    let back_z = bounds.min_z - WALL_CLEARANCE;
    let half_height = ROOM_HEIGHT * 0.5;

    let mut props = vec![
        SceneProp::new(PropKind::Floor, [center.x, 0.0, center.z], 0.0, [width, 0.0, depth]),
        SceneProp::new(
            PropKind::Ceiling,
            [center.x, ROOM_HEIGHT, center.z],
            0.0,
            [width, 0.0, depth],
        ),
        SceneProp::new(
            PropKind::Wall,
            [center.x, half_height, back_z],
            0.0,
            [width, ROOM_HEIGHT, 0.0],
        ),
        SceneProp::new(
            PropKind::Wall,
            [bounds.min_x - WALL_CLEARANCE, half_height, center.z],
            FRAC_PI_2,
            [depth, ROOM_HEIGHT, 0.0],
        ),
        SceneProp::new(
            PropKind::Wall,
            [bounds.max_x + WALL_CLEARANCE, half_height, center.z],
            -FRAC_PI_2,
            [depth, ROOM_HEIGHT, 0.0],
        ),
    ];

    for i in 0..5 {
        props.push(SceneProp::new(
            PropKind::Window,
            [center.x - 15.0 + i as f32 * 7.0, half_height, back_z + 0.1],
            0.0,
            [3.0, 2.0, 0.0],
        ));
    }

    for i in 0..8 {
        props.push(SceneProp::new(
            PropKind::Chair,
            [center.x - 20.0 + i as f32 * 5.0, 0.0, center.z + 10.0],
            0.0,
            [0.5, 1.1, 0.5],
        ));
    }

    let bar_z = center.z + 15.0;
    props.push(SceneProp::new(
        PropKind::BarCounter,
        [center.x, 1.0, bar_z],
        0.0,
        [8.0, 1.0, 1.0],
    ));
    for i in -3..=3 {
        props.push(SceneProp::new(
            PropKind::BarStool,
            [center.x + i as f32 * 2.0, 0.0, bar_z - 1.0],
            0.0,
            [0.6, 1.0, 0.6],
        ));
    }
    props.push(SceneProp::new(
        PropKind::Bartender,
        [center.x, 0.0, bar_z + 1.0],
        PI,
        [0.6, 1.6, 0.6],
    ));
    for i in -2..=2 {
        props.push(SceneProp::new(
            PropKind::Drink,
            [center.x + i as f32, 1.5, bar_z + 0.1],
            0.0,
            [0.2, 0.3, 0.2],
        ));
    }

    props
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placements() -> Vec<(Vec3, f32)> {
        let bounds = BoundaryVolume::default();
        (0..7).map(|index| wall_placement(index, &bounds)).collect()
    }

    #[test]
    fn default_lineup_lands_on_the_walls() {
        let expected = [
            (Vec3::new(-15.0, 0.0, -24.0), 0.0),
            (Vec3::new(15.0, 0.0, -24.0), 0.0),
            (Vec3::new(-24.0, 0.0, -15.0), FRAC_PI_2),
            (Vec3::new(-24.0, 0.0, 15.0), FRAC_PI_2),
            (Vec3::new(24.0, 0.0, -15.0), -FRAC_PI_2),
            (Vec3::new(24.0, 0.0, 15.0), -FRAC_PI_2),
            (Vec3::new(0.0, 0.0, 24.0), PI),
        ];
        for ((position, rotation), (want_position, want_rotation)) in
            placements().into_iter().zip(expected)
        {
            assert!((position - want_position).length() < 1e-5, "{position:?}");
            assert_eq!(rotation, want_rotation);
        }
    }

    #[test]
    fn overflow_cabinets_alternate_around_front_center() {
        let bounds = BoundaryVolume::default();
        let xs: Vec<f32> = (6..11)
            .map(|index| wall_placement(index, &bounds).0.x)
            .collect();
        assert_eq!(xs, vec![0.0, 6.0, -6.0, 12.0, -12.0]);
    }

    #[test]
    fn default_catalog_has_unique_names() {
        let cabinets = default_cabinets();
        assert_eq!(cabinets.len(), 7);
        let mut names: Vec<&str> = cabinets.iter().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 7);
        assert_eq!(cabinets[2].locator, "https://fly.pieter.com/");
    }

    #[test]
    fn rgb_unpacks_channels() {
        assert_eq!(rgb(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(rgb(0x00ff00), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn furniture_counts_match_layout() {
        let props = furnish(&BoundaryVolume::default());
        let count = |kind| props.iter().filter(|prop| prop.kind == kind).count();
        assert_eq!(count(PropKind::Wall), 3);
        assert_eq!(count(PropKind::Window), 5);
        assert_eq!(count(PropKind::Chair), 8);
        assert_eq!(count(PropKind::BarStool), 7);
        assert_eq!(count(PropKind::Drink), 5);
        assert_eq!(count(PropKind::BarCounter), 1);
    }
}
