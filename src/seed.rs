//! Random scenes for demos and stress tests.

use crate::constants::{MIN_SEED_SIZE, RESET_SPREAD, SEED_SIZE_RANGE};
use crate::scene::SceneSnapshot;
use crate::types::{Arrow, CanvasBox, Endpoint, Rect};
use rand::Rng;

/// Where seeded boxes may land.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeedArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SeedArea {
    /// The small demo area near the origin.
    pub const DEMO: SeedArea = SeedArea {
        x: 64.0,
        y: 64.0,
        width: 720.0,
        height: 400.0,
    };

    /// The wide area used when reseeding for stress tests.
    pub const RESET: SeedArea = SeedArea {
        x: -RESET_SPREAD,
        y: -RESET_SPREAD,
        width: RESET_SPREAD * 2.0,
        height: RESET_SPREAD * 2.0,
    };
}

/// How seeded boxes get connected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Linking {
    /// Box i points to box i + 1.
    Chain,
    /// Like `Chain`, and the last box points back to the first.
    Ring,
}

/// `count` random boxes in `area`, linked by box-to-box arrows.
pub fn seed_scene<R: Rng>(
    rng: &mut R,
    count: usize,
    area: SeedArea,
    linking: Linking,
) -> SceneSnapshot {
    let mut snapshot = SceneSnapshot::default();

    for i in 0..count {
        let rect = Rect::new(
            area.x + rng.r#gen::<f64>() * area.width,
            area.y + rng.r#gen::<f64>() * area.height,
            MIN_SEED_SIZE + rng.r#gen::<f64>() * SEED_SIZE_RANGE,
            MIN_SEED_SIZE + rng.r#gen::<f64>() * SEED_SIZE_RANGE,
        );
        let b = CanvasBox::new(box_id(i), rect, i as i64);
        snapshot.boxes.insert(b.id.clone(), b);
    }

    let links = match linking {
        Linking::Chain => count.saturating_sub(1),
        Linking::Ring if count > 1 => count,
        Linking::Ring => 0,
    };

    for i in 0..links {
        let from = box_id(i);
        let to = box_id((i + 1) % count);
        let id = format!("arrow_{i}");
        for end in [&from, &to] {
            if let Some(b) = snapshot.boxes.get_mut(end) {
                b.arrow_ids.insert(id.clone());
            }
        }
        snapshot.arrows.insert(
            id.clone(),
            Arrow {
                id,
                from: Endpoint::boxed(from),
                to: Endpoint::boxed(to),
                flip: false,
                label: String::new(),
            },
        );
    }

    snapshot
}

fn box_id(i: usize) -> String {
    format!("box_{i}")
}
