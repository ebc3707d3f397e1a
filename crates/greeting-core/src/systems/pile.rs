//! Photo pile: tiles drop one by one into a loose heap, then scatter.
//!
//! Stage 1 appends every tile immediately and lands tile `i` after
//! `i * stagger_ms`. Stage 2 fires once, `spread_pause_ms` after the last
//! landing, and re-transforms every tile in the pile.

use glam::Vec2;

use crate::api::types::{PageOp, Task, TileId, TileTransform};
use crate::core::rng::Rng;
use crate::core::time::Timeline;

/// Timing and geometry for the pile animation.
#[derive(Debug, Clone)]
pub struct PileConfig {
    /// Delay between consecutive tile landings (ms).
    pub stagger_ms: f64,
    /// Pause between the last landing and the spread (ms).
    pub spread_pause_ms: f64,
    /// Pile-stage offset is drawn from [-jitter, jitter) on each axis.
    pub pile_jitter: i32,
    /// Pile-stage rotation is drawn from [-rotation, rotation) degrees.
    pub pile_rotation: i32,
    /// Viewports narrower than this use the narrow spread.
    pub narrow_breakpoint: f32,
    pub narrow_range: i32,
    pub wide_range: i32,
    /// Spread-stage rotation is drawn from [-rotation, rotation) degrees.
    pub spread_rotation: i32,
    pub narrow_scale: f32,
    pub wide_scale: f32,
}

impl Default for PileConfig {
    fn default() -> Self {
        Self {
            stagger_ms: 200.0,
            spread_pause_ms: 1000.0,
            pile_jitter: 20,
            pile_rotation: 15,
            narrow_breakpoint: 480.0,
            narrow_range: 80,
            wide_range: 300,
            spread_rotation: 30,
            narrow_scale: 1.0,
            wide_scale: 0.8,
        }
    }
}

/// One image tile in the pile.
#[derive(Debug, Clone)]
pub struct PileTile {
    pub id: TileId,
    pub image: String,
    pub rotation_deg: f32,
    pub pile_offset: Vec2,
    pub landed: bool,
    /// Set once the spread stage has moved this tile.
    pub spread: Option<TileTransform>,
}

impl PileTile {
    /// Transform applied when the tile lands on the pile.
    pub fn pile_transform(&self) -> TileTransform {
        TileTransform {
            translate: self.pile_offset,
            rotate_deg: self.rotation_deg,
            scale: None,
        }
    }
}

/// Builds the pile once and drives both stages from timeline tasks.
pub struct PileSequencer {
    config: PileConfig,
    images: Vec<String>,
    tiles: Vec<PileTile>,
    opened: bool,
    spread_at: Option<f64>,
    rng: Rng,
}

impl PileSequencer {
    pub fn new(images: Vec<String>, config: PileConfig, seed: u64) -> Self {
        Self {
            config,
            images,
            tiles: Vec::new(),
            opened: false,
            spread_at: None,
            rng: Rng::new(seed.wrapping_add(104_729)),
        }
    }

    /// Shuffle the images, append a tile per image and schedule both stages.
    /// Only the first call does anything; returns whether this call built the pile.
    pub fn open(&mut self, timeline: &mut Timeline<Task>, ops: &mut Vec<PageOp>) -> bool {
        if self.opened {
            return false;
        }
        self.opened = true;

        self.rng.shuffle(&mut self.images);

        let stagger = self.config.stagger_ms;
        for (i, image) in self.images.iter().enumerate() {
            let id = TileId(i as u32);
            let rotation_deg = self.rng.centered(self.config.pile_rotation) as f32;
            let pile_offset = Vec2::new(
                self.rng.centered(self.config.pile_jitter) as f32,
                self.rng.centered(self.config.pile_jitter) as f32,
            );

            ops.push(PageOp::AppendTile { tile: id, image: image.clone() });
            self.tiles.push(PileTile {
                id,
                image: image.clone(),
                rotation_deg,
                pile_offset,
                landed: false,
                spread: None,
            });
            timeline.set_timeout(i as f64 * stagger, Task::LandTile(id));
        }

        let last_drop = self.tiles.len().saturating_sub(1) as f64 * stagger;
        let spread_delay = last_drop + self.config.spread_pause_ms;
        timeline.set_timeout(spread_delay, Task::SpreadPile);
        self.spread_at = Some(timeline.now() + spread_delay);

        log::info!(
            "photo pile opened: {} tiles, spread in {} ms",
            self.tiles.len(),
            spread_delay
        );
        true
    }

    /// Stage 1 for a single tile.
    pub fn land(&mut self, id: TileId, ops: &mut Vec<PageOp>) {
        let Some(tile) = self.tiles.iter_mut().find(|t| t.id == id) else {
            return;
        };
        tile.landed = true;
        ops.push(PageOp::LandTile { tile: id, transform: tile.pile_transform() });
    }

    /// Stage 2: scatter every tile currently in the pile.
    pub fn spread(&mut self, viewport_width: f32, ops: &mut Vec<PageOp>) {
        let narrow = viewport_width < self.config.narrow_breakpoint;
        let (range, scale) = if narrow {
            (self.config.narrow_range, self.config.narrow_scale)
        } else {
            (self.config.wide_range, self.config.wide_scale)
        };
        let offset = range / 2;

        for tile in &mut self.tiles {
            let transform = TileTransform {
                translate: Vec2::new(
                    self.rng.centered(offset) as f32,
                    self.rng.centered(offset) as f32,
                ),
                rotate_deg: self.rng.centered(self.config.spread_rotation) as f32,
                scale: Some(scale),
            };
            tile.spread = Some(transform);
            ops.push(PageOp::SpreadTile { tile: tile.id, transform });
        }
        log::debug!("photo pile spread (narrow: {})", narrow);
    }

    pub fn is_opened(&self) -> bool {
        self.opened
    }

    /// Clock time at which the spread is scheduled, once opened.
    pub fn spread_at(&self) -> Option<f64> {
        self.spread_at
    }

    pub fn tiles(&self) -> &[PileTile] {
        &self.tiles
    }

    /// Image order after the opening shuffle.
    pub fn images(&self) -> &[String] {
        &self.images
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("R/photo-{i}.jpg")).collect()
    }

    fn run(seq: &mut PileSequencer, tl: &mut Timeline<Task>, until: f64, width: f32, ops: &mut Vec<PageOp>) {
        while let Some((_, task)) = tl.pop_due(until) {
            match task {
                Task::LandTile(id) => seq.land(id, ops),
                Task::SpreadPile => seq.spread(width, ops),
                _ => {}
            }
        }
        tl.settle(until);
    }

    #[test]
    fn open_appends_every_tile_eagerly() {
        let mut seq = PileSequencer::new(images(5), PileConfig::default(), 1);
        let mut tl = Timeline::new();
        let mut ops = Vec::new();
        assert!(seq.open(&mut tl, &mut ops));
        assert_eq!(ops.len(), 5);
        assert!(ops.iter().all(|op| matches!(op, PageOp::AppendTile { .. })));
        // One landing per tile plus the spread.
        assert_eq!(tl.len(), 6);
        assert!(seq.tiles().iter().all(|t| !t.landed));
    }

    #[test]
    fn shuffle_keeps_the_image_set() {
        let mut seq = PileSequencer::new(images(30), PileConfig::default(), 9);
        let mut tl = Timeline::new();
        seq.open(&mut tl, &mut Vec::new());
        let mut shuffled = seq.images().to_vec();
        shuffled.sort();
        let mut expected = images(30);
        expected.sort();
        assert_eq!(shuffled, expected);
    }

    #[test]
    fn tiles_land_on_a_two_hundred_ms_stagger() {
        let mut seq = PileSequencer::new(images(4), PileConfig::default(), 2);
        let mut tl = Timeline::new();
        let mut ops = Vec::new();
        seq.open(&mut tl, &mut ops);
        ops.clear();

        run(&mut seq, &mut tl, 0.0, 1024.0, &mut ops);
        assert_eq!(seq.tiles().iter().filter(|t| t.landed).count(), 1);
        run(&mut seq, &mut tl, 399.0, 1024.0, &mut ops);
        assert_eq!(seq.tiles().iter().filter(|t| t.landed).count(), 2);
        run(&mut seq, &mut tl, 600.0, 1024.0, &mut ops);
        assert_eq!(seq.tiles().iter().filter(|t| t.landed).count(), 4);

        let landed: Vec<TileId> = ops
            .iter()
            .filter_map(|op| match op {
                PageOp::LandTile { tile, .. } => Some(*tile),
                _ => None,
            })
            .collect();
        assert_eq!(landed, vec![TileId(0), TileId(1), TileId(2), TileId(3)]);
    }

    #[test]
    fn pile_transforms_stay_in_range() {
        let mut seq = PileSequencer::new(images(30), PileConfig::default(), 5);
        let mut tl = Timeline::new();
        seq.open(&mut tl, &mut Vec::new());
        for tile in seq.tiles() {
            assert!((-15.0..15.0).contains(&tile.rotation_deg));
            assert!((-20.0..20.0).contains(&tile.pile_offset.x));
            assert!((-20.0..20.0).contains(&tile.pile_offset.y));
            assert_eq!(tile.rotation_deg.fract(), 0.0);
        }
    }

    #[test]
    fn spread_waits_a_second_after_the_last_landing() {
        let mut seq = PileSequencer::new(images(30), PileConfig::default(), 3);
        let mut tl = Timeline::new();
        let mut ops = Vec::new();
        seq.open(&mut tl, &mut ops);
        assert_eq!(seq.spread_at(), Some(29.0 * 200.0 + 1000.0));

        run(&mut seq, &mut tl, 6799.0, 1024.0, &mut ops);
        assert!(seq.tiles().iter().all(|t| t.landed && t.spread.is_none()));
        run(&mut seq, &mut tl, 6800.0, 1024.0, &mut ops);
        assert!(seq.tiles().iter().all(|t| t.spread.is_some()));
        assert!(tl.is_empty());
    }

    #[test]
    fn wide_viewport_spreads_three_hundred_and_scales_down() {
        let mut seq = PileSequencer::new(images(30), PileConfig::default(), 4);
        let mut ops = Vec::new();
        seq.open(&mut Timeline::new(), &mut ops);
        seq.spread(1280.0, &mut ops);
        for tile in seq.tiles() {
            let t = tile.spread.unwrap();
            assert!((-150.0..150.0).contains(&t.translate.x));
            assert!((-150.0..150.0).contains(&t.translate.y));
            assert!((-30.0..30.0).contains(&t.rotate_deg));
            assert_eq!(t.scale, Some(0.8));
        }
    }

    #[test]
    fn narrow_viewport_spreads_eighty_at_full_scale() {
        let mut seq = PileSequencer::new(images(30), PileConfig::default(), 4);
        let mut ops = Vec::new();
        seq.open(&mut Timeline::new(), &mut ops);
        seq.spread(479.0, &mut ops);
        for tile in seq.tiles() {
            let t = tile.spread.unwrap();
            assert!((-40.0..40.0).contains(&t.translate.x));
            assert!((-40.0..40.0).contains(&t.translate.y));
            assert_eq!(t.scale, Some(1.0));
        }
    }

    #[test]
    fn second_open_builds_and_schedules_nothing() {
        let mut seq = PileSequencer::new(images(10), PileConfig::default(), 6);
        let mut tl = Timeline::new();
        let mut ops = Vec::new();
        assert!(seq.open(&mut tl, &mut ops));
        run(&mut seq, &mut tl, 10_000.0, 1024.0, &mut ops);
        ops.clear();

        assert!(!seq.open(&mut tl, &mut ops));
        assert!(ops.is_empty());
        assert!(tl.is_empty());
        assert_eq!(seq.tiles().len(), 10);
    }

    #[test]
    fn empty_image_list_still_completes() {
        let mut seq = PileSequencer::new(Vec::new(), PileConfig::default(), 6);
        let mut tl = Timeline::new();
        let mut ops = Vec::new();
        assert!(seq.open(&mut tl, &mut ops));
        assert_eq!(seq.spread_at(), Some(1000.0));
        run(&mut seq, &mut tl, 1000.0, 1024.0, &mut ops);
        assert!(ops.is_empty());
    }
}
