//! Confetti particle: ballistic motion with gravity, air drag and a linear fade.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::core::rng::Rng;
use crate::renderer::surface::{Hsl, Surface};

/// A single confetti square.
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: Hsl,
    /// Frames left to live.
    pub life: i32,
    pub gravity: f32,
    pub drag: f32,
}

impl Particle {
    pub const LIFE: i32 = 100;
    pub const GRAVITY: f32 = 0.2;
    pub const DRAG: f32 = 0.96;
    pub const SIZE_RANGE: (f32, f32) = (4.0, 10.0);
    pub const SPEED_RANGE: (f32, f32) = (5.0, 15.0);
    const SATURATION: f32 = 80.0;
    const LIGHTNESS: f32 = 60.0;

    /// Spawn a particle at `origin` with random size, hue, heading and speed.
    pub fn spawn(origin: Vec2, rng: &mut Rng) -> Self {
        let size = rng.range(Self::SIZE_RANGE.0, Self::SIZE_RANGE.1);
        let hue = rng.range(0.0, 360.0);
        let angle = rng.range(0.0, TAU);
        let speed = rng.range(Self::SPEED_RANGE.0, Self::SPEED_RANGE.1);

        Particle {
            pos: origin,
            vel: Vec2::from_angle(angle) * speed,
            size,
            color: Hsl::new(hue, Self::SATURATION, Self::LIGHTNESS),
            life: Self::LIFE,
            gravity: Self::GRAVITY,
            drag: Self::DRAG,
        }
    }

    /// Advance one frame.
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += self.gravity;
        self.vel *= self.drag;
        self.life -= 1;
    }

    /// Whether the particle should be dropped from the active set.
    pub fn is_expired(&self) -> bool {
        self.life <= 0
    }

    /// Opacity in [0, 1], fading linearly with remaining life.
    pub fn alpha(&self) -> f32 {
        (self.life as f32 / Self::LIFE as f32).clamp(0.0, 1.0)
    }

    /// Draw as a filled square; global alpha is restored to 1 afterwards.
    pub fn render(&self, surface: &mut dyn Surface) {
        surface.set_fill(self.color);
        surface.set_alpha(self.alpha());
        surface.fill_rect(self.pos.x, self.pos.y, self.size, self.size);
        surface.set_alpha(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::{DrawCall, RecordingSurface};

    fn still(pos: Vec2) -> Particle {
        Particle {
            pos,
            vel: Vec2::ZERO,
            size: 5.0,
            color: Hsl::new(0.0, 80.0, 60.0),
            life: Particle::LIFE,
            gravity: Particle::GRAVITY,
            drag: Particle::DRAG,
        }
    }

    #[test]
    fn spawn_respects_ranges() {
        let mut rng = Rng::new(42);
        let origin = Vec2::new(400.0, 300.0);
        for _ in 0..500 {
            let p = Particle::spawn(origin, &mut rng);
            assert_eq!(p.pos, origin);
            assert!((4.0..10.0).contains(&p.size), "size {}", p.size);
            assert!((0.0..360.0).contains(&p.color.hue), "hue {}", p.color.hue);
            assert_eq!(p.color.saturation, 80.0);
            assert_eq!(p.color.lightness, 60.0);
            let speed = p.vel.length();
            assert!(speed >= 4.999 && speed <= 15.001, "speed {}", speed);
            assert_eq!(p.life, 100);
            assert_eq!(p.gravity, 0.2);
            assert_eq!(p.drag, 0.96);
        }
    }

    #[test]
    fn update_moves_then_accelerates_then_drags() {
        let mut p = still(Vec2::ZERO);
        p.vel = Vec2::new(10.0, -5.0);
        p.update();
        assert_eq!(p.pos, Vec2::new(10.0, -5.0));
        assert!((p.vel.x - 9.6).abs() < 1e-5);
        assert!((p.vel.y - (-5.0 + 0.2) * 0.96).abs() < 1e-5);
        assert_eq!(p.life, 99);
    }

    #[test]
    fn life_never_increases_and_expires_after_hundred_frames() {
        let mut p = still(Vec2::ZERO);
        let mut last = p.life;
        for frame in 1..=100 {
            p.update();
            assert!(p.life < last);
            last = p.life;
            assert_eq!(p.is_expired(), frame == 100, "frame {}", frame);
        }
    }

    #[test]
    fn gravity_pulls_down() {
        let mut p = still(Vec2::ZERO);
        for _ in 0..10 {
            p.update();
        }
        assert!(p.pos.y > 0.0);
        assert_eq!(p.pos.x, 0.0);
    }

    #[test]
    fn render_fades_and_restores_alpha() {
        let mut p = still(Vec2::new(3.0, 4.0));
        p.life = 25;
        let mut surface = RecordingSurface::new(100.0, 100.0);
        p.render(&mut surface);
        assert_eq!(
            surface.calls,
            vec![
                DrawCall::Fill(p.color),
                DrawCall::Alpha(0.25),
                DrawCall::Rect { x: 3.0, y: 4.0, size: 5.0, alpha: 0.25 },
                DrawCall::Alpha(1.0),
            ]
        );
        assert_eq!(surface.current_alpha(), 1.0);
    }
}
