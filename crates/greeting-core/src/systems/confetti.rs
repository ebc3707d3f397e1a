//! Burst emitter and the self-terminating confetti render loop.

use glam::Vec2;

use crate::core::rng::Rng;
use crate::renderer::surface::Surface;
use crate::systems::particle::Particle;

/// Render loop state. The host requests animation frames only while `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Idle,
    Running,
}

/// Owns the active particle set and the loop state machine.
pub struct ConfettiEmitter {
    particles: Vec<Particle>,
    state: LoopState,
    surface_size: Vec2,
    burst_size: usize,
    rng: Rng,
}

impl ConfettiEmitter {
    pub const DEFAULT_BURST_SIZE: usize = 50;

    pub fn new(surface_size: Vec2, burst_size: usize, seed: u64) -> Self {
        Self {
            particles: Vec::with_capacity(burst_size * 4),
            state: LoopState::Idle,
            surface_size,
            burst_size,
            rng: Rng::new(seed.wrapping_add(7919)),
        }
    }

    /// Emit one burst from the surface centre.
    /// Returns true if this call moved the loop from idle to running.
    pub fn fire_burst(&mut self) -> bool {
        let origin = self.surface_size * 0.5;
        for _ in 0..self.burst_size {
            self.particles.push(Particle::spawn(origin, &mut self.rng));
        }
        log::debug!("confetti burst: {} particles active", self.particles.len());

        if self.state == LoopState::Running {
            return false;
        }
        self.state = LoopState::Running;
        true
    }

    /// One loop iteration: clear, update and draw every particle, cull the dead.
    /// Transitions to `Idle` once nothing is left.
    pub fn frame(&mut self, surface: &mut dyn Surface) -> LoopState {
        if self.state == LoopState::Idle {
            return self.state;
        }

        surface.clear();
        self.particles.retain_mut(|p| {
            p.update();
            p.render(surface);
            !p.is_expired()
        });

        if self.particles.is_empty() {
            self.state = LoopState::Idle;
        }
        self.state
    }

    /// Track new surface dimensions. In-flight particles are untouched.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.surface_size = Vec2::new(width, height);
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn surface_size(&self) -> Vec2 {
        self.surface_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::{DrawCall, RecordingSurface};

    fn emitter() -> ConfettiEmitter {
        ConfettiEmitter::new(Vec2::new(800.0, 600.0), ConfettiEmitter::DEFAULT_BURST_SIZE, 42)
    }

    #[test]
    fn burst_spawns_fifty_at_centre_and_starts_loop() {
        let mut e = emitter();
        assert_eq!(e.state(), LoopState::Idle);
        assert!(e.fire_burst());
        assert_eq!(e.len(), 50);
        assert!(e.is_running());
        for p in e.particles() {
            assert_eq!(p.pos, Vec2::new(400.0, 300.0));
        }
    }

    #[test]
    fn burst_while_running_only_grows_the_set() {
        let mut e = emitter();
        let mut surface = RecordingSurface::new(800.0, 600.0);
        e.fire_burst();
        e.frame(&mut surface);
        let n = e.len();
        assert!(!e.fire_burst(), "second burst must not start another loop");
        assert_eq!(e.len(), n + 50);
        assert!(e.is_running());
    }

    #[test]
    fn frame_clears_before_drawing_every_particle() {
        let mut e = emitter();
        let mut surface = RecordingSurface::new(800.0, 600.0);
        e.fire_burst();
        e.frame(&mut surface);
        assert_eq!(surface.calls.first(), Some(&DrawCall::Clear));
        assert_eq!(surface.rects_since_clear().len(), 50);
        assert_eq!(surface.current_alpha(), 1.0);
    }

    #[test]
    fn particles_removed_exactly_when_life_runs_out() {
        let mut e = emitter();
        let mut surface = RecordingSurface::new(800.0, 600.0);
        e.fire_burst();
        for frame in 1..100 {
            assert_eq!(e.frame(&mut surface), LoopState::Running, "frame {}", frame);
            assert_eq!(e.len(), 50);
            assert!(e.particles().iter().all(|p| p.life == 100 - frame));
        }
        assert_eq!(e.frame(&mut surface), LoopState::Idle);
        assert!(e.is_empty());
    }

    #[test]
    fn staggered_bursts_expire_independently() {
        let mut e = emitter();
        let mut surface = RecordingSurface::new(800.0, 600.0);
        e.fire_burst();
        for _ in 0..40 {
            e.frame(&mut surface);
        }
        e.fire_burst();
        for _ in 0..60 {
            e.frame(&mut surface);
        }
        // First burst is gone, the second has 40 frames left.
        assert_eq!(e.len(), 50);
        assert!(e.particles().iter().all(|p| p.life == 40));
        for _ in 0..40 {
            e.frame(&mut surface);
        }
        assert_eq!(e.state(), LoopState::Idle);
    }

    #[test]
    fn idle_frame_draws_nothing() {
        let mut e = emitter();
        let mut surface = RecordingSurface::new(800.0, 600.0);
        assert_eq!(e.frame(&mut surface), LoopState::Idle);
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn resize_keeps_particles_and_moves_origin() {
        let mut e = emitter();
        e.fire_burst();
        e.resize(400.0, 200.0);
        assert_eq!(e.len(), 50);
        assert!(e.is_running());
        e.fire_burst();
        assert_eq!(e.particles().last().map(|p| p.pos), Some(Vec2::new(200.0, 100.0)));
    }
}
