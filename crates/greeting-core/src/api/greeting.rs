use glam::Vec2;

use crate::api::types::{PageOp, SectionId, Task};
use crate::assets::manifest::{ManifestError, PageManifest};
use crate::core::time::Timeline;
use crate::input::gesture::Gesture;
use crate::renderer::surface::Surface;
use crate::systems::celebration::Celebration;
use crate::systems::confetti::ConfettiEmitter;
use crate::systems::navigator::Navigator;
use crate::systems::pile::{PileConfig, PileSequencer};

/// Tunables for the page, provided by the host.
#[derive(Debug, Clone)]
pub struct GreetingConfig {
    /// Initial viewport width in CSS pixels (default: 800).
    pub viewport_width: f32,
    /// Initial viewport height in CSS pixels (default: 600).
    pub viewport_height: f32,
    /// Particles per confetti burst (default: 50).
    pub burst_size: usize,
    /// Total bursts in the post-wish celebration, the immediate one included (default: 11).
    pub celebration_bursts: u32,
    /// Gap between celebration bursts in ms (default: 300).
    pub celebration_interval_ms: f64,
    /// Delay before the "view photos" control appears in ms (default: 2000).
    pub reveal_delay_ms: f64,
    /// Photo pile timing and geometry.
    pub pile: PileConfig,
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 600.0,
            burst_size: ConfettiEmitter::DEFAULT_BURST_SIZE,
            celebration_bursts: 11,
            celebration_interval_ms: 300.0,
            reveal_delay_ms: 2000.0,
            pile: PileConfig::default(),
        }
    }
}

/// The whole interaction layer: gesture bindings over the confetti emitter,
/// the section navigator, the celebration run and the photo pile.
///
/// The host forwards gestures through [`Greeting::handle`], calls
/// [`Greeting::tick`] once per animation frame while [`Greeting::wants_frame`]
/// holds, and applies the drained [`PageOp`]s to the page.
pub struct Greeting {
    config: GreetingConfig,
    manifest: PageManifest,
    viewport: Vec2,
    timeline: Timeline<Task>,
    confetti: ConfettiEmitter,
    navigator: Navigator,
    celebration: Celebration,
    pile: PileSequencer,
    card_open: bool,
    flame_out: bool,
    initialized: bool,
    bursts: u32,
    ops: Vec<PageOp>,
}

impl Greeting {
    pub fn new(config: GreetingConfig, manifest: PageManifest, seed: u64) -> Result<Self, ManifestError> {
        manifest.validate()?;

        let viewport = Vec2::new(config.viewport_width, config.viewport_height);
        let navigator = Navigator::new(manifest.sections.iter().map(|s| SectionId::from(s.as_str())));
        let pile = PileSequencer::new(manifest.images.clone(), config.pile.clone(), seed);

        Ok(Self {
            confetti: ConfettiEmitter::new(viewport, config.burst_size, seed),
            celebration: Celebration::new(config.celebration_bursts),
            timeline: Timeline::new(),
            navigator,
            pile,
            viewport,
            manifest,
            config,
            card_open: false,
            flame_out: false,
            initialized: false,
            bursts: 0,
            ops: Vec::with_capacity(64),
        })
    }

    /// Post-setup step: append the photo-pile section and its dot.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        let pile_section = SectionId::from(self.manifest.pile_section.as_str());
        self.navigator.append_section(pile_section, &mut self.ops);
        self.initialized = true;
        log::info!(
            "greeting initialized: {} sections, {} photos",
            self.navigator.sections().len(),
            self.manifest.images.len()
        );
    }

    /// React to one user gesture.
    pub fn handle(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::CardClick { on_continue } => self.toggle_card(on_continue),
            Gesture::FlameClick => self.blow_out_flame(),
            Gesture::NavButton { next: Some(target) } | Gesture::DotClick { target: Some(target) } => {
                self.navigator.navigate_to(&target, &mut self.ops);
            }
            Gesture::NavButton { next: None } | Gesture::DotClick { target: None } => {}
            Gesture::RevealPhotosClick => self.open_photos(),
            Gesture::Resize { width, height } => self.resize(width, height),
        }
    }

    fn toggle_card(&mut self, on_continue: bool) {
        if on_continue {
            return;
        }
        self.card_open = !self.card_open;
        self.ops.push(PageOp::SetCardOpen(self.card_open));
        if self.card_open {
            self.fire_burst();
        }
    }

    fn blow_out_flame(&mut self) {
        if self.flame_out {
            log::debug!("flame already out; ignoring click");
            return;
        }
        self.flame_out = true;
        self.ops.push(PageOp::ExtinguishFlame);
        self.ops.push(PageOp::SetCaption(self.manifest.wish_caption.clone()));

        self.fire_burst();
        self.celebration
            .start(&mut self.timeline, self.config.celebration_interval_ms);
        self.timeline
            .set_timeout(self.config.reveal_delay_ms, Task::RevealPhotos);
    }

    fn open_photos(&mut self) {
        let pile_section = self.manifest.pile_section.clone();
        self.navigator.navigate_to(&pile_section, &mut self.ops);
        self.pile.open(&mut self.timeline, &mut self.ops);
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
        self.confetti.resize(width, height);
    }

    /// Emit one confetti burst, starting the render loop if it is idle.
    pub fn fire_burst(&mut self) {
        self.bursts += 1;
        self.confetti.fire_burst();
    }

    /// One host frame: run every timer due within `dt_ms`, then one confetti frame.
    pub fn tick(&mut self, dt_ms: f64, surface: &mut dyn Surface) {
        let until = self.timeline.now() + dt_ms.max(0.0);
        while let Some((_, task)) = self.timeline.pop_due(until) {
            self.run_task(task);
        }
        self.timeline.settle(until);

        if self.confetti.is_running() {
            self.confetti.frame(surface);
        }
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::CelebrationBurst => {
                if self.celebration.on_tick(&mut self.timeline) {
                    self.fire_burst();
                }
            }
            Task::RevealPhotos => self.ops.push(PageOp::RevealPhotosButton),
            Task::LandTile(id) => self.pile.land(id, &mut self.ops),
            Task::SpreadPile => self.pile.spread(self.viewport.x, &mut self.ops),
        }
    }

    /// Whether the host should keep requesting animation frames.
    pub fn wants_frame(&self) -> bool {
        self.confetti.is_running() || !self.timeline.is_empty()
    }

    /// Take the page operations produced since the last drain.
    pub fn drain_ops(&mut self) -> Vec<PageOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn confetti(&self) -> &ConfettiEmitter {
        &self.confetti
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn pile(&self) -> &PileSequencer {
        &self.pile
    }

    pub fn celebration(&self) -> &Celebration {
        &self.celebration
    }

    pub fn timeline(&self) -> &Timeline<Task> {
        &self.timeline
    }

    pub fn is_card_open(&self) -> bool {
        self.card_open
    }

    pub fn is_flame_out(&self) -> bool {
        self.flame_out
    }

    /// Total confetti bursts fired so far.
    pub fn bursts_fired(&self) -> u32 {
        self.bursts
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn config(&self) -> &GreetingConfig {
        &self.config
    }
}
