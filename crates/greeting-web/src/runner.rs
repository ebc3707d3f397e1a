use greeting_core::{Gesture, Greeting};

use crate::canvas::CanvasSurface;
use crate::page::DomPage;

/// Wires the headless [`Greeting`] to the live page.
///
/// The exported wasm functions keep one of these in a `thread_local!`,
/// because wasm-bindgen cannot hold borrowed browser state across callbacks.
pub struct GreetingRunner {
    greeting: Greeting,
    page: DomPage,
    surface: CanvasSurface,
}

impl GreetingRunner {
    pub fn new(greeting: Greeting, page: DomPage, surface: CanvasSurface) -> Self {
        Self { greeting, page, surface }
    }

    /// Run the post-setup step and apply its page changes.
    pub fn init(&mut self) {
        let viewport = self.greeting.viewport();
        self.surface.resize(viewport.x, viewport.y);
        self.greeting.init();
        self.flush();
    }

    /// Forward one gesture and apply whatever it changed.
    pub fn handle(&mut self, gesture: Gesture) {
        if let Gesture::Resize { width, height } = gesture {
            self.surface.resize(width, height);
        }
        self.greeting.handle(gesture);
        self.flush();
    }

    /// One animation frame.
    pub fn tick(&mut self, dt_ms: f64) {
        self.greeting.tick(dt_ms, &mut self.surface);
        self.flush();
    }

    pub fn fire_burst(&mut self) {
        self.greeting.fire_burst();
    }

    pub fn wants_frame(&self) -> bool {
        self.greeting.wants_frame()
    }

    fn flush(&mut self) {
        for op in self.greeting.drain_ops() {
            self.page.apply(&op);
        }
    }
}
