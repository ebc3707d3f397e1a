/// User input the core understands.
/// The host translates DOM events into these; attribute lookups that fail
/// simply yield `None`, which the core treats as a no-op.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    /// A click on the entrance card. `on_continue` is set when the click
    /// landed on the card's embedded "continue" navigation control.
    CardClick { on_continue: bool },
    /// A click on the candle flame.
    FlameClick,
    /// A navigation button, carrying its `data-next` reference.
    NavButton { next: Option<String> },
    /// A dot indicator, carrying its `data-target` reference.
    DotClick { target: Option<String> },
    /// The "view photos" control.
    RevealPhotosClick,
    /// The viewport changed size.
    Resize { width: f32, height: f32 },
}
