use std::fmt;

use glam::Vec2;

/// Identifier of a narrative section (also the DOM id of its element).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionId(pub String);

impl SectionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        SectionId(id.to_owned())
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a section sits relative to the active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionState {
    /// Already passed; styled as dismissed.
    Previous,
    /// The one visible section.
    Active,
    /// Not reached yet. Carries no marking.
    #[default]
    Upcoming,
}

impl SectionState {
    /// CSS class carried by the section element, if any.
    pub fn class(self) -> Option<&'static str> {
        match self {
            SectionState::Previous => Some("previous"),
            SectionState::Active => Some("active"),
            SectionState::Upcoming => None,
        }
    }
}

/// Unique identifier for a photo-pile tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId(pub u32);

/// Inline transform for a pile tile: integer pixel offset, integer degrees, optional scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileTransform {
    pub translate: Vec2,
    pub rotate_deg: f32,
    pub scale: Option<f32>,
}

impl fmt::Display for TileTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({}px, {}px) rotate({}deg)",
            self.translate.x, self.translate.y, self.rotate_deg
        )?;
        if let Some(scale) = self.scale {
            write!(f, " scale({:.1})", scale)?;
        }
        Ok(())
    }
}

/// Deferred work scheduled on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// One repeat of the post-wish confetti celebration.
    CelebrationBurst,
    /// Show the "view photos" control.
    RevealPhotos,
    /// Drop one tile onto the pile.
    LandTile(TileId),
    /// Scatter every tile in the pile.
    SpreadPile,
}

/// A visible change for the host to apply to the page.
/// The core never touches the DOM; it only emits these.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOp {
    /// Replace a section's `previous`/`active` marking.
    SetSectionState { section: SectionId, state: SectionState },
    /// Toggle the `active` marking on a dot indicator.
    SetDotActive { section: SectionId, active: bool },
    /// Append a dot indicator targeting `section` to the dot strip.
    AppendDot { section: SectionId },
    /// Open or close the entrance card.
    SetCardOpen(bool),
    /// Mark the candle flame as blown out.
    ExtinguishFlame,
    /// Replace the instruction caption text.
    SetCaption(String),
    /// Show the "view photos" control: drop `hidden`, add `visible`.
    RevealPhotosButton,
    /// Insert a tile showing `image` into the pile container.
    AppendTile { tile: TileId, image: String },
    /// Add the `landed` marking and the pile-stage transform.
    LandTile { tile: TileId, transform: TileTransform },
    /// Apply the spread-stage transform.
    SpreadTile { tile: TileId, transform: TileTransform },
}
