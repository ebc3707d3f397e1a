use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Static description of the page: section order, the photo-pile section,
/// the post-wish caption and the photos to pile up.
/// Loaded from a JSON file at runtime, or taken from the built-in default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageManifest {
    /// Authored sections, in narrative order.
    #[serde(default = "default_sections")]
    pub sections: Vec<String>,
    /// Section appended after setup for the photo pile.
    #[serde(default = "default_pile_section")]
    pub pile_section: String,
    /// Caption shown once the candle is blown out.
    #[serde(default = "default_wish_caption")]
    pub wish_caption: String,
    /// Image references, in authored order.
    #[serde(default = "default_images")]
    pub images: Vec<String>,
}

/// Errors from loading or validating a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("invalid manifest JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("manifest lists no sections")]
    NoSections,
    #[error("section '{0}' is listed more than once")]
    DuplicateSection(String),
    #[error("photo pile section '{0}' collides with an authored section")]
    PileSectionCollision(String),
}

fn default_sections() -> Vec<String> {
    ["entrance", "memes", "wishes", "celebration"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_pile_section() -> String {
    "mosaic".to_owned()
}

fn default_wish_caption() -> String {
    "Yay! Wish granted! 💖".to_owned()
}

const DEFAULT_IMAGES: &[&str] = &[
    "R/20250711_132937.jpg",
    "R/20250711_133025.jpg",
    "R/20250711_133912.jpg",
    "R/20250711_134541.jpg",
    "R/IMG-20250808-WA0027.jpg",
    "R/IMG-20250808-WA0028.jpg",
    "R/IMG-20250808-WA0030.jpg",
    "R/IMG-20250808-WA0031.jpg",
    "R/IMG-20250808-WA0033.jpg",
    "R/IMG-20250927-WA0012.jpg",
    "R/IMG-20251221-WA0003.jpg",
    "R/IMG-20260117-WA0000.jpg",
    "R/IMG-20260117-WA0004.jpg",
    "R/IMG-20260117-WA0006.jpg",
    "R/Screenshot_20250712_003951_WhatsApp.jpg",
    "R/Screenshot_20250712_003959_WhatsApp.jpg",
    "R/Screenshot_20250823_001026_Snapchat(1).jpg",
    "R/Snapchat-1290911713.jpg",
    "R/Snapchat-1435410054.jpg",
    "R/Snapchat-1456720887.jpg",
    "R/Snapchat-1503483113.jpg",
    "R/Snapchat-1603478456.jpg",
    "R/Snapchat-1716656863.jpg",
    "R/Snapchat-1745475855.jpg",
    "R/Snapchat-1821296514.jpg",
    "R/Snapchat-435074527.jpg",
    "R/Snapchat-447621573.jpg",
    "R/Snapchat-503745359.jpg",
    "R/Snapchat-712871336.jpg",
    "R/VideoCapture_20250502-002944.jpg",
];

fn default_images() -> Vec<String> {
    DEFAULT_IMAGES.iter().map(|s| (*s).to_owned()).collect()
}

impl Default for PageManifest {
    fn default() -> Self {
        Self {
            sections: default_sections(),
            pile_section: default_pile_section(),
            wish_caption: default_wish_caption(),
            images: default_images(),
        }
    }
}

impl PageManifest {
    /// Parse and validate a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        let manifest: PageManifest = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Check the section list can back a navigator with a 1:1 dot strip.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.sections.is_empty() {
            return Err(ManifestError::NoSections);
        }
        let mut seen = HashSet::new();
        for section in &self.sections {
            if !seen.insert(section.as_str()) {
                return Err(ManifestError::DuplicateSection(section.clone()));
            }
        }
        if seen.contains(self.pile_section.as_str()) {
            return Err(ManifestError::PileSectionCollision(self.pile_section.clone()));
        }
        Ok(())
    }
}
