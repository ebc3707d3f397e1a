use std::collections::HashMap;

use greeting_core::{PageOp, TileId};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

/// DOM attachment points, looked up once at startup.
pub mod selectors {
    pub const CANVAS: &str = "confetti";
    pub const CARD: &str = "birthdayCard";
    pub const FLAME: &str = "flame";
    pub const PHOTOS_BUTTON: &str = "mosaicBtn";
    pub const CAPTION: &str = ".instruction-text";
    pub const PILE_CONTAINER: &str = ".mosaic-container";
    pub const DOT_STRIP: &str = ".nav-dots";
    pub const DOT: &str = ".dot";
    pub const NAV_BUTTON: &str = ".nav-btn";
}

/// Applies the core's page operations to the live document.
/// Only classes, inline styles and caption text are ever written.
pub struct DomPage {
    document: Document,
    card: Element,
    flame: Element,
    caption: Option<HtmlElement>,
    photos_button: Option<Element>,
    pile_container: Element,
    dot_strip: Element,
    tiles: HashMap<TileId, HtmlElement>,
}

fn required(found: Option<Element>, what: &str) -> Result<Element, JsValue> {
    found.ok_or_else(|| JsValue::from_str(&format!("missing page element: {}", what)))
}

impl DomPage {
    /// Look up every attachment point. The card, flame, pile container and dot
    /// strip are required; the caption and photos button are optional.
    pub fn attach(document: &Document) -> Result<Self, JsValue> {
        let card = required(document.get_element_by_id(selectors::CARD), selectors::CARD)?;
        let flame = required(document.get_element_by_id(selectors::FLAME), selectors::FLAME)?;
        let pile_container = required(
            document.query_selector(selectors::PILE_CONTAINER)?,
            selectors::PILE_CONTAINER,
        )?;
        let dot_strip = required(document.query_selector(selectors::DOT_STRIP)?, selectors::DOT_STRIP)?;
        let caption = document
            .query_selector(selectors::CAPTION)?
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let photos_button = document.get_element_by_id(selectors::PHOTOS_BUTTON);

        Ok(Self {
            document: document.clone(),
            card,
            flame,
            caption,
            photos_button,
            pile_container,
            dot_strip,
            tiles: HashMap::new(),
        })
    }

    pub fn card(&self) -> &Element {
        &self.card
    }

    pub fn flame(&self) -> &Element {
        &self.flame
    }

    pub fn photos_button(&self) -> Option<&Element> {
        self.photos_button.as_ref()
    }

    pub fn dot_strip(&self) -> &Element {
        &self.dot_strip
    }

    /// Apply one operation. DOM failures are logged and skipped.
    pub fn apply(&mut self, op: &PageOp) {
        if let Err(err) = self.try_apply(op) {
            log::warn!("page op {:?} failed: {:?}", op, err);
        }
    }

    fn try_apply(&mut self, op: &PageOp) -> Result<(), JsValue> {
        match op {
            PageOp::SetSectionState { section, state } => {
                let Some(el) = self.document.get_element_by_id(section.as_str()) else {
                    return Ok(());
                };
                let classes = el.class_list();
                classes.remove_2("active", "previous")?;
                if let Some(class) = state.class() {
                    classes.add_1(class)?;
                }
            }
            PageOp::SetDotActive { section, active } => {
                let dots = self.document.query_selector_all(selectors::DOT)?;
                for i in 0..dots.length() {
                    let Some(dot) = dots.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                        continue;
                    };
                    if dot.get_attribute("data-target").as_deref() == Some(section.as_str()) {
                        dot.class_list().toggle_with_force("active", *active)?;
                    }
                }
            }
            PageOp::AppendDot { section } => {
                let dot = self.document.create_element("div")?;
                dot.class_list().add_1("dot")?;
                dot.set_attribute("data-target", section.as_str())?;
                self.dot_strip.append_child(&dot)?;
            }
            PageOp::SetCardOpen(open) => {
                self.card.class_list().toggle_with_force("open", *open)?;
            }
            PageOp::ExtinguishFlame => {
                self.flame.class_list().add_1("out")?;
            }
            PageOp::SetCaption(text) => {
                if let Some(caption) = &self.caption {
                    caption.set_inner_text(text);
                }
            }
            PageOp::RevealPhotosButton => {
                if let Some(button) = &self.photos_button {
                    button.class_list().remove_1("hidden")?;
                    button.class_list().add_1("visible")?;
                }
            }
            PageOp::AppendTile { tile, image } => {
                let el = self.document.create_element("div")?.dyn_into::<HtmlElement>()?;
                el.class_list().add_1("pile-item")?;
                el.style()
                    .set_property("background-image", &format!("url('{}')", image))?;
                self.pile_container.append_child(&el)?;
                self.tiles.insert(*tile, el);
            }
            PageOp::LandTile { tile, transform } => {
                if let Some(el) = self.tiles.get(tile) {
                    el.class_list().add_1("landed")?;
                    el.style().set_property("transform", &transform.to_string())?;
                }
            }
            PageOp::SpreadTile { tile, transform } => {
                if let Some(el) = self.tiles.get(tile) {
                    el.style().set_property("transform", &transform.to_string())?;
                }
            }
        }
        Ok(())
    }
}
