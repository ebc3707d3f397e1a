//! Section navigator: which narrative section is visible, mirrored on the dot strip.

use crate::api::types::{PageOp, SectionId, SectionState};

/// Ordered sections plus the dot strip that mirrors them.
#[derive(Debug, Clone)]
pub struct Navigator {
    sections: Vec<SectionId>,
    states: Vec<SectionState>,
    dots: Vec<SectionId>,
    current: usize,
}

impl Navigator {
    /// The first section starts active, the rest upcoming.
    pub fn new(sections: impl IntoIterator<Item = SectionId>) -> Self {
        let sections: Vec<SectionId> = sections.into_iter().collect();
        let mut states = vec![SectionState::Upcoming; sections.len()];
        if let Some(first) = states.first_mut() {
            *first = SectionState::Active;
        }
        Self {
            dots: sections.clone(),
            sections,
            states,
            current: 0,
        }
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.as_str() == id)
    }

    /// Show `target`. Unknown targets are ignored and leave state untouched.
    /// Returns whether the target was known.
    pub fn navigate_to(&mut self, target: &str, ops: &mut Vec<PageOp>) -> bool {
        let Some(target_idx) = self.index_of(target) else {
            log::debug!("navigate_to: unknown section '{}'", target);
            return false;
        };

        for (idx, section) in self.sections.iter().enumerate() {
            let state = match idx.cmp(&target_idx) {
                std::cmp::Ordering::Less => SectionState::Previous,
                std::cmp::Ordering::Equal => SectionState::Active,
                std::cmp::Ordering::Greater => SectionState::Upcoming,
            };
            self.states[idx] = state;
            ops.push(PageOp::SetSectionState { section: section.clone(), state });
        }

        for dot in &self.dots {
            ops.push(PageOp::SetDotActive {
                section: dot.clone(),
                active: dot.as_str() == target,
            });
        }

        self.current = target_idx;
        log::debug!("navigated to '{}'", target);
        true
    }

    /// Append a section and its dot. Known ids are ignored so sections and dots stay 1:1.
    pub fn append_section(&mut self, id: SectionId, ops: &mut Vec<PageOp>) -> bool {
        if self.index_of(id.as_str()).is_some() {
            return false;
        }
        self.sections.push(id.clone());
        self.states.push(SectionState::Upcoming);
        self.dots.push(id.clone());
        ops.push(PageOp::AppendDot { section: id });
        true
    }

    pub fn state_of(&self, id: &str) -> Option<SectionState> {
        self.index_of(id).map(|idx| self.states[idx])
    }

    /// The active section, if any.
    pub fn current(&self) -> Option<&SectionId> {
        self.sections.get(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn sections(&self) -> &[SectionId] {
        &self.sections
    }

    pub fn dots(&self) -> &[SectionId] {
        &self.dots
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }
}
