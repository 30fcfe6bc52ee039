use crate::dom::{Document, ElementRef, contains, find_first};
use std::time::{Duration, Instant};

/// Gap between two team cards starting their fade.
pub const STAGGER: Duration = Duration::from_millis(120);
pub const FADE: Duration = Duration::from_millis(180);

/// One-open-at-a-time FAQ: `.faq-item` gets `active` when its question is
/// clicked.
#[derive(Debug)]
pub struct FaqAccordion {
    items: Vec<(ElementRef, ElementRef)>,
}

impl FaqAccordion {
    pub fn attach(doc: &Document) -> Self {
        let items = doc
            .get_elements_by_class("faq-item")
            .into_iter()
            .filter_map(|item| {
                let question = find_first(&item, &|e| e.has_class("faq-question"))?;
                Some((item, question))
            })
            .collect();
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn question(&self, index: usize) -> Option<&ElementRef> {
        self.items.get(index).map(|(_, q)| q)
    }

    pub fn active(&self) -> Option<usize> {
        self.items.iter().position(|(item, _)| item.borrow().has_class("active"))
    }

    pub fn toggle(&mut self, index: usize) {
        let Some((item, _)) = self.items.get(index) else {
            return;
        };
        if item.borrow().has_class("active") {
            item.borrow_mut().remove_class("active");
            return;
        }
        for (other, _) in &self.items {
            other.borrow_mut().remove_class("active");
        }
        item.borrow_mut().add_class("active");
    }

    /// Clicks on (or inside) a question toggle its item.
    pub fn on_click(&mut self, target: &ElementRef) -> bool {
        match self.items.iter().position(|(_, q)| contains(q, target)) {
            Some(index) => {
                self.toggle(index);
                true
            }
            None => false,
        }
    }
}

/// Team cards fade in one after another.
#[derive(Debug)]
pub struct StaggeredReveal {
    members: Vec<ElementRef>,
    started: Option<Instant>,
    revealed: usize,
}

impl StaggeredReveal {
    pub fn attach(doc: &Document) -> Self {
        let members = doc.get_elements_by_class("member");
        for m in &members {
            m.borrow_mut().set_style("opacity", "0");
        }
        Self {
            members,
            started: None,
            revealed: 0,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.started = Some(now);
        self.revealed = 0;
        self.tick(now);
    }

    pub fn tick(&mut self, now: Instant) {
        let Some(started) = self.started else {
            return;
        };
        let elapsed = now.saturating_duration_since(started);
        while self.revealed < self.members.len() && elapsed >= STAGGER * self.revealed as u32 {
            let mut m = self.members[self.revealed].borrow_mut();
            m.set_style("transition", &format!("opacity {}ms", FADE.as_millis()));
            m.set_style("opacity", "1");
            self.revealed += 1;
        }
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn is_done(&self) -> bool {
        self.revealed == self.members.len()
    }
}
