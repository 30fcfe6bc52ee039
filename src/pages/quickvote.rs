use crate::dom::{Document, ElementRef, find_all, find_first};
use crate::timer::Delayed;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub const FOCUS_DELAY: Duration = Duration::from_millis(50);
pub const HIDE_DELAY: Duration = Duration::from_millis(250);
pub const NO_GENRE: &str = "none selected";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PanelStep {
    FocusFirst,
    Hide,
}

/// Text shown after a vote.
pub fn vote_message(genre: Option<&str>, subscribed: bool, email: &str) -> String {
    let mut msg = format!("Thanks for voting!\nCategory: {}", genre.filter(|g| !g.is_empty()).unwrap_or(NO_GENRE));
    let email = email.trim();
    if subscribed && !email.is_empty() {
        msg.push_str("\nEmail: ");
        msg.push_str(email);
    }
    msg
}

/// Slide-in vote panel present on every page.
#[derive(Debug)]
pub struct QuickVote {
    doc: Rc<Document>,
    toggle: ElementRef,
    panel: ElementRef,
    close: Option<ElementRef>,
    overlay: Option<ElementRef>,
    radios: Vec<ElementRef>,
    subscribe: Option<ElementRef>,
    email_field: Option<ElementRef>,
    email: Option<ElementRef>,
    timer: Delayed<PanelStep>,
}

impl QuickVote {
    pub fn attach(doc: &Rc<Document>) -> Option<Self> {
        let toggle = doc.get_element_by_id("quickvoteToggle")?;
        let panel = doc.get_element_by_id("quickvotePanel")?;
        let email_field = doc.get_element_by_id("emailField");
        if let Some(field) = &email_field {
            field.borrow_mut().set_displayed(false);
        }
        Some(Self {
            doc: Rc::clone(doc),
            radios: find_all(&panel, &|e| e.tag() == "input" && e.attr("name") == Some("genre")),
            close: doc.get_element_by_id("quickvoteClose"),
            overlay: doc.get_element_by_id("quickvoteOverlay"),
            subscribe: doc.get_element_by_id("subscribe"),
            email: doc.get_element_by_id("voteEmail"),
            timer: Delayed::new(),
            email_field,
            toggle,
            panel,
        })
    }

    pub fn is_open(&self) -> bool {
        self.toggle.borrow().attr("aria-expanded") == Some("true")
    }

    pub fn is_panel_hidden(&self) -> bool {
        self.panel.borrow().is_hidden()
    }

    pub fn open(&mut self, now: Instant) {
        {
            let mut panel = self.panel.borrow_mut();
            panel.set_hidden(false);
            panel.add_class("open");
        }
        if let Some(overlay) = &self.overlay {
            overlay.borrow_mut().add_class("show");
        }
        self.toggle.borrow_mut().set_attr("aria-expanded", "true");
        self.timer.schedule(now, FOCUS_DELAY, PanelStep::FocusFirst);
    }

    pub fn close(&mut self, now: Instant) {
        self.panel.borrow_mut().remove_class("open");
        if let Some(overlay) = &self.overlay {
            overlay.borrow_mut().remove_class("show");
        }
        self.toggle.borrow_mut().set_attr("aria-expanded", "false");
        self.timer.schedule(now, HIDE_DELAY, PanelStep::Hide);
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.is_open() {
            self.close(now);
        } else {
            self.open(now);
        }
    }

    pub fn on_click(&mut self, target: &ElementRef, now: Instant) -> bool {
        let hit = |el: &Option<ElementRef>| el.as_ref().is_some_and(|e| Rc::ptr_eq(e, target));
        if Rc::ptr_eq(&self.toggle, target) {
            self.toggle(now);
        } else if hit(&self.close) || hit(&self.overlay) {
            self.close(now);
        } else if hit(&self.subscribe) {
            let checked = self.subscribe.as_ref().is_some_and(|s| s.borrow().is_checked());
            self.set_subscribed(!checked);
        } else if let Some(radio) = self.radios.iter().find(|r| Rc::ptr_eq(r, target)).cloned() {
            let value = radio.borrow().attr("value").unwrap_or("").to_string();
            self.select_genre(&value);
        } else {
            return false;
        }
        true
    }

    pub fn on_key(&mut self, key: &str, now: Instant) -> bool {
        if key == "Escape" && self.is_open() {
            self.close(now);
            return true;
        }
        false
    }

    pub fn tick(&mut self, now: Instant) {
        match self.timer.take_due(now) {
            Some(PanelStep::FocusFirst) => {
                let first = find_first(&self.panel, &|e| {
                    matches!(e.tag(), "input" | "button" | "select" | "textarea")
                });
                if let Some(first) = first {
                    self.doc.focus(&first);
                }
            }
            Some(PanelStep::Hide) => self.panel.borrow_mut().set_hidden(true),
            None => {}
        }
    }

    pub fn genres(&self) -> Vec<String> {
        self.radios
            .iter()
            .map(|r| r.borrow().attr("value").unwrap_or("").to_string())
            .collect()
    }

    pub fn selected_genre(&self) -> Option<String> {
        self.radios
            .iter()
            .find(|r| r.borrow().is_checked())
            .and_then(|r| r.borrow().attr("value").map(str::to_string))
    }

    pub fn select_genre(&mut self, genre: &str) {
        for r in &self.radios {
            let hit = r.borrow().attr("value") == Some(genre);
            r.borrow_mut().set_checked(hit);
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribe.as_ref().is_some_and(|s| s.borrow().is_checked())
    }

    /// The subscribe checkbox changed: show and focus the e-mail field, or
    /// hide it and drop what was typed.
    pub fn set_subscribed(&mut self, checked: bool) {
        if let Some(s) = &self.subscribe {
            s.borrow_mut().set_checked(checked);
        }
        if let Some(field) = &self.email_field {
            let mut field = field.borrow_mut();
            if checked {
                field.set_style("display", "block");
            } else {
                field.set_displayed(false);
            }
        }
        if let Some(email) = &self.email {
            if checked {
                self.doc.focus(email);
            } else {
                email.borrow_mut().set_value("");
            }
        }
    }

    pub fn is_email_visible(&self) -> bool {
        self.email_field.as_ref().is_some_and(|f| f.borrow().is_displayed())
    }

    pub fn set_email(&mut self, email: &str) {
        if let Some(el) = &self.email {
            el.borrow_mut().set_value(email);
        }
    }

    pub fn email(&self) -> String {
        self.email
            .as_ref()
            .map(|e| e.borrow().value().to_string())
            .unwrap_or_default()
    }

    /// Record the vote: build the confirmation, reset the form and close.
    pub fn submit(&mut self, now: Instant) -> String {
        let msg = vote_message(self.selected_genre().as_deref(), self.is_subscribed(), &self.email());
        log::info!("vote submitted: {:?}", self.selected_genre());
        for r in &self.radios {
            r.borrow_mut().set_checked(false);
        }
        self.set_subscribed(false);
        self.close(now);
        msg
    }
}
