use crate::catalog::CatalogStore;
use crate::dom::{Document, ElementRef, find_by_class, find_by_id};
use crate::render::{multiline, rating_badge};
use crate::timer::Delayed;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Time the opening transition gets before focus moves to the close button.
pub const FOCUS_DELAY: Duration = Duration::from_millis(50);
/// Time the closing fade gets before the overlay is hidden for good.
pub const HIDE_DELAY: Duration = Duration::from_millis(200);

pub const MODAL_ID: &str = "gameModal";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModalStep {
    FocusClose,
    Hide,
}

/// The elements of the detail overlay, resolved once at attach time.
#[derive(Debug)]
pub struct ModalElements {
    pub overlay: ElementRef,
    pub close: ElementRef,
    pub cover: ElementRef,
    pub title: ElementRef,
    pub genre: ElementRef,
    pub publisher: ElementRef,
    pub platforms: ElementRef,
    pub summary: ElementRef,
    pub rating: Option<ElementRef>,
}

impl ModalElements {
    fn resolve(doc: &Document) -> Option<Self> {
        let overlay = doc.get_element_by_id(MODAL_ID)?;
        let close = find_by_class(&overlay, "close").into_iter().next()?;
        let within = |id: &str| find_by_id(&overlay, id);
        Some(Self {
            cover: within("modalCover")?,
            title: within("modalTitle")?,
            genre: within("modalGenre")?,
            publisher: within("modalPublisher")?,
            platforms: within("modalPlatforms")?,
            summary: within("modalSummary")?,
            rating: within("modalRating"),
            close,
            overlay,
        })
    }
}

/// Detail overlay controller: `Closed` ⇄ `Open(slug)`.
#[derive(Debug)]
pub struct DetailModal {
    doc: Rc<Document>,
    catalog: Rc<CatalogStore>,
    els: ModalElements,
    state: ModalState,
    timer: Delayed<ModalStep>,
}

impl DetailModal {
    /// `None` when the page has no complete `#gameModal`.
    pub fn attach(doc: &Rc<Document>, catalog: Rc<CatalogStore>) -> Option<Self> {
        let Some(els) = ModalElements::resolve(doc) else {
            log::debug!("{}: no detail modal on page", doc.title());
            return None;
        };
        Some(Self {
            doc: Rc::clone(doc),
            catalog,
            els,
            state: ModalState::Closed,
            timer: Delayed::new(),
        })
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn elements(&self) -> &ModalElements {
        &self.els
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open(_))
    }

    /// True while the overlay carries its `show` class.
    pub fn is_visible(&self) -> bool {
        self.els.overlay.borrow().has_class("show")
    }

    pub fn is_close_focused(&self) -> bool {
        self.doc.is_focused(&self.els.close)
    }

    /// Show details for `slug`. An unknown slug leaves everything untouched.
    pub fn open(&mut self, slug: &str, now: Instant) -> bool {
        let Some(game) = self.catalog.find_by_slug(slug) else {
            log::debug!("details requested for unknown slug {:?}", slug);
            return false;
        };

        {
            let mut cover = self.els.cover.borrow_mut();
            cover.set_attr("src", &game.cover);
            cover.set_attr("alt", &format!("{} cover", game.title));
        }
        self.els.title.borrow_mut().set_text(&game.title);
        self.els.genre.borrow_mut().set_text(&game.genre);
        self.els.publisher.borrow_mut().set_text(&game.publisher);
        self.els.platforms.borrow_mut().set_text(&game.platform_list());
        self.els
            .summary
            .borrow_mut()
            .replace_children(multiline(game.description()));
        if let Some(rating) = &self.els.rating {
            rating.borrow_mut().replace_children(vec![rating_badge(game).into()]);
        }

        {
            let mut overlay = self.els.overlay.borrow_mut();
            overlay.add_class("show");
            overlay.set_hidden(false);
        }
        self.state = ModalState::Open(slug.to_string());
        // replaces a pending hide from an earlier close
        self.timer.schedule(now, FOCUS_DELAY, ModalStep::FocusClose);
        true
    }

    pub fn close(&mut self, now: Instant) {
        self.els.overlay.borrow_mut().remove_class("show");
        self.state = ModalState::Closed;
        self.timer.schedule(now, HIDE_DELAY, ModalStep::Hide);
    }

    /// Click inside the overlay: only the backdrop itself or the close
    /// control closes it.
    pub fn on_click(&mut self, target: &ElementRef, now: Instant) -> bool {
        if Rc::ptr_eq(target, &self.els.overlay) || Rc::ptr_eq(target, &self.els.close) {
            self.close(now);
            return true;
        }
        false
    }

    pub fn on_key(&mut self, key: &str, now: Instant) -> bool {
        if key == "Escape" {
            self.close(now);
            return true;
        }
        false
    }

    pub fn tick(&mut self, now: Instant) {
        match self.timer.take_due(now) {
            Some(ModalStep::FocusClose) => self.doc.focus(&self.els.close),
            Some(ModalStep::Hide) => {
                self.els.overlay.borrow_mut().set_hidden(true);
                if self.doc.is_focused(&self.els.close) {
                    self.doc.blur();
                }
            }
            None => {}
        }
    }
}
