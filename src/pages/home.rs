use crate::catalog::{CatalogStore, LoadStatus};
use crate::dispatch::{ActionEvent, ActionTable, Delegate, dispatch};
use crate::dom::{Document, ElementRef, contains, find_first};
use crate::modal::DetailModal;
use crate::render::{self, FEATURED_LOAD_WARNING, OPEN_DETAILS};
use std::rc::Rc;
use std::time::Instant;

pub const GRID_ID: &str = "featuredGrid";

/// Home page: curated featured cards with one delegated click listener on
/// the grid.
#[derive(Debug)]
pub struct HomePage {
    grid: ElementRef,
    modal: Option<DetailModal>,
    actions: ActionTable<HomePage>,
}

impl HomePage {
    /// `None` when the page has no `#featuredGrid`.
    pub fn mount<S: AsRef<str>>(doc: &Rc<Document>, catalog: Rc<CatalogStore>, featured: &[S]) -> Option<Self> {
        let grid = doc.get_element_by_id(GRID_ID)?;

        match catalog.status() {
            LoadStatus::Failed(reason) => {
                log::warn!("featured grid: {}", reason);
                grid.borrow_mut()
                    .replace_children(vec![render::featured_warning(FEATURED_LOAD_WARNING).into()]);
            }
            _ => {
                let selected = catalog.select_titles(featured);
                log::debug!("featured grid: {} of {} titles found", selected.len(), featured.len());
                render::fill_featured(&grid, &selected);
            }
        }

        Some(Self {
            modal: DetailModal::attach(doc, catalog),
            actions: ActionTable::new().on(OPEN_DETAILS, Self::open_details),
            grid,
        })
    }

    fn open_details(&mut self, ev: &ActionEvent) {
        if let (Some(modal), Some(slug)) = (self.modal.as_mut(), ev.get("slug")) {
            modal.open(slug, ev.now);
        }
    }

    /// The grid's delegated click listener.
    pub fn on_grid_click(&mut self, target: &ElementRef, now: Instant) -> bool {
        let grid = Rc::clone(&self.grid);
        dispatch(self, &grid, target, now)
    }

    /// A click anywhere on the page.
    pub fn on_click(&mut self, target: &ElementRef, now: Instant) -> bool {
        if let Some(modal) = self.modal.as_mut() {
            if contains(&modal.elements().overlay, target) {
                return modal.on_click(target, now);
            }
        }
        if contains(&self.grid, target) {
            return self.on_grid_click(target, now);
        }
        false
    }

    pub fn on_key(&mut self, key: &str, now: Instant) -> bool {
        match self.modal.as_mut() {
            Some(modal) if modal.is_open() => modal.on_key(key, now),
            _ => false,
        }
    }

    pub fn tick(&mut self, now: Instant) {
        if let Some(modal) = self.modal.as_mut() {
            modal.tick(now);
        }
    }

    pub fn featured_cards(&self) -> Vec<ElementRef> {
        self.grid.borrow().child_elements()
    }

    /// The "Details" button of the `index`th featured card.
    pub fn details_button(&self, index: usize) -> Option<ElementRef> {
        let card = self.featured_cards().into_iter().nth(index)?;
        find_first(&card, &|e| e.has_class("details-btn"))
    }

    pub fn modal(&self) -> Option<&DetailModal> {
        self.modal.as_ref()
    }
}

impl Delegate for HomePage {
    fn actions(&self) -> &ActionTable<Self> {
        &self.actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::{game, sample_store};
    use crate::modal::ModalState;
    use crate::pages::layout::home_document;

    const FEATURED: [&str; 3] = ["Path of Exile", "Judgment", "Stardew Valley"];

    fn mounted(store: CatalogStore) -> HomePage {
        HomePage::mount(&home_document(), Rc::new(store), &FEATURED).unwrap()
    }

    #[test]
    fn test_missing_titles_are_skipped_in_curated_order() {
        let page = mounted(sample_store());
        let cards = page.featured_cards();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].borrow().data("slug"), Some("b"));
        assert_eq!(cards[1].borrow().data("slug"), Some("a"));
    }

    #[test]
    fn test_title_match_ignores_case() {
        let store = CatalogStore::from_games(vec![game("poe", "PATH OF EXILE", "ARPG", 8.1, "2013-10-23")]);
        let page = mounted(store);
        assert_eq!(page.featured_cards().len(), 1);
    }

    #[test]
    fn test_details_click_opens_modal() {
        let mut page = mounted(sample_store());
        let button = page.details_button(1).unwrap();
        let now = Instant::now();

        assert!(page.on_click(&button, now));
        let modal = page.modal().unwrap();
        assert_eq!(modal.state(), &ModalState::Open("a".to_string()));
        assert_eq!(modal.elements().title.borrow().text_content(), "Stardew Valley");

        // clicking the card body outside the button does nothing
        let title = find_first(&page.featured_cards()[0], &|e| e.tag() == "h3").unwrap();
        assert!(!page.on_grid_click(&title, now));
        assert_eq!(page.modal().unwrap().state(), &ModalState::Open("a".to_string()));
    }

    #[test]
    fn test_failed_load_renders_one_warning_card() {
        let mut store = CatalogStore::new();
        assert!(store.load_bytes(b"not json").is_err());
        let page = mounted(store);
        let cards = page.featured_cards();
        assert_eq!(cards.len(), 1);
        assert!(cards[0].borrow().has_class("load-warning"));
        assert!(page.details_button(0).is_none());
    }

    #[test]
    fn test_escape_only_when_open() {
        let mut page = mounted(sample_store());
        let now = Instant::now();
        assert!(!page.on_key("Escape", now));
        let button = page.details_button(0).unwrap();
        page.on_click(&button, now);
        assert!(page.on_key("Escape", now));
        assert!(!page.modal().unwrap().is_open());
    }
}
