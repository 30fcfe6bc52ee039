use crate::catalog::{CatalogStore, LoadStatus};
use crate::dispatch::{ActionEvent, ActionTable, Delegate, dispatch};
use crate::dom::{Document, ElementRef, contains, find_all, find_first};
use crate::filter::{FilterEngine, FilterQuery};
use crate::game::{Game, RatingTier};
use crate::modal::{DetailModal, ModalState};
use crate::notice::Notice;
use crate::pages::ViewState;
use crate::pages::layout::games_tbody;
use crate::render::{self, OPEN_DETAILS, TABLE_LOAD_WARNING};
use crate::timer::Delayed;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub const SAMPLE_ADDED: &str = "✅ New sample row added!";
/// The fade-in starts on the frame after the row is inserted.
pub const FADE_IN_DELAY: Duration = Duration::from_millis(16);

pub fn sample_game() -> Game {
    Game {
        slug: "arcane-trials".to_string(),
        title: "Arcane Trials".to_string(),
        genre: "RPG".to_string(),
        publisher: "Sifermi".to_string(),
        release_date: "2018-09-20".to_string(),
        rating: 7.5,
        cover: "assets/arcanetrials.jpg".to_string(),
        summary: None,
        details: None,
        platforms: Vec::new(),
    }
}

/// A table row as read back from the document.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSummary {
    pub slug: String,
    pub title: String,
    pub genre: String,
    pub publisher: String,
    pub released: String,
    pub rating: String,
    pub tier: Option<RatingTier>,
}

impl RowSummary {
    /// `None` for rows that are not game rows (the load warning).
    pub fn read(row: &ElementRef) -> Option<Self> {
        let row = row.borrow();
        let slug = row.id()?.to_string();
        let cells = row.child_elements();
        if cells.len() != render::TABLE_COLUMNS {
            return None;
        }
        let text = |i: usize| cells[i].borrow().text_content().trim().to_string();
        let tier = find_first(&cells[5], &|e| e.has_class("rating")).and_then(|badge| {
            let badge = badge.borrow();
            badge.classes().iter().find_map(|c| RatingTier::from_class(c))
        });
        Some(Self {
            slug,
            title: text(1),
            genre: text(2),
            publisher: text(3),
            released: text(4),
            rating: text(5),
            tier,
        })
    }
}

/// Games page: table, cards, filter controls and the detail modal.
#[derive(Debug)]
pub struct GamesPage {
    doc: Rc<Document>,
    catalog: Rc<CatalogStore>,
    tbody: ElementRef,
    details: ElementRef,
    search: Option<ElementRef>,
    radios: Vec<ElementRef>,
    clear: Option<ElementRef>,
    add_sample: Option<ElementRef>,
    filter: FilterEngine,
    modal: Option<DetailModal>,
    actions: ActionTable<GamesPage>,
    notice: Notice,
    fade: Delayed<ElementRef>,
}

impl GamesPage {
    /// Attach to a games document and render the catalog into it. `None`
    /// when the table body or the details container is missing.
    pub fn mount(doc: &Rc<Document>, catalog: Rc<CatalogStore>) -> Option<Self> {
        let tbody = games_tbody(doc)?;
        let details = doc.get_elements_by_class("details").into_iter().next()?;
        // only the filter's radios; the quick vote form has its own "genre" group
        let radios = doc
            .get_element_by_id("genreFilter")
            .map(|f| find_all(&f, &|e| e.tag() == "input" && e.attr("name") == Some("genre")))
            .unwrap_or_default();

        let page = Self {
            search: doc.get_element_by_id("search"),
            clear: doc.get_element_by_id("clear"),
            add_sample: doc.get_element_by_id("addSample"),
            modal: DetailModal::attach(doc, Rc::clone(&catalog)),
            actions: ActionTable::new().on(OPEN_DETAILS, Self::open_details),
            notice: Notice::new(doc.body()),
            fade: Delayed::new(),
            filter: FilterEngine::new(Rc::clone(&tbody)),
            doc: Rc::clone(doc),
            catalog,
            tbody,
            details,
            radios,
        };
        page.render();
        Some(page)
    }

    fn render(&self) {
        match self.catalog.status() {
            LoadStatus::Failed(reason) => {
                log::warn!("games table: {}", reason);
                self.tbody
                    .borrow_mut()
                    .replace_children(vec![render::table_warning(TABLE_LOAD_WARNING).into()]);
            }
            _ => {
                render::fill_table(&self.tbody, self.catalog.all());
                render::fill_cards(&self.details, self.catalog.all());
                log::debug!("games table: {} rows", self.catalog.len());
            }
        }
    }

    pub fn document(&self) -> &Rc<Document> {
        &self.doc
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn search_text(&self) -> String {
        self.search
            .as_ref()
            .map(|s| s.borrow().value().to_string())
            .unwrap_or_default()
    }

    /// Value of the checked category radio, empty for "All".
    pub fn current_category(&self) -> String {
        self.radios
            .iter()
            .find(|r| r.borrow().is_checked())
            .and_then(|r| r.borrow().attr("value").map(str::to_string))
            .unwrap_or_default()
    }

    /// Category choices in page order, "All" first as `""`.
    pub fn categories(&self) -> Vec<String> {
        self.radios
            .iter()
            .map(|r| r.borrow().attr("value").unwrap_or("").to_string())
            .collect()
    }

    pub fn apply_filter(&self) -> usize {
        self.filter
            .apply_query(&FilterQuery::new(&self.search_text(), &self.current_category()))
    }

    /// A keystroke in the search box.
    pub fn on_search_input(&mut self, text: &str) -> usize {
        if let Some(search) = &self.search {
            search.borrow_mut().set_value(text);
        }
        self.apply_filter()
    }

    /// Check the radio whose value is `category`. Unknown values are ignored.
    pub fn select_category(&mut self, category: &str) -> usize {
        if self.radios.iter().any(|r| r.borrow().attr("value") == Some(category)) {
            for r in &self.radios {
                let hit = r.borrow().attr("value") == Some(category);
                r.borrow_mut().set_checked(hit);
            }
        }
        self.apply_filter()
    }

    pub fn on_clear(&mut self) -> usize {
        if let Some(search) = &self.search {
            search.borrow_mut().set_value("");
        }
        self.select_category("")
    }

    /// Append the fixed sample row, invisible at first, and fade it in on
    /// the next tick.
    pub fn on_add_sample(&mut self, now: Instant) -> ElementRef {
        let row = render::table_row(&sample_game())
            .with_style("opacity", "0")
            .with_style("transition", "opacity .3s ease")
            .into_ref();
        self.tbody.borrow_mut().append(Rc::clone(&row));
        if let Some(earlier) = self.fade.schedule(now, FADE_IN_DELAY, Rc::clone(&row)) {
            earlier.borrow_mut().set_style("opacity", "1");
        }
        self.apply_filter();
        self.notice.show(SAMPLE_ADDED, now);
        row
    }

    fn open_details(&mut self, ev: &ActionEvent) {
        if let (Some(modal), Some(slug)) = (self.modal.as_mut(), ev.get("slug")) {
            modal.open(slug, ev.now);
        }
    }

    /// A click anywhere on the page.
    pub fn on_click(&mut self, target: &ElementRef, now: Instant) -> bool {
        if let Some(modal) = self.modal.as_mut() {
            if contains(&modal.elements().overlay, target) {
                return modal.on_click(target, now);
            }
        }
        let is = |el: &Option<ElementRef>| el.as_ref().is_some_and(|e| Rc::ptr_eq(e, target));
        if is(&self.clear) {
            self.on_clear();
            return true;
        }
        if is(&self.add_sample) {
            self.on_add_sample(now);
            return true;
        }
        if let Some(radio) = self.radios.iter().find(|r| Rc::ptr_eq(r, target)).cloned() {
            let value = radio.borrow().attr("value").unwrap_or("").to_string();
            self.select_category(&value);
            return true;
        }

        let tbody = Rc::clone(&self.tbody);
        dispatch(self, &tbody, target, now)
    }

    /// Open the modal for the row with id `slug`, as a click on its title
    /// link would.
    pub fn open_row(&mut self, slug: &str, now: Instant) -> bool {
        let Some(link) = find_first(&self.tbody, &|e| {
            e.data("action") == Some(OPEN_DETAILS) && e.data("slug") == Some(slug)
        }) else {
            return false;
        };
        self.on_click(&link, now) && self.modal.as_ref().is_some_and(DetailModal::is_open)
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
        self.notice.tick(now);
        if let Some(row) = self.fade.take_due(now) {
            row.borrow_mut().set_style("opacity", "1");
        }
    }

    pub fn modal(&self) -> Option<&DetailModal> {
        self.modal.as_ref()
    }

    /// Show a transient message in the page toast.
    pub fn notify(&mut self, message: &str, now: Instant) {
        self.notice.show(message, now);
    }

    pub fn notice(&self) -> &Notice {
        &self.notice
    }

    pub fn rows(&self) -> Vec<ElementRef> {
        self.filter.rows()
    }

    pub fn visible_rows(&self) -> Vec<RowSummary> {
        self.filter
            .visible_rows()
            .iter()
            .filter_map(RowSummary::read)
            .collect()
    }

    pub fn cards(&self) -> Vec<ElementRef> {
        self.details.borrow().child_elements()
    }

    pub fn view_state(&self) -> ViewState {
        ViewState {
            search: self.search_text(),
            category: self.current_category(),
            modal: self
                .modal
                .as_ref()
                .map(|m| m.state().clone())
                .unwrap_or(ModalState::Closed),
        }
    }
}

impl Delegate for GamesPage {
    fn actions(&self) -> &ActionTable<Self> {
        &self.actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_store;
    use crate::dom::Document;
    use crate::pages::layout::games_document;

    const MS: Duration = Duration::from_millis(1);

    fn mounted(store: CatalogStore) -> GamesPage {
        let doc = games_document(&["Action", "Sim", "RPG"]);
        GamesPage::mount(&doc, Rc::new(store)).unwrap()
    }

    fn titles(page: &GamesPage) -> Vec<String> {
        page.visible_rows().into_iter().map(|r| r.title).collect()
    }

    #[test]
    fn test_end_to_end() {
        let mut page = mounted(sample_store());
        assert_eq!(titles(&page), ["Judgment", "Stardew Valley"]);
        assert_eq!(page.cards().len(), 2);

        assert_eq!(page.on_search_input("stardew"), 1);
        assert_eq!(titles(&page), ["Stardew Valley"]);

        page.on_search_input("");
        assert_eq!(page.select_category("Action"), 1);
        assert_eq!(titles(&page), ["Judgment"]);
        assert_eq!(page.view_state().category, "Action");

        let t0 = Instant::now();
        assert!(page.open_row("a", t0));
        let modal = page.modal().unwrap();
        assert_eq!(modal.elements().title.borrow().text_content(), "Stardew Valley");
        assert_eq!(page.view_state().modal, ModalState::Open("a".to_string()));
        let row = RowSummary::read(&page.rows()[1]).unwrap();
        assert_eq!(row.tier, Some(RatingTier::Good));
    }

    #[test]
    fn test_failed_load_renders_one_warning() {
        let mut store = CatalogStore::new();
        assert!(store.load_bytes(b"{\"not\": \"an array\"}").is_err());
        let page = mounted(store);

        let rows = page.rows();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].borrow().has_class("load-warning"));
        assert!(page.visible_rows().is_empty());
        assert!(page.cards().is_empty());
    }

    #[test]
    fn test_clear_resets_controls() {
        let mut page = mounted(sample_store());
        page.on_search_input("zzz");
        page.select_category("Sim");
        assert_eq!(page.apply_filter(), 0);

        assert_eq!(page.on_clear(), 2);
        assert_eq!(page.search_text(), "");
        assert_eq!(page.current_category(), "");
        assert_eq!(page.categories(), ["", "Action", "Sim", "RPG"]);
    }

    #[test]
    fn test_unknown_category_keeps_selection() {
        let mut page = mounted(sample_store());
        page.select_category("Sim");
        page.select_category("Racing");
        assert_eq!(page.current_category(), "Sim");
    }

    #[test]
    fn test_add_sample_fades_in_and_notifies() {
        let mut page = mounted(sample_store());
        let t0 = Instant::now();
        let row = page.on_add_sample(t0);

        assert_eq!(page.rows().len(), 3);
        assert_eq!(row.borrow().style("opacity"), Some("0"));
        assert_eq!(page.notice().message().as_deref(), Some(SAMPLE_ADDED));

        page.tick(t0 + 20 * MS);
        assert_eq!(row.borrow().style("opacity"), Some("1"));
        page.tick(t0 + 2500 * MS);
        assert!(!page.notice().is_showing());
    }

    #[test]
    fn test_sample_row_respects_active_filter() {
        let mut page = mounted(sample_store());
        page.select_category("Sim");
        let row = page.on_add_sample(Instant::now());
        assert!(!row.borrow().is_displayed());
        page.select_category("RPG");
        assert_eq!(titles(&page), ["Arcane Trials"]);
    }

    #[test]
    fn test_escape_closes_modal() {
        let mut page = mounted(sample_store());
        let t0 = Instant::now();
        assert!(!page.on_key("Escape", t0));
        page.open_row("b", t0);
        assert!(page.on_key("Escape", t0 + MS));
        assert_eq!(page.view_state().modal, ModalState::Closed);
    }

    #[test]
    fn test_mount_requires_containers() {
        let doc = Rc::new(Document::new("Games"));
        assert!(GamesPage::mount(&doc, Rc::new(sample_store())).is_none());
    }
}
