use game_catalog::catalog::{CatalogStore, LoadStatus};
use game_catalog::config::SiteConfig;
use game_catalog::modal::DetailModal;
use game_catalog::pages::chrome::{self, ToTop};
use game_catalog::pages::games::{GamesPage, RowSummary};
use game_catalog::pages::home::HomePage;
use game_catalog::pages::layout;
use game_catalog::pages::quickvote::QuickVote;
use std::rc::Rc;
use std::time::Instant;

/// Which page is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Games,
    Home,
}

impl View {
    pub fn next(self) -> Self {
        match self {
            Self::Games => Self::Home,
            Self::Home => Self::Games,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Games => "Games",
            Self::Home => "Home",
        }
    }

    pub const ALL: [View; 2] = [Self::Games, Self::Home];
}

/// Where typed characters go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Email,
}

pub const LIST_OVERHEAD: u16 = 9;
/// Height one table row would take on the web page, for the back-to-top
/// threshold.
pub const ROW_HEIGHT_PX: u32 = 48;

/// Main application state.
pub struct App {
    pub should_quit: bool,
    pub view: View,
    pub show_help: bool,
    pub input_mode: InputMode,

    pub games: GamesPage,
    pub home: HomePage,
    pub quick_vote: QuickVote,
    pub to_top: Option<ToTop>,

    // Games table state
    pub selected: usize,
    pub page_size: usize,

    pub featured_selected: usize,

    pub year: String,
    pub status_msg: String,
}

impl App {
    /// Mount every page over one shared catalog. `None` when a page
    /// skeleton is incomplete.
    pub fn new(catalog: Rc<CatalogStore>, config: &SiteConfig) -> Option<Self> {
        let status_msg = match catalog.status() {
            LoadStatus::Loaded => format!("{} games loaded", catalog.len()),
            LoadStatus::Failed(reason) => reason.clone(),
            LoadStatus::NotLoaded => "Catalog not loaded".to_string(),
        };

        let games_doc = layout::games_document(&config.categories);
        let home_doc = layout::home_document();
        chrome::stamp_current_year(&games_doc);
        chrome::stamp_current_year(&home_doc);
        let year = games_doc
            .get_element_by_id("year")
            .map(|y| y.borrow().text_content())
            .unwrap_or_default();

        Some(Self {
            should_quit: false,
            view: View::Games,
            show_help: false,
            input_mode: InputMode::Normal,

            games: GamesPage::mount(&games_doc, Rc::clone(&catalog))?,
            home: HomePage::mount(&home_doc, catalog, &config.featured_titles)?,
            quick_vote: QuickVote::attach(&games_doc)?,
            to_top: ToTop::attach(&games_doc),

            selected: 0,
            page_size: 20, // Initial default, will be updated on first render/resize
            featured_selected: 0,

            year,
            status_msg,
        })
    }

    /// Update page size based on terminal height.
    pub fn update_page_size(&mut self, terminal_height: u16) {
        let new_size = terminal_height.saturating_sub(LIST_OVERHEAD) as usize;
        self.page_size = new_size.max(1);
    }

    pub fn visible_rows(&self) -> Vec<RowSummary> {
        self.games.visible_rows()
    }

    fn select(&mut self, index: usize) {
        let len = self.visible_rows().len();
        self.selected = index.min(len.saturating_sub(1));
        if let Some(to_top) = &self.to_top {
            to_top.on_scroll(self.selected as u32 * ROW_HEIGHT_PX);
        }
    }

    /// Move selection down in the table.
    pub fn list_next(&mut self) {
        self.select(self.selected + 1);
    }

    /// Move selection up in the table.
    pub fn list_prev(&mut self) {
        self.select(self.selected.saturating_sub(1));
    }

    pub fn list_page_down(&mut self) {
        self.select(self.selected + self.page_size);
    }

    pub fn list_page_up(&mut self) {
        self.select(self.selected.saturating_sub(self.page_size));
    }

    pub fn list_first(&mut self) {
        self.select(0);
    }

    pub fn list_last(&mut self) {
        self.select(usize::MAX);
    }

    pub fn featured_next(&mut self) {
        let len = self.home.featured_cards().len();
        if self.featured_selected + 1 < len {
            self.featured_selected += 1;
        }
    }

    pub fn featured_prev(&mut self) {
        self.featured_selected = self.featured_selected.saturating_sub(1);
    }

    pub fn switch_view(&mut self) {
        self.view = self.view.next();
        self.status_msg = format!("{} page", self.view.label());
    }

    // ── Search and category ──

    pub fn search_push(&mut self, c: char) {
        let mut text = self.games.search_text();
        text.push(c);
        self.search_set(&text);
    }

    pub fn search_pop(&mut self) {
        let mut text = self.games.search_text();
        text.pop();
        self.search_set(&text);
    }

    fn search_set(&mut self, text: &str) {
        let visible = self.games.on_search_input(text);
        self.select(0);
        self.report_filter(visible);
    }

    /// Step to the next category radio, wrapping back to "All".
    pub fn cycle_category(&mut self) {
        let categories = self.games.categories();
        if categories.is_empty() {
            return;
        }
        let current = self.games.current_category();
        let pos = categories.iter().position(|c| *c == current).unwrap_or(0);
        let next = &categories[(pos + 1) % categories.len()];
        let visible = self.games.select_category(next);
        self.select(0);
        self.report_filter(visible);
    }

    pub fn clear_filter(&mut self) {
        let visible = self.games.on_clear();
        self.select(0);
        self.report_filter(visible);
    }

    fn report_filter(&mut self, visible: usize) {
        let state = self.games.view_state();
        self.status_msg = format!(
            "{} games for \"{}\" in {}",
            visible,
            state.search,
            if state.category.is_empty() { "all categories" } else { state.category.as_str() }
        );
    }

    pub fn add_sample(&mut self, now: Instant) {
        self.games.on_add_sample(now);
        self.status_msg = format!("{} rows", self.games.rows().len());
    }

    // ── Details ──

    pub fn active_modal(&self) -> Option<&DetailModal> {
        match self.view {
            View::Games => self.games.modal(),
            View::Home => self.home.modal(),
        }
    }

    pub fn modal_open(&self) -> bool {
        self.active_modal().is_some_and(DetailModal::is_open)
    }

    /// Open the detail overlay for the current selection.
    pub fn open_detail(&mut self, now: Instant) {
        match self.view {
            View::Games => {
                let Some(row) = self.visible_rows().into_iter().nth(self.selected) else {
                    return;
                };
                if !self.games.open_row(&row.slug, now) {
                    self.status_msg = format!("No details for {}", row.title);
                }
            }
            View::Home => {
                let Some(button) = self.home.details_button(self.featured_selected) else {
                    return;
                };
                self.home.on_click(&button, now);
            }
        }
    }

    pub fn close_detail(&mut self, now: Instant) {
        match self.view {
            View::Games => self.games.on_key("Escape", now),
            View::Home => self.home.on_key("Escape", now),
        };
    }

    /// Back-to-top button: only acts while it is displayed.
    pub fn to_top(&mut self) {
        if self.to_top.as_ref().is_some_and(ToTop::is_visible) {
            self.list_first();
        }
    }

    // ── Quick vote ──

    pub fn toggle_vote(&mut self, now: Instant) {
        self.quick_vote.toggle(now);
        if !self.quick_vote.is_open() && self.input_mode == InputMode::Email {
            self.input_mode = InputMode::Normal;
        }
    }

    pub fn vote_select(&mut self, index: usize) {
        if let Some(genre) = self.quick_vote.genres().get(index).cloned() {
            self.quick_vote.select_genre(&genre);
        }
    }

    pub fn vote_toggle_subscribe(&mut self) {
        let subscribed = !self.quick_vote.is_subscribed();
        self.quick_vote.set_subscribed(subscribed);
        self.input_mode = if subscribed { InputMode::Email } else { InputMode::Normal };
    }

    pub fn vote_email_push(&mut self, c: char) {
        let mut email = self.quick_vote.email();
        email.push(c);
        self.quick_vote.set_email(&email);
    }

    pub fn vote_email_pop(&mut self) {
        let mut email = self.quick_vote.email();
        email.pop();
        self.quick_vote.set_email(&email);
    }

    pub fn vote_submit(&mut self, now: Instant) {
        let message = self.quick_vote.submit(now);
        self.games.notify(&message, now);
        self.input_mode = InputMode::Normal;
    }

    /// Advance every pending transition.
    pub fn tick(&mut self, now: Instant) {
        self.games.tick(now);
        self.home.tick(now);
        self.quick_vote.tick(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const CATALOG: &[u8] = br#"[
        {"slug": "a", "title": "Stardew Valley", "genre": "Sim", "publisher": "ConcernedApe",
         "release_date": "2016-02-26", "rating": 9.0, "cover": "assets/a.jpg",
         "summary": "Farm life.", "platforms": ["PC"]},
        {"slug": "b", "title": "Judgment", "genre": "Action", "publisher": "Sega",
         "release_date": "2018-12-13", "rating": 8.0, "cover": "assets/b.jpg",
         "summary": "Detective story.", "platforms": ["PS4"]}
    ]"#;

    fn app() -> App {
        let mut store = CatalogStore::new();
        store.load_bytes(CATALOG).unwrap();
        App::new(Rc::new(store), &SiteConfig::default()).unwrap()
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut app = app();
        assert_eq!(app.status_msg, "2 games loaded");
        app.list_prev();
        assert_eq!(app.selected, 0);
        app.list_next();
        app.list_next();
        assert_eq!(app.selected, 1);
        app.list_first();
        app.list_last();
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_search_typing_filters() {
        let mut app = app();
        for c in "stardew".chars() {
            app.search_push(c);
        }
        let titles: Vec<_> = app.visible_rows().into_iter().map(|r| r.title).collect();
        assert_eq!(titles, ["Stardew Valley"]);
        for _ in 0..7 {
            app.search_pop();
        }
        assert_eq!(app.visible_rows().len(), 2);
    }

    #[test]
    fn test_cycle_category_wraps() {
        let mut app = app();
        app.cycle_category();
        assert_eq!(app.games.current_category(), "Action");
        assert_eq!(app.visible_rows().len(), 1);
        for _ in 0..4 {
            app.cycle_category();
        }
        assert_eq!(app.games.current_category(), "");
    }

    #[test]
    fn test_open_detail_on_both_views() {
        let mut app = app();
        let now = Instant::now();
        app.open_detail(now);
        assert!(app.modal_open());
        app.close_detail(now);
        assert!(!app.modal_open());

        app.switch_view();
        app.featured_next();
        app.open_detail(now);
        let modal = app.active_modal().unwrap();
        assert_eq!(modal.elements().title.borrow().text_content(), "Stardew Valley");
    }

    #[test]
    fn test_sample_row_has_no_details() {
        let mut app = app();
        let now = Instant::now();
        app.add_sample(now);
        app.list_last();
        app.open_detail(now);
        assert!(!app.modal_open());
        assert_eq!(app.status_msg, "No details for Arcane Trials");
    }

    #[test]
    fn test_vote_flow_notifies() {
        let mut app = app();
        let now = Instant::now();
        app.toggle_vote(now);
        app.vote_select(1);
        app.vote_toggle_subscribe();
        assert_eq!(app.input_mode, InputMode::Email);
        for c in "me@x.org".chars() {
            app.vote_email_push(c);
        }
        app.vote_submit(now);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(!app.quick_vote.is_open());
        let msg = app.games.notice().message().unwrap();
        assert!(msg.ends_with("Category: Action\nEmail: me@x.org"));

        app.tick(now + Duration::from_secs(3));
        assert!(app.games.notice().message().is_none());
    }
}
