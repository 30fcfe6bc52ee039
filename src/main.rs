mod app;
mod ui;

use app::{App, InputMode, View};
use clap::{Parser, Subcommand, ValueEnum};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use game_catalog::catalog::CatalogStore;
use game_catalog::config::SiteConfig;
use game_catalog::dom::Document;
use game_catalog::pages::about::{FaqAccordion, StaggeredReveal};
use game_catalog::pages::games::GamesPage;
use game_catalog::pages::home::HomePage;
use game_catalog::pages::quickvote::vote_message;
use game_catalog::pages::review::{ReviewField, ReviewForm, ReviewInput, SubmitOutcome};
use game_catalog::pages::{chrome, layout};
use game_catalog::logging;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Browse the GameHub game catalog in the terminal, or render its pages
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Site root the catalog is fetched from (http(s) URL or directory)
    #[arg(short, long, global = true)]
    base_url: Option<String>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Catalog request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive browser (default)
    Browse,
    /// Render a page to HTML
    Render {
        #[arg(value_enum)]
        page: Page,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a review and print the submitted card
    Review {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        text: String,
        #[arg(long)]
        platform: Option<String>,
        #[arg(long)]
        accept_terms: bool,
        /// Use the sample review
        #[arg(long, conflicts_with_all = ["name", "email", "title", "text", "platform"])]
        sample: bool,
    },
    /// Cast a quick vote for a favourite genre
    Vote {
        genre: Option<String>,
        /// Subscribe to the newsletter with this address
        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Page {
    Games,
    Home,
    About,
    Review,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Browse);

    let loaded = match &cli.config {
        Some(path) => SiteConfig::load_from(path),
        None => SiteConfig::load(),
    };
    let config_warning = loaded.as_ref().err().map(|e| e.user_message());
    let mut config = loaded.unwrap_or_default();
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(timeout) = cli.timeout {
        config.request_timeout_secs = timeout.max(1);
    }

    // The browser owns the terminal, so its logs go to a file.
    let log_file = match command {
        Commands::Browse => logging::default_log_file(),
        _ => None,
    };
    logging::init(&config.log_level, log_file.as_deref())?;
    if let Some(warning) = config_warning {
        eprintln!("Warning: {warning}; using defaults");
        log::warn!("{warning}");
    }

    match command {
        Commands::Browse => {
            let catalog = Rc::new(load_catalog(&config).await);
            let Some(mut app) = App::new(catalog, &config) else {
                eprintln!("Error: page layout is incomplete");
                std::process::exit(1);
            };

            // Init terminal
            let mut terminal = ratatui::init();
            let size = terminal.size()?;
            app.update_page_size(size.height);

            let result = run_app(&mut terminal, &mut app);

            // Restore terminal
            ratatui::restore();

            if let Err(e) = result {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Commands::Render { page, output } => {
            let doc = render_page(page, &config).await?;
            let html = doc.to_html();
            match output {
                Some(path) => {
                    std::fs::write(&path, html)?;
                    eprintln!("Wrote {}", path.display());
                }
                None => println!("{html}"),
            }
        }
        Commands::Review {
            name,
            email,
            title,
            text,
            platform,
            accept_terms,
            sample,
        } => {
            let input = if sample {
                ReviewInput::sample()
            } else {
                ReviewInput {
                    name,
                    email,
                    title,
                    review: text,
                    platform,
                    terms: accept_terms,
                }
            };
            let doc = layout::review_document();
            let form = ReviewForm::attach(&doc).ok_or("review form is incomplete")?;
            form.write(&input);
            match form.submit() {
                SubmitOutcome::Accepted(_) => {
                    println!("{}", form.message());
                    for card in doc.get_elements_by_class("card") {
                        println!("{}", card.borrow().text_content());
                    }
                }
                SubmitOutcome::Rejected(violations) => {
                    for field in &violations {
                        eprintln!("{}: {}", field.id(), error_text(&doc, *field));
                    }
                    std::process::exit(2);
                }
            }
        }
        Commands::Vote { genre, email } => {
            let subscribed = email.is_some();
            println!(
                "{}",
                vote_message(genre.as_deref(), subscribed, email.as_deref().unwrap_or(""))
            );
        }
    }

    Ok(())
}

fn error_text(doc: &Document, field: ReviewField) -> String {
    doc.get_element_by_id(&field.err_id())
        .map(|e| e.borrow().text_content())
        .unwrap_or_default()
}

/// Fetch the catalog once, with a spinner while it downloads. A failure is
/// kept in the store so pages can show their warning.
async fn load_catalog(config: &SiteConfig) -> CatalogStore {
    let mut store = CatalogStore::new();
    let source = match config.catalog_source() {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Warning: {}", e.user_message());
            store.fail(e);
            return store;
        }
    };

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed_precise}] {bytes}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("Loading {}", source.location()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = store
        .load(&source, config.timeout(), |read, total| {
            if let Some(total) = total {
                pb.set_length(total);
            }
            pb.set_position(read);
        })
        .await;
    match result {
        Ok(count) => pb.finish_with_message(format!("Loaded {count} games")),
        Err(e) => pb.abandon_with_message(e.user_message()),
    }
    store
}

async fn render_page(page: Page, config: &SiteConfig) -> Result<Rc<Document>, Box<dyn std::error::Error>> {
    let doc = match page {
        Page::Games => {
            let catalog = Rc::new(load_catalog(config).await);
            let doc = layout::games_document(&config.categories);
            GamesPage::mount(&doc, catalog).ok_or("games page is incomplete")?;
            doc
        }
        Page::Home => {
            let catalog = Rc::new(load_catalog(config).await);
            let doc = layout::home_document();
            HomePage::mount(&doc, catalog, &config.featured_titles).ok_or("home page is incomplete")?;
            doc
        }
        Page::About => {
            let doc = layout::about_document();
            let _faq = FaqAccordion::attach(&doc);
            let mut reveal = StaggeredReveal::attach(&doc);
            let start = Instant::now();
            reveal.start(start);
            // run the stagger to completion so every member is visible
            let mut now = start;
            while !reveal.is_done() {
                now += Duration::from_millis(60);
                reveal.tick(now);
            }
            doc
        }
        Page::Review => {
            let doc = layout::review_document();
            ReviewForm::attach(&doc).ok_or("review form is incomplete")?;
            doc
        }
    };
    chrome::stamp_current_year(&doc);
    Ok(doc)
}

fn run_app(terminal: &mut ratatui::DefaultTerminal, app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Short poll so fades and the toast timer advance
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    handle_key(app, key, Instant::now());
                }
                Event::Resize(_, height) => {
                    app.update_page_size(height);
                }
                _ => {}
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    let typing = app.input_mode != InputMode::Normal;

    // Help toggle (global)
    if key.code == KeyCode::Char('?') && !typing {
        app.show_help = !app.show_help;
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.quick_vote.is_open() {
        handle_vote_key(app, key, now);
        return;
    }
    if app.modal_open() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
            app.close_detail(now);
        }
        return;
    }
    if app.input_mode == InputMode::Search {
        handle_search_input(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Tab => app.switch_view(),
        KeyCode::Char('v') => app.toggle_vote(now),
        KeyCode::Enter => app.open_detail(now),
        _ => match app.view {
            View::Games => handle_games_key(app, key, now),
            View::Home => handle_home_key(app, key),
        },
    }
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Backspace => app.search_pop(),
        KeyCode::Char(c) => app.search_push(c),
        _ => {}
    }
}

fn handle_games_key(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Char('/') => app.input_mode = InputMode::Search,
        KeyCode::Down | KeyCode::Char('j') => app.list_next(),
        KeyCode::Up | KeyCode::Char('k') => app.list_prev(),
        KeyCode::PageDown => app.list_page_down(),
        KeyCode::PageUp => app.list_page_up(),
        KeyCode::Char('g') => app.list_first(),
        KeyCode::Char('G') => app.list_last(),
        KeyCode::Char('c') => app.cycle_category(),
        KeyCode::Char('x') | KeyCode::Esc => app.clear_filter(),
        KeyCode::Char('a') => app.add_sample(now),
        KeyCode::Char('t') => app.to_top(),
        _ => {}
    }
}

fn handle_home_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.featured_next(),
        KeyCode::Up | KeyCode::Char('k') => app.featured_prev(),
        _ => {}
    }
}

fn handle_vote_key(app: &mut App, key: KeyEvent, now: Instant) {
    if app.input_mode == InputMode::Email {
        match key.code {
            KeyCode::Enter => app.vote_submit(now),
            KeyCode::Esc => app.input_mode = InputMode::Normal,
            KeyCode::Backspace => app.vote_email_pop(),
            KeyCode::Char(c) => app.vote_email_push(c),
            _ => {}
        }
        return;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('v') => app.toggle_vote(now),
        KeyCode::Enter => app.vote_submit(now),
        KeyCode::Char('s') => app.vote_toggle_subscribe(),
        KeyCode::Char(c @ '1'..='9') => app.vote_select(c as usize - '1' as usize),
        _ => {}
    }
}
