//! Static page skeletons: the markup each page ships with before any
//! component attaches to it.

use crate::dom::{Document, Element, ElementRef};
use std::rc::Rc;

pub const VOTE_GENRES: [&str; 4] = ["RPG", "Action", "Sim", "Strategy"];
pub const REVIEW_PLATFORMS: [&str; 4] = ["PC", "PlayStation", "Xbox", "Switch"];

fn radio(name: &str, value: &str, label: &str, checked: bool) -> Element {
    let mut input = Element::new("input")
        .with_attr("type", "radio")
        .with_attr("name", name)
        .with_attr("value", value);
    input.set_checked(checked);
    Element::new("label").with_child(input).with_text(label)
}

fn nav() -> Element {
    let link = |href: &str, text: &str| Element::new("li").with_child(Element::new("a").with_attr("href", href).with_text(text));
    Element::new("header")
        .with_child(Element::new("span").with_class("logo").with_text("GameHub"))
        .with_child(
            Element::new("nav").with_id("menu").with_child(
                Element::new("ul")
                    .with_child(link("index.html", "Home"))
                    .with_child(link("games.html", "Games"))
                    .with_child(link("about.html", "About"))
                    .with_child(link("review.html", "Review")),
            ),
        )
}

fn quick_vote() -> Vec<Element> {
    let mut radios = Element::new("fieldset").with_child(Element::new("legend").with_text("Favourite genre"));
    for g in VOTE_GENRES {
        radios.append(radio("genre", g, g, false));
    }

    let mut panel = Element::new("aside")
        .with_id("quickvotePanel")
        .with_class("quickvote-panel")
        .with_attr("aria-labelledby", "quickvoteHeading")
        .with_child(Element::new("h2").with_id("quickvoteHeading").with_text("Quick vote"))
        .with_child(
            Element::new("button")
                .with_id("quickvoteClose")
                .with_attr("aria-label", "Close")
                .with_text("×"),
        )
        .with_child(
            Element::new("form")
                .with_id("voteForm")
                .with_child(radios)
                .with_child(
                    Element::new("label")
                        .with_child(Element::new("input").with_id("subscribe").with_attr("type", "checkbox"))
                        .with_text("Notify me by e-mail"),
                )
                .with_child(
                    Element::new("div").with_id("emailField").with_child(
                        Element::new("input")
                            .with_id("voteEmail")
                            .with_attr("type", "email")
                            .with_attr("placeholder", "you@example.com"),
                    ),
                )
                .with_child(Element::new("button").with_attr("type", "submit").with_text("Vote")),
        );
    panel.set_hidden(true);

    vec![
        Element::new("button")
            .with_id("quickvoteToggle")
            .with_class("quickvote-toggle")
            .with_attr("aria-controls", "quickvotePanel")
            .with_attr("aria-expanded", "false")
            .with_text("Vote"),
        Element::new("div").with_id("quickvoteOverlay").with_class("quickvote-overlay"),
        panel,
    ]
}

fn footer() -> Vec<Element> {
    vec![
        Element::new("footer")
            .with_text("© ")
            .with_child(Element::new("span").with_id("year"))
            .with_text(" GameHub"),
        Element::new("button")
            .with_id("toTop")
            .with_attr("aria-label", "Back to top")
            .with_style("display", "none")
            .with_text("↑"),
    ]
}

fn page(title: &str, main: Element) -> Rc<Document> {
    let doc = Document::new(title);
    {
        let body = doc.body();
        let mut body = body.borrow_mut();
        body.append(nav());
        body.append(main);
        for el in footer().into_iter().chain(quick_vote()) {
            body.append(el);
        }
    }
    Rc::new(doc)
}

pub fn modal_skeleton() -> Element {
    let mut modal = Element::new("div")
        .with_id("gameModal")
        .with_class("modal")
        .with_attr("role", "dialog")
        .with_attr("aria-modal", "true")
        .with_attr("aria-labelledby", "modalTitle")
        .with_child(
            Element::new("div")
                .with_class("modal-content")
                .with_child(
                    Element::new("button")
                        .with_class("close")
                        .with_attr("aria-label", "Close")
                        .with_text("×"),
                )
                .with_child(Element::new("img").with_id("modalCover").with_attr("alt", ""))
                .with_child(Element::new("h2").with_id("modalTitle"))
                .with_child(
                    Element::new("ul")
                        .with_class("modal-meta")
                        .with_child(Element::new("li").with_text("Genre: ").with_child(Element::new("span").with_id("modalGenre")))
                        .with_child(Element::new("li").with_text("Publisher: ").with_child(Element::new("span").with_id("modalPublisher")))
                        .with_child(Element::new("li").with_text("Platforms: ").with_child(Element::new("span").with_id("modalPlatforms")))
                        .with_child(Element::new("li").with_text("Rating: ").with_child(Element::new("span").with_id("modalRating"))),
                )
                .with_child(Element::new("div").with_id("modalSummary")),
        );
    modal.set_hidden(true);
    modal
}

/// The games page: search box, category radios, table, cards, detail modal.
pub fn games_document<S: AsRef<str>>(categories: &[S]) -> Rc<Document> {
    let mut filter = Element::new("div")
        .with_id("genreFilter")
        .with_class("genre-filter")
        .with_child(radio("genre", "", "All", true));
    for c in categories {
        filter.append(radio("genre", c.as_ref(), c.as_ref(), false));
    }

    let main = Element::new("main")
        .with_child(Element::new("h1").with_text("Games"))
        .with_child(
            Element::new("div")
                .with_class("toolbar")
                .with_child(
                    Element::new("input")
                        .with_id("search")
                        .with_attr("type", "search")
                        .with_attr("placeholder", "Search by title…"),
                )
                .with_child(filter)
                .with_child(Element::new("button").with_id("clear").with_text("Clear"))
                .with_child(Element::new("button").with_id("addSample").with_text("Add sample row")),
        )
        .with_child(
            Element::new("table")
                .with_id("gamesTable")
                .with_child(Element::new("thead").with_child(
                    Element::new("tr").with_children(
                        ["Cover", "Title", "Genre", "Publisher", "Released", "Rating"]
                            .iter()
                            .map(|h| Element::new("th").with_text(h)),
                    ),
                ))
                .with_child(Element::new("tbody")),
        )
        .with_child(Element::new("section").with_class("details"))
        .with_child(modal_skeleton());
    page("Games", main)
}

/// The home page: featured grid plus the detail modal.
pub fn home_document() -> Rc<Document> {
    let main = Element::new("main")
        .with_child(Element::new("h1").with_text("Featured games"))
        .with_child(
            Element::new("section")
                .with_id("featuredGrid")
                .with_class("featured-grid")
                .with_child(Element::new("article").with_class("featured-card placeholder").with_text("Loading…")),
        )
        .with_child(modal_skeleton());
    page("Home", main)
}

pub const ABOUT_FAQ: [(&str, &str); 3] = [
    ("Where does the game data come from?", "From a static JSON file shipped with the site."),
    ("How are ratings coloured?", "8.5 and above is good, 7 to 8.5 is ok, anything lower is bad."),
    ("Can I send a review?", "Yes, use the form on the Review page."),
];

pub const ABOUT_MEMBERS: [(&str, &str); 3] = [
    ("Anna", "Editor"),
    ("Bence", "Reviewer"),
    ("Csilla", "Developer"),
];

/// The about page: team cards and the FAQ accordion.
pub fn about_document() -> Rc<Document> {
    let team = Element::new("section").with_class("team").with_children(ABOUT_MEMBERS.iter().map(|(name, role)| {
        Element::new("article")
            .with_class("member")
            .with_child(Element::new("h3").with_text(name))
            .with_child(Element::new("p").with_text(role))
    }));
    let faq = Element::new("section").with_class("faq").with_children(ABOUT_FAQ.iter().map(|(q, a)| {
        Element::new("div")
            .with_class("faq-item")
            .with_child(Element::new("button").with_class("faq-question").with_text(q))
            .with_child(Element::new("div").with_class("faq-answer").with_child(Element::new("p").with_text(a)))
    }));
    let main = Element::new("main")
        .with_child(Element::new("h1").with_text("About us"))
        .with_child(team)
        .with_child(faq);
    page("About", main)
}

fn field(label: &str, control: Element, err_id: &str, err_text: &str) -> Element {
    Element::new("div")
        .with_class("field")
        .with_child(Element::new("label").with_text(label))
        .with_child(control)
        .with_child(
            Element::new("div")
                .with_id(err_id)
                .with_class("err-msg")
                .with_style("display", "none")
                .with_text(err_text),
        )
}

fn text_input(id: &str, kind: &str) -> Element {
    Element::new("input").with_id(id).with_attr("type", kind).with_attr("name", id)
}

/// The review page form.
pub fn review_document() -> Rc<Document> {
    let platforms = Element::new("div").with_class("platforms").with_children(
        REVIEW_PLATFORMS.iter().map(|p| radio("platform", p, p, false)),
    );
    let form = Element::new("form")
        .with_id("reviewForm")
        .with_child(field("Name", text_input("name", "text"), "err-name", "Please enter at least 2 characters."))
        .with_child(field("E-mail", text_input("email", "email"), "err-email", "Please enter a valid e-mail address."))
        .with_child(field("Game title", text_input("title", "text"), "err-title", "Please enter at least 2 characters."))
        .with_child(field(
            "Review",
            Element::new("textarea").with_id("review").with_attr("name", "review"),
            "err-review",
            "The review must be at least 5 characters long.",
        ))
        .with_child(field("Platform", platforms, "err-platform", "Please choose a platform."))
        .with_child(field(
            "Terms",
            Element::new("label")
                .with_child(Element::new("input").with_id("terms").with_attr("type", "checkbox"))
                .with_text("I accept the terms"),
            "err-terms",
            "You must accept the terms.",
        ))
        .with_child(Element::new("button").with_attr("type", "submit").with_text("Send"))
        .with_child(Element::new("button").with_id("fillSample").with_attr("type", "button").with_text("Fill sample"))
        .with_child(Element::new("button").with_id("resetBtn").with_attr("type", "reset").with_text("Reset"));
    let main = Element::new("main")
        .with_child(Element::new("h1").with_text("Write a review"))
        .with_child(form)
        .with_child(Element::new("div").with_id("formMsg"));
    page("Review", main)
}

/// First `tbody` below `#gamesTable`.
pub fn games_tbody(doc: &Document) -> Option<ElementRef> {
    let table = doc.get_element_by_id("gamesTable")?;
    crate::dom::find_first(&table, &|e| e.tag() == "tbody")
}
