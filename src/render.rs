//! Catalog renderers: game records in, document nodes out.
//!
//! Nodes are built structurally, so every field taken from the catalog is
//! escaped when the document is serialized.

use crate::dom::{Element, ElementRef, Node};
use crate::game::Game;

pub const OPEN_DETAILS: &str = "open-details";

pub const TABLE_LOAD_WARNING: &str = "⚠️ Could not load the game list (games.json). Check that a local server is running and that data/games.json is reachable.";
pub const FEATURED_LOAD_WARNING: &str = "⚠️ The game database is not available.";

/// Number of columns in the games table.
pub const TABLE_COLUMNS: usize = 6;

pub fn rating_badge(game: &Game) -> Element {
    Element::new("span")
        .with_class("rating")
        .with_class(game.tier().as_str())
        .with_text(&game.rating_label())
}

fn cover(game: &Game, alt_suffix: &str) -> Element {
    Element::new("img")
        .with_attr("src", &game.cover)
        .with_attr("alt", &format!("{} {}", game.title, alt_suffix))
        .with_attr("loading", "lazy")
}

fn cell(text: &str) -> Element {
    Element::new("td").with_text(text)
}

/// One table row. `data-title`/`data-genre` are lowercased for the filter.
pub fn table_row(game: &Game) -> Element {
    Element::new("tr")
        .with_id(&game.slug)
        .with_data("title", &game.title.to_lowercase())
        .with_data("genre", &game.genre.to_lowercase())
        .with_child(Element::new("td").with_class("cover").with_child(cover(game, "cover")))
        .with_child(
            Element::new("td").with_child(
                Element::new("a")
                    .with_attr("href", &format!("#{}", game.card_anchor()))
                    .with_data("action", OPEN_DETAILS)
                    .with_data("slug", &game.slug)
                    .with_text(&game.title),
            ),
        )
        .with_child(cell(&game.genre))
        .with_child(cell(&game.publisher))
        .with_child(cell(&game.release_date))
        .with_child(Element::new("td").with_child(rating_badge(game)))
}

/// Replace the table body with one row per game.
pub fn fill_table(tbody: &ElementRef, games: &[Game]) {
    let rows: Vec<Node> = games.iter().map(|g| table_row(g).into()).collect();
    tbody.borrow_mut().replace_children(rows);
}

pub fn table_warning(message: &str) -> Element {
    Element::new("tr").with_class("load-warning").with_child(
        Element::new("td")
            .with_attr("colspan", &TABLE_COLUMNS.to_string())
            .with_text(message),
    )
}

/// Detail card shown under the table.
pub fn card(game: &Game) -> Element {
    let item = |label: &str, value: &str| Element::new("li").with_text(&format!("{label}: {value}"));
    Element::new("article")
        .with_class("card")
        .with_id(&game.card_anchor())
        .with_child(cover(game, "large cover"))
        .with_child(Element::new("h3").with_text(&game.title))
        .with_child(Element::new("p").with_text(game.summary.as_deref().unwrap_or("")))
        .with_child(
            Element::new("ul")
                .with_child(item("Genre", &game.genre))
                .with_child(item("Platforms", &game.platform_list()))
                .with_child(item("Publisher", &game.publisher))
                .with_child(item("Released", &game.release_date))
                .with_child(Element::new("li").with_text("Rating: ").with_child(rating_badge(game))),
        )
}

pub fn fill_cards(container: &ElementRef, games: &[Game]) {
    let cards: Vec<Node> = games.iter().map(|g| card(g).into()).collect();
    container.borrow_mut().replace_children(cards);
}

/// Home page card with a "Details" action resolved by the grid's delegated
/// click handler.
pub fn featured_card(game: &Game) -> Element {
    Element::new("article")
        .with_class("featured-card")
        .with_data("slug", &game.slug)
        .with_child(cover(game, "cover"))
        .with_child(Element::new("h3").with_text(&game.title))
        .with_child(
            Element::new("div")
                .with_class("featured-meta")
                .with_text(&format!("{} • ", game.genre))
                .with_child(rating_badge(game)),
        )
        .with_child(Element::new("p").with_text(game.summary.as_deref().unwrap_or("")))
        .with_child(
            Element::new("div").with_class("featured-actions").with_child(
                Element::new("button")
                    .with_class("btn btn-accent details-btn")
                    .with_data("action", OPEN_DETAILS)
                    .with_data("slug", &game.slug)
                    .with_text("Details"),
            ),
        )
}

pub fn fill_featured(grid: &ElementRef, games: &[&Game]) {
    let cards: Vec<Node> = games.iter().map(|g| featured_card(g).into()).collect();
    grid.borrow_mut().replace_children(cards);
}

pub fn featured_warning(message: &str) -> Element {
    Element::new("article")
        .with_class("featured-card load-warning")
        .with_text(message)
}

/// Text split into lines joined by `br` elements.
pub fn multiline(text: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            nodes.push(Element::new("br").into());
        }
        if !line.is_empty() {
            nodes.push(Node::text(line));
        }
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::game;

    #[test]
    fn test_table_row_shape() {
        let g = game("stardew", "Stardew Valley", "Sim", 9.0, "2016-02-26");
        let row = table_row(&g);
        assert_eq!(row.id(), Some("stardew"));
        assert_eq!(row.data("title"), Some("stardew valley"));
        assert_eq!(row.data("genre"), Some("sim"));
        assert_eq!(row.child_elements().len(), TABLE_COLUMNS);

        let html = row.to_html();
        assert!(html.contains("href=\"#stardew-card\""));
        assert!(html.contains("<span class=\"rating good\">9</span>"));
        assert!(html.contains("alt=\"Stardew Valley cover\""));
    }

    #[test]
    fn test_fill_table_one_row_per_game() {
        let games = vec![
            game("a", "A", "RPG", 7.0, "2020-01-01"),
            game("b", "B", "Sim", 7.0, "2020-01-01"),
            game("c", "C", "Sim", 7.0, "2020-01-01"),
        ];
        let tbody = Element::new("tbody").with_child(table_warning("stale")).into_ref();
        fill_table(&tbody, &games);
        assert_eq!(tbody.borrow().child_elements().len(), 3);
        fill_table(&tbody, &games[..1]);
        assert_eq!(tbody.borrow().child_elements().len(), 1);
    }

    #[test]
    fn test_catalog_fields_are_escaped() {
        let mut g = game("x", "<script>alert(1)</script>", "RPG\"><b>", 7.0, "2020-01-01");
        g.publisher = "A & B".to_string();
        for html in [table_row(&g).to_html(), card(&g).to_html(), featured_card(&g).to_html()] {
            assert!(!html.contains("<script>"));
            assert!(!html.contains("<b>"));
            assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        }
        assert!(table_row(&g).to_html().contains("A &amp; B"));
    }

    #[test]
    fn test_card_contents() {
        let g = game("judgment", "Judgment", "Action", 8.0, "2018-12-13");
        let c = card(&g);
        assert_eq!(c.id(), Some("judgment-card"));
        let text = c.text_content();
        assert!(text.contains("Platforms: PC, Switch"));
        assert!(text.contains("Released: 2018-12-13"));
        assert!(c.to_html().contains("rating ok"));
    }

    #[test]
    fn test_featured_card_has_details_action() {
        let g = game("poe", "Path of Exile", "ARPG", 6.5, "2013-10-23");
        let html = featured_card(&g).to_html();
        assert!(html.contains("data-action=\"open-details\""));
        assert!(html.contains("data-slug=\"poe\""));
        assert!(html.contains("rating bad"));
    }

    #[test]
    fn test_multiline() {
        let p = Element::new("p").with_children(multiline("one\ntwo\n\nthree"));
        assert_eq!(p.to_html(), "<p>one<br>two<br><br>three</p>");
        assert_eq!(p.text_content(), "one\ntwo\n\nthree");
        assert!(multiline("").is_empty());
    }

    #[test]
    fn test_table_warning_spans_all_columns() {
        let html = table_warning(TABLE_LOAD_WARNING).to_html();
        assert!(html.contains("colspan=\"6\""));
        assert!(html.starts_with("<tr class=\"load-warning\">"));
    }
}
