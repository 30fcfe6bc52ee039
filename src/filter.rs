use crate::dom::ElementRef;

/// Normalized search text + category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    search: String,
    category: String,
}

impl FilterQuery {
    /// Lowercases both inputs, trims the search text and treats the category
    /// `all` the same as no category.
    pub fn new(search: &str, category: &str) -> Self {
        let category = category.to_lowercase();
        Self {
            search: search.trim().to_lowercase(),
            category: if category == "all" { String::new() } else { category },
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.category.is_empty()
    }

    /// Substring containment on both predicates.
    pub fn matches(&self, title: &str, genre: &str) -> bool {
        let title_ok = self.search.is_empty() || title.to_lowercase().contains(&self.search);
        let genre_ok = self.category.is_empty() || genre.to_lowercase().contains(&self.category);
        title_ok && genre_ok
    }
}

/// Shows or hides already-rendered table rows; never re-renders them.
#[derive(Debug)]
pub struct FilterEngine {
    tbody: ElementRef,
}

impl FilterEngine {
    pub fn new(tbody: ElementRef) -> Self {
        Self { tbody }
    }

    pub fn apply(&self, search: &str, category: &str) -> usize {
        self.apply_query(&FilterQuery::new(search, category))
    }

    /// Toggle each row's display from its `data-title`/`data-genre`.
    /// Returns the number of rows left visible.
    pub fn apply_query(&self, query: &FilterQuery) -> usize {
        let rows = self.tbody.borrow().child_elements();
        let mut visible = 0;
        for row in rows {
            let mut row = row.borrow_mut();
            let shown = query.matches(
                row.data("title").unwrap_or(""),
                row.data("genre").unwrap_or(""),
            );
            row.set_displayed(shown);
            if shown {
                visible += 1;
            }
        }
        log::trace!(
            "filter search={:?} category={:?}: {} visible",
            query.search(),
            query.category(),
            visible
        );
        visible
    }

    pub fn rows(&self) -> Vec<ElementRef> {
        self.tbody.borrow().child_elements()
    }

    pub fn visible_rows(&self) -> Vec<ElementRef> {
        self.rows()
            .into_iter()
            .filter(|r| r.borrow().is_displayed())
            .collect()
    }
}
