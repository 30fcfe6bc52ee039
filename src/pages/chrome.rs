//! Bits shared by every page: footer year and the back-to-top button.

use crate::dom::{Document, ElementRef};
use chrono::Datelike;
use std::rc::Rc;

/// Scroll offset past which the back-to-top button appears.
pub const TO_TOP_THRESHOLD: u32 = 180;

/// Write `year` into `#year`. Returns false when the page has no footer
/// year slot.
pub fn stamp_year(doc: &Document, year: i32) -> bool {
    match doc.get_element_by_id("year") {
        Some(el) => {
            el.borrow_mut().set_text(&year.to_string());
            true
        }
        None => false,
    }
}

pub fn stamp_current_year(doc: &Document) -> bool {
    stamp_year(doc, chrono::Local::now().year())
}

#[derive(Debug)]
pub struct ToTop {
    button: ElementRef,
}

impl ToTop {
    pub fn attach(doc: &Document) -> Option<Self> {
        Some(Self {
            button: doc.get_element_by_id("toTop")?,
        })
    }

    pub fn on_scroll(&self, offset: u32) {
        self.button.borrow_mut().set_displayed(offset > TO_TOP_THRESHOLD);
    }

    pub fn is_visible(&self) -> bool {
        self.button.borrow().is_displayed()
    }

    /// True when the click was on the button, meaning the caller should
    /// scroll to the top.
    pub fn on_click(&self, target: &ElementRef) -> bool {
        Rc::ptr_eq(&self.button, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::layout::review_document;

    #[test]
    fn test_year_is_written() {
        let doc = review_document();
        assert!(stamp_year(&doc, 2025));
        assert_eq!(doc.get_element_by_id("year").unwrap().borrow().text_content(), "2025");
        assert!(stamp_current_year(&doc));
        assert!(!stamp_year(&Document::new("bare"), 2025));
    }

    #[test]
    fn test_to_top_threshold() {
        let doc = review_document();
        let to_top = ToTop::attach(&doc).unwrap();
        assert!(!to_top.is_visible());
        to_top.on_scroll(181);
        assert!(to_top.is_visible());
        to_top.on_scroll(180);
        assert!(!to_top.is_visible());

        let button = doc.get_element_by_id("toTop").unwrap();
        assert!(to_top.on_click(&button));
        assert!(!to_top.on_click(&doc.body()));
    }
}
