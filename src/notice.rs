use crate::dom::{Element, ElementRef};
use crate::timer::Delayed;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub const NOTICE_DURATION: Duration = Duration::from_millis(2500);

/// Transient toast. The `div.notice` element is created on first use and
/// reused afterwards.
#[derive(Debug)]
pub struct Notice {
    host: ElementRef,
    el: Option<ElementRef>,
    hide: Delayed<()>,
}

impl Notice {
    /// `host` receives the notice element (normally the page body).
    pub fn new(host: ElementRef) -> Self {
        Self {
            host,
            el: None,
            hide: Delayed::new(),
        }
    }

    pub fn show(&mut self, message: &str, now: Instant) {
        let el = match &self.el {
            Some(el) => Rc::clone(el),
            None => {
                let el = Element::new("div").with_class("notice").into_ref();
                self.host.borrow_mut().append(Rc::clone(&el));
                self.el = Some(Rc::clone(&el));
                el
            }
        };
        {
            let mut el = el.borrow_mut();
            el.set_text(message);
            el.add_class("show");
        }
        // a newer notice restarts the countdown
        self.hide.schedule(now, NOTICE_DURATION, ());
    }

    pub fn tick(&mut self, now: Instant) {
        if self.hide.take_due(now).is_some() {
            if let Some(el) = &self.el {
                el.borrow_mut().remove_class("show");
            }
        }
    }

    pub fn is_showing(&self) -> bool {
        self.el.as_ref().is_some_and(|el| el.borrow().has_class("show"))
    }

    /// Text of the toast while it is showing.
    pub fn message(&self) -> Option<String> {
        if !self.is_showing() {
            return None;
        }
        self.el.as_ref().map(|el| el.borrow().text_content())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_show_then_hide() {
        let body = Element::new("body").into_ref();
        let mut notice = Notice::new(Rc::clone(&body));
        let t0 = Instant::now();

        assert!(!notice.is_showing());
        notice.show("Saved", t0);
        assert_eq!(notice.message().as_deref(), Some("Saved"));
        assert_eq!(body.borrow().child_elements().len(), 1);

        notice.tick(t0 + 2499 * MS);
        assert!(notice.is_showing());
        notice.tick(t0 + 2500 * MS);
        assert!(!notice.is_showing());
        assert_eq!(notice.message(), None);
    }

    #[test]
    fn test_second_notice_is_not_cut_short() {
        let body = Element::new("body").into_ref();
        let mut notice = Notice::new(Rc::clone(&body));
        let t0 = Instant::now();

        notice.show("first", t0);
        notice.show("second", t0 + 2000 * MS);
        notice.tick(t0 + 2600 * MS);
        assert_eq!(notice.message().as_deref(), Some("second"));
        notice.tick(t0 + 4500 * MS);
        assert!(!notice.is_showing());

        // the element is reused
        assert_eq!(body.borrow().child_elements().len(), 1);
    }
}
