//! Delegated click handling.
//!
//! A container registers one listener; a click resolves the nearest element
//! between the target and the container that carries `data-action`, and the
//! action id selects a handler from the table.

use crate::dom::{ElementRef, closest_with_attr};
use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

/// A resolved click: the action id plus the `data-*` values of the element
/// that carried it.
#[derive(Debug, Clone)]
pub struct ActionEvent {
    pub action: String,
    pub data: BTreeMap<String, String>,
    pub now: Instant,
}

impl ActionEvent {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}

pub type ActionHandler<S> = fn(&mut S, &ActionEvent);

pub struct ActionTable<S> {
    handlers: HashMap<&'static str, ActionHandler<S>>,
}

impl<S> Default for ActionTable<S> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<S> std::fmt::Debug for ActionTable<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut actions: Vec<&&str> = self.handlers.keys().collect();
        actions.sort();
        f.debug_struct("ActionTable").field("actions", &actions).finish()
    }
}

impl<S> ActionTable<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, action: &'static str, handler: ActionHandler<S>) -> Self {
        self.handlers.insert(action, handler);
        self
    }

    pub fn handler(&self, action: &str) -> Option<ActionHandler<S>> {
        self.handlers.get(action).copied()
    }

    /// Resolve a click on `target` inside `container`.
    pub fn resolve(container: &ElementRef, target: &ElementRef, now: Instant) -> Option<ActionEvent> {
        let el = closest_with_attr(container, target, "data-action")?;
        let el = el.borrow();
        let mut data = el.dataset();
        let action = data.remove("action")?;
        Some(ActionEvent { action, data, now })
    }
}

/// State that owns the action table its handlers run against.
pub trait Delegate: Sized {
    fn actions(&self) -> &ActionTable<Self>;
}

/// Resolve a click on `target` inside `container` and run its handler.
/// Returns false when the click hit no action or an action without a
/// handler.
pub fn dispatch<S: Delegate>(state: &mut S, container: &ElementRef, target: &ElementRef, now: Instant) -> bool {
    let Some(event) = ActionTable::<S>::resolve(container, target, now) else {
        return false;
    };
    // copy the handler out so the table is not borrowed while it runs
    let Some(handler) = state.actions().handler(&event.action) else {
        log::debug!("no handler for action {:?}", event.action);
        return false;
    };
    handler(state, &event);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;
    use std::rc::Rc;

    struct Opened {
        seen: Vec<String>,
        actions: ActionTable<Opened>,
    }

    impl Opened {
        fn new() -> Self {
            Self {
                seen: Vec::new(),
                actions: ActionTable::new().on("open-details", Self::open),
            }
        }

        fn open(&mut self, ev: &ActionEvent) {
            self.seen.push(ev.get("slug").unwrap_or_default().to_string());
        }
    }

    impl Delegate for Opened {
        fn actions(&self) -> &ActionTable<Self> {
            &self.actions
        }
    }

    #[test]
    fn test_dispatch_from_nested_target() {
        let label = Element::new("span").with_text("Details").into_ref();
        let button = Element::new("button")
            .with_data("action", "open-details")
            .with_data("slug", "judgment")
            .with_child(Rc::clone(&label))
            .into_ref();
        let plain = Element::new("p").into_ref();
        let grid = Element::new("div")
            .with_child(Element::new("article").with_child(Rc::clone(&button)).with_child(Rc::clone(&plain)))
            .into_ref();

        let mut state = Opened::new();
        let now = Instant::now();

        assert!(dispatch(&mut state, &grid, &label, now));
        assert!(dispatch(&mut state, &grid, &button, now));
        assert!(!dispatch(&mut state, &grid, &plain, now));
        assert_eq!(state.seen, ["judgment", "judgment"]);
    }

    #[test]
    fn test_unknown_action_is_ignored() {
        let button = Element::new("button").with_data("action", "share").into_ref();
        let grid = Element::new("div").with_child(Rc::clone(&button)).into_ref();
        let mut state = Opened::new();
        assert!(ActionTable::<Opened>::resolve(&grid, &button, Instant::now()).is_some());
        assert!(!dispatch(&mut state, &grid, &button, Instant::now()));
        assert!(state.seen.is_empty());
    }
}
