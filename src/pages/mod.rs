//! Page controllers. Each one attaches to a document built in [`layout`],
//! resolves its elements once and then reacts to clicks, keys and ticks.

pub mod about;
pub mod chrome;
pub mod games;
pub mod home;
pub mod layout;
pub mod quickvote;
pub mod review;

use crate::modal::ModalState;

/// Ephemeral per-page view state. Never written back to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub search: String,
    pub category: String,
    pub modal: ModalState,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: String::new(),
            modal: ModalState::Closed,
        }
    }
}
