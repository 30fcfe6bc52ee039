//! Game catalog site: catalog loading, page rendering and the interactive
//! behaviour of the games, home, about and review pages, modelled over an
//! in-memory document tree.

pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod dom;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod game;
pub mod logging;
pub mod modal;
pub mod notice;
pub mod pages;
pub mod render;
pub mod timer;
