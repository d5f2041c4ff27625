pub mod catalog;
pub mod config;
pub mod effects;
pub mod error;
pub mod listing;
pub mod post;
pub mod script;
pub mod session;
pub mod timer;
pub mod view;
