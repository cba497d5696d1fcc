#![cfg_attr(not(test), no_std)]

pub mod analog;
pub mod config;
pub mod link;
pub mod platform;
pub mod render;
pub mod runtime;
pub mod touch;
pub mod ui;

#[cfg(test)]
mod test_support;

pub use runtime::{Collaborators, Handset};
