//! Survival Control library - form client and terminal rendering.

pub mod display;
pub mod form;
