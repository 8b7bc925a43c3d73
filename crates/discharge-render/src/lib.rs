//! discharge-render
//!
//! Text projections of simplification results and recovery plans, plus
//! calendar export. Nothing here owns state.

pub mod calendar;
pub mod components;
pub mod error;
pub mod render;
pub mod view;

mod templates;
