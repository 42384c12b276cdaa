//! View engine adapters.

mod jinja;
pub mod locations;

pub use jinja::{MiniJinjaView, MiniJinjaViewEngine};
