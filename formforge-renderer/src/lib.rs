//! # formforge-renderer
//!
//! Turns field instances into the markup the CRM form runtime expects.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use formforge_core::FormDocument;
//! use formforge_renderer::Renderer;
//!
//! fn print_fields(form: &FormDocument) {
//!     let renderer = Renderer::new();
//!     for field in &form.fields {
//!         match renderer.render(field) {
//!             Ok(markup) => print!("{markup}"),
//!             Err(err) => eprintln!("skipped: {err}"),
//!         }
//!     }
//! }
//! ```

pub mod engine;
pub mod error;
pub mod markup;
pub mod rules;

pub use engine::Renderer;
pub use error::RenderError;
pub use markup::{Element, Markup};
