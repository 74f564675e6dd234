//! Canvas 2D rendering
//!
//! Wasm-only: draws straight into the page's 2D canvas context.

#[cfg(target_arch = "wasm32")]
mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
