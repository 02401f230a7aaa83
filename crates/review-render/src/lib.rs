//! Report rendering.
//!
//! A report becomes a self-contained HTML document, which an
//! [`ImageRenderer`] then turns into the image sent back to chat.

mod html;
mod options;
mod renderer;
mod shell;

pub use html::*;
pub use options::*;
pub use renderer::*;
pub use shell::*;
