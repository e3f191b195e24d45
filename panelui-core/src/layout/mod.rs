//! Backend-independent text layout
//!
//! Pure geometry: resolving where a string goes and how it breaks into
//! lines. Nothing here touches a backend, so every panel inherits the same
//! layout behavior.

pub mod text;
pub mod wrap;

pub use text::{Anchor, ResolvedText, TextLayout};
pub use wrap::{wrap_lines, wrapped_height, Line, WrapLines};
