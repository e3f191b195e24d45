//! Display backend implementations

pub mod framebuffer;

pub use framebuffer::FrameBuffer;
