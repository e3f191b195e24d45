//! Touch controller implementations

pub mod xpt2046;

pub use xpt2046::{Channels, NoIrq, Xpt2046};
