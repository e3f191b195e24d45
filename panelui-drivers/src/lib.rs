//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in panelui-core, written against the panelui-hal bus and pin traits:
//!
//! - Touch controllers (XPT2046)
//! - Display backends (in-memory framebuffer)
//! - Settings persistence (touch calibration, display configuration)

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod storage;
pub mod touch;
