//! # **Print Module** - *Preview Printing*
//!
//! Contains the `Print` trait, which wraps `Display` to provide
//! `myobj.print()` for any object that implements it. The column and
//! storage `Display` impls render a truncated row preview bounded by
//! `MAX_PREVIEW`.

use std::fmt::Display;

pub(crate) const MAX_PREVIEW: usize = 50;

/// # Print
///
/// Convenience trait for previewing columns and buffers.
///
/// Provides a more convenient way to activate `Display`
/// via `mycol.print()`, avoiding the need to write
/// `println!("{}", mycol);`
pub trait Print {
    #[inline]
    fn print(&self)
    where
        Self: Display,
    {
        println!("{}", self);
    }
}

impl<T: Display> Print for T {}
