#![doc = "datutils public API"]
mod error;

pub mod geo;
pub mod io;
pub mod misc;
pub mod nested;
#[cfg(feature = "online")]
pub mod online;

#[doc(inline)]
pub use error::{Error, Result};
