//! Client for the lights of a Hue bridge.
//!
//! A [`Light`] is a local mirror of one lamp. It is only ever obtained from the
//! bridge ([`get_light_by_index`], [`get_light_by_name`], [`get_all_lights`])
//! and every change is written to the bridge first, then read back.
//!
//! ```no_run
//! use hust::{colors, get_light_by_name, HttpBridge};
//!
//! # fn main() -> hust::Result<()> {
//! let bridge = HttpBridge::new("192.168.1.20", "my-username")?;
//! let mut lamp = get_light_by_name(&bridge, "Desk")?;
//! lamp.set_color(colors::BLUE)?;
//! lamp.toggle()?;
//! # Ok(())
//! # }
//! ```
#[macro_use]
extern crate serde_derive;
extern crate reqwest;
extern crate serde;
extern crate serde_json;
pub mod error;
pub use error::{Error, Result};
pub mod lights;
pub use lights::{get_all_lights, get_light_by_index, get_light_by_name, Light, StateUpdate};
pub mod bridge;
pub use bridge::{Bridge, HttpBridge};
pub mod colors;
pub use colors::Color;

#[cfg(test)]
mod mock;
