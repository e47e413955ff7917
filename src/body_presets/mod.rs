//! Preset reference bodies.
//!
//! Each preset is placed at the world origin with its polar axis along +Y.
//! Use [`ReferenceBody::with_position`][crate::ReferenceBody::with_position]
//! and [`ReferenceBody::with_up`][crate::ReferenceBody::with_up] to pose it.

mod planets;
mod stars;

pub use planets::{earth, kerbin, mun, the_moon};
pub use stars::{kerbol, the_sun};
