//! This module contains presets for stars.
//!
//! "A star is a luminous spheroid of plasma held together by self-gravity."  
//!
//! \- [Wikipedia](https://en.wikipedia.org/wiki/Star)

use crate::ReferenceBody;

/// Returns the Sun.
pub fn the_sun() -> ReferenceBody {
    ReferenceBody::new("The Sun", 1.327_124_400_18e20, 6.9634e8)
}

/// Returns Kerbol, the star of the Kerbol system.
pub fn kerbol() -> ReferenceBody {
    ReferenceBody::new("Kerbol", 1.172_332_8e18, 2.616e8)
}
