//! This module contains presets for planets and moons.

use crate::ReferenceBody;

/// Returns the Earth.
pub fn earth() -> ReferenceBody {
    ReferenceBody::new("Earth", 3.986_004_418e14, 6.371e6)
}

/// Returns the Moon.
pub fn the_moon() -> ReferenceBody {
    ReferenceBody::new("The Moon", 4.904_869_5e12, 1.7374e6)
}

/// Returns Kerbin, the home planet of the Kerbol system.
pub fn kerbin() -> ReferenceBody {
    ReferenceBody::new("Kerbin", 3.531_6e12, 6.0e5)
}

/// Returns the Mun, Kerbin's larger moon.
pub fn mun() -> ReferenceBody {
    ReferenceBody::new("Mun", 6.513_839_8e10, 2.0e5)
}
