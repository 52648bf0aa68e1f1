//! Driver for the MikroE Thermo 26 click temperature sensor.
//!
//! The driver itself lives in [`driver::mikroe::thermo26`] and is generic over
//! the `embedded-hal` blocking I2C, output pin and delay traits.

pub mod driver;

pub use driver::mikroe::thermo26::{
    commands::{Command, Rate, Repeatability},
    Address, Error, Thermo26, TransportError,
};
