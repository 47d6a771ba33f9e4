#![deny(warnings)]
#![deny(rust_2018_idioms)]

//! Domain logic for drive fare computation: great-circle distance, sample
//! parsing and the velocity-tiered fare model.

mod distance;
mod fare;
mod models;

pub use distance::*;
pub use fare::*;
pub use models::*;
