//! Formcraft Validation Core
//!
//! Pure validator functions shared by the rule synthesizer and anything else
//! that needs to check a single field value. Works with and without `std`.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod choice;
pub mod email;
pub mod numeric;
pub mod string;

pub use choice::*;
pub use email::*;
pub use numeric::*;
pub use string::*;
