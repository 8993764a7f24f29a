//! Indian income tax and GST calculation.
//!
//! [`core`] holds the domain types and regime configuration, [`tax`] the
//! calculations over them.

pub mod core;
pub mod tax;
