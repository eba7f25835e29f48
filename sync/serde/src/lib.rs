//! # Gearsync Serde
//! Bit-level serialization used by the gearsync engine: an LSB-first bit
//! writer/reader pair, the [`Serde`] trait, and compact wire integers.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod bit_reader;
mod bit_writer;
mod error;
mod integer;
mod serde;

pub use bit_reader::BitReader;
pub use bit_writer::{BitWrite, BitWriter};
pub use error::SerdeErr;
pub use integer::{UnsignedInteger, UnsignedVariableInteger};
pub use serde::Serde;
