//! # Lockstep Serde
//! Explicit little-endian byte serialization shared by the lockstep crates.
//!
//! Every multi-byte integer is split into bytes by masking and shifting, so the
//! produced streams are identical on every host regardless of native byte order.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod byte_reader;
mod byte_writer;
mod error;
mod serde;
mod stream_writer;

pub mod le;

pub use byte_reader::ByteReader;
pub use byte_writer::{ByteWrite, SliceWriter};
pub use error::SerdeErr;
pub use serde::{ByteSerde, ConstByteLength};
pub use stream_writer::StreamWriter;
