//! Output writers: JSON documents on disk, plain-text report on stdout.

pub mod json;
pub mod text;
