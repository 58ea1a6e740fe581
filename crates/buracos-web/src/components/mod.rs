//! UI Components

mod header;

pub use header::Header;
