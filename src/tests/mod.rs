//! Tests that should be completed in-crate.
//! This allows access to crate-private items such as the position hashing.
//! Tests in a `tests/` folder at the repository root are treated as external
//! to the crate, and only see the public API.

mod grouping;
