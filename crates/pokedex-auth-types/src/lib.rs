//! Auth types shared by the BFF and its tests.
//!
//! Provides JWT issuing/validation and the `BearerIdentity` extractor.

pub mod bearer;
pub mod token;
