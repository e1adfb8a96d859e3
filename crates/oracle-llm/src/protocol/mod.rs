//! Wire format types for the two provider APIs
//!
//! Pure serde structs matching each provider's JSON format, used only at the
//! HTTP boundary.

pub mod google;
pub mod openai;
