// Business logic services layer
//
// Pure or store-backed logic shared by every command: product matching,
// order handling and the overview aggregates.

pub mod matching;
pub mod orders;
pub mod overview;
