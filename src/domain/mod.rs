//! Domain values exchanged with the truck backend.

pub mod truck;
pub mod types;
