// Modular tools
pub mod analyze;
pub mod extract;
pub mod fetch;
pub mod map;
