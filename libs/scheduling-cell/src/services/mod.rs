pub mod lifecycle;
pub mod roster;
pub mod scheduling;
