pub mod analysis;
pub mod gui;
pub mod interact;
pub mod sketch;
