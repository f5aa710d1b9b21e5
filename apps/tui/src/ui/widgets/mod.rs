pub mod controls;
pub mod map;
pub mod popup;
pub mod tables;
