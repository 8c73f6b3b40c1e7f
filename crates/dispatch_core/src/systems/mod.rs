pub mod load_creation;
pub mod assignment;
pub mod movement;
