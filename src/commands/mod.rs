pub mod commitment;
pub mod verify;
