pub mod provision;
pub mod teardown;
pub mod verify;
