pub mod delivery;
pub mod smartlink;
pub mod warehouse;
