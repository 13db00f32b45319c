pub mod identity;
pub mod remotes;
