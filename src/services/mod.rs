//! Data-access façades over the inventory store.

pub mod asset;
pub mod user;
