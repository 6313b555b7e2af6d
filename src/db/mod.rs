pub use db::*;

pub mod accounts;
pub mod contact;
pub mod content_blocks;
pub mod gallery;
pub mod notices;
pub mod profiles;
pub mod roles;
pub mod staff;

mod db;
