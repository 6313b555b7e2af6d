pub use contact::*;
pub use content_block::*;
pub use gallery::*;
pub use notice::*;
pub use required::RequiredFields;
pub use staff::*;
pub use user::*;

pub mod timestamp;

mod contact;
mod content_block;
mod gallery;
mod notice;
mod required;
mod staff;
mod user;
