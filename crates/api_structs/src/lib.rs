mod attendance;
mod enrollment;
mod reminder;
mod reminder_config;
mod session;
mod status;
mod user;

pub mod dtos {
    pub use crate::attendance::dtos::*;
    pub use crate::enrollment::dtos::*;
    pub use crate::reminder::dtos::*;
    pub use crate::reminder_config::dtos::*;
    pub use crate::session::dtos::*;
    pub use crate::user::dtos::*;
}

pub use crate::attendance::api::*;
pub use crate::enrollment::api::*;
pub use crate::reminder::api::*;
pub use crate::reminder_config::api::*;
pub use crate::session::api::*;
pub use crate::status::api::*;
pub use crate::user::api::*;
