pub mod notification;
pub mod styles;
