pub mod notification_kind;

pub use notification_kind::NotificationKind;
