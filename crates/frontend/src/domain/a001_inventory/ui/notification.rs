use contracts::enums::NotificationKind;
use leptos::prelude::*;

pub const HIDE_CLASS: &str = "mobile-notification-hide";

/// Toast shown at the bottom of the screen.
///
/// `hidden` switches on the fade-out class; removal is done by unmounting.
#[component]
pub fn MobileNotification(
    message: String,
    kind: NotificationKind,
    hidden: RwSignal<bool>,
) -> impl IntoView {
    let base = format!("mobile-notification {}", kind.css_class());
    let class = move || {
        if hidden.get() {
            format!("{} {}", base, HIDE_CLASS)
        } else {
            base.clone()
        }
    };

    view! {
        <div class=class role="status">
            {message}
        </div>
    }
}
