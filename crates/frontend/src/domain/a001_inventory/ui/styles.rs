/// Toast styles injected once by `add_mobile_styles`
pub const MOBILE_STYLES: &str = r#"
.mobile-notification {
    position: fixed;
    bottom: 20px;
    left: 50%;
    transform: translateX(-50%);
    background-color: rgba(0, 0, 0, 0.8);
    color: white;
    padding: 12px 24px;
    border-radius: 25px;
    z-index: 9999;
    transition: opacity 0.5s ease;
    max-width: 90%;
    text-align: center;
}

.mobile-notification-success {
    background-color: rgba(40, 167, 69, 0.9);
}

.mobile-notification-error {
    background-color: rgba(220, 53, 69, 0.9);
}

.mobile-notification-hide {
    opacity: 0;
}
"#;
