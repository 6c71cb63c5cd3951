//! Toast queue behaviour.

use satchel::notifications::{Toast, ToastManager, ToastVariant};
use std::time::Duration;

#[test]
fn test_oldest_toast_is_dropped_at_capacity() {
    let mut toasts = ToastManager::new();
    for n in 0..7 {
        toasts.push(Toast::info(format!("toast {n}")));
    }

    assert_eq!(toasts.count(), 5);
    assert_eq!(toasts.toasts()[0].message, "toast 2");
    assert_eq!(toasts.latest().unwrap().message, "toast 6");
}

#[test]
fn test_expired_toasts_are_removed() {
    let mut toasts = ToastManager::new();
    toasts.push(Toast::warning("gone").with_duration(Duration::ZERO));
    toasts.push(Toast::error("Save failed: disk full"));

    assert!(toasts.remove_expired());
    assert_eq!(toasts.count(), 1);
    assert_eq!(toasts.latest().unwrap().variant, ToastVariant::Error);
    assert!(!toasts.remove_expired());
}

#[test]
fn test_remove_by_id() {
    let mut toasts = ToastManager::new();
    let toast = Toast::success("Saved");
    let toast_id = toast.id;
    toasts.push(toast);
    toasts.push(Toast::info("other"));

    toasts.remove(toast_id);

    assert_eq!(toasts.count(), 1);
    assert_eq!(toasts.latest().unwrap().message, "other");
}
