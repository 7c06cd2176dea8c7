//! Appearance notifications crossing threads into the UI-thread pipeline

use crate::support::{Indicator, ManualNotifier, SharedPreference};
use std::sync::mpsc;
use std::thread;
use virtual_desktop_indicator::appearance::{WatchError, WatchSignal};
use virtual_desktop_indicator::glyph::named;
use virtual_desktop_indicator::{AppearanceMode, IconSize};

const SMALL: IconSize = IconSize::new(16, 16);

/// Subscribe the indicator's watcher and return the UI-thread end of the channel
fn listen(indicator: &mut Indicator, notifier: &ManualNotifier) -> mpsc::Receiver<WatchSignal> {
    let (tx, rx) = mpsc::channel();
    indicator.watcher.listen(
        notifier,
        Box::new(move |signal| {
            let _ = tx.send(signal);
        }),
    );
    rx
}

/// Fire a signal from a helper thread, like the host callback does
fn fire_from_thread(notifier: &ManualNotifier, signal: WatchSignal) {
    let notifier = notifier.clone();
    thread::spawn(move || notifier.fire(signal))
        .join()
        .unwrap();
}

fn drain(indicator: &mut Indicator, rx: &mpsc::Receiver<WatchSignal>) {
    while let Ok(signal) = rx.try_recv() {
        indicator.watcher.handle(signal);
    }
}

#[test]
fn test_flip_updates_mode_without_redraw() {
    let preference = SharedPreference::new(AppearanceMode::Light);
    let mut indicator = Indicator::new(preference.clone(), SMALL);
    let notifier = ManualNotifier::default();
    let rx = listen(&mut indicator, &notifier);

    indicator.answer(Ok(1));
    indicator.tick();
    assert_eq!(indicator.rendered.len(), 1);

    preference.set(AppearanceMode::Dark);
    fire_from_thread(&notifier, WatchSignal::Changed);
    drain(&mut indicator, &rx);

    assert_eq!(indicator.watcher.current(), AppearanceMode::Dark);
    assert_eq!(indicator.rendered.len(), 1);

    // Same desktop on the next poll: still no redraw
    indicator.answer(Ok(1));
    indicator.tick();
    assert_eq!(indicator.rendered.len(), 1);
}

#[test]
fn test_next_desktop_change_uses_new_mode() {
    let preference = SharedPreference::new(AppearanceMode::Light);
    let mut indicator = Indicator::new(preference.clone(), SMALL);
    let notifier = ManualNotifier::default();
    let rx = listen(&mut indicator, &notifier);

    indicator.answer(Ok(1));
    indicator.tick();
    assert_eq!(indicator.rendered[0].1.pixel(0, 0), named::BLACK);

    preference.set(AppearanceMode::Dark);
    fire_from_thread(&notifier, WatchSignal::Changed);
    drain(&mut indicator, &rx);

    indicator.answer(Ok(3));
    indicator.tick();
    assert_eq!(indicator.rendered[1].1.pixel(0, 0), named::LIGHT_GREEN);
}

#[test]
fn test_failed_reread_keeps_previous_mode() {
    let preference = SharedPreference::new(AppearanceMode::Dark);
    let mut indicator = Indicator::new(preference.clone(), SMALL);
    let notifier = ManualNotifier::default();
    let rx = listen(&mut indicator, &notifier);

    preference.fail();
    fire_from_thread(&notifier, WatchSignal::Changed);
    drain(&mut indicator, &rx);

    assert_eq!(indicator.watcher.current(), AppearanceMode::Dark);
    assert!(indicator.watcher.is_listening());
}

#[test]
fn test_channel_failure_freezes_mode() {
    let preference = SharedPreference::new(AppearanceMode::Light);
    let mut indicator = Indicator::new(preference.clone(), SMALL);
    let notifier = ManualNotifier::default();
    let rx = listen(&mut indicator, &notifier);

    fire_from_thread(
        &notifier,
        WatchSignal::Failed(WatchError::Channel("key deleted".to_string())),
    );
    drain(&mut indicator, &rx);
    assert!(!indicator.watcher.is_listening());
    assert_eq!(*notifier.cancelled.lock().unwrap(), 1);

    preference.set(AppearanceMode::Dark);
    fire_from_thread(&notifier, WatchSignal::Changed);
    drain(&mut indicator, &rx);
    assert_eq!(indicator.watcher.current(), AppearanceMode::Light);
}

#[test]
fn test_dispose_releases_subscription_once() {
    let mut indicator = Indicator::new(SharedPreference::new(AppearanceMode::Dark), SMALL);
    let notifier = ManualNotifier::default();
    let _rx = listen(&mut indicator, &notifier);
    assert!(indicator.watcher.is_listening());

    indicator.watcher.dispose();
    indicator.watcher.dispose();
    drop(indicator);
    assert_eq!(*notifier.cancelled.lock().unwrap(), 1);
}
