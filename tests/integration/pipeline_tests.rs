//! Poll -> render scenarios through the public API

use crate::support::{Indicator, SharedPreference};
use virtual_desktop_indicator::glyph::{named, text_origin, Rgba, ALERT_COLOR};
use virtual_desktop_indicator::{AppearanceMode, DesktopIndex, Glyph, IconSize};

const SMALL: IconSize = IconSize::new(16, 16);

/// Colored pixels strictly inside the one-pixel border
fn interior_ink(glyph: &Glyph) -> Vec<(u32, u32)> {
    let mut ink = Vec::new();
    for y in 1..glyph.height() - 1 {
        for x in 1..glyph.width() - 1 {
            if glyph.pixel(x, y).a != 0 {
                ink.push((x, y));
            }
        }
    }
    ink
}

fn border_color(glyph: &Glyph) -> Rgba {
    glyph.pixel(0, 0)
}

#[test]
fn test_second_dark_desktop_at_16px() {
    let mut indicator = Indicator::new(SharedPreference::new(AppearanceMode::Dark), SMALL);
    indicator.answer(Ok(2));
    indicator.tick();

    assert_eq!(indicator.rendered.len(), 1);
    let (index, glyph) = &indicator.rendered[0];
    assert_eq!(*index, DesktopIndex::new(2));
    assert_eq!(indicator.last_label().as_deref(), Some("2"));

    // One-pixel border on all four edges
    for i in 0..16 {
        assert_eq!(glyph.pixel(i, 0), named::GOLD);
        assert_eq!(glyph.pixel(i, 15), named::GOLD);
        assert_eq!(glyph.pixel(0, i), named::GOLD);
        assert_eq!(glyph.pixel(15, i), named::GOLD);
    }
    assert_eq!(glyph.pixel(1, 1), Rgba::TRANSPARENT);

    // 11px font: a 5px block measured 12px tall
    let (x, y) = text_origin(SMALL, 5.0, 12.0);
    assert_eq!(y, ((16.0f32 - 12.0 - 2.0) / 2.0).ceil() as i32);
    let ink = interior_ink(glyph);
    assert_eq!(ink.iter().map(|&(_, py)| py).min(), Some(y as u32));
    assert_eq!(ink.iter().map(|&(px, _)| px).min(), Some(x as u32));
    assert!(ink.iter().all(|&(px, py)| glyph.pixel(px, py) == named::GOLD));
}

#[test]
fn test_same_index_renders_once() {
    let mut indicator = Indicator::new(SharedPreference::new(AppearanceMode::Light), SMALL);
    indicator.answer(Ok(1));
    indicator.answer(Ok(1));
    indicator.tick();
    indicator.tick();

    assert_eq!(indicator.rendered.len(), 1);
    assert_eq!(border_color(&indicator.rendered[0].1), named::BLACK);
}

#[test]
fn test_failure_then_recovery_renders_twice() {
    let mut indicator = Indicator::new(SharedPreference::new(AppearanceMode::Dark), SMALL);
    indicator.answer(Err("shell restarted"));
    indicator.answer(Ok(3));

    indicator.tick();
    assert!(!indicator.poller.is_bound());
    assert_eq!(indicator.last_label().as_deref(), Some("?"));

    indicator.tick();
    assert!(indicator.poller.is_bound());

    let colors: Vec<_> = indicator
        .rendered
        .iter()
        .map(|(_, glyph)| border_color(glyph))
        .collect();
    assert_eq!(colors, vec![ALERT_COLOR, named::LIGHT_GREEN]);
    assert_eq!(indicator.last_label().as_deref(), Some("3"));
}

#[test]
fn test_throwing_provider_shows_alert_and_reacquires() {
    let mut indicator = Indicator::new(SharedPreference::new(AppearanceMode::Light), SMALL);
    indicator.answer(Ok(2));
    indicator.answer(Err("enumeration failed"));
    indicator.answer(Ok(2));

    indicator.tick();
    indicator.tick();
    assert_eq!(indicator.poller.last_index(), DesktopIndex::UNKNOWN);
    assert_eq!(border_color(&indicator.rendered[1].1), ALERT_COLOR);
    assert!(!indicator.poller.is_bound());
    assert_eq!(indicator.acquired(), 1);

    indicator.tick();
    assert_eq!(indicator.acquired(), 2);
    assert_eq!(indicator.rendered.len(), 3);
    assert_eq!(border_color(&indicator.rendered[2].1), named::GOLD);
}

#[test]
fn test_alert_glyph_ignores_mode() {
    for mode in [AppearanceMode::Light, AppearanceMode::Dark] {
        let mut indicator = Indicator::new(SharedPreference::new(mode), SMALL);
        indicator.answer(Err("down"));
        indicator.tick();

        let glyph = &indicator.rendered[0].1;
        assert_eq!(border_color(glyph), ALERT_COLOR);
        assert!(interior_ink(glyph)
            .iter()
            .all(|&(x, y)| glyph.pixel(x, y) == ALERT_COLOR));
    }
}

#[test]
fn test_high_indices_use_overflow_label_and_last_color() {
    let mut indicator = Indicator::new(SharedPreference::new(AppearanceMode::Dark), SMALL);
    indicator.answer(Ok(7));
    indicator.answer(Ok(120));
    indicator.tick();
    assert_eq!(indicator.last_label().as_deref(), Some("7"));
    indicator.tick();
    assert_eq!(indicator.last_label().as_deref(), Some("++"));

    for (_, glyph) in &indicator.rendered {
        assert_eq!(border_color(glyph), named::LIGHT_SKY_BLUE);
    }
}

#[test]
fn test_larger_glyph_has_thicker_border() {
    let mut indicator =
        Indicator::new(SharedPreference::new(AppearanceMode::Light), IconSize::new(48, 48));
    indicator.answer(Ok(4));
    indicator.tick();

    let glyph = &indicator.rendered[0].1;
    for o in 0..3 {
        assert_eq!(glyph.pixel(24, o), named::DARK_GREEN);
        assert_eq!(glyph.pixel(o, 24), named::DARK_GREEN);
    }
    assert_eq!(glyph.pixel(3, 3), Rgba::TRANSPARENT);
}
