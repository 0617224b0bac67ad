// Host-side tests for luminance sampling decisions.

#![allow(dead_code)]
mod theme {
    include!("../src/core/theme.rs");
}

use theme::*;

#[test]
fn luminance_of_flat_colours() {
    let white = [255u8, 255, 255, 255].repeat(4);
    let black = [0u8, 0, 0, 255].repeat(4);
    assert!((mean_luminance(&white).unwrap() - 255.0).abs() < 1e-9);
    assert_eq!(mean_luminance(&black), Some(0.0));
    assert_eq!(mean_luminance(&[]), None);
    // Green dominates Rec. 709 luma
    let green = mean_luminance(&[0, 255, 0, 255]).unwrap();
    let blue = mean_luminance(&[0, 0, 255, 255]).unwrap();
    assert!(green > blue);
}

#[test]
fn bright_layers_get_a_dark_foreground() {
    assert_eq!(Foreground::for_luminance(DARK_FOREGROUND_THRESHOLD), Foreground::Dark);
    assert_eq!(Foreground::for_luminance(120.0), Foreground::Light);
    assert_eq!(Foreground::Light.css_color(), "#ffffff");
    assert_eq!(Foreground::Dark.css_color(), "#000000");
}

#[test]
fn sampler_throttles_until_the_index_changes() {
    let mut s = ThemeSampler::default();
    assert_eq!(s.poll(2, 3, 0.1), Some(2));
    for _ in 0..THEME_SAMPLE_INTERVAL {
        assert_eq!(s.poll(2, 3, 0.1), None);
    }
    assert_eq!(s.poll(2, 3, 0.1), Some(2));
    // Index change samples right away
    assert_eq!(s.poll(3, 4, 0.1), Some(3));
}

#[test]
fn sampler_switches_to_the_incoming_layer_after_handoff() {
    let mut s = ThemeSampler::default();
    assert_eq!(s.poll(5, 6, HANDOFF_PROGRESS + 0.01), Some(6));
}
