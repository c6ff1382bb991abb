//! Preset store export sizes.

use crate::ExportSize;

const PRESETS: [(&str, &str, f64, f64); 8] = [
    ("iPhone 6.5\"", "ios", 1242.0, 2688.0),
    ("iPhone 6.7\"", "ios", 1290.0, 2796.0),
    ("iPhone 5.5\"", "ios", 1242.0, 2208.0),
    ("iPad 12.9\"", "ios", 2048.0, 2732.0),
    ("iPad 11\"", "ios", 1668.0, 2388.0),
    ("Android Phone", "android", 1080.0, 1920.0),
    ("Android Tablet 10", "android", 1200.0, 1920.0),
    ("Android Tablet 7", "android", 1280.0, 800.0),
];

/// The store screenshot sizes offered when a document names none.
#[must_use]
pub fn preset_devices() -> Vec<ExportSize> {
    PRESETS
        .iter()
        .map(|&(name, platform, width, height)| ExportSize::new(name, platform, width, height))
        .collect()
}

/// Find a preset by name, ignoring ASCII case.
#[must_use]
pub fn find_preset(name: &str) -> Option<ExportSize> {
    preset_devices()
        .into_iter()
        .find(|size| size.name.eq_ignore_ascii_case(name))
}
