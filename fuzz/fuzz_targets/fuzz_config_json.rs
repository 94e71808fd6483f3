#![no_main]

use libfuzzer_sys::fuzz_target;
use pullcord::config::AppConfig;
use pullcord::toggle::{HandleState, Rect};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(config) = serde_json::from_str::<AppConfig>(s) else {
        return;
    };

    // Settings that pass validation must simulate without panicking
    let settings = config.toggle;
    if settings.validate().is_err() {
        return;
    }
    let mut handle = HandleState::at_rest(settings.anchor, &settings.spring);
    handle.y += settings.spring.toggle_threshold;
    for _ in 0..64 {
        handle.step(settings.anchor, &settings.spring);
    }
    let _ = settings
        .pointer
        .drag_target(handle.position(), Rect::default(), settings.anchor);
});
