#![no_main]

use libfuzzer_sys::fuzz_target;
use pullcord::storage::{JsonFileStore, PreferenceStore};
use pullcord::theme::{THEME_KEY, Theme};

fuzz_target!(|data: &[u8]| {
    // A corrupt preferences file must read as "no value", never panic
    let Ok(dir) = tempfile::tempdir() else {
        return;
    };
    let path = dir.path().join("preferences.json");
    if std::fs::write(&path, data).is_err() {
        return;
    }
    let store = JsonFileStore::new(path);
    if let Ok(value) = store.get(THEME_KEY) {
        let theme = Theme::from_stored(value.as_deref());
        assert!(matches!(theme, Theme::Dark | Theme::White));
    }
});
