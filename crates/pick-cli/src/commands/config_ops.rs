use std::path::Path;

use pick_engine::pick_core::settings::{self, Settings, SettingsError};

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &Path) -> Result<Settings, SettingsError> {
    let s = settings::load_settings_file(file)?;
    println!(
        "OK: remote.endpoint={}, tag.max_selection={}, lookup.max_selection={}",
        s.remote.endpoint,
        describe_bound(s.tag.max_selection),
        describe_bound(s.lookup.max_selection),
    );
    Ok(s)
}

fn describe_bound(bound: Option<usize>) -> String {
    bound.map_or_else(|| "unbounded".to_string(), |n| n.to_string())
}
