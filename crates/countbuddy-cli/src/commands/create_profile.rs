//! The `countbuddy create-profile` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use countbuddy_core::config::load_config_from;
use countbuddy_core::{Action, App, Avatar, ProfileStore};

pub fn execute(
    name: String,
    age: Option<u32>,
    avatar: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let avatar = match avatar {
        Some(raw) => raw.parse::<Avatar>().map_err(anyhow::Error::msg)?,
        None => Avatar::default(),
    };

    let store = ProfileStore::open_file(&config.profiles_path);
    let mut app = App::new(store, config.timings);
    app.dispatch(Action::Start)?;
    app.dispatch(Action::CreateNew)?;
    app.dispatch(Action::SaveProfile { name, age, avatar })?;

    let profile = app
        .selected_profile()
        .context("profile was not selected after saving")?;
    println!(
        "Created profile {} {} (age {}), id {}",
        profile.avatar, profile.name, profile.age, profile.id
    );
    Ok(())
}
