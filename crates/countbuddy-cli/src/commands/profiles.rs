//! The `countbuddy profiles` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use countbuddy_core::config::load_config_from;
use countbuddy_core::{GameMode, ProfileStore};

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = ProfileStore::open_file(&config.profiles_path);

    if store.profiles().is_empty() {
        println!("No profiles yet. Run `countbuddy create-profile --name <name> --age <age>`.");
        return Ok(());
    }

    let mut table = Table::new();
    let mut header = vec!["", "Name", "Age"];
    header.extend(GameMode::ALL.iter().map(|m| m.title()));
    header.push("Id");
    table.set_header(header);

    for profile in store.profiles() {
        let mut row = vec![
            Cell::new(profile.avatar),
            Cell::new(&profile.name),
            Cell::new(profile.age),
        ];
        row.extend(profile.game_stats.iter().map(|(_, count)| Cell::new(count)));
        row.push(Cell::new(profile.id));
        table.add_row(row);
    }

    println!("{table}");
    Ok(())
}
