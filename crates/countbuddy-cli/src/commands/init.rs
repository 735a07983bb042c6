//! The `countbuddy init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("countbuddy.toml").exists() {
        println!("countbuddy.toml already exists, skipping.");
    } else {
        std::fs::write("countbuddy.toml", SAMPLE_CONFIG)?;
        println!("Created countbuddy.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: countbuddy create-profile --name Sam --age 5 --avatar star");
    println!("  2. Run: countbuddy play --profile Sam --game counting");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# countbuddy configuration

profiles_path = "./countbuddy-profiles.json"

[timings]
reveal_tick_ms = 400
success_window_ms = 2000
try_again_window_ms = 1500

[server]
bind = "127.0.0.1:5000"
"#;
