use anyhow::Result;

use scrollkeep_core::{AppConfig, ScrollCommand};
use scrollkeep_tui::{input::Action, keymap::Keymap};

pub fn run(config: &AppConfig) -> Result<()> {
    let keymap = Keymap::from_config(&config.keymap);

    println!("Scroll commands ({}):\n", ScrollCommand::ALL.len());

    for command in ScrollCommand::ALL {
        let key = keymap
            .describe(Action::Scroll(command))
            .map(|key| format!(" [{key}]"))
            .unwrap_or_default();
        println!("  {}{}", command.id(), key);
        println!("    {}", command.description());
        if command.preserves_cursor(&config.scroll) {
            println!("    Keeps the cursor at the same height in the viewport");
        }
        println!();
    }

    Ok(())
}
