//! Initialize command.

use console::style;

use crate::config::Settings;
use crate::store::Assets;

/// Create the assets directory and any missing store files.
pub async fn cmd_init(settings: &Settings) -> anyhow::Result<()> {
    let assets = Assets::in_dir(&settings.assets_dir);
    let created = assets.init()?;

    for path in &created {
        println!("  {} Created {}", style("✓").green(), path.display());
    }
    if created.is_empty() {
        println!("{} All store files already exist", style("!").yellow());
    }

    println!(
        "{} Initialized annotag assets in {}",
        style("✓").green(),
        settings.assets_dir.display()
    );

    Ok(())
}
