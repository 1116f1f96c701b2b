//! Alias propagation command.

use console::style;

use crate::config::Settings;
use crate::store::Assets;

/// Re-apply the saved aliases to the output log without touching aliases.json.
pub async fn cmd_propagate(settings: &Settings) -> anyhow::Result<()> {
    let assets = Assets::in_dir(&settings.assets_dir);
    let updated = assets.propagate_aliases()?;

    if updated == 0 {
        println!("{} Output log already uses canonical tags", style("✓").green());
    } else {
        println!(
            "{} Updated {} tag reference(s) in {}",
            style("✓").green(),
            updated,
            assets.output.path().display()
        );
    }

    Ok(())
}
