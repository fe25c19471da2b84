use crate::core::ExpenseEngine;
use crate::core::expense::DEFAULT_SETTING;
use anyhow::Result;

/// Prints or updates the persisted theme preference. Reading an unset theme
/// reports the seeded default.
pub async fn run(engine: &ExpenseEngine, value: Option<&str>) -> Result<()> {
    let (key, default_value) = DEFAULT_SETTING;
    match value {
        Some(theme) => {
            engine.set_setting(key, theme).await?;
            println!("Theme set to {theme}");
        }
        None => {
            let current = engine
                .setting(key)
                .await?
                .unwrap_or_else(|| default_value.to_string());
            println!("{current}");
        }
    }
    Ok(())
}
