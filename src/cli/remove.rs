use crate::core::ExpenseEngine;
use anyhow::Result;

/// Deletes an expense by id. Unknown ids are a quiet no-op, so repeating a
/// remove never fails.
pub async fn run(engine: &ExpenseEngine, id: u64) -> Result<()> {
    engine.remove_expense(id).await?;
    println!("Removed expense #{id}");
    Ok(())
}
