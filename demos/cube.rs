//! The default stage: a slowly spinning cube that swaps to a random colour
//! when clicked. Escape or closing the window exits.

use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();

    let app = vitrine::default();
    app.run()?;

    Ok(())
}
