//! A picture plane that cycles through images on click, rescaling itself to
//! each image's aspect ratio.
//!
//! Image paths come from the command line, or from `assets/gallery/` when
//! none are given:
//!
//! ```text
//! cargo run --bin gallery -- photo1.jpg photo2.png
//! ```

use std::path::Path;

use anyhow::Result;
use vitrine::{StageConfig, VitrineApp};

fn gallery_dir_sources() -> Vec<String> {
    let mut sources = Vec::new();
    if let Ok(entries) = std::fs::read_dir(Path::new("assets/gallery")) {
        for entry in entries.flatten() {
            let path = entry.path();
            if matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("png" | "jpg" | "jpeg")
            ) {
                sources.push(path.display().to_string());
            }
        }
    }
    sources.sort();
    sources
}

fn main() -> Result<()> {
    env_logger::init();

    let mut sources: Vec<String> = std::env::args().skip(1).collect();
    if sources.is_empty() {
        sources = gallery_dir_sources();
    }
    if sources.is_empty() {
        log::warn!("no image sources given and assets/gallery/ is empty; clicks will not cycle");
    }

    let app = VitrineApp::new(StageConfig::gallery(sources));
    app.run()?;

    Ok(())
}
