use fs_extra::dir::CopyOptions;
use std::fs;
use std::path::Path;

const FRONTEND_DIST: &str = "../frontend/dist";
const EMBEDDED_DIR: &str = "static";

/// Embeds the trunk build of the frontend. Without `frontend/dist/index.html`
/// the committed placeholder page in `static/dist` is served instead.
fn main() {
    let dist = Path::new(FRONTEND_DIST);
    println!("cargo:rerun-if-changed={}", FRONTEND_DIST);

    if !dist.join("index.html").exists() {
        println!("cargo:warning=frontend is not built, embedding the placeholder page");
        return;
    }

    if let Err(e) = refresh_embedded(dist, Path::new(EMBEDDED_DIR)) {
        panic!("could not embed {}: {}", FRONTEND_DIST, e);
    }
}

/// Replaces `target` with a fresh copy of `dist` (as `target/dist`).
fn refresh_embedded(dist: &Path, target: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if target.exists() {
        fs::remove_dir_all(target)?;
    }
    fs::create_dir_all(target)?;
    let options = CopyOptions::new().overwrite(true).copy_inside(true);
    fs_extra::dir::copy(dist, target, &options)?;
    Ok(())
}
