//! Build script for the playlist cover client.
//!
//! Copies the `.env.example` configuration template into the user's local data
//! directory so a ready-to-edit example sits next to the `.env` file the binary
//! reads at startup.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` from the crate root to the local data directory.
///
/// # Destination
///
/// - Linux: `~/.local/share/playlist-cover/.env.example`
/// - macOS: `~/Library/Application Support/playlist-cover/.env.example`
/// - Windows: `%LOCALAPPDATA%/playlist-cover/.env.example`
///
/// A missing template only produces a cargo warning. Failing to create the
/// directory or to write the copy fails the build.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let template_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("playlist-cover");
    fs::create_dir_all(&out_dir)?;

    if template_path.is_file() {
        let contents = fs::read_to_string(&template_path)?;
        fs::write(out_dir.join(".env.example"), contents)?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            template_path.display()
        );
    }

    Ok(())
}
