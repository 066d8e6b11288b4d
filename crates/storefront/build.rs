//! Build script for storefront crate.
//!
//! Fingerprints `static/css/main.css` so the stylesheet can be served with a
//! long cache lifetime under a content-addressed name.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

fn main() {
    fingerprint_css();
}

/// Copy main.css to `static/css/derived/main.<hash>.css`.
///
/// Sets `CSS_HASH` for `env!("CSS_HASH")`; it is empty when the stylesheet is
/// missing, and templates then fall back to the plain `main.css`.
fn fingerprint_css() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let css_path = Path::new(&manifest_dir).join("static/css/main.css");

    println!("cargo:rerun-if-changed={}", css_path.display());

    let content = match fs::read(&css_path) {
        Ok(content) => content,
        Err(e) => {
            println!("cargo:warning=Could not read main.css: {e}");
            println!("cargo:rustc-env=CSS_HASH=");
            return;
        }
    };

    let digest = format!("{:x}", Sha256::digest(&content));
    let short_hash = &digest[..8];

    println!("cargo:rustc-env=CSS_HASH={short_hash}");

    let derived_dir = Path::new(&manifest_dir).join("static/css/derived");
    fs::create_dir_all(&derived_dir).expect("Failed to create derived CSS directory");
    fs::copy(&css_path, derived_dir.join(format!("main.{short_hash}.css")))
        .expect("Failed to copy CSS to derived directory");
}
