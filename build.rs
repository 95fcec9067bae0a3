//! Build script for sfabi
//!
//! Generates the C header `include/sfabi.h` from the `extern "C"` table when the `header`
//! feature is enabled. Without the feature the build script does nothing.
//!
//! # Configuration
//!
//! Header layout (include guard, documentation style, symbol prefix) lives in
//! `cbindgen.toml` at the crate root.

fn main() {
    #[cfg(feature = "header")]
    generate_header();
}

#[cfg(feature = "header")]
fn generate_header() {
    use std::env;
    use std::path::PathBuf;

    let crate_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let include_dir = crate_dir.join("include");
    std::fs::create_dir_all(&include_dir).unwrap();

    let config = cbindgen::Config::from_file(crate_dir.join("cbindgen.toml"))
        .unwrap_or_else(|e| panic!("invalid cbindgen.toml: {}", e));

    cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(config)
        .generate()
        .expect("Unable to generate sfabi.h")
        .write_to_file(include_dir.join("sfabi.h"));

    println!("cargo:rerun-if-changed=src/ffi");
    println!("cargo:rerun-if-changed=cbindgen.toml");
}
