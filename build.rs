use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    // Only the demo binaries need a linker script
    if env::var_os("CARGO_FEATURE_RT").is_none() {
        return;
    }
    let out = PathBuf::from(env::var_os("OUT_DIR").unwrap());
    fs::copy("memory.x", out.join("memory.x")).unwrap();
    println!("cargo:rustc-link-search={}", out.display());
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}
