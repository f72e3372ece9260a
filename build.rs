//! Build script for JoeyAi
//!
//! Records the version of the compiler building this crate so
//! `/api/system/stats` can report the runtime it was built with.

use std::process::Command;

fn main() {
    // Re-run this script if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=RUSTC");

    let rustc = std::env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());

    let version = Command::new(&rustc)
        .arg("--version")
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|version| !version.is_empty())
        .unwrap_or_else(|| {
            println!("cargo:warning=JoeyAi: could not run `{} --version`", rustc);
            "rustc (unknown version)".to_string()
        });

    println!("cargo:rustc-env=JOEYAI_RUSTC_VERSION={}", version);
}
