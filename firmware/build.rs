//! Places `memory.x` on the linker search path, adds the linker scripts and
//! exports the build-time blink overrides.

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

fn main() {
    // Put `memory.x` in our output directory and ensure it's
    // on the linker search path.
    let out = PathBuf::from(env::var_os("OUT_DIR").unwrap());
    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(include_bytes!("memory.x"))
        .unwrap();
    println!("cargo:rustc-link-search={}", out.display());
    println!("cargo:rerun-if-changed=memory.x");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Half period of the heartbeat in milliseconds (default: 250)
    println!("cargo:rerun-if-env-changed=HEARTBEAT_HALF_PERIOD_MS");
    match env::var("HEARTBEAT_HALF_PERIOD_MS") {
        Ok(ms) => {
            println!("cargo:rustc-env=HEARTBEAT_HALF_PERIOD_MS={}", ms);
            println!("cargo:warning=Using HEARTBEAT_HALF_PERIOD_MS from environment: {}", ms);
        }
        Err(_) => println!("cargo:rustc-env=HEARTBEAT_HALF_PERIOD_MS=250"),
    }
}
