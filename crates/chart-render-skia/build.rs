// File: crates/chart-render-skia/build.rs
// Summary: Links the Windows registry API that Skia's font manager and ICU pull in.

fn main() {
    #[cfg(target_os = "windows")]
    println!("cargo:rustc-link-lib=advapi32");
}
