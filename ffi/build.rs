use std::env;
use std::path::PathBuf;

/// Generate `biblioteca.h` into `OUT_DIR`. A failure only warns so the
/// Rust build never depends on header generation.
fn main() {
    println!("cargo:rerun-if-changed=src");

    let crate_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let out = PathBuf::from(env::var("OUT_DIR").unwrap_or_else(|_| ".".to_string()))
        .join("biblioteca.h");

    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("BIBLIOTECA_H")
        .with_cpp_compat(true)
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(&out);
        }
        Err(e) => println!("cargo:warning=cbindgen could not generate {}: {e}", out.display()),
    }
}
