fn main() {
    // ── libvips linking ──────────────────────────────────────────────────────
    //
    // The libvips-rs bindings crate ships no build script of its own, so the
    // `libvips` feature has to tell cargo where the shared library lives.
    // The default raster backend needs nothing from here.
    //
    // The VIPS_DIR environment variable points at a custom install prefix.
    println!("cargo:rerun-if-env-changed=VIPS_DIR");

    if std::env::var_os("CARGO_FEATURE_LIBVIPS").is_some() {
        link_libvips();
    }
}

fn link_libvips() {
    if let Ok(vips_dir) = std::env::var("VIPS_DIR") {
        let lib_dir = std::path::Path::new(&vips_dir).join("lib");
        if lib_dir.exists() {
            println!("cargo:rustc-link-search=native={}", lib_dir.display());
        } else {
            println!("cargo:warning=VIPS_DIR is set but '{}' does not exist", lib_dir.display());
        }
    }

    println!("cargo:rustc-link-lib=dylib=vips");

    // GLib symbols (g_free, g_object_unref, …) are called directly by
    // libvips-rs, so they must be linked alongside libvips itself.
    if cfg!(target_os = "windows") {
        println!("cargo:rustc-link-lib=dylib=glib-2.0");
        println!("cargo:rustc-link-lib=dylib=gobject-2.0");
    }
}
