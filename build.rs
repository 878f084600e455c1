use std::path::PathBuf;

// The tiptap editor needs its JS bundle served alongside the site assets.
fn main() {
    let root: PathBuf = std::env::var("CARGO_MANIFEST_DIR").unwrap().into();
    let js_dir = root.join("public").join("js");

    std::fs::create_dir_all(&js_dir).unwrap();

    std::fs::write(
        js_dir.join("tiptap-bundle.min.js"),
        leptos_tiptap_build::TIPTAP_BUNDLE_MIN_JS,
    )
    .unwrap();

    std::fs::write(js_dir.join("tiptap.js"), leptos_tiptap_build::TIPTAP_JS).unwrap();
}
