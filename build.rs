fn main() {
    if std::env::var("CARGO_CFG_TARGET_OS")
        .map(|os| os == "windows")
        .unwrap_or(false)
        && std::path::Path::new("src/assets/MEX.ico").exists()
    {
        let mut res = winresource::WindowsResource::new();
        res.set_icon("src/assets/MEX.ico");
        res.compile()
            .expect("Failed to embed Windows resources (icon)");
    }
}
