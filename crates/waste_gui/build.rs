use std::env;

fn main() {
    let version = env::var("WASTE_SORTER_VERSION")
        .or_else(|_| env::var("CARGO_PKG_VERSION"))
        .unwrap_or_else(|_| "dev".to_string());
    println!("cargo:rerun-if-env-changed=WASTE_SORTER_VERSION");
    println!("cargo:rustc-env=WASTE_SORTER_VERSION={version}");
}
