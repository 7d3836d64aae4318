// Records what the binary was built for, shown by `boxkv --version`

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    for (var, key) in [("TARGET", "BOXKV_TARGET"), ("PROFILE", "BOXKV_PROFILE")] {
        let value = std::env::var(var).unwrap_or_else(|_| "unknown".to_string());
        println!("cargo:rustc-env={key}={value}");
    }
}
