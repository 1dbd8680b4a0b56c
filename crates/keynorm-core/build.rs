use std::collections::BTreeMap;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct AssetEntry {
    value: String,
    shift: Option<String>,
}

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let asset_path = Path::new(&manifest_dir)
        .join("assets")
        .join("code_to_key_map.json");
    let asset = fs::read_to_string(&asset_path).unwrap();

    // BTreeMap keeps the generated table in a stable order across builds
    let entries: BTreeMap<String, AssetEntry> = serde_json::from_str(&asset)
        .unwrap_or_else(|e| panic!("{} is not a valid code map: {}", asset_path.display(), e));

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("builtin_code_map.rs");
    let mut f = File::create(&dest_path).unwrap();

    writeln!(
        f,
        "/// Builtin code map entries as (code, value, shift), sorted by code."
    )
    .unwrap();
    writeln!(
        f,
        "static BUILTIN_ENTRIES: &[(&str, &str, Option<&str>)] = &["
    )
    .unwrap();
    for (code, entry) in &entries {
        writeln!(
            f,
            "    ({:?}, {:?}, {:?}),",
            code,
            entry.value,
            entry.shift.as_deref()
        )
        .unwrap();
    }
    writeln!(f, "];").unwrap();

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=assets/code_to_key_map.json");
}
