use assert_cmd::Command;
use tempfile::TempDir;

// A fully warmed cache means generate never needs the miner: every command
// here runs with a nonexistent miner directory.

fn cache_entry(name: &str) -> serde_json::Value {
    serde_json::json!({
        "funcName": name,
        "signature": format!("{name}()"),
        "params": "",
        "hasParam": false,
        "seed": name.trim_start_matches('f'),
        "prefix": "f",
        "minedAt": "2026-08-07T00:00:00Z",
    })
}

fn seed_workspace(dir: &TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
    let pixels = dir.path().join("pixel-data.json");
    let data = serde_json::json!({
        "width": 2,
        "height": 2,
        "pixels": ["4f302900", "51363301", "472e2b00", "48332f01"],
    });
    std::fs::write(&pixels, serde_json::to_string_pretty(&data).expect("json")).expect("write");

    let data_dir = dir.path().join("data");
    std::fs::create_dir_all(&data_dir).expect("mkdir");
    let cache = serde_json::json!({
        "timestamp": "2026-08-07T00:00:00Z",
        "totalSelectors": 4,
        "selectors": {
            "4f302900": cache_entry("f100"),
            "51363301": cache_entry("f101"),
            "472e2b00": cache_entry("f102"),
            "48332f01": cache_entry("f103"),
        },
    });
    std::fs::write(
        data_dir.join("mined-selectors-db.json"),
        serde_json::to_string_pretty(&cache).expect("json"),
    )
    .expect("write cache");

    (pixels, data_dir)
}

#[test]
fn warm_cache_generates_without_a_miner() {
    let dir = TempDir::new().expect("tempdir");
    let (pixels, data_dir) = seed_workspace(&dir);
    let out = dir.path().join("PUSH4.sol");

    Command::cargo_bin("push4")
        .expect("binary")
        .args(["generate", "--pixels"])
        .arg(&pixels)
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--miner-dir")
        .arg(dir.path().join("no-such-miner"))
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let source = std::fs::read_to_string(&out).expect("artifact");
    for name in ["f100", "f101", "f102", "f103"] {
        assert!(
            source.contains(&format!("function {name}() external view returns (bytes4) {{")),
            "missing {name}"
        );
    }
    assert!(source.contains("/* 0x4f302900 */"));

    let metadata_raw =
        std::fs::read_to_string(data_dir.join("selector-contract-metadata.json")).expect("metadata");
    let metadata: serde_json::Value = serde_json::from_str(&metadata_raw).expect("json");
    assert_eq!(metadata["width"], 2);
    assert_eq!(metadata["selectors"][0], "0x4f302900");
    assert_eq!(metadata["functions"][2]["funcName"], "f102");
    assert_eq!(metadata["functions"][2]["index"], 2);
}

#[test]
fn regeneration_from_unchanged_cache_is_byte_identical() {
    let dir = TempDir::new().expect("tempdir");
    let (pixels, data_dir) = seed_workspace(&dir);
    let out = dir.path().join("PUSH4.sol");

    for _ in 0..2 {
        Command::cargo_bin("push4")
            .expect("binary")
            .args(["generate", "--pixels"])
            .arg(&pixels)
            .arg("--data-dir")
            .arg(&data_dir)
            .arg("--miner-dir")
            .arg(dir.path().join("no-such-miner"))
            .arg("--out")
            .arg(&out)
            .assert()
            .success();
    }

    let current = std::fs::read_to_string(&out).expect("artifact");
    let previous = std::fs::read_to_string(dir.path().join("PUSH4.sol.backup")).expect("backup");
    assert_eq!(current, previous);
}

#[test]
fn custom_address_is_embedded() {
    let dir = TempDir::new().expect("tempdir");
    let (pixels, data_dir) = seed_workspace(&dir);
    let out = dir.path().join("PUSH4.sol");

    Command::cargo_bin("push4")
        .expect("binary")
        .args(["generate", "--pixels"])
        .arg(&pixels)
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--miner-dir")
        .arg(dir.path().join("no-such-miner"))
        .arg("--out")
        .arg(&out)
        .args(["--address", "0x2222222222222222222222222222222222222222"])
        .assert()
        .success();

    let source = std::fs::read_to_string(&out).expect("artifact");
    assert!(source.contains("address push4Core = 0x2222222222222222222222222222222222222222;"));
}
