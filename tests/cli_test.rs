use assert_cmd::Command;
use indoc::indoc;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CLASS: &str = indoc! {r#"
    {
      "name": "com/example/mixin/TMixin",
      "annotations": [
        {
          "desc": "Lorg/spongepowered/asm/mixin/Mixin;",
          "values": [["value", {"array": [{"type": "Lcom/example/T;"}]}]]
        }
      ],
      "fields": [
        {
          "name": "shadow$count",
          "desc": "I",
          "annotations": [{"desc": "Lorg/spongepowered/asm/mixin/Shadow;"}]
        }
      ]
    }
"#};

const MAPPINGS: &str = indoc! {r#"
    {
      "classes": {"com/example/T": "x/T"},
      "methods": [{"owner": "com/example/T", "name": "foo", "desc": "()V", "to": "bar"}],
      "fields": [{"owner": "com/example/T", "name": "count", "desc": "I", "to": "cnt"}]
    }
"#};

const HIERARCHY: &str = indoc! {r#"
    {
      "com/example/T": {
        "members": [
          {"name": "count", "desc": "I"},
          {"name": "foo", "desc": "()V"}
        ]
      }
    }
"#};

fn write_inputs(dir: &Path) {
    fs::write(dir.join("class.json"), CLASS).unwrap();
    fs::write(dir.join("mappings.json"), MAPPINGS).unwrap();
    fs::write(dir.join("hierarchy.json"), HIERARCHY).unwrap();
}

fn bin() -> Command {
    Command::cargo_bin("mixin-remap").unwrap()
}

#[test]
fn remap_writes_report() {
    let temp = TempDir::new().unwrap();
    write_inputs(temp.path());
    let output = temp.path().join("out.json");

    bin()
        .current_dir(temp.path())
        .args([
            "remap",
            "--class",
            "class.json",
            "--mappings",
            "mappings.json",
            "--hierarchy",
            "hierarchy.json",
            "--output",
            "out.json",
        ])
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
    assert_eq!(report["renames"][0]["name"], "shadow$count");
    assert_eq!(report["renames"][0]["to"], "shadow$cnt");
    assert_eq!(
        report["class"]["annotations"][0]["values"][0][1]["array"][0]["type"],
        "Lx/T;"
    );
}

#[test]
fn resolve_prints_canonical_selector() {
    let temp = TempDir::new().unwrap();
    write_inputs(temp.path());

    let assert = bin()
        .current_dir(temp.path())
        .args([
            "resolve",
            "foo",
            "--target",
            "com.example.T",
            "--mappings",
            "mappings.json",
            "--hierarchy",
            "hierarchy.json",
            "--methods-only",
        ])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.trim(), "Lx/T;bar()V");
}

#[test]
fn remap_fails_on_gaps_unless_keep_going() {
    let temp = TempDir::new().unwrap();
    write_inputs(temp.path());
    let gap = CLASS.replace("shadow$count", "ghost");
    fs::write(temp.path().join("class.json"), gap).unwrap();
    let args = [
        "remap",
        "--class",
        "class.json",
        "--mappings",
        "mappings.json",
        "--hierarchy",
        "hierarchy.json",
    ];

    bin().current_dir(temp.path()).args(args).assert().failure();
    bin()
        .current_dir(temp.path())
        .args(args)
        .arg("--keep-going")
        .assert()
        .success();
}

#[test]
fn init_creates_config_once() {
    let temp = TempDir::new().unwrap();

    bin().current_dir(temp.path()).arg("init").assert().success();
    assert!(temp.path().join(".mixin-remap.toml").exists());

    bin().current_dir(temp.path()).arg("init").assert().failure();
    bin()
        .current_dir(temp.path())
        .args(["init", "--force"])
        .assert()
        .success();
}
