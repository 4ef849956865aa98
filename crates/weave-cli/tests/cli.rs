use assert_cmd::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use weave_test_utils::{ModuleXml, LISTING, ROUTER};

struct Project {
    _tmp: tempfile::TempDir,
    root: PathBuf,
}

impl Project {
    fn new() -> Self {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = tmp.path().to_path_buf();
        fs::write(root.join("App.tsx"), ROUTER).expect("write router");
        fs::write(root.join("index.tsx"), LISTING).expect("write listing");
        Self { _tmp: tmp, root }
    }

    fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        fs::write(&path, content).expect("write input");
        path
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn modweave(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo_bin!("modweave"));
        cmd.current_dir(&self.root);
        cmd
    }
}

#[test]
fn integrate_writes_patched_files() {
    let project = Project::new();
    let input = project.file("widget.xml", &ModuleXml::new("Widget Demo", "widget-demo").build());
    let out = project.path("out");

    project
        .modweave()
        .arg("integrate")
        .arg("--router")
        .arg(project.path("App.tsx"))
        .arg("--listing")
        .arg(project.path("index.tsx"))
        .arg("--output-dir")
        .arg(&out)
        .arg(input)
        .assert()
        .success();

    let router = fs::read_to_string(out.join("App.tsx")).expect("router output");
    let listing = fs::read_to_string(out.join("home-index.tsx")).expect("listing output");
    assert!(router.contains("import WidgetDemo from \"@modules/widget-demo\";"));
    assert!(listing.contains("{ Film, Star }"));
}

#[test]
fn integrate_json_summary() {
    let project = Project::new();
    let good = project.file("good.xml", &ModuleXml::new("Widget Demo", "widget-demo").build());
    let bare = project.file("bare.xml", &ModuleXml::new("Bare", "bare").without_integration().build());

    let output = project
        .modweave()
        .arg("integrate")
        .arg("--router")
        .arg(project.path("App.tsx"))
        .arg("--listing")
        .arg(project.path("index.tsx"))
        .arg("--output-dir")
        .arg(project.path("out"))
        .arg("--dry-run")
        .arg("--json")
        .arg(good)
        .arg(bare)
        .output()
        .expect("run modweave");

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json on stdout");
    assert_eq!(json["success"], true);
    assert_eq!(json["total"], 2);
    assert_eq!(json["processed"], 1);
    assert_eq!(json["skipped"], 1);
    assert_eq!(json["per_record"][1]["reason"], "no integration section found");
    assert!(!project.path("out").exists());
}

#[test]
fn integrate_missing_target_fails() {
    let project = Project::new();
    let input = project.file("widget.xml", &ModuleXml::new("Widget Demo", "widget-demo").build());

    let output = project
        .modweave()
        .arg("integrate")
        .arg("--router")
        .arg(project.path("Missing.tsx"))
        .arg("--listing")
        .arg(project.path("index.tsx"))
        .arg("--json")
        .arg(input)
        .output()
        .expect("run modweave");

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json on stdout");
    assert_eq!(json["success"], false);
    assert!(json["errors"][0].as_str().unwrap().starts_with("router file not found"));
}

#[test]
fn extract_writes_module_files() {
    let project = Project::new();
    let xml = ModuleXml::new("Widget Demo", "widget-demo")
        .with_plan("# Widget plan")
        .with_file("src/modules/widget-demo/index.tsx", "export default function WidgetDemo() {}")
        .build();
    let input = project.file("widget.xml", &format!("```xml\n{xml}\n```"));
    let src = project.path("src");

    project
        .modweave()
        .arg("extract")
        .arg(input)
        .arg("--output-dir")
        .arg(&src)
        .arg("--save-snippets")
        .arg("--save-plan")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(src.join("modules/widget-demo/index.tsx")).unwrap(),
        "export default function WidgetDemo() {}"
    );
    assert!(src.join("modules/widget-demo/integration/route.txt").is_file());
    assert_eq!(
        fs::read_to_string(src.join("modules/widget-demo/PLAN.md")).unwrap(),
        "# Widget plan"
    );
}

#[test]
fn diagnose_reports_unescaped_ampersand() {
    let project = Project::new();
    let input = project.file("broken.xml", "<module>\n  <slug>a & b</slug>\n</module>");

    let output = project
        .modweave()
        .arg("diagnose")
        .arg(input)
        .output()
        .expect("run modweave");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("parse error"));
    assert!(stdout.contains("unescaped '&': true"));
}

#[test]
fn diagnose_accepts_well_formed_input() {
    let project = Project::new();
    let input = project.file("ok.xml", &ModuleXml::new("Widget Demo", "widget-demo").build());

    project
        .modweave()
        .arg("diagnose")
        .arg(input)
        .assert()
        .success();
}
