use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

fn project() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_culture(
        "Localization",
        "en",
        &[
            ("App.Name", "Shop"),
            ("Menu.Home", "Home"),
            ("Menu.Unused", "Unused"),
            ("Only.InNodeModules", "Vendor"),
        ],
    )?;
    test.write_culture("Localization", "fr", &[("Fr.Only", "Seulement")])?;
    test.write_file("src/Home.cs", r#"var title = L["App.Name"];"#)?;
    test.write_file("web/app.ts", "this.t('Menu.Home');")?;
    test.write_file("node_modules/vendor/index.ts", "t('Only.InNodeModules')")?;
    test.write_file("src/Form.Designer.cs", "Menu.Unused")?;
    test.write_file("docs/keys.md", "Fr.Only")?;
    Ok(test)
}

#[test]
fn test_scan_reports_unused_keys() -> Result<()> {
    let test = project()?;

    let mut cmd = test.scan_command();
    cmd.args(["-l", "Localization"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✘ 3 localization key(s) were not found in 2 file(s) searched:
      Fr.Only
      Menu.Unused
      Only.InNodeModules

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_scan_verbose_lists_searched_files() -> Result<()> {
    let test = project()?;

    let mut cmd = test.scan_command();
    cmd.args(["--lfp", "Localization", "-v"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Scanning: src/Home.cs
    Scanning: web/app.ts
    ✘ 3 localization key(s) were not found in 2 file(s) searched:
      Fr.Only
      Menu.Unused
      Only.InNodeModules

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_scan_strict_exit_code() -> Result<()> {
    let test = project()?;

    let mut cmd = test.scan_command();
    cmd.args(["-l", "Localization", "--strict", "--jobs", "2"]);
    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 1
    ----- stdout -----
    ✘ 3 localization key(s) were not found in 2 file(s) searched:
      Fr.Only
      Menu.Unused
      Only.InNodeModules

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_scan_all_keys_used() -> Result<()> {
    let test = CliTest::new()?;
    test.write_culture("Localization", "en", &[("Used", "x")])?;
    test.write_file("app/src/view.html", "<span>{{ 'Used' | translate }}</span>")?;

    let mut cmd = test.scan_command();
    cmd.args(["-l", "Localization", "--source-root", "app", "--strict"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Searched 1 file(s) - all 1 localization key(s) are used

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_scan_ignores_empty_keys() -> Result<()> {
    let test = CliTest::new()?;
    test.write_culture("Localization", "en", &[("", "Nameless"), ("Used", "x")])?;
    test.write_file("src/App.cs", r#"L["Used"]"#)?;

    let mut cmd = test.scan_command();
    cmd.args(["-l", "Localization"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Searched 1 file(s) - all 1 localization key(s) are used

    ----- stderr -----
    warning: 1 localization file(s) were skipped or partly loaded (use -v for details)
    ");

    Ok(())
}

#[test]
fn test_scan_config_ignores_and_extensions() -> Result<()> {
    let test = project()?;
    test.write_file(
        ".locsheetrc.json",
        r#"{
            "localizationFilesPath": "Localization",
            "extensions": [".cs", ".ts", ".md"],
            "ignores": ["web/**"]
        }"#,
    )?;

    assert_cmd_snapshot!(test.scan_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✘ 3 localization key(s) were not found in 2 file(s) searched:
      Menu.Home
      Menu.Unused
      Only.InNodeModules

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_scan_invalid_config() -> Result<()> {
    let test = project()?;
    test.write_file(".locsheetrc.json", r#"{ "jobs": 0 }"#)?;

    let mut cmd = test.scan_command();
    cmd.args(["-l", "Localization"]);
    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: 'jobs' must be at least 1
    ");

    Ok(())
}

#[test]
fn test_scan_missing_localization_directory() -> Result<()> {
    let test = CliTest::with_file("src/App.cs", "")?;
    let _settings = test.snapshot_settings().bind_to_scope();

    let mut cmd = test.scan_command();
    cmd.args(["-l", "Nowhere"]);
    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Localization directory '[PROJECT]/Nowhere' does not exist.
    ");

    Ok(())
}
