use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use locsheet::workbook::{Cell, Row, Sheet, Workbook, write_workbook};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::CliTest;

/// A sheet with a sparse row, a keyless row and a value outside the header.
fn write_sparse_workbook(test: &CliTest, name: &str) -> Result<()> {
    let strings = ["key", "en", "fr", "Hello", "Bonjour", "orphan", "Bye", "Stray"];
    let row = |number: u32, cells: Vec<Cell>| Row {
        number: Some(number),
        cells,
    };
    let workbook = Workbook {
        sheets: vec![Sheet {
            name: "Localizations".to_string(),
            rows: vec![
                row(1, vec![Cell::shared("A1", 0), Cell::shared("B1", 1), Cell::shared("C1", 2)]),
                row(2, vec![Cell::shared("A2", 3), Cell::shared("C2", 4)]),
                row(3, vec![Cell::blank("A3"), Cell::shared("B3", 5)]),
                row(4, vec![Cell::shared("A4", 6), Cell::shared("B4", 6), Cell::shared("D4", 7)]),
            ],
        }],
        shared_strings: strings.iter().map(|s| s.to_string()).collect(),
    };
    write_workbook(&workbook, &test.root().join(name))?;
    Ok(())
}

/// A one-row sheet whose header names `cultures` after the key column.
fn write_header_workbook(test: &CliTest, name: &str, cultures: &[&str]) -> Result<()> {
    let mut strings = vec!["key", "Greeting"];
    strings.extend_from_slice(cultures);
    let columns = ["B", "C", "D", "E"];
    let header = std::iter::once(Cell::shared("A1", 0))
        .chain(
            columns
                .iter()
                .zip(2..strings.len())
                .map(|(column, index)| Cell::shared(format!("{column}1"), index)),
        )
        .collect();
    let values = std::iter::once(Cell::shared("A2", 1))
        .chain(
            columns
                .iter()
                .take(cultures.len())
                .map(|column| Cell::shared(format!("{column}2"), 1)),
        )
        .collect();
    let workbook = Workbook {
        sheets: vec![Sheet {
            name: "Localizations".to_string(),
            rows: vec![
                Row {
                    number: Some(1),
                    cells: header,
                },
                Row {
                    number: Some(2),
                    cells: values,
                },
            ],
        }],
        shared_strings: strings.iter().map(|s| s.to_string()).collect(),
    };
    write_workbook(&workbook, &test.root().join(name))?;
    Ok(())
}

#[test]
fn test_export_then_import_round_trip() -> Result<()> {
    let test = CliTest::new()?;
    test.write_culture(
        "Localization",
        "en",
        &[("Menu.Home", "Home"), ("App.Name", "Shop"), ("Empty", "")],
    )?;
    test.write_culture("Localization", "nl-BE", &[("Menu.Home", "Start")])?;

    let mut cmd = test.export_command();
    cmd.args(["-l", "Localization", "-o", "App.xlsx"]);
    assert!(cmd.status()?.success());

    std::fs::remove_dir_all(test.root().join("Localization"))?;

    let mut cmd = test.import_command();
    cmd.args(["-l", "Localization", "-i", "App.xlsx"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Imported localizations from 'App.xlsx' to 2 localization file(s).

    ----- stderr -----
    ");
    assert_eq!(
        test.read_json("Localization/en.json")?,
        json!({ "culture": "en", "texts": { "App.Name": "Shop", "Menu.Home": "Home" } })
    );
    assert_eq!(
        test.read_json("Localization/nl-BE.json")?,
        json!({ "culture": "nl-BE", "texts": { "Menu.Home": "Start" } })
    );

    // Keys are written in ascending order
    let en = test.read_file("Localization/en.json")?;
    let app = en.find("App.Name").unwrap();
    let menu = en.find("Menu.Home").unwrap();
    assert!(app < menu);

    Ok(())
}

#[test]
fn test_import_sparse_workbook() -> Result<()> {
    let test = CliTest::new()?;
    write_sparse_workbook(&test, "Texts.xlsx")?;

    let mut cmd = test.import_command();
    cmd.args(["--lfp", "Localization", "--input", "Texts.xlsx"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Imported localizations from 'Texts.xlsx' to 2 localization file(s).

    ----- stderr -----
    warning: 1 cell(s) could not be imported (use -v for details)
    ");
    assert_eq!(
        test.read_json("Localization/en.json")?,
        json!({ "culture": "en", "texts": { "Bye": "Bye" } })
    );
    assert_eq!(
        test.read_json("Localization/fr.json")?,
        json!({ "culture": "fr", "texts": { "Hello": "Bonjour" } })
    );

    Ok(())
}

#[test]
fn test_import_verbose_lists_row_warnings() -> Result<()> {
    let test = CliTest::new()?;
    write_sparse_workbook(&test, "Texts.xlsx")?;
    let _settings = test.snapshot_settings().bind_to_scope();

    let mut cmd = test.import_command();
    cmd.args(["-l", "Localization", "-i", "Texts.xlsx", "-v"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Imported localizations from 'Texts.xlsx' to 2 localization file(s).
      [PROJECT]/Localization/en.json
      [PROJECT]/Localization/fr.json

    ----- stderr -----
    warning: Row 4, column D: value for key 'Bye' has no culture header
    ");

    Ok(())
}

#[test]
fn test_import_rejects_path_like_cultures() -> Result<()> {
    let test = CliTest::new()?;
    write_header_workbook(&test, "Texts.xlsx", &["../../outside", "en", "sub/dir"])?;

    let mut cmd = test.import_command();
    cmd.args(["-l", "Localization", "-i", "Texts.xlsx", "-v"]);
    let _settings = test.snapshot_settings().bind_to_scope();
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Imported localizations from 'Texts.xlsx' to 1 localization file(s).
      [PROJECT]/Localization/en.json

    ----- stderr -----
    warning: Row 1, column B: culture '../../outside' is not a valid file name
    warning: Row 1, column D: culture 'sub/dir' is not a valid file name
    ");

    let parent = test.root().parent().unwrap();
    assert!(!parent.join("outside.json").exists());
    assert!(!test.root().join("Localization/sub").exists());
    assert_eq!(
        test.read_json("Localization/en.json")?,
        json!({ "culture": "en", "texts": { "Greeting": "Greeting" } })
    );

    Ok(())
}

#[test]
fn test_import_missing_workbook() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.import_command();
    cmd.args(["-l", "Localization", "-i", "Missing.xlsx"]);
    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Workbook 'Missing.xlsx' could not be opened.
    ");
    assert!(!test.root().join("Localization").exists());

    Ok(())
}

#[test]
fn test_import_rejects_non_workbook() -> Result<()> {
    let test = CliTest::with_file("App.xlsx", "plain text, not a zip package")?;
    test.write_culture("Localization", "en", &[("Kept", "Value")])?;
    let mut settings = test.snapshot_settings();
    settings.add_filter(r"caused by: .*", "caused by: [CAUSE]");
    let _settings = settings.bind_to_scope();

    let mut cmd = test.import_command();
    cmd.args(["-l", "Localization", "-i", "App.xlsx", "--verbose"]);
    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Workbook 'App.xlsx' could not be opened.
      caused by: [CAUSE]
    ");
    assert_eq!(
        test.read_json("Localization/en.json")?,
        json!({ "culture": "en", "texts": { "Kept": "Value" } })
    );

    Ok(())
}
