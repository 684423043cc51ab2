use ies_engine::{Directive, FallbackEncoding};
use ies_table::{load_table, CsvSource, OverrideSource, TableError, TableOptions};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

#[test]
fn loads_csv_from_disk_in_column_order() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("changes.csv");
    fs::write(
        &path,
        "FileName,[MANUFAC],[LUMCAT],[TEST],[TESTLAB]\n\
         foo.ies,LEDFLEX,C01181523,REMOVE,KEEP\n\
         bar.ies, ACME ,,,\n",
    )
    .unwrap();

    let table = load_table(&path, TableOptions::default(), FallbackEncoding::default()).unwrap();
    assert_eq!(table.len(), 2);

    let foo: Vec<_> = table
        .lookup("foo.ies")
        .unwrap()
        .iter()
        .map(|(tag, d)| (tag.to_string(), d.clone()))
        .collect();
    assert_eq!(
        foo,
        vec![
            ("[MANUFAC]".to_string(), Directive::Replace("LEDFLEX".to_string())),
            ("[LUMCAT]".to_string(), Directive::Replace("C01181523".to_string())),
            ("[TEST]".to_string(), Directive::Remove),
            ("[TESTLAB]".to_string(), Directive::Keep),
        ]
    );

    let bar = table.lookup("bar.ies").unwrap();
    assert_eq!(bar.len(), 1);
    assert_eq!(
        bar.get("[MANUFAC]"),
        Some(&Directive::Replace("ACME".to_string()))
    );
    assert!(table.lookup("missing.ies").is_none());
}

#[test]
fn latin1_csv_decodes_with_fallback() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("legacy.csv");
    fs::write(&path, b"FileName,[MANUFAC]\nfoo.ies,Lumi\xE8re\n").unwrap();

    let table = CsvSource::new(&path, TableOptions::default()).load().unwrap();
    assert_eq!(
        table.lookup("foo.ies").unwrap().get("[MANUFAC]"),
        Some(&Directive::Replace("Lumière".to_string()))
    );
}

#[test]
fn missing_file_is_io_error() {
    let temp = tempdir().unwrap();
    let err = load_table(
        &temp.path().join("nope.csv"),
        TableOptions::default(),
        FallbackEncoding::default(),
    )
    .unwrap_err();
    assert!(matches!(err, TableError::Io(_)), "{err}");
}

#[test]
fn corrupt_workbook_is_reported() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("broken.xlsx");
    fs::write(&path, b"not a zip").unwrap();
    let err = load_table(&path, TableOptions::default(), FallbackEncoding::default()).unwrap_err();
    assert!(matches!(err, TableError::Workbook(_)), "{err}");
}
