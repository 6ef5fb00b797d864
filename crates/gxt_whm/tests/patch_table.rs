use gxt_whm::{
    read::BINARY_SENTINEL, read_table, read_table_file, text, to_bytes, write_table,
    PatchEntry, PatchTable,
};
use miette::{IntoDiagnostic, Result};
use pretty_assertions::assert_eq;

fn sample() -> PatchTable {
    PatchTable::new(vec![
        PatchEntry::new(0xDEADBEEF, "Hello"),
        PatchEntry::new(0x00000001, "World"),
        PatchEntry::new(0x00000001, "duplicate hashes survive"),
        PatchEntry::new(0x7FFFFFFF, "统一码"),
    ])
}

#[test]
fn round_trip_keeps_order() -> Result<()> {
    let table = sample();
    assert_eq!(read_table(&to_bytes(&table)?)?, table);
    Ok(())
}

#[test]
fn text_to_file_and_back() -> Result<()> {
    let dir = tempfile::tempdir().into_diagnostic()?;
    let path = dir.path().join("whm_table.dat");

    let parsed = text::parse("0xDEADBEEF=Hello\n0x00000001=World\n");
    assert!(parsed.errors.is_empty());
    write_table(&parsed.table, &path)?;

    let table = read_table_file(&path)?;
    assert_eq!(text::format(&table), "0xDEADBEEF=Hello\n0x00000001=World\n");

    Ok(())
}

#[test]
fn json_round_trip() -> Result<()> {
    let table = sample();
    assert_eq!(text::from_json(&text::to_json(&table)?)?, table);
    Ok(())
}

#[test]
fn archive_view_round_trip() -> Result<()> {
    let table = PatchTable::new(vec![
        PatchEntry::new(0xDEADBEEF, "Hello"),
        PatchEntry::new(0x00000001, "World"),
    ]);

    let archive = table.to_archive();
    let exported = gxt_archive::text::format(&archive, true);
    assert_eq!(
        exported,
        "[whm_table]\n0x00000001=World\n0xDEADBEEF=Hello\n"
    );

    let parsed = gxt_archive::text::parse(&exported, true, gxt_archive::KeyRule::PatchTable);
    assert!(parsed.is_clean());
    assert_eq!(PatchTable::from_archive(&parsed.archive).len(), 2);

    Ok(())
}

#[test]
fn offset_equal_to_blob_size_is_binary() -> Result<()> {
    let mut data = to_bytes(&PatchTable::new(vec![
        PatchEntry::new(1, "a"),
        PatchEntry::new(2, "b"),
    ]))?;
    // second entry offset, blob is 4 bytes long
    data[16] = 4;

    let table = read_table(&data)?;
    assert_eq!(table[0].text, "a");
    assert_eq!(table[1].text, BINARY_SENTINEL);

    Ok(())
}
