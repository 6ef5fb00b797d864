use std::path::Path;

use clap::Parser;
use gxt::commands::Commands;
use miette::{IntoDiagnostic, Result};
use pretty_assertions::assert_eq;

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn run(args: &[&str]) -> Result<()> {
    let cli = Cli::try_parse_from(std::iter::once("gxt").chain(args.iter().copied()))
        .into_diagnostic()?;
    cli.command.handle()
}

fn path(p: &Path) -> &str {
    p.to_str().expect("temporary paths are utf-8")
}

#[test]
fn build_then_export_archive() -> Result<()> {
    let dir = tempfile::tempdir().into_diagnostic()?;
    let texts = dir.path().join("texts");
    std::fs::create_dir(&texts).into_diagnostic()?;
    std::fs::write(texts.join("1.txt"), "[MAIN]\nFEM_OK=OK\n").into_diagnostic()?;
    std::fs::write(texts.join("2.txt"), "[INTRO]\nbroken line\n").into_diagnostic()?;
    std::fs::write(texts.join("3.txt"), "[INTRO]\nINT_01=Hello\n").into_diagnostic()?;

    let gxt = dir.path().join("american.gxt");
    run(&["archive", "build", "-g", "vc", "-i", path(&texts), "-f", path(&gxt)])?;

    let exported = dir.path().join("american.txt");
    run(&["archive", "export", "-f", path(&gxt), "-o", path(&exported)])?;
    assert_eq!(
        std::fs::read_to_string(&exported).into_diagnostic()?,
        "[INTRO]\nINT_01=Hello\n\n[MAIN]\nFEM_OK=OK\n"
    );

    // Targets are never replaced silently
    assert!(run(&["archive", "export", "-f", path(&gxt), "-o", path(&exported)]).is_err());

    let split = dir.path().join("split");
    run(&["archive", "export", "-f", path(&gxt), "-o", path(&split), "--split"])?;
    assert_eq!(
        std::fs::read_to_string(split.join("INTRO.txt")).into_diagnostic()?,
        "[INTRO]\nINT_01=Hello\n"
    );

    Ok(())
}

#[test]
fn merge_into_archive() -> Result<()> {
    let dir = tempfile::tempdir().into_diagnostic()?;
    let base = dir.path().join("base.txt");
    let patch = dir.path().join("patch.txt");
    std::fs::write(&base, "[MAIN]\n0x00000001=one\n0x00000002=two\n").into_diagnostic()?;
    std::fs::write(&patch, "[MAIN]\n0x00000002=zwei\n0x00000003=drei\n").into_diagnostic()?;

    let gxt = dir.path().join("base.gxt");
    run(&["archive", "build", "-g", "sa", "-i", path(&base), "-f", path(&gxt)])?;

    let merged = dir.path().join("merged.gxt");
    run(&[
        "archive", "merge", "-f", path(&gxt), "-i", path(&patch), "-o", path(&merged), "--replace",
    ])?;

    let (_, archive) = gxt_archive::read::read_archive_file(&merged)?;
    assert_eq!(archive["MAIN"]["0x00000001"], "one");
    assert_eq!(archive["MAIN"]["0x00000002"], "zwei");
    assert_eq!(archive["MAIN"]["0x00000003"], "drei");

    Ok(())
}

#[test]
fn whm_round_trip() -> Result<()> {
    let dir = tempfile::tempdir().into_diagnostic()?;
    let input = dir.path().join("strings.txt");
    std::fs::write(&input, "0xDEADBEEF=Hello\n0x00000001=World\n").into_diagnostic()?;

    let table = dir.path().join("whm_table.dat");
    run(&["whm", "build", "-i", path(&input), "-f", path(&table)])?;
    run(&["info", "-f", path(&table)])?;

    let json = dir.path().join("strings.json");
    run(&["whm", "export", "-f", path(&table), "-o", path(&json), "--json"])?;
    let rebuilt = dir.path().join("rebuilt").join("whm_table.dat");
    std::fs::create_dir(dir.path().join("rebuilt")).into_diagnostic()?;
    run(&["whm", "build", "-i", path(&json), "-f", path(&rebuilt), "--json"])?;

    assert_eq!(
        std::fs::read(&table).into_diagnostic()?,
        std::fs::read(&rebuilt).into_diagnostic()?
    );

    Ok(())
}
