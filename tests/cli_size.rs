use assert_cmd::Command;
use flate2::write::GzEncoder;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::TempDir;

#[test]
fn command_size() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("cds.fa");

    fs::write(&input, ">m1 desc\nATGAAA\nTAA\n>m2\nATGTGA\n")?;

    let mut cmd = Command::cargo_bin("gaqc")?;
    let output = cmd.arg("size").arg(&input).output()?;

    let stdout = String::from_utf8(output.stdout)?;
    assert_eq!(stdout, "m1\t9\nm2\t6\n");

    Ok(())
}

#[test]
fn command_size_gz_outfile() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let plain = temp.path().join("a.fa");
    let gz = temp.path().join("b.fa.gz");
    let outfile = temp.path().join("cds.sizes");

    fs::write(&plain, ">a1\nACGT\n")?;
    {
        let mut encoder = GzEncoder::new(fs::File::create(&gz)?, flate2::Compression::default());
        encoder.write_all(b">b1\nACGTACGTAC\n")?;
        encoder.finish()?;
    }

    let mut cmd = Command::cargo_bin("gaqc")?;
    cmd.arg("size")
        .arg(&plain)
        .arg(&gz)
        .arg("-o")
        .arg(&outfile)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&outfile)?, "a1\t4\nb1\t10\n");

    Ok(())
}

#[test]
fn command_size_feeds_uniq() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let fa = temp.path().join("cds.fa");
    let sizes = temp.path().join("cds.sizes");
    fs::write(&fa, ">t1\nAAAAAAAAAA\n>t2\nAAAAA\n")?;

    let mut cmd = Command::cargo_bin("gaqc")?;
    cmd.arg("size")
        .arg(&fa)
        .arg("-o")
        .arg(&sizes)
        .assert()
        .success();

    let gff = temp.path().join("in.gff3");
    fs::write(
        &gff,
        "\
ctg1\tmaker\tgene\t1\t100\t.\t+\t.\tID=g1
ctg1\tmaker\tmRNA\t1\t100\t.\t+\t.\tID=t1;Parent=g1;_AED=0.5
ctg1\tmaker\tgene\t50\t150\t.\t+\t.\tID=g2
ctg1\tmaker\tmRNA\t50\t150\t.\t+\t.\tID=t2;Parent=g2;_AED=0.0
",
    )?;

    // t1: 0.5 * 10 = 5, t2: 1.0 * 5 = 5; the tie goes to the later-ending g2
    let mut cmd = Command::cargo_bin("gaqc")?;
    cmd.current_dir(temp.path())
        .arg("uniq")
        .arg(&gff)
        .arg(&sizes)
        .assert()
        .success()
        .stdout(predicates::str::contains("ID=g2").and(predicates::str::contains("ID=g1").not()));

    assert_eq!(fs::read_to_string(temp.path().join("removed.ids"))?, "g1\n");

    Ok(())
}

#[test]
fn command_size_keeps_order() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("cds.fa");
    fs::write(&input, ">zeta\nACGT\n>alpha\nAC\n>zeta\nACGTAC\n")?;

    let mut cmd = Command::cargo_bin("gaqc")?;
    let output = cmd.arg("size").arg(&input).output()?;
    assert!(output.status.success());

    // repeated names collapse onto their first position
    assert_eq!(String::from_utf8(output.stdout)?, "zeta\t6\nalpha\t2\n");

    Ok(())
}
