use anyhow::Context;
use clap::*;
use log::info;

use gaqc::libs::sizes::Sizes;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("size")
        .about("Counts the length of every FASTA record")
        .after_help(
            r###"
Writes the sequence name and its length, tab separated. The output is the
length table consumed by `gaqc uniq`, e.g. from a FASTA of CDS sequences.

Notes:
* Supports both plain text and gzipped (.gz) files
* Reads from stdin if input file is 'stdin'
* Records keep their input order; a name repeated within one file is
  reported once, with the length of its last record

Examples:
1. Lengths of CDS sequences:
   gaqc size cds.fa -o cds.sizes

2. Several files at once:
   gaqc size part1.fa part2.fa.gz

"###,
        )
        .arg(
            Arg::new("infiles")
                .required(true)
                .num_args(1..)
                .index(1)
                .help("Input FASTA file(s) to process"),
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let mut writer = gaqc::writer(args.get_one::<String>("outfile").unwrap())?;

    for infile in args.get_many::<String>("infiles").unwrap() {
        let sizes = Sizes::from_fasta(infile, gaqc::reader(infile)?)
            .with_context(|| format!("failed to read {}", infile))?;
        info!("{} sequences in {}", sizes.len(), sizes.name());

        sizes.write_table(&mut writer)?;
    }
    writer.flush()?;

    Ok(())
}
