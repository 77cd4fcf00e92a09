use anyhow::Context;
use clap::*;
use log::info;
use std::io::Write;

use gaqc::libs::gff::Gff;
use gaqc::libs::resolve::{resolve, score_candidates, Options};
use gaqc::libs::sizes::Sizes;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("uniq")
        .about("Removes overlapping gene models")
        .after_help(
            r###"
Overlapping gene models are clustered into piles. Within each pile the subset
of mutually non-overlapping models with the best combined score is kept,
rather than the single best model. A model is scored by its best transcript:

    score = (1 - AED) * length

AED is read from the `_AED` attribute of the transcript, the length from the
length table keyed by transcript ID.

Notes:
* <length-table> is either a two-column `id size` table or a FASTA file
* Supports both plain text and gzipped (.gz) files
* Kept models are written with all of their descendants, in input order
* Ids of removed models are written one per line, sorted, to --removed
* Any record that can not be scored aborts the run without output

Examples:
1. Keep the best non-overlapping models:
   gaqc uniq maker.gff3 cds.sizes -o uniq.gff3

2. Length table computed from CDS sequences, with 4 threads:
   gaqc uniq maker.gff3 cds.fa -o uniq.gff3 --parallel 4

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Input GFF3 file. [stdin] for standard input"),
        )
        .arg(
            Arg::new("sizes")
                .required(true)
                .num_args(1)
                .index(2)
                .help("Length table of transcripts, .sizes or FASTA"),
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
        .arg(
            Arg::new("removed")
                .long("removed")
                .num_args(1)
                .default_value("removed.ids")
                .help("Where to list the ids of removed models"),
        )
        .arg(
            Arg::new("type")
                .long("type")
                .num_args(1)
                .default_value("gene")
                .help("Feature type of the top-level models"),
        )
        .arg(
            Arg::new("transcript")
                .long("transcript")
                .num_args(1)
                .default_value("mRNA")
                .help("Feature type of the scored children"),
        )
        .arg(
            Arg::new("parallel")
                .long("parallel")
                .short('p')
                .value_parser(value_parser!(usize))
                .num_args(1)
                .default_value("1")
                .help("Number of threads"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let infile = args.get_one::<String>("infile").unwrap();
    let sizes_file = args.get_one::<String>("sizes").unwrap();
    let outfile = args.get_one::<String>("outfile").unwrap();
    let removed_file = args.get_one::<String>("removed").unwrap();
    let parallel = *args.get_one::<usize>("parallel").unwrap();

    let opt = Options {
        candidate: args.get_one::<String>("type").unwrap().to_string(),
        transcript: args.get_one::<String>("transcript").unwrap().to_string(),
    };

    //----------------------------
    // Loading
    //----------------------------
    let gff = Gff::from_reader(gaqc::reader(infile)?)
        .with_context(|| format!("failed to read {}", infile))?;
    let sizes = Sizes::from_path(sizes_file)
        .with_context(|| format!("failed to read {}", sizes_file))?;
    info!(
        "{} records in {}, {} lengths in {}",
        gff.features().len(),
        infile,
        sizes.len(),
        sizes_file
    );

    //----------------------------
    // Operating
    //----------------------------
    let candidates = score_candidates(&gff, &sizes, &opt)?;
    let total = candidates.len();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(parallel)
        .build()?;
    let resolution = pool.install(|| resolve(candidates));
    info!(
        "{} models in {} piles: {} kept, {} removed",
        total,
        resolution.piles,
        resolution.kept.len(),
        resolution.removed.len()
    );

    // everything is checked before the first byte is written
    let kept = gff.owned_by(&resolution.kept)?;

    //----------------------------
    // Output
    //----------------------------
    // both outputs are opened before either is written, and become visible
    // together once complete
    let mut removed_writer = gaqc::staged(removed_file)?;
    let mut writer = gaqc::staged(outfile)?;

    resolution.write_removed(&mut removed_writer)?;
    for header in gff.headers() {
        writeln!(writer, "{}", header)?;
    }
    for feature in kept {
        writeln!(writer, "{}", feature)?;
    }
    removed_writer.flush()?;
    writer.flush()?;

    writer.commit()?;
    removed_writer.commit()?;

    Ok(())
}
