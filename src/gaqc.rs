extern crate clap;
use clap::*;

mod cmd_gaqc;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let app = Command::new("gaqc")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`gaqc` - Gene Annotation Quality Control")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_gaqc::uniq::make_subcommand())
        .subcommand(cmd_gaqc::size::make_subcommand())
        .after_help(
            r###"Subcommands:

* uniq - Remove overlapping gene models, keeping the best non-overlapping set
* size - Lengths of FASTA records, the table `uniq` scores with

Logging goes to stderr; set RUST_LOG=info or RUST_LOG=debug for details.

"###,
        );

    // Check which subcomamnd the user ran...
    match app.get_matches().subcommand() {
        Some(("uniq", sub_matches)) => cmd_gaqc::uniq::execute(sub_matches),
        Some(("size", sub_matches)) => cmd_gaqc::size::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
