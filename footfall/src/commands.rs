use crate::CLAP_STYLING;
use clap::{arg, command};
use std::path::PathBuf;

fn config_arg() -> clap::Arg {
    arg!(-c --"config" <PATH>)
        .required(false)
        .help("Path to a footfall.toml configuration file")
        .value_parser(clap::value_parser!(PathBuf))
}

fn pois_arg() -> clap::Arg {
    arg!(--"pois" <PATH>)
        .required(false)
        .help("POI table (placekey, location_name, latitude, longitude, raw_visit_counts)")
        .value_parser(clap::value_parser!(PathBuf))
}

fn visits_arg() -> clap::Arg {
    arg!(--"visits" <PATH>)
        .required(false)
        .help("Visitor-origin table (placekey, county, NAME, lat, lon, visits)")
        .value_parser(clap::value_parser!(PathBuf))
}

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("footfall")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("footfall")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("init")
                .about("Writes a default footfall configuration file")
                .arg(
                    arg!([PATH])
                        .required(false)
                        .help("Directory to store the configuration in")
                        .default_value("~/.config/footfall/"),
                )
                .arg(
                    arg!(-f --"force")
                        .help("Overwrite an existing configuration file without asking.")
                        .required(false),
                ),
        )
        .subcommand(
            command!("explore")
                .about(
                    "Load the datasets and answer click events read from stdin, one per line. \
                A line is a placekey, a JSON [placekey, raw_visit_count] pair, or a JSON click object.",
                )
                .arg(config_arg())
                .arg(pois_arg())
                .arg(visits_arg())
                .arg(
                    arg!(--"json")
                        .required(false)
                        .help("Print the render payload as JSON after each summary")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            command!("render")
                .about("Compose the view for a single click and write it out")
                .arg(config_arg())
                .arg(pois_arg())
                .arg(visits_arg())
                .arg(
                    arg!(-p --"poi" <PLACEKEY>)
                        .required(false)
                        .help("Placekey of the clicked POI (default: nothing selected)"),
                )
                .arg(
                    arg!(--"raw-count" <COUNT>)
                        .required(false)
                        .help("Raw visitor count carried by the click")
                        .value_parser(clap::value_parser!(u64))
                        .requires("poi"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Output format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Write to a file instead of stdout")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            command!("stats")
                .about("Print statistics about the loaded datasets")
                .arg(config_arg())
                .arg(pois_arg())
                .arg(visits_arg()),
        )
}
