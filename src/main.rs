use auction_loader::cli::{args::Args, commands};
use clap::Parser;
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    match commands::run(args) {
        Ok(_stats) => {
            // Success - the summary has already been printed
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with the error's code
            eprintln!("Error: {:#}", error);
            process::exit(error.exit_code());
        }
    }
}
