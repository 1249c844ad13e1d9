use std::env::args_os;
use std::process::ExitCode;

use color_average::{average_and_export, CLIParser};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match average_and_export(&arguments) {
        Ok(results) => {
            println!("{}", color_average::results::CSV_HEADER);
            for result in results {
                println!("{}", result);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Averaging failed because of: {}", e);
            ExitCode::FAILURE
        }
    }
}
