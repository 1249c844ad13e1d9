use crate::directory::worker_count;
use crate::image::visualizer::AspectRatio;
use crate::image::{RasterFormat, DEFAULT_ALPHA_THRESHOLD, DEFAULT_MAX_SIZE};
use crate::{Arguments, Mode};
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgAction, ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_argument(command);
        let command = Self::register_mode_argument(command);
        let command = Self::register_csv_output_argument(command);
        let command = Self::register_line_output_argument(command);
        let command = Self::register_rectangle_output_argument(command);
        let command = Self::register_aspect_ratio_argument(command);
        let command = Self::register_threads_argument(command);
        let command = Self::register_formats_argument(command);
        let command = Self::register_no_downsample_argument(command);
        let command = Self::register_max_size_argument(command);
        Self::register_alpha_threshold_argument(command)
    }

    fn register_input_argument(command: Command) -> Command {
        command.arg(Self::create_input_argument())
    }

    fn register_mode_argument(command: Command) -> Command {
        command.arg(Self::create_mode_argument())
    }

    fn register_csv_output_argument(command: Command) -> Command {
        command.arg(Self::create_csv_output_argument())
    }

    fn register_line_output_argument(command: Command) -> Command {
        command.arg(Self::create_line_output_argument())
    }

    fn register_rectangle_output_argument(command: Command) -> Command {
        command.arg(Self::create_rectangle_output_argument())
    }

    fn register_aspect_ratio_argument(command: Command) -> Command {
        command.arg(Self::create_aspect_ratio_argument())
    }

    fn register_threads_argument(command: Command) -> Command {
        command.arg(Self::create_threads_argument())
    }

    fn register_formats_argument(command: Command) -> Command {
        command.arg(Self::create_formats_argument())
    }

    fn register_no_downsample_argument(command: Command) -> Command {
        command.arg(Self::create_no_downsample_argument())
    }

    fn register_max_size_argument(command: Command) -> Command {
        command.arg(Self::create_max_size_argument())
    }

    fn register_alpha_threshold_argument(command: Command) -> Command {
        command.arg(Self::create_alpha_threshold_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_input_argument() -> Arg {
        Arg::new("input")
            .help("Image, directory, directory tree or CSV file to read")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_mode_argument() -> Arg {
        arg!(mode: -m --mode <MODE> "How the input is averaged")
            .default_value("directory")
            .value_parser(value_parser!(Mode))
    }

    fn create_csv_output_argument() -> Arg {
        arg!(csv_output: -c --csv <FILE> "Save the results as CSV file")
            .required(false)
            .value_parser(value_parser!(PathBuf))
    }

    fn create_line_output_argument() -> Arg {
        arg!(line_output: -l --line <FILE> "Save the results as one pixel tall image")
            .required(false)
            .value_parser(value_parser!(PathBuf))
    }

    fn create_rectangle_output_argument() -> Arg {
        arg!(rectangle_output: -r --rectangle <FILE> "Save the results as rectangular image")
            .required(false)
            .value_parser(value_parser!(PathBuf))
    }

    fn create_aspect_ratio_argument() -> Arg {
        arg!(aspect_ratio: -a --aspect_ratio <RATIO> "Aspect ratio of the rectangular image")
            .default_value(AspectRatio::default().to_string())
            .value_parser(|value: &str| value.parse::<AspectRatio>().map_err(|e| e.to_string()))
    }

    fn create_threads_argument() -> Arg {
        arg!(-t --threads <THREADS> "Number of Threads")
            .default_value(worker_count().to_string())
            .required(false)
            .value_parser(value_parser!(usize))
    }

    fn create_formats_argument() -> Arg {
        arg!(formats: -f --formats <FORMATS> "Image formats taken into account")
            .default_values(["jpeg", "png"])
            .value_delimiter(',')
            .value_parser(value_parser!(RasterFormat))
    }

    fn create_no_downsample_argument() -> Arg {
        arg!(no_downsample: --no_downsample "Average every pixel of the original images")
            .action(ArgAction::SetTrue)
    }

    fn create_max_size_argument() -> Arg {
        arg!(max_size: --max_size <PIXELS> "Longest image side after downsampling")
            .default_value(DEFAULT_MAX_SIZE.to_string())
            .value_parser(value_parser!(u32).range(1..))
    }

    fn create_alpha_threshold_argument() -> Arg {
        arg!(alpha_threshold: --alpha_threshold <ALPHA> "Pixels with this alpha or less are ignored")
            .default_value(DEFAULT_ALPHA_THRESHOLD.to_string())
            .value_parser(value_parser!(u8))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            input: Self::extract_input_argument(matches),
            mode: Self::extract_mode_argument(matches),
            csv_output: Self::extract_csv_output_argument(matches),
            line_output: Self::extract_line_output_argument(matches),
            rectangle_output: Self::extract_rectangle_output_argument(matches),
            aspect_ratio: Self::extract_aspect_ratio_argument(matches),
            number_of_threads: Self::extract_threads_argument(matches),
            formats: Self::extract_formats_argument(matches),
            downsample: !Self::extract_no_downsample_argument(matches),
            max_size: Self::extract_max_size_argument(matches),
            alpha_threshold: Self::extract_alpha_threshold_argument(matches),
        }
    }

    fn extract_input_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("input")
            .expect("Required argument input not provided")
            .clone()
    }

    fn extract_mode_argument(matches: &ArgMatches) -> Mode {
        matches
            .get_one::<Mode>("mode")
            .expect("Mode must be provided, but was unset.")
            .to_owned()
    }

    fn extract_csv_output_argument(matches: &ArgMatches) -> Option<PathBuf> {
        matches.get_one::<PathBuf>("csv_output").cloned()
    }

    fn extract_line_output_argument(matches: &ArgMatches) -> Option<PathBuf> {
        matches.get_one::<PathBuf>("line_output").cloned()
    }

    fn extract_rectangle_output_argument(matches: &ArgMatches) -> Option<PathBuf> {
        matches.get_one::<PathBuf>("rectangle_output").cloned()
    }

    fn extract_aspect_ratio_argument(matches: &ArgMatches) -> AspectRatio {
        matches
            .get_one::<AspectRatio>("aspect_ratio")
            .expect("Aspect ratio must be provided, but was unset.")
            .to_owned()
    }

    fn extract_threads_argument(matches: &ArgMatches) -> usize {
        matches
            .get_one::<usize>("threads")
            .expect("Required argument threads not provided")
            .to_owned()
    }

    fn extract_formats_argument(matches: &ArgMatches) -> Vec<RasterFormat> {
        matches
            .get_many::<RasterFormat>("formats")
            .expect("Image formats must be provided, but were unset.")
            .copied()
            .collect()
    }

    fn extract_no_downsample_argument(matches: &ArgMatches) -> bool {
        matches.get_flag("no_downsample")
    }

    fn extract_max_size_argument(matches: &ArgMatches) -> u32 {
        matches
            .get_one::<u32>("max_size")
            .expect("Max size must be provided, but was unset.")
            .to_owned()
    }

    fn extract_alpha_threshold_argument(matches: &ArgMatches) -> u8 {
        matches
            .get_one::<u8>("alpha_threshold")
            .expect("Alpha threshold must be provided, but was unset.")
            .to_owned()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}
