use argparse::{ArgumentParser, Store, StoreOption};
use std::path::PathBuf;

pub struct CliArgs {
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub index_policy: String,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            input_file: PathBuf::new(),
            output_file: PathBuf::new(),
            index_policy: "accepted".into(),
            log_level: "essential".into(),
            log_file: None,
        }
    }
}

pub fn parse_cli() -> CliArgs {
    let mut args = CliArgs::default();
    {
        let mut ap = ArgumentParser::new();
        ap.set_description("WWARA repeater list CSV -> CHIRP memory CSV converter");
        ap.refer(&mut args.input_file)
            .add_argument("input_file", Store, "Path to the WWARA export CSV")
            .required();
        ap.refer(&mut args.output_file)
            .add_argument("output_file", Store, "Path to the CHIRP CSV to create (must not exist)")
            .required();
        ap.refer(&mut args.index_policy)
            .add_option(&["--index-policy"], Store, "Channel numbering: accepted|every-row");
        ap.refer(&mut args.log_level)
            .add_option(&["--log"], Store, "Log level (essential|debug|trace|warn|error)");
        ap.refer(&mut args.log_file)
            .add_option(&["--log-file"], StoreOption, "Write the log to this file instead of stderr");
        ap.parse_args_or_exit();
    }
    args
}
