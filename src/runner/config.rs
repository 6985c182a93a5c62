use std::path::PathBuf;

use clap::{arg, command, value_parser, ValueEnum};

use doctopic::tokenize::DEFAULT_TAB_WIDTH;

#[derive(Debug, Clone)]
pub struct DoctopicConfig {
    pub paths: Vec<PathBuf>,
    pub format: OutputFormat,
    /// Overrides the language picked from each file's extension.
    pub language: Option<String>,
    pub tab_width: usize,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// One line per topic.
    #[default]
    Topics,
    /// Topics with their prototypes laid out.
    Prototypes,
    /// Topics as RON.
    Ron,
    /// The source with display roles colored.
    Highlight,
    /// The raw token stream.
    Tokens,
}

pub fn parse_args_or_exit() -> DoctopicConfig {
    use clap::Command;

    fn command() -> Command {
        command!()
            .arg(
                arg!(files: <FILE> ... "input files")
                    .value_parser(value_parser!(PathBuf))
                    .required(true),
            )
            .arg(
                arg!(-f --format <FORMAT> "the output format")
                    .value_parser(value_parser!(OutputFormat))
                    .required(false),
            )
            .arg(
                arg!(-l --language <LANGUAGE> "the language of every input file")
                    .required(false),
            )
            .arg(
                arg!(--"tab-width" <WIDTH> "the number of columns a tab advances")
                    .value_parser(value_parser!(usize))
                    .required(false),
            )
    }

    fn parse_args() -> Result<DoctopicConfig, clap::Error> {
        use clap::error::ErrorKind;

        let mut command = command();
        let matches = command.get_matches_mut();

        let paths = matches
            .get_many::<PathBuf>("files")
            .map(|paths| paths.cloned().collect())
            .unwrap_or_default();

        let format = matches
            .get_one::<OutputFormat>("format")
            .copied()
            .unwrap_or_default();
        let language = matches.get_one::<String>("language").cloned();
        let tab_width = matches
            .get_one::<usize>("tab-width")
            .copied()
            .unwrap_or(DEFAULT_TAB_WIDTH);

        if tab_width == 0 {
            return Err(command.error(
                ErrorKind::ValueValidation,
                "the tab width must be at least 1",
            ));
        }

        Ok(DoctopicConfig {
            paths,
            format,
            language,
            tab_width,
        })
    }

    match parse_args() {
        Ok(cfg) => cfg,

        Err(e) => {
            e.format(&mut command()).exit();
        }
    }
}
