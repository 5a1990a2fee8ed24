use biblioteca_core::{ClientConfig, ConfigError, Target};
use clap::{Arg, ArgAction, ArgMatches, Command};

pub fn command() -> Command {
    Command::new("biblioteca")
        .about("Browse the library catalog served at {base_url}/api/libros")
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .value_name("URL")
                .help("API base URL; overrides BIBLIOTECA_BASE_URL"),
        )
        .arg(
            Arg::new("emulator")
                .long("emulator")
                .action(ArgAction::SetTrue)
                .help("Default to the emulator host alias http://10.0.2.2:8080"),
        )
        .arg(
            Arg::new("once")
                .long("once")
                .action(ArgAction::SetTrue)
                .help("Fetch once, print the result and exit"),
        )
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub base_url: Option<String>,
    pub emulator: bool,
    pub once: bool,
}

impl Options {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            base_url: matches.get_one::<String>("base-url").cloned(),
            emulator: matches.get_flag("emulator"),
            once: matches.get_flag("once"),
        }
    }

    /// Flags first, then the environment seen through `lookup`.
    pub fn client_config<F>(&self, lookup: F) -> Result<ClientConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let target = self.emulator.then_some(Target::Emulator);
        ClientConfig::resolve(self.base_url.as_deref(), target, lookup)
    }
}
