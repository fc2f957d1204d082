use std::ffi::OsString;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Configuration file. Defaults to $REQLINE_CONFIG_PATH, then
    /// ~/.reqline/config.
    #[clap(short = 'c', long, help = "configuration file")]
    config: Option<String>,

    /// Initial URL, overriding [request] url
    #[clap(short = 'u', long, help = "initial URL")]
    url: Option<String>,

    /// Initial method, overriding [request] method
    #[clap(short = 'm', long, help = "initial HTTP method")]
    method: Option<String>,

    /// Log file used when REQLINE_LOG_LEVEL is set
    #[clap(long, help = "log file")]
    log_file: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CommandLineArgs {
    config: Option<String>,
    url: Option<String>,
    method: Option<String>,
    log_file: Option<String>,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            config: args.config,
            url: args.url,
            method: args.method,
            log_file: args.log_file,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn config(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn log_file(&self) -> Option<&str> {
        self.log_file.as_deref()
    }
}
