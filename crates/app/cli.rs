use std::time::Duration;

use clap::{Parser, Subcommand};
use client::{GdigiClient, Operation};
use config::Config;
use log::{debug, LevelFilter};

/// Reads and writes the parameters of a DigiTech device through the gdigi
/// DBus service.
#[derive(Parser, Debug)]
#[command(version, about, name = env!("APP_NAME"))]
pub struct Args {
    #[arg(
        short,
        long,
        global = true,
        help = "Path to config file",
        long_help = "Path to config file which will be used primarily"
    )]
    config: Option<String>,

    #[arg(
        short,
        long,
        global = true,
        help = "Print debug traces",
        long_help = "Print debug traces of the bus connection and the remote calls to stderr"
    )]
    debug: bool,

    #[arg(
        long,
        global = true,
        value_parser = humantime::parse_duration,
        help = "Reply timeout",
        long_help = "How long to wait for the reply of gdigi, e.g. '1s' or '500ms'"
    )]
    timeout: Option<Duration>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get the value of a parameter
    Get {
        #[arg(help = "Position", long_help = "Position of the parameter")]
        position: u32,

        #[arg(help = "ID", long_help = "ID of the parameter")]
        id: u32,
    },

    /// Set a parameter to a value
    Set {
        #[arg(help = "Position", long_help = "Position of the parameter")]
        position: u32,

        #[arg(help = "ID", long_help = "ID of the parameter")]
        id: u32,

        #[arg(help = "Value", long_help = "New value of the parameter")]
        value: u32,
    },
}

impl From<Command> for Operation {
    fn from(command: Command) -> Self {
        match command {
            Command::Get { position, id } => Operation::Get { position, id },
            Command::Set {
                position,
                id,
                value,
            } => Operation::Set {
                position,
                id,
                value,
            },
        }
    }
}

impl Args {
    pub async fn process(self) -> anyhow::Result<()> {
        init_logger(self.debug);

        let config = Config::init(self.config.as_deref());
        let timeout = self.timeout.unwrap_or(config.timeout());
        debug!("App: Using [{}] with {timeout:?} timeout", config.endpoint());

        let client = GdigiClient::init(config.endpoint(), config.client_name(), timeout).await?;
        let mut stdout = std::io::stdout().lock();
        client.dispatch(self.command.into(), &mut stdout).await?;

        Ok(())
    }
}

fn init_logger(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}
