use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "discharge")]
#[command(version)]
#[command(about = "Turn hospital discharge instructions into a plain-language recovery plan")]
pub struct Args {
    /// Base URL of the discharge service (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Language for read-aloud (overrides the config file)
    #[arg(long, global = true)]
    pub language: Option<String>,

    /// Directory holding config.json and the credential (defaults to the
    /// platform config directory)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Store an access token for later requests
    Login {
        #[arg(long)]
        token: String,
    },
    /// Forget the stored access token
    Logout,
    /// Simplify a discharge summary and print the result
    Simplify(SimplifyArgs),
    /// Show your recovery plans
    Plans {
        /// Keep the session open to select plans and tick off tasks
        #[arg(short, long)]
        interactive: bool,
    },
    /// Inspect or change settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(ClapArgs, Debug)]
#[command(group = clap::ArgGroup::new("input").required(true).multiple(false))]
pub struct SimplifyArgs {
    /// Discharge document (PDF or text)
    #[arg(long, group = "input")]
    pub file: Option<PathBuf>,

    /// Discharge instructions as text
    #[arg(long, group = "input")]
    pub text: Option<String>,

    /// Read the instructions from stdin
    #[arg(long, group = "input")]
    pub stdin: bool,

    /// Save follow-up appointments as an .ics file in this directory
    #[arg(long, value_name = "DIR")]
    pub ics: Option<PathBuf>,

    /// Read the summary aloud after printing it
    #[arg(long)]
    pub speak: bool,

    /// Print the raw result as JSON instead of the rendered view
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the current settings
    Show,
    /// Set the service base URL
    SetUrl { url: String },
    /// Set the read-aloud language code, e.g. en-US
    SetLanguage { code: String },
    /// Set the command used to play audio, e.g. "mpv --really-quiet"
    SetPlayer { command: String },
}
