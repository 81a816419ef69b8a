use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use filegate_core::Profile;

#[derive(Parser, Debug)]
#[command(name = "filegate", version, about = "Classify downloaded attachment payloads")]
pub struct Cli {
    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize a payload, detect its content type and resolve its filename.
    Classify {
        #[arg(help = "Payload file; stdin when omitted or `-`")]
        input: Option<PathBuf>,
        #[arg(long, help = "Treat the input as raw bytes instead of a JSON value")]
        raw: bool,
        #[arg(long, help = "Name the caller knows the file by")]
        file_name: Option<String>,
        #[arg(long = "override", help = "Filename query-parameter override")]
        file_name_override: Option<String>,
        #[arg(long, value_enum, default_value_t = ProfileArg::Handover)]
        profile: ProfileArg,
        #[arg(long, help = "TOML classifier config; takes precedence over --profile")]
        config: Option<PathBuf>,
        #[arg(long, help = "Write the normalized bytes to this path")]
        out: Option<PathBuf>,
    },
    /// Sniff a local file by magic bytes and extension.
    Sniff { path: PathBuf },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileArg {
    Handover,
    Preview,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Handover => Profile::Handover,
            ProfileArg::Preview => Profile::Preview,
        }
    }
}
