//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for kitchen-remedy
#[derive(Parser, Debug)]
#[command(name = "kitchen-remedy")]
#[command(author, version, about = "Home-remedy suggestions for kids, built from what is in your kitchen")]
#[command(long_about = r#"
Kitchen Remedy serves an HTTP API that stores kid profiles and pantry
ingredients, and asks an LLM provider (OpenAI, Gemini or Groq) for a
step-by-step home remedy using only the ingredients at hand. When no remedy
is possible it suggests a minimal shopping list instead.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./kitchen-remedy.toml       Project-level config
3. ~/.config/kitchen-remedy/config.toml   Global config

Environment variables prefixed with KITCHEN_REMEDY_ override files,
e.g. KITCHEN_REMEDY_SERVER__BIND=0.0.0.0:8000.

Example:
  OPENAI_API_KEY=... kitchen-remedy
  kitchen-remedy --bind 0.0.0.0:9000 -vv
  kitchen-remedy --show-config
"#)]
pub struct Cli {
    /// Address to listen on, overriding `server.bind`
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
