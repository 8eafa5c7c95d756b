//! Clap derive structures for the `ruralis` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use ruralis_core::{CultureDraft, CultureId, ProducerId};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ruralis -- manage rural producers and their crops from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "ruralis",
    version,
    about = "Manage the rural producer registry from the command line",
    long_about = "Registers rural producers (CPF/CNPJ, farm, location, areas) and the\n\
        crops planted on each farm, and shows the registry dashboard.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config profile to use
    #[arg(long, short = 'p', env = "RURALIS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Service base URL (overrides profile)
    #[arg(long, short = 'u', env = "RURALIS_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Bearer token for the service
    #[arg(long, env = "RURALIS_API_TOKEN", global = true, hide_env_values = true)]
    pub api_token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "RURALIS_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "RURALIS_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "RURALIS_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage producers
    #[command(alias = "prod", alias = "p")]
    Producers(ProducersArgs),

    /// Manage the crops planted by a producer
    #[command(alias = "cult", alias = "c")]
    Cultures(CulturesArgs),

    /// Show registry totals
    #[command(alias = "dash")]
    Dashboard,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Producers ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProducersArgs {
    #[command(subcommand)]
    pub command: ProducersCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProducersCommand {
    /// List every producer, in server order
    #[command(alias = "ls")]
    List,

    /// Show one producer with its cultures
    Get {
        /// Producer ID
        id: ProducerId,
    },

    /// Register a new producer
    Create(ProducerCreateArgs),

    /// Change fields of an existing producer
    Update(ProducerUpdateArgs),

    /// Delete a producer
    #[command(alias = "rm")]
    Delete {
        /// Producer ID
        id: ProducerId,
    },
}

#[derive(Debug, Args)]
pub struct ProducerCreateArgs {
    /// Read the full producer as JSON from a file (flags are ignored)
    #[arg(long, short = 'F', conflicts_with_all = ["tax_id", "name"])]
    pub from_file: Option<PathBuf>,

    /// CPF (11 digits) or CNPJ (14 digits); punctuation is allowed
    #[arg(long, required_unless_present = "from_file")]
    pub tax_id: Option<String>,

    /// Producer name
    #[arg(long, required_unless_present = "from_file")]
    pub name: Option<String>,

    /// Farm name
    #[arg(long, required_unless_present = "from_file")]
    pub farm_name: Option<String>,

    #[arg(long, required_unless_present = "from_file")]
    pub city: Option<String>,

    /// Two-letter state code (e.g. MT)
    #[arg(long, required_unless_present = "from_file")]
    pub state: Option<String>,

    /// Total farm area in hectares
    #[arg(long, required_unless_present = "from_file")]
    pub total_area: Option<f64>,

    /// Farmed area in hectares
    #[arg(long, required_unless_present = "from_file")]
    pub agricultural_area: Option<f64>,

    /// Preserved vegetation area in hectares
    #[arg(long, required_unless_present = "from_file")]
    pub vegetation_area: Option<f64>,

    /// Initial culture as CROP_YEAR:NAME (repeatable)
    #[arg(long = "culture", value_parser = parse_culture)]
    pub cultures: Vec<CultureDraft>,
}

#[derive(Debug, Args)]
pub struct ProducerUpdateArgs {
    /// Producer ID
    pub id: ProducerId,

    /// Read the patch as JSON from a file (flags are ignored)
    #[arg(long, short = 'F')]
    pub from_file: Option<PathBuf>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub farm_name: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub state: Option<String>,

    #[arg(long)]
    pub total_area: Option<f64>,

    #[arg(long)]
    pub agricultural_area: Option<f64>,

    #[arg(long)]
    pub vegetation_area: Option<f64>,

    /// Replace the culture list; CROP_YEAR:NAME (repeatable)
    #[arg(long = "culture", value_parser = parse_culture)]
    pub cultures: Vec<CultureDraft>,
}

// ── Cultures ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CulturesArgs {
    #[command(subcommand)]
    pub command: CulturesCommand,
}

#[derive(Debug, Subcommand)]
pub enum CulturesCommand {
    /// Add a crop to a producer
    Add {
        /// Owning producer ID
        producer_id: ProducerId,

        /// Crop year (e.g. 2024 or 2023/24)
        #[arg(long)]
        crop_year: String,

        /// Crop name (e.g. Soja)
        #[arg(long)]
        name: String,
    },

    /// Remove a crop from a producer
    #[command(alias = "rm")]
    Remove {
        /// Owning producer ID
        producer_id: ProducerId,

        /// Culture ID
        culture_id: CultureId,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create the config file with guided setup
    Init,

    /// Display the current configuration (tokens redacted)
    Show,

    /// Print the config file path
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

// ── Value parsers ────────────────────────────────────────────────────

/// Parse `CROP_YEAR:NAME` into a culture draft.
fn parse_culture(raw: &str) -> Result<CultureDraft, String> {
    let (year, name) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected CROP_YEAR:NAME, got '{raw}'"))?;
    let (year, name) = (year.trim(), name.trim());
    if year.is_empty() || name.is_empty() {
        return Err(format!("expected CROP_YEAR:NAME, got '{raw}'"));
    }
    Ok(CultureDraft::new(year, name))
}
