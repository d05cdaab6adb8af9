//! trailmap - personalized learning paths
//!
//! CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{
    layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

use trailmap::cli::ProfileInput;
use trailmap::config::{Config, LoggingConfig};
use trailmap::core::{Difficulty, Experience, LearningStyle, ResourceId};
use trailmap::error::exit_codes;

// =============================================================================
// CLI Definition
// =============================================================================

/// trailmap - personalized learning paths and progress tracking
#[derive(Parser)]
#[command(name = "trailmap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog resources
    Catalog {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
        /// Only resources with a topic containing this text
        #[arg(long)]
        topic: Option<String>,
        /// Only resources of this difficulty
        #[arg(long, value_enum)]
        difficulty: Option<DifficultyArg>,
    },

    /// Generate a learning path from a profile
    Generate {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Generate a path, record completions and show progress
    Track {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
        #[command(flatten)]
        profile: ProfileArgs,
        /// User to track progress for
        #[arg(long)]
        user_id: Option<String>,
        /// Mark a resource complete (repeatable)
        #[arg(long = "complete", value_name = "ID")]
        complete: Vec<ResourceId>,
        /// Mark a resource incomplete, after completions (repeatable)
        #[arg(long = "incomplete", value_name = "ID")]
        incomplete: Vec<ResourceId>,
    },
}

/// Profile flags shared by `generate` and `track`.
#[derive(clap::Args)]
struct ProfileArgs {
    /// Profile file (JSON, or TOML by extension)
    #[arg(long, value_name = "FILE")]
    profile: Option<PathBuf>,
    /// Learner name
    #[arg(long)]
    name: Option<String>,
    /// Topic of interest, most important first (repeatable)
    #[arg(long = "interest", value_name = "TOPIC")]
    interests: Vec<String>,
    /// Skill already held (repeatable)
    #[arg(long = "skill", value_name = "SKILL")]
    skills: Vec<String>,
    /// Preferred learning style
    #[arg(long, value_enum)]
    style: Option<StyleArg>,
    /// Learning goals
    #[arg(long)]
    goals: Option<String>,
    /// Experience tier
    #[arg(long, value_enum)]
    experience: Option<ExperienceArg>,
    /// Weekly time commitment, e.g. "5-10"
    #[arg(long)]
    time: Option<String>,
}

impl From<ProfileArgs> for ProfileInput {
    fn from(args: ProfileArgs) -> Self {
        Self {
            file: args.profile,
            name: args.name,
            interests: args.interests,
            skills: args.skills,
            learning_style: args.style.map(Into::into),
            goals: args.goals,
            experience: args.experience.map(Into::into),
            time_commitment: args.time,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Beginner,
    Intermediate,
    Advanced,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Beginner => Difficulty::Beginner,
            DifficultyArg::Intermediate => Difficulty::Intermediate,
            DifficultyArg::Advanced => Difficulty::Advanced,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ExperienceArg {
    Beginner,
    Intermediate,
    Expert,
}

impl From<ExperienceArg> for Experience {
    fn from(arg: ExperienceArg) -> Self {
        match arg {
            ExperienceArg::Beginner => Experience::Beginner,
            ExperienceArg::Intermediate => Experience::Intermediate,
            ExperienceArg::Expert => Experience::Expert,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StyleArg {
    Visual,
    Auditory,
    Kinesthetic,
    Reading,
}

impl From<StyleArg> for LearningStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Visual => LearningStyle::Visual,
            StyleArg::Auditory => LearningStyle::Auditory,
            StyleArg::Kinesthetic => LearningStyle::Kinesthetic,
            StyleArg::Reading => LearningStyle::Reading,
        }
    }
}

// =============================================================================
// Main Entry Point
// =============================================================================

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("trailmap error: {}", e);
            ExitCode::from(exit_codes::ERROR as u8)
        }
    }
}

/// Handle for swapping the log filter once config has loaded.
type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// The filter directive for a log level, scoped to this crate.
fn log_directive(level: &str) -> String {
    format!("trailmap={}", level)
}

/// Install the stderr log subscriber.
///
/// Runs before config loading so warnings about broken config files are
/// visible. `RUST_LOG` wins when set and no handle is returned; otherwise
/// the filter starts at the default level and the returned handle applies
/// the configured one.
fn init_logging() -> Option<FilterHandle> {
    let from_env = EnvFilter::try_from_default_env().ok();
    let env_set = from_env.is_some();
    let filter = from_env
        .unwrap_or_else(|| EnvFilter::new(log_directive(&LoggingConfig::default().level)));
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    (!env_set).then_some(handle)
}

/// Switch the log filter to the configured level.
fn apply_log_level(handle: Option<FilterHandle>, config: &Config) {
    let Some(handle) = handle else {
        return;
    };
    if let Err(e) = handle.reload(EnvFilter::new(log_directive(&config.logging.level))) {
        tracing::warn!("failed to apply configured log level: {}", e);
    }
}

/// Run the CLI and return the exit code.
fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let log_handle = init_logging();
    let config = Config::load();
    apply_log_level(log_handle, &config);

    match cli.command {
        Commands::Catalog {
            json,
            quiet,
            topic,
            difficulty,
        } => run_catalog(json, quiet, topic, difficulty.map(Into::into), &config),
        Commands::Generate {
            json,
            quiet,
            profile,
        } => run_generate(json, quiet, profile.into(), &config),
        Commands::Track {
            json,
            quiet,
            profile,
            user_id,
            complete,
            incomplete,
        } => run_track(
            json,
            quiet,
            profile.into(),
            user_id,
            complete,
            incomplete,
            &config,
        ),
    }
}

// =============================================================================
// Command Implementations
// =============================================================================

fn success_to_exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::from(exit_codes::SUCCESS as u8)
    } else {
        ExitCode::from(exit_codes::ERROR as u8)
    }
}

fn print_formatted(formatted: &str) {
    if !formatted.is_empty() {
        println!("{}", formatted);
    }
}

fn run_catalog(
    json: bool,
    quiet: bool,
    topic: Option<String>,
    difficulty: Option<Difficulty>,
    config: &Config,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use trailmap::cli::catalog::{CatalogCommand, CatalogOptions};

    let cmd = CatalogCommand::new(config.resolve_catalog());
    let options = CatalogOptions {
        json,
        quiet,
        topic,
        difficulty,
    };

    let output = cmd.run(&options);
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_generate(
    json: bool,
    quiet: bool,
    profile: ProfileInput,
    config: &Config,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use trailmap::cli::generate::{GenerateCommand, GenerateOptions};

    let cmd = GenerateCommand::new(config.resolve_catalog(), &config.display.date_format);
    let options = GenerateOptions {
        json,
        quiet,
        profile,
    };

    let output = cmd.run(&options);
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_track(
    json: bool,
    quiet: bool,
    profile: ProfileInput,
    user_id: Option<String>,
    complete: Vec<ResourceId>,
    incomplete: Vec<ResourceId>,
    config: &Config,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use trailmap::cli::track::{TrackCommand, TrackOptions};
    use trailmap::planner::Planner;
    use trailmap::storage::MemoryProgressStore;

    let planner = Planner::new(config.resolve_catalog(), MemoryProgressStore::new());
    let cmd = TrackCommand::new(planner, &config.display.date_format);
    let options = TrackOptions {
        json,
        quiet,
        profile,
        user_id,
        complete,
        incomplete,
    };

    let output = cmd.run(&options);
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_to_exit_code() {
        assert_eq!(
            success_to_exit_code(true),
            ExitCode::from(exit_codes::SUCCESS as u8)
        );
        assert_eq!(
            success_to_exit_code(false),
            ExitCode::from(exit_codes::ERROR as u8)
        );
    }

    #[test]
    fn test_log_directive_scopes_to_crate() {
        assert_eq!(log_directive("debug"), "trailmap=debug");
        assert_eq!(
            log_directive(&LoggingConfig::default().level),
            "trailmap=warn"
        );
    }

    #[test]
    fn test_value_enum_conversions() {
        assert_eq!(
            Difficulty::from(DifficultyArg::Advanced),
            Difficulty::Advanced
        );
        assert_eq!(Experience::from(ExperienceArg::Expert), Experience::Expert);
        assert_eq!(
            LearningStyle::from(StyleArg::Kinesthetic),
            LearningStyle::Kinesthetic
        );
    }

    #[test]
    fn test_cli_parse_catalog() {
        let cli = Cli::parse_from([
            "trailmap",
            "catalog",
            "--topic",
            "python",
            "--difficulty",
            "intermediate",
            "--json",
        ]);
        match cli.command {
            Commands::Catalog {
                topic,
                difficulty,
                json,
                ..
            } => {
                assert_eq!(topic.as_deref(), Some("python"));
                assert!(matches!(difficulty, Some(DifficultyArg::Intermediate)));
                assert!(json);
            }
            _ => panic!("Expected Catalog command"),
        }
    }

    #[test]
    fn test_cli_parse_generate() {
        let cli = Cli::parse_from([
            "trailmap",
            "generate",
            "--interest",
            "javascript",
            "--interest",
            "react",
            "--skill",
            "html",
            "--experience",
            "beginner",
            "--style",
            "visual",
            "--time",
            "5-10",
        ]);
        match cli.command {
            Commands::Generate { profile, quiet, .. } => {
                assert!(!quiet);
                let input = ProfileInput::from(profile);
                assert_eq!(input.interests, vec!["javascript", "react"]);
                assert_eq!(input.skills, vec!["html"]);
                assert_eq!(input.experience, Some(Experience::Beginner));
                assert_eq!(input.learning_style, Some(LearningStyle::Visual));
                assert_eq!(input.time_commitment.as_deref(), Some("5-10"));
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_cli_parse_track() {
        let cli = Cli::parse_from([
            "trailmap",
            "track",
            "--profile",
            "me.toml",
            "--user-id",
            "u1",
            "--complete",
            "1",
            "--complete",
            "6",
            "--incomplete",
            "6",
        ]);
        match cli.command {
            Commands::Track {
                profile,
                user_id,
                complete,
                incomplete,
                ..
            } => {
                assert_eq!(profile.profile, Some(PathBuf::from("me.toml")));
                assert_eq!(user_id.as_deref(), Some("u1"));
                assert_eq!(complete, vec![1, 6]);
                assert_eq!(incomplete, vec![6]);
            }
            _ => panic!("Expected Track command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_difficulty() {
        let result = Cli::try_parse_from(["trailmap", "catalog", "--difficulty", "expert"]);
        assert!(result.is_err());
    }
}
