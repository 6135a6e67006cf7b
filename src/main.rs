use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tool_version::config::{self, Config};
use tool_version::repository::{ToolRepository, UrlRepository, resolve_tool_version};
use tool_version::security::CveFinder;
use tool_version::version::{
    VersionConstraint, VersionIdentifier, VersionRange, VersionRangeRelation,
};

#[derive(Parser)]
#[command(name = "tool-version")]
#[command(version, about = "Version identifiers, ranges and CVE checks for developer tools")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also write logs to the log file in the data directory
    #[arg(long, global = true)]
    log_file: bool,

    /// Root folder of the tool repository
    #[arg(long, global = true)]
    urls: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the segments and properties of a version
    Parse { version: String },
    /// Compare two versions
    Compare {
        left: VersionIdentifier,
        right: VersionIdentifier,
    },
    /// Check whether a version matches a pattern like `17*`
    Matches {
        pattern: VersionIdentifier,
        version: VersionIdentifier,
    },
    /// Increment a version
    Increment {
        version: VersionIdentifier,
        #[command(flatten)]
        digit: Digit,
        /// Keep the letters of incremented segments
        #[arg(long)]
        keep_letters: bool,
    },
    /// Sort versions
    Sort {
        #[arg(required = true)]
        versions: Vec<VersionIdentifier>,
        #[arg(long)]
        descending: bool,
    },
    /// Work with version ranges like `[1.0,2.0)`
    Range {
        #[command(subcommand)]
        command: RangeCommand,
    },
    /// Resolve a version constraint against the tool repository
    Resolve {
        tool: String,
        edition: String,
        constraint: VersionConstraint,
    },
    /// List the CVEs of a tool version and safer alternatives
    Cve {
        tool: String,
        edition: String,
        version: VersionIdentifier,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct Digit {
    /// Index of the numeric segment to increment, starting at zero
    #[arg(long)]
    segment: Option<usize>,
    #[arg(long)]
    major: bool,
    #[arg(long)]
    minor: bool,
    #[arg(long)]
    patch: bool,
    /// Increment the last numeric segment
    #[arg(long)]
    last: bool,
}

#[derive(Subcommand)]
enum RangeCommand {
    /// Check whether a range contains a version
    Contains {
        range: VersionRange,
        version: VersionIdentifier,
    },
    /// Merge two ranges
    Union {
        left: VersionRange,
        right: VersionRange,
        /// Minimum relation required to merge
        #[arg(long, default_value = "connected-loosely")]
        relation: VersionRangeRelation,
    },
    /// Intersect two ranges
    Intersect {
        left: VersionRange,
        right: VersionRange,
    },
    /// Show how two ranges relate
    Relation {
        left: VersionRange,
        right: VersionRange,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_file = cli.log_file.then(config::log_path);
    let _guard = tool_version::logging::init(log_file.as_deref())?;

    let config_path = cli.config.clone().unwrap_or_else(config::config_path);
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;
    let repository = UrlRepository::new(cli.urls.clone().unwrap_or_else(|| config.urls_path()));

    match cli.command {
        Command::Parse { version } => parse(&version),
        Command::Compare { left, right } => {
            println!("{}", left.compare_version(&right));
            Ok(())
        }
        Command::Matches { pattern, version } => {
            println!("{}", pattern.matches(&version));
            Ok(())
        }
        Command::Increment {
            version,
            digit,
            keep_letters,
        } => {
            let incremented = match digit {
                Digit {
                    segment: Some(index),
                    ..
                } => version.increment_segment(index, keep_letters),
                Digit { major: true, .. } => version.increment_major(keep_letters),
                Digit { minor: true, .. } => version.increment_minor(keep_letters),
                Digit { patch: true, .. } => version.increment_patch(keep_letters),
                Digit { .. } => version.increment_last_digit(keep_letters),
            }?;
            println!("{}", incremented);
            Ok(())
        }
        Command::Sort {
            mut versions,
            descending,
        } => {
            versions.sort();
            if descending {
                versions.reverse();
            }
            for version in versions {
                println!("{}", version);
            }
            Ok(())
        }
        Command::Range { command } => range(command),
        Command::Resolve {
            tool,
            edition,
            constraint,
        } => {
            let version = resolve_tool_version(&repository, &tool, &edition, &constraint)?;
            println!("{}", version);
            Ok(())
        }
        Command::Cve {
            tool,
            edition,
            version,
        } => cve(&repository, &config, &tool, &edition, version),
    }
}

fn parse(input: &str) -> anyhow::Result<()> {
    let version: VersionIdentifier = input
        .parse()
        .with_context(|| format!("Failed to parse {:?}", input))?;
    let segments: Vec<String> = version
        .segments()
        .iter()
        .map(|segment| format!("{:?}", segment.to_string()))
        .collect();
    println!("version: {}", version);
    println!("segments: {}", segments.join(" "));
    println!("valid: {}", version.is_valid());
    println!("stable: {}", version.is_stable());
    let phase = version.development_phase();
    println!("phase: {} ({:?})", phase, phase.phase());
    Ok(())
}

fn range(command: RangeCommand) -> anyhow::Result<()> {
    let optional = |range: Option<VersionRange>| {
        range.map_or_else(|| "none".to_string(), |range| range.to_string())
    };
    match command {
        RangeCommand::Contains { range, version } => println!("{}", range.contains(&version)),
        RangeCommand::Union {
            left,
            right,
            relation,
        } => println!("{}", optional(left.union(&right, relation))),
        RangeCommand::Intersect { left, right } => {
            println!("{}", optional(left.intersection(&right)))
        }
        RangeCommand::Relation { left, right } => println!("{}", left.relation(&right)),
    }
    Ok(())
}

fn cve(
    repository: &dyn ToolRepository,
    config: &Config,
    tool: &str,
    edition: &str,
    version: VersionIdentifier,
) -> anyhow::Result<()> {
    let versions = repository
        .sorted_versions(tool, edition)
        .with_context(|| format!("Failed to list versions of {}/{}", tool, edition))?;
    let security = repository
        .find_security(tool, edition)
        .with_context(|| format!("Failed to load security of {}/{}", tool, edition))?;
    let finder = CveFinder::new(
        &security,
        &versions,
        version.clone(),
        None,
        config.security.min_severity,
    );

    println!("{}", finder.vulnerabilities(&version).describe(tool, &version));
    for choice in finder.choices() {
        println!("{}", choice);
    }
    Ok(())
}
