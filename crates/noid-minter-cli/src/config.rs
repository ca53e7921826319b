use anyhow::{anyhow, bail};
use clap::{Parser, Subcommand};
use noid_minter::ResourceKind;
use std::path::PathBuf;

/// Command line arguments, before validation.
#[derive(Parser, Debug, Clone)]
#[command(name = "noid-minter", version)]
#[command(about = "Mint collision-free identifiers for presentation documents")]
pub struct CliArgs {
    /// Minter implementation new minters are built with
    #[arg(long, env = "NOID_MINTER", global = true)]
    pub minter: Option<String>,

    /// Seed for a reproducible identifier space
    #[arg(long, env = "NOID_SEED", global = true)]
    pub seed: Option<u64>,

    /// Process property, e.g. `-D noid.minter=default` (repeatable)
    #[arg(short = 'D', value_name = "KEY=VALUE", global = true, value_parser = parse_property)]
    pub properties: Vec<(String, String)>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Mint identifiers inside a document
    Mint {
        /// Identifier of the document to mint under
        #[arg(long, required_unless_present = "manifest", conflicts_with = "manifest")]
        document: Option<String>,

        /// Manifest JSON whose existing identifiers must not be minted again
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Resource kind: canvas, range, annotation, or annotation-page
        #[arg(short, long, default_value = "canvas")]
        kind: ResourceKind,

        /// Canvas that minted annotation pages belong to
        #[arg(long)]
        canvas: Option<String>,

        /// Number of identifiers to mint
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Require the document identifier to be an https URI
        #[arg(long)]
        https: bool,
    },

    /// Mint Skolem IRIs
    Skolem {
        /// Base the IRIs are minted under; bare UUIDs when absent
        #[arg(long, env = "NOID_WELL_KNOWN_BASE")]
        base: Option<String>,

        /// Number of IRIs to mint
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },

    /// Check that identifiers are absolute URIs
    Check {
        /// Identifiers to check
        #[arg(required = true)]
        ids: Vec<String>,

        /// Also require the https scheme
        #[arg(long)]
        https: bool,
    },
}

fn parse_property(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty property key in `{raw}`"));
    }
    Ok((key.to_owned(), value.to_owned()))
}

/// Where a minter's document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Id(String),
    Manifest(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintConfig {
    pub source: DocumentSource,
    pub kind: ResourceKind,
    pub canvas: Option<String>,
    pub count: usize,
    pub https: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    Mint(MintConfig),
    Skolem { base: Option<String>, count: usize },
    Check { ids: Vec<String>, https: bool },
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub minter: Option<String>,
    pub seed: Option<u64>,
    pub properties: Vec<(String, String)>,
    pub task: Task,
}

impl TryFrom<CliArgs> for Config {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.minter.as_deref().is_some_and(|m| m.trim().is_empty()) {
            bail!("--minter must not be empty");
        }

        let task = match args.command {
            Command::Mint {
                document,
                manifest,
                kind,
                canvas,
                count,
                https,
            } => {
                if count == 0 {
                    bail!("--count must be at least 1");
                }
                match (kind, &canvas) {
                    (ResourceKind::AnnotationPage, None) => {
                        bail!("minting annotation pages requires --canvas")
                    }
                    (kind, Some(_)) if kind != ResourceKind::AnnotationPage => {
                        bail!("--canvas only applies to annotation pages, not {kind}")
                    }
                    _ => {}
                }
                let source = match (document, manifest) {
                    (Some(id), None) => DocumentSource::Id(id),
                    (None, Some(path)) => DocumentSource::Manifest(path),
                    _ => return Err(anyhow!("exactly one of --document or --manifest is required")),
                };
                Task::Mint(MintConfig {
                    source,
                    kind,
                    canvas,
                    count,
                    https,
                })
            }
            Command::Skolem { base, count } => {
                if count == 0 {
                    bail!("--count must be at least 1");
                }
                Task::Skolem { base, count }
            }
            Command::Check { ids, https } => Task::Check { ids, https },
        };

        Ok(Self {
            minter: args.minter,
            seed: args.seed,
            properties: args.properties,
            task,
        })
    }
}
