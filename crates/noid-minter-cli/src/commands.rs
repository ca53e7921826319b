use crate::config::{Config, DocumentSource, MintConfig, Task};
use anyhow::{Context, bail};
use noid_minter::{
    Alphabet, IdentifierSpace, MinterRegistry, NOID_TOKEN_LENGTH, ResourceKind,
    SkolemIriFactory, check_id, lock, model::Manifest,
};
use std::{fs, io::Write, sync::Arc};

/// Runs the configured task, writing its results to `out`.
pub fn run(config: &Config, out: &mut impl Write) -> anyhow::Result<()> {
    match &config.task {
        Task::Mint(mint) => run_mint(config, mint, out),
        Task::Skolem { base, count } => run_skolem(base.as_deref(), *count, out),
        Task::Check { ids, https } => run_check(ids, *https, out),
    }
}

fn build_registry(config: &Config) -> anyhow::Result<MinterRegistry> {
    let space = match config.seed {
        Some(seed) => IdentifierSpace::with_seed(Alphabet::noid(), NOID_TOKEN_LENGTH, seed)?,
        None => IdentifierSpace::noid()?,
    };

    let registry = config
        .properties
        .iter()
        .fold(MinterRegistry::builder(Arc::new(space)), |builder, (k, v)| {
            builder.property(k, v)
        })
        .build();

    if let Some(minter) = &config.minter {
        registry.set_minter_implementation(minter)?;
    }
    Ok(registry)
}

fn run_mint(config: &Config, mint: &MintConfig, out: &mut impl Write) -> anyhow::Result<()> {
    let registry = build_registry(config)?;

    let minter = match &mint.source {
        DocumentSource::Id(id) => {
            if mint.https {
                check_id(id, true)?;
            }
            registry.get_minter_for_id(id)?
        }
        DocumentSource::Manifest(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading manifest {}", path.display()))?;
            let manifest: Manifest = serde_json::from_str(&raw)
                .with_context(|| format!("parsing manifest {}", path.display()))?;
            if mint.https {
                check_id(&manifest.id, true)?;
            }
            registry.get_minter(&manifest)?
        }
    };

    let mut minter = lock(&minter)?;
    tracing::info!(
        document = minter.document_id(),
        implementation = %registry.minter_implementation()?,
        remaining = minter.remaining(),
        "minting {} {} identifiers",
        mint.count,
        mint.kind
    );

    for _ in 0..mint.count {
        let id = match mint.kind {
            ResourceKind::Canvas => minter.mint_canvas_id()?,
            ResourceKind::Range => minter.mint_range_id()?,
            ResourceKind::Annotation => minter.mint_annotation_id()?,
            ResourceKind::AnnotationPage => {
                let Some(canvas) = &mint.canvas else {
                    bail!("minting annotation pages requires a canvas");
                };
                minter.mint_annotation_page_id(canvas)?
            }
        };
        writeln!(out, "{id}")?;
    }
    Ok(())
}

fn run_skolem(base: Option<&str>, count: usize, out: &mut impl Write) -> anyhow::Result<()> {
    let factory = match base {
        Some(base) => SkolemIriFactory::new().with_well_known_base(base),
        None => SkolemIriFactory::new(),
    };
    for _ in 0..count {
        writeln!(out, "{}", factory.skolem_iri())?;
    }
    Ok(())
}

fn run_check(ids: &[String], https: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let mut invalid = 0usize;
    for id in ids {
        match check_id(id, https) {
            Ok(id) => writeln!(out, "ok\t{id}")?,
            Err(e) => {
                invalid += 1;
                writeln!(out, "invalid\t{e}")?;
            }
        }
    }
    if invalid > 0 {
        bail!("{invalid} of {} identifiers are invalid", ids.len());
    }
    Ok(())
}
