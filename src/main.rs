mod cli;
mod generator;
mod schema;
mod source;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use generator::Generator;
use schema::{SchemaError, TypeGraph};
use source::SchemaSource;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Parses all sources into one graph. Syntax errors name the source they
/// came from; merge errors can involve several, so they name all of them.
fn read_graph(sources: &[SchemaSource]) -> anyhow::Result<TypeGraph> {
    let texts: Vec<&str> = sources.iter().map(|s| s.text.as_str()).collect();
    TypeGraph::parse(&texts).map_err(|err| {
        let context = match &err {
            SchemaError::Parse { index, .. } => {
                format!("failed to parse {}", sources[*index].origin)
            }
            _ => {
                let origins: Vec<&str> = sources.iter().map(|s| s.origin.as_str()).collect();
                format!("failed to read schema from {}", origins.join(", "))
            }
        };
        anyhow::Error::new(err).context(context)
    })
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = cli::Cli::parse();

    let sources = source::load(&cli.inputs).context("failed to load schema")?;
    let mut graph = read_graph(&sources)?;
    if let Some(query_type) = &cli.query_type {
        graph
            .set_query_type(query_type.as_str())
            .context("invalid --query-type")?;
    }

    let rst = Generator::new(&graph, cli.generator_options())
        .generate()
        .context("failed to generate code")?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, rst)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote generated code");
        }
        None => print!("{rst}"),
    }
    Ok(())
}
