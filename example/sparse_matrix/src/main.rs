use anyhow::{anyhow, Context, Result};
use sparsemat::{Operation, SparseMatrix};
use std::{fs, path::{Path, PathBuf}, str::FromStr};
use structopt::StructOpt;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(anyhow!("unknown output format {other:?}, expected text or json")),
        }
    }
}

#[derive(Debug, StructOpt)]
#[structopt(name = "sparse_matrix", about = "Add, subtract or multiply two sparse matrix files")]
struct Opt {
    /// add, subtract or multiply (1, 2 and 3 also work)
    operation: Operation,

    /// Left-hand matrix file
    #[structopt(parse(from_os_str))]
    lhs: PathBuf,

    /// Right-hand matrix file
    #[structopt(parse(from_os_str))]
    rhs: PathBuf,

    /// Write the result here instead of stdout
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// text or json
    #[structopt(short, long, default_value = "text")]
    format: OutputFormat,
}

fn load_matrix(path: &Path) -> Result<SparseMatrix> {
    info!("Reading {}", path.display());
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let matrix = SparseMatrix::parse(&text)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    debug!(rows = matrix.rows(), cols = matrix.cols(), nnz = matrix.nnz(), "Loaded matrix");
    Ok(matrix)
}

fn render(matrix: &SparseMatrix, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(matrix.to_text()),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(matrix)
                .context("Failed to serialize result as JSON")?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn run(opt: &Opt) -> Result<String> {
    let lhs = load_matrix(&opt.lhs)?;
    let rhs = load_matrix(&opt.rhs)?;

    info!("Performing {} of {}x{} and {}x{}", opt.operation, lhs.rows(), lhs.cols(), rhs.rows(), rhs.cols());
    let result = opt.operation
        .apply(&lhs, &rhs)
        .with_context(|| format!("Failed to {} {} and {}", opt.operation, opt.lhs.display(), opt.rhs.display()))?;
    info!(rows = result.rows(), cols = result.cols(), nnz = result.nnz(), "Computed result");

    render(&result, opt.format)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let opt = Opt::from_args();
    let output = run(&opt)?;

    match &opt.output {
        Some(path) => {
            fs::write(path, &output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Result saved to {}", path.display());
        }
        None => print!("{}", output),
    }

    Ok(())
}
