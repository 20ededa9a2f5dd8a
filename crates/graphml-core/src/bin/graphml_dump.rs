#[cfg(feature = "cli")]
mod real {
    use clap::Parser;
    use graphml_core::model::Element;
    use graphml_core::{LoadError, Loader, LoaderConfig, NamespaceRegistry};
    use log::{LevelFilter, debug, info};
    use std::fs;
    use std::path::PathBuf;
    use std::str::FromStr;

    /// Load a GraphML file and print its document model as JSON.
    #[derive(Parser, Debug)]
    #[command(author, version, about, long_about = None)]
    struct Args {
        /// Path to the GraphML file
        input: PathBuf,

        /// Loader settings (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print only this edge
        #[arg(long)]
        edge: Option<String>,

        /// Log level (off, error, warn, info, debug, trace)
        #[arg(long, default_value = "warn")]
        log_level: String,
    }

    #[derive(Debug, thiserror::Error)]
    enum DumpError {
        #[error("failed to read {path}: {source}")]
        Read {
            path: PathBuf,
            source: std::io::Error,
        },

        #[error("invalid configuration: {0}")]
        Config(#[from] toml::de::Error),

        #[error(transparent)]
        Load(#[from] LoadError),

        #[error("no edge with id {0}")]
        UnknownEdge(String),

        #[error("failed to serialize output: {0}")]
        Json(#[from] serde_json::Error),
    }

    fn read(path: &PathBuf) -> Result<String, DumpError> {
        fs::read_to_string(path).map_err(|source| DumpError::Read {
            path: path.clone(),
            source,
        })
    }

    fn load_config(path: Option<&PathBuf>) -> Result<LoaderConfig, DumpError> {
        let Some(path) = path else {
            return Ok(LoaderConfig::default());
        };
        info!(path = path.display().to_string(); "Loading configuration");
        Ok(toml::from_str(&read(path)?)?)
    }

    fn run(args: &Args) -> Result<(), DumpError> {
        let config = load_config(args.config.as_ref())?;
        debug!(config:?; "Loader configuration");

        let markup = read(&args.input)?;
        let document = Loader::new(NamespaceRegistry::global(), config).load(&markup)?;

        let output = match &args.edge {
            Some(id) => {
                let edge = document
                    .get_edge(id)
                    .ok_or_else(|| DumpError::UnknownEdge(id.clone()))?;
                debug!(edge = edge.id(), endpoints:? = edge.endpoints(); "Selected edge");
                serde_json::to_string_pretty(edge)?
            }
            None => serde_json::to_string_pretty(&document)?,
        };
        println!("{output}");
        Ok(())
    }

    pub fn main() {
        let args = Args::parse();

        let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
            eprintln!("Invalid log level: {}. Using 'warn' instead.", args.log_level);
            LevelFilter::Warn
        });
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log_level)
            .init();

        if let Err(err) = run(&args) {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "cli")]
fn main() {
    real::main();
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("graphml_dump requires `--features cli`");
    std::process::exit(2);
}
