//! rbmk CLI - writes a Makefile.in fragment from RbConfig values
//!
//! Usage:
//!   rbmk <out-dir> [--variant minimal|full|passthrough]
//!                  [--from-json <file>] [--env-prefix <prefix>]
//!                  [--set KEY=VALUE]...
//!
//! Registry sources, in override order:
//!   --set pairs > --from-json snapshot > DEP_RB_RBCONFIG_* environment

use std::path::PathBuf;
use std::process::exit;

use rbmk::{ConfigRegistry, EnvRegistry, MakefileWriter, MapRegistry, Variant};

/// Registry with CLI-supplied overrides layered over a base source.
struct LayeredRegistry {
    overrides: MapRegistry,
    base: Box<dyn ConfigRegistry>,
}

impl ConfigRegistry for LayeredRegistry {
    fn lookup(&self, key: &str) -> Option<String> {
        self.overrides
            .lookup(key)
            .or_else(|| self.base.lookup(key))
    }
}

struct Options {
    out_dir: PathBuf,
    variant: Variant,
    from_json: Option<PathBuf>,
    env_prefix: Option<String>,
    overrides: MapRegistry,
}

fn usage() -> ! {
    eprintln!("Usage: rbmk <out-dir> [options]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <out-dir>       Directory to write Makefile.in into");
    eprintln!("  --variant       Script variant: minimal, full or passthrough (default: full)");
    eprintln!("  --from-json     Read the registry from a JSON object file");
    eprintln!("  --env-prefix    Environment variable prefix (default: DEP_RB_RBCONFIG_)");
    eprintln!("  --set KEY=VALUE Override a single registry entry (repeatable)");
    exit(1);
}

fn parse_args(args: &[String]) -> Options {
    if args.len() < 2 {
        usage();
    }

    let mut out_dir = None;
    let mut variant = Variant::default();
    let mut from_json = None;
    let mut env_prefix = None;
    let mut overrides = MapRegistry::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--variant" => {
                let value = args.get(i + 1).unwrap_or_else(|| usage());
                variant = match value.parse() {
                    Ok(v) => v,
                    Err(e) => {
                        eprintln!("[rbmk] {}", e);
                        exit(1);
                    }
                };
                i += 2;
            }
            "--from-json" => {
                from_json = Some(PathBuf::from(args.get(i + 1).unwrap_or_else(|| usage())));
                i += 2;
            }
            "--env-prefix" => {
                env_prefix = Some(args.get(i + 1).unwrap_or_else(|| usage()).clone());
                i += 2;
            }
            "--set" => {
                let pair = args.get(i + 1).unwrap_or_else(|| usage());
                match pair.split_once('=') {
                    Some((key, value)) => overrides.set(key, value),
                    None => {
                        eprintln!("[rbmk] --set expects KEY=VALUE, got '{}'", pair);
                        exit(1);
                    }
                }
                i += 2;
            }
            arg if arg.starts_with("--") => {
                eprintln!("[rbmk] Unknown option: {}", arg);
                usage();
            }
            arg => {
                if out_dir.is_some() {
                    usage();
                }
                out_dir = Some(PathBuf::from(arg));
                i += 1;
            }
        }
    }

    let out_dir = out_dir.unwrap_or_else(|| usage());
    Options {
        out_dir,
        variant,
        from_json,
        env_prefix,
        overrides,
    }
}

fn build_registry(options: &Options) -> rbmk::Result<LayeredRegistry> {
    let base: Box<dyn ConfigRegistry> = match &options.from_json {
        Some(path) => Box::new(MapRegistry::from_json_file(path)?),
        None => match &options.env_prefix {
            Some(prefix) => Box::new(EnvRegistry::with_prefix(prefix)),
            None => Box::new(EnvRegistry::new()),
        },
    };

    Ok(LayeredRegistry {
        overrides: options.overrides.clone(),
        base,
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    let registry = match build_registry(&options) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("[rbmk] {}", e);
            exit(1);
        }
    };

    let writer = MakefileWriter::new(&options.out_dir);
    match writer.export(&registry, options.variant) {
        Ok(report) => {
            eprintln!(
                "[rbmk] Wrote {} entries ({} variant) to {}",
                report.entries,
                options.variant.as_str(),
                report.path.display()
            );
        }
        Err(e) => {
            eprintln!("[rbmk] Export failed: {}", e);
            exit(1);
        }
    }
}
