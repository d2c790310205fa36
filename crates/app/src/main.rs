//! mesh-inspect: decode one OBJ file and report what came out.
//! Usage: mesh-inspect [--strict] [--log-stats] [--buffer-size=N] <file.obj>

use anyhow::{Context, Result, bail};
use asset::{DecoderConfig, MeshDecoder, NumericPolicy};

#[derive(Debug, PartialEq)]
struct Args {
    path: String,
    config: DecoderConfig,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut config = DecoderConfig::new();
    let mut path = None;

    for arg in args {
        if arg == "--strict" {
            config = config.with_numeric_policy(NumericPolicy::Strict);
        } else if arg == "--log-stats" {
            config = config.with_log_stats(true);
        } else if let Some(v) = arg.strip_prefix("--buffer-size=") {
            let size = v
                .parse::<usize>()
                .with_context(|| format!("Invalid --buffer-size value '{}'", v))?;
            config = config.with_read_buffer_size(size);
        } else if arg.starts_with("--") {
            log::warn!("Unknown flag '{}', ignoring.", arg);
        } else if path.replace(arg).is_some() {
            bail!("Only one input file is supported");
        }
    }

    match path {
        Some(path) => Ok(Args { path, config }),
        None => bail!("Usage: mesh-inspect [--strict] [--log-stats] [--buffer-size=N] <file.obj>"),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args(std::env::args().skip(1))?;
    log::info!(
        "Decoding {} (policy={:?}, buffer={} bytes)",
        args.path,
        args.config.numeric_policy,
        args.config.read_buffer_size
    );

    let file = std::fs::File::open(&args.path)
        .with_context(|| format!("Failed to open OBJ file: {}", args.path))?;
    let (mesh, stats) = MeshDecoder::new(args.config)
        .decode_with_stats(file)
        .with_context(|| format!("Failed to decode {}", args.path))?;

    log::info!(
        "{} corners / {} triangles; {} clamped and {} zero-filled references",
        mesh.vertex_count(),
        mesh.triangle_count(),
        stats.clamped_refs,
        stats.zero_filled_refs
    );
    Ok(())
}
