use std::io::Write;

use anyhow::{Context, Result};
use datutils::misc::Expiry;
use datutils::online::{CacheConfig, FetchConfig, Fetcher, Payload, Stream};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::FetchArgs) -> Result<()> {
    let mut config = FetchConfig::default();
    if let Some(dir) = &args.cache_dir {
        config = config.with_cache(
            CacheConfig::new(dir)
                .expire(Expiry::from_secs(args.expire))
                .force(args.force),
        );
    }
    let fetcher = Fetcher::new(config)?;

    if args.check {
        let exists = fetcher.exists(&args.url)
            .with_context(|| format!("[fetch] probing {}", args.url))?;
        println!("{exists}");
        return Ok(());
    }

    if let Some(out) = &args.output {
        if cli.verbose > 0 { eprintln!("[fetch] downloading {} -> {}", args.url, out.display()); }
        fetcher.download(&args.url, out, args.force)
            .with_context(|| format!("[fetch] downloading {}", args.url))?;
        return Ok(());
    }

    let stream = match args.stream.as_deref() {
        None => Stream::infer(&args.url),
        Some("json") => Stream::Json,
        Some("text") => Stream::Text,
        Some("bytes") => Stream::Bytes,
        Some(other) => anyhow::bail!("Unknown stream '{other}' (expected json, text or bytes)"),
    };

    let payload = fetcher.read(&args.url, stream)
        .with_context(|| format!("[fetch] reading {}", args.url))?;
    let mut stdout = std::io::stdout().lock();
    match payload {
        Payload::Json(value) => writeln!(stdout, "{}", serde_json::to_string_pretty(&value)?)?,
        Payload::Text(text) => write!(stdout, "{text}")?,
        Payload::Bytes(bytes) => stdout.write_all(&bytes)?,
    }
    Ok(())
}
