use anyhow::{bail, Context, Result};
use datutils::{io::read_json, nested};
use serde_json::Value;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::FlattenArgs) -> Result<()> {
    let value = read_json(&args.input)
        .with_context(|| format!("[flatten] reading {}", args.input.display()))?;

    let out = if args.unflatten {
        let Value::Object(flat) = value else { bail!("[flatten] --unflatten expects a JSON object") };
        nested::unflatten(&flat, &args.sep)?
    } else {
        Value::Object(nested::flatten(&value, &args.sep)?)
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
