use anyhow::{Context, Result};
use datutils::misc::{file_info, mime_type};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::InfoArgs) -> Result<()> {
    let info = file_info(&args.path)
        .with_context(|| format!("[info] {}", args.path.display()))?;

    let mut value = serde_json::to_value(&info)?;
    if let Some(obj) = value.as_object_mut() {
        obj.insert("mime".into(), mime_type(&args.path).into());
    }
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
