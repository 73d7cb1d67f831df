use crate::cli::CheckArgs;
use crate::conf::{ConfigError, parse_config, validate};
use anyhow::{Result, bail};
use std::fs;

pub fn check(args: &CheckArgs) -> Result<()> {
    let path = &args.path;
    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let cfg = parse_config(path, &s)?;
    let report = validate(&cfg);

    if args.json {
        println!("{}", report.render_json()?);
    } else if report.has_violations() {
        eprint!("{}", report.render_pretty());
    }

    if !report.is_valid() {
        bail!("{} is not a valid config", path.display());
    }
    if args.json {
        return Ok(());
    }

    println!("✔ Config loaded successfully");
    println!("✔ {}s buckets, {}s grace", cfg.bucket_size_seconds, cfg.grace_seconds);
    println!(
        "✔ alert above {} req/s over {}s",
        cfg.alert_threshold, cfg.window_size_seconds
    );

    Ok(())
}
