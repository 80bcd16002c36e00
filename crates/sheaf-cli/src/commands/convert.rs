//! Convert command - compose a batch of images into one PDF.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use sheaf_core::{ingest_batch, Composer, FitPolicy, ImageSet, RawFile, SheafConfig};

/// Arguments for the convert command.
#[derive(Args)]
pub struct ConvertArgs {
    /// Input image files or glob patterns, in page order
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Output PDF file
    #[arg(short, long, default_value = "result.pdf")]
    output: PathBuf,

    /// Fit policy applied to every page
    #[arg(short, long, value_enum)]
    fit: Option<FitPolicy>,

    /// Move the named image to the first page before converting
    #[arg(long, value_name = "NAME")]
    first: Option<String>,

    /// Move the named image to the last page before converting
    #[arg(long, value_name = "NAME")]
    last: Option<String>,
}

pub async fn run(args: ConvertArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        SheafConfig::from_file(std::path::Path::new(path))?
    } else {
        SheafConfig::default()
    };
    let policy = args.fit.unwrap_or(config.layout.fit_policy);

    let paths = expand_inputs(&args.inputs)?;
    info!("converting {} files", paths.len());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    pb.set_message("Reading files...");
    pb.set_position(10);

    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| path.display().to_string());
        let declared_type = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string();
        files.push(RawFile {
            name,
            declared_type,
            bytes: fs::read(path)?,
        });
    }

    pb.set_message("Validating batch...");
    pb.set_position(25);

    let entries = ingest_batch(files, &config.ingest).await?;
    let mut set = ImageSet::from_entries(entries);
    debug!("admitted {} images", set.len());

    if let Some(name) = &args.first {
        let index = index_of(&set, name)?;
        set.move_to_start(index)?;
    }
    if let Some(name) = &args.last {
        let index = index_of(&set, name)?;
        set.move_to_end(index)?;
    }

    pb.set_message(format!("Composing {} pages...", set.len()));
    pb.set_position(50);

    let composer = Composer::new(&config);
    let bytes = composer.compose(set.snapshot(), policy).await?;

    pb.set_message("Writing output...");
    pb.set_position(90);

    fs::write(&args.output, &bytes)?;
    pb.finish_with_message("Done");

    println!(
        "{} Wrote {} pages to {}",
        style("✓").green(),
        set.len(),
        args.output.display()
    );
    debug!("total conversion time: {:?}", start.elapsed());

    Ok(())
}

/// Expand literal paths and glob patterns, keeping the argument order.
fn expand_inputs(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.contains(['*', '?', '[']) {
            let mut matched: Vec<PathBuf> = glob(input)?.filter_map(|r| r.ok()).collect();
            if matched.is_empty() {
                anyhow::bail!("No files matched pattern: {}", input);
            }
            matched.sort();
            paths.extend(matched);
        } else {
            let path = PathBuf::from(input);
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            paths.push(path);
        }
    }
    Ok(paths)
}

fn index_of(set: &ImageSet, name: &str) -> anyhow::Result<usize> {
    set.iter()
        .position(|e| e.identifier == name)
        .ok_or_else(|| anyhow::anyhow!("No image named {:?} in the batch", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_inputs_rejects_missing_file() {
        let err = expand_inputs(&["/no/such/file.png".to_string()]).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_expand_inputs_keeps_argument_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.png");
        fs::write(&a, b"x").unwrap();
        fs::write(&b, b"x").unwrap();

        let paths = expand_inputs(&[
            b.display().to_string(),
            a.display().to_string(),
        ])
        .unwrap();
        assert_eq!(paths, vec![b, a]);
    }
}
