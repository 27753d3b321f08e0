use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use tracing::{error, info, info_span, warn};

use activity_cli::config::{ConfigFile, DEFAULT_OUTPUT_DIRECTORY, DEFAULT_OUTPUT_FILENAME};
use activity_cli::output::{find_project_root, output_path, render_document, write_document};
use activity_cli::summary::config_table;
use activity_cli::types::{ConvertResult, OutputTarget};
use activity_core::{Conversion, DocumentStats};
use activity_ingest::{SheetClient, SheetRef, Tab, TabRequest, read_csv_dataset};
use activity_model::RawDataset;
use activity_transform::CategoryStyles;

use crate::cli::{ConvertArgs, SourceArgs};

pub fn run_convert(args: &ConvertArgs, config_path: &Path) -> Result<ConvertResult> {
    let mut config = ConfigFile::load_from(config_path);
    let preferences = config.activities.preferences;
    let skip_financial = args.skip_financial || preferences.skip_financial;
    let skip_quotes = args.skip_quotes || preferences.skip_quotes;

    // =========================================================================
    // Stage 1: Load rows
    // =========================================================================
    let (source, dataset) = match &args.csv_file {
        Some(path) => {
            let dataset = read_csv_dataset(path)
                .with_context(|| format!("read CSV file {}", path.display()))?;
            (path.display().to_string(), dataset)
        }
        None => load_sheet(&args.source, &config, skip_financial, skip_quotes)?,
    };
    info!(source = %source, rows = dataset.len(), "loaded rows");

    if args.save_config {
        apply_source(&mut config, &args.source);
        config
            .save_to(config_path, Local::now().naive_local())
            .context("save configuration")?;
    }

    // =========================================================================
    // Stage 2: Validate, normalize, assemble
    // =========================================================================
    let span = info_span!("convert", source = %source);
    let _guard = span.enter();
    let rows_read = dataset.len();
    let mut conversion = Conversion::default();
    let output = match conversion.run(&dataset, Local::now().naive_local()) {
        Ok(output) => output,
        Err(failure) => match failure.report() {
            Some(report) => {
                error!(%failure, "conversion stopped");
                return Ok(ConvertResult::failed(
                    source,
                    rows_read,
                    report.diagnostics.clone(),
                ));
            }
            None => return Err(failure).context("convert activities"),
        },
    };
    let stats =
        DocumentStats::from_records(&output.document.activities, &CategoryStyles::default());
    let diagnostics = output.all_diagnostics();

    // =========================================================================
    // Stage 3: Write
    // =========================================================================
    let target = target_path(args, &config)?;
    let output_target = if args.dry_run {
        let json = render_document(&output.document).context("render activities")?;
        println!("{json}");
        OutputTarget::DryRun { path: target }
    } else {
        let backup_timestamp =
            (!args.no_backup && preferences.create_backups).then(|| Local::now().timestamp());
        let written = write_document(&output.document, &target, backup_timestamp)
            .with_context(|| format!("write {}", target.display()))?;
        OutputTarget::Written(written)
    };

    Ok(ConvertResult {
        source,
        rows_read,
        diagnostics,
        skipped: output.skipped,
        stats: Some(stats),
        output: Some(output_target),
        has_errors: false,
    })
}

pub fn run_config_show(config_path: &Path) -> Result<()> {
    let (config, exists) = match ConfigFile::read(config_path).context("read configuration")? {
        Some(config) => (config, true),
        None => (ConfigFile::default(), false),
    };
    println!("{}", config_table(&config, config_path, exists));
    Ok(())
}

pub fn run_config_reset(config_path: &Path) -> Result<()> {
    if ConfigFile::reset(config_path).context("reset configuration")? {
        println!("Removed {}", config_path.display());
    } else {
        println!("No configuration file at {}", config_path.display());
    }
    Ok(())
}

pub fn run_config_save(source: &SourceArgs, config_path: &Path) -> Result<()> {
    if let Some(url) = &source.sheet_url {
        SheetRef::parse(url).context("parse sheet URL")?;
    }
    let mut config = ConfigFile::load_from(config_path);
    apply_source(&mut config, source);
    config
        .save_to(config_path, Local::now().naive_local())
        .context("save configuration")?;
    println!("Saved configuration to {}", config_path.display());
    Ok(())
}

fn load_sheet(
    source: &SourceArgs,
    config: &ConfigFile,
    skip_financial: bool,
    skip_quotes: bool,
) -> Result<(String, RawDataset)> {
    let url = source
        .sheet_url
        .as_deref()
        .or_else(|| config.sheet_url())
        .ok_or_else(|| anyhow!("no CSV file given and no sheet URL configured"))?;
    let sheet = SheetRef::parse(url).context("parse sheet URL")?;
    let requests: Vec<TabRequest> = Tab::ALL
        .into_iter()
        .filter(|tab| match tab {
            Tab::Experiences => true,
            Tab::Financial => !skip_financial,
            Tab::Quotes => !skip_quotes,
        })
        .map(|tab| {
            let gid = source_gid(source, tab).or_else(|| config.activities.tabs.get(tab));
            TabRequest::new(tab, gid.map(str::to_string))
        })
        .collect();
    if skip_financial || skip_quotes {
        info!(skip_financial, skip_quotes, "skipping tabs");
    }

    let client = SheetClient::new().context("create HTTP client")?;
    let dataset = client
        .fetch_tabs(&sheet, &requests)
        .with_context(|| format!("read sheet {}", sheet.id))?;
    Ok((format!("sheet {}", sheet.id), dataset))
}

fn source_gid(source: &SourceArgs, tab: Tab) -> Option<&str> {
    let gid = match tab {
        Tab::Experiences => &source.experiences_tab,
        Tab::Financial => &source.financial_tab,
        Tab::Quotes => &source.quotes_tab,
    };
    gid.as_deref().map(str::trim).filter(|gid| !gid.is_empty())
}

/// Copies the sheet URL and any tab GIDs given on the command line into
/// `config`.
fn apply_source(config: &mut ConfigFile, source: &SourceArgs) {
    if let Some(url) = &source.sheet_url {
        config.activities.sheet_url = url.trim().to_string();
    }
    for tab in Tab::ALL {
        if let Some(gid) = source_gid(source, tab) {
            config.activities.tabs.set(tab, gid);
        }
    }
    if config.sheet_url().is_none() {
        warn!("saving configuration without a sheet URL");
    }
}

fn target_path(args: &ConvertArgs, config: &ConfigFile) -> Result<PathBuf> {
    let settings = &config.activities.default_output;
    let directory = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => {
            let cwd = std::env::current_dir().context("resolve working directory")?;
            let configured = non_blank(&settings.directory).unwrap_or(DEFAULT_OUTPUT_DIRECTORY);
            find_project_root(&cwd).join(configured)
        }
    };
    let replace_default = args.replace_default || config.activities.preferences.default_replace;
    let configured = non_blank(&settings.filename).unwrap_or(DEFAULT_OUTPUT_FILENAME);
    Ok(output_path(
        &directory,
        replace_default,
        args.filename.as_deref(),
        configured,
    ))
}

fn non_blank(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|value| !value.is_empty())
}
