use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use log::{LevelFilter, info};
use serde::Serialize;
use svg::Document;

use crate::EPOCH;
use crate::map::DrawingOutput;

pub mod cli;
pub mod output;

pub fn read_drawing(path: &Path) -> Result<DrawingOutput> {
    let file = File::open(path).context(format!("could not open drawing file: {}", path.display()))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).context(format!("could not parse drawing file: {}", path.display()))
}

pub fn write_json(json: &impl Serialize, path: &Path) -> Result<()> {
    let file = File::create(path)
        .context(format!("could not open output file: {}", path.display()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, json)
        .context(format!("could not write output file: {}", path.display()))?;

    info!("json written to {:?}", fs::canonicalize(path)?);
    Ok(())
}

pub fn write_svg(document: &Document, path: &Path) -> Result<()> {
    svg::save(path, document).context(format!("could not write svg file: {}", path.display()))?;
    info!("svg written to {:?}", fs::canonicalize(path)?);
    Ok(())
}

/// Logs to stdout with the time elapsed since [`EPOCH`], and appends to `log_file`
/// with absolute timestamps as `<timestamp> - <LEVEL> - <message>`.
pub fn init_logger(level_filter: LevelFilter, log_file: &Path) -> Result<()> {
    let stdout = fern::Dispatch::new()
        .format(|out, message, record| {
            let duration = EPOCH.elapsed();
            let sec = duration.as_secs() % 60;
            let min = (duration.as_secs() / 60) % 60;
            let hours = (duration.as_secs() / 60) / 60;

            let prefix = format!(
                "[{}] [{:0>2}:{:0>2}:{:0>2}]",
                record.level(),
                hours,
                min,
                sec,
            );

            out.finish(format_args!("{:<20}{}", prefix, message))
        })
        .chain(std::io::stdout());

    let file = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} - {} - {}",
                jiff::Timestamp::now(),
                record.level(),
                message
            ))
        })
        .chain(fern::log_file(log_file).context(format!(
            "could not open log file: {}",
            log_file.display()
        ))?);

    fern::Dispatch::new()
        .level(level_filter)
        .chain(stdout)
        .chain(file)
        .apply()?;
    info!("[MAIN] epoch: {}", jiff::Timestamp::now());
    Ok(())
}
