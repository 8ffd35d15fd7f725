use std::fs;
use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::{info, warn};

use lotpack::io::export;
use lotpack::io::svg::layout_to_svg;
use lotplan::config::LotConfig;
use lotplan::io::cli::Cli;
use lotplan::io::output::{LayoutSection, LotOutput};
use lotplan::report;
use lotplan::services::basemap::HttpProbe;
use lotplan::services::geocode::NominatimGeocoder;
use lotplan::session::{SessionState, StatusLevel, StatusMessage};
use lotplan::{EPOCH, io};

fn main() -> Result<()> {
    let args = Cli::parse();

    let (config, config_source) = match &args.config_file {
        None => (LotConfig::default(), None),
        Some(config_file) => {
            let file = File::open(config_file)
                .context(format!("could not open config file: {}", config_file.display()))?;
            let reader = BufReader::new(file);
            let config: LotConfig =
                serde_json::from_reader(reader).context("incorrect config file format")?;
            (config, Some(config_file.clone()))
        }
    };

    io::init_logger(args.log_level, &config.log_file)?;
    match config_source {
        None => warn!("[MAIN] No config file provided, use --config-file to provide a custom config"),
        Some(path) => info!("[MAIN] config loaded from {}", path.display()),
    }
    info!("[MAIN] Successfully parsed LotConfig: {config:?}");

    let input_stem = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .context("input file has no valid file name")?
        .to_string();

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).context(format!(
            "could not create solution folder: {}",
            args.solution_folder.display()
        ))?;
    }

    let drawing = io::read_drawing(&args.input_file)?;
    let mut session = SessionState::new(config);
    let mut messages: Vec<StatusMessage> = vec![];

    if args.probe_basemaps {
        match HttpProbe::new(
            session.config.probe_timeout_secs,
            session.config.accept_invalid_certs,
        ) {
            Ok(probe) => messages.push(session.refresh_basemaps(&probe)),
            Err(e) => warn!("[MAIN] basemap probe unavailable: {e}"),
        }
    }

    if let Some(address) = &args.address {
        match NominatimGeocoder::new(
            session.config.geocoder.clone(),
            session.config.accept_invalid_certs,
        ) {
            Ok(geocoder) => messages.push(session.search_address(&geocoder, address)),
            Err(e) => warn!("[MAIN] geocoder unavailable: {e}"),
        }
    }

    messages.push(session.handle_drawing(&drawing));
    if let Some(result) = &session.calculation {
        for line in report::estimate_report(result, session.config.unit_system) {
            info!("[MAIN] {line}");
        }
        messages.push(session.request_layout());
    }

    for m in &messages {
        match m.level {
            StatusLevel::Warning | StatusLevel::Error => warn!("[MAIN] {m}"),
            _ => info!("[MAIN] {m}"),
        }
    }

    let layout_section = session.layout.as_ref().map(|outcome| {
        for line in report::layout_report(outcome) {
            info!("[MAIN] {line}");
        }
        LayoutSection {
            params: outcome.params.clone(),
            layout: export::export_layout(&outcome.layout, &outcome.lot),
            levels: export::export_levels(&outcome.extrusion),
            total_spaces: outcome.extrusion.total_spaces,
            delta: outcome.delta,
        }
    });

    let map = session.map_view();
    if let Some(overlays) = &map.overlays {
        let geojson_path = args
            .solution_folder
            .join(format!("layout_{input_stem}.geojson"));
        io::write_json(overlays, &geojson_path)?;
    }

    if let Some(outcome) = &session.layout {
        if let Some(boundary) = &outcome.lot.boundary {
            let svg = layout_to_svg(&outcome.layout, boundary, session.config.svg_draw_options);
            let svg_path = args.solution_folder.join(format!("layout_{input_stem}.svg"));
            io::write_svg(&svg, &svg_path)?;
        }
    }

    let output = LotOutput {
        estimate: session.calculation,
        layout: layout_section,
        map,
        messages,
        run_time_ms: EPOCH.elapsed().as_millis(),
        config: session.config.clone(),
    };
    let output_path = args.solution_folder.join(format!("layout_{input_stem}.json"));
    io::write_json(&output, &output_path)?;

    Ok(())
}
