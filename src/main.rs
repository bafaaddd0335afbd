use clap::{Arg, Command as ClapCommand, ArgAction};
use std::process;
use log::{error, LevelFilter};

use rastersave::utils::logger::Logger;
use rastersave::commands::{CommandFactory, RastersaveCommandFactory};

fn main() {
    let matches = ClapCommand::new("rastersave")
        .version("0.1.0")
        .author("Maurice Schilpp")
        .about("Plan the export of a raster layer to GeoTIFF")
        .arg(
            Arg::new("config")
                .help("Export job description (TOML)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("validate")
                .long("validate")
                .help("Only validate the job, do not print the plan")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output GeoTIFF file, or directory in tile mode")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("crs")
                .long("crs")
                .help("Output CRS (e.g., EPSG:3857 or 4326)")
                .value_name("CRS")
                .required(false),
        )
        .arg(
            Arg::new("extent")
                .long("extent")
                .help("Output extent in the output CRS (minx,miny,maxx,maxy)")
                .value_name("BBOX")
                .required(false),
        )
        .arg(
            Arg::new("extent-mode")
                .long("extent-mode")
                .help("Where the output extent comes from (original, current, user)")
                .value_name("MODE")
                .required(false),
        )
        .arg(
            Arg::new("resolution")
                .long("resolution")
                .help("Output resolution in output CRS units (x,y)")
                .value_name("X,Y")
                .conflicts_with("size")
                .required(false),
        )
        .arg(
            Arg::new("size")
                .long("size")
                .help("Output size in pixels (columns,rows)")
                .value_name("COLS,ROWS")
                .required(false),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Plan output format (text, toml)")
                .value_name("FORMAT")
                .default_value("text")
                .required(false),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("File receiving the operation log")
                .value_name("FILE")
                .default_value("rastersave.log")
                .required(false),
        )
        .get_matches();

    let log_file = matches.get_one::<String>("log-file")
        .map(String::as_str)
        .unwrap_or("rastersave.log");
    let logger = match Logger::new(log_file) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    let level = if matches.get_flag("verbose") { LevelFilter::Debug } else { LevelFilter::Info };
    if let Err(e) = Logger::init_global_logger(&Logger::global_log_file(log_file), level) {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = RastersaveCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
