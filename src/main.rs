//! Off-grid sizer entry point: CLI wiring and config-driven sizing run.

use std::path::{Path, PathBuf};
use std::process;

use offgrid_sizer::config::SystemConfig;
use offgrid_sizer::io::export::export_breakdown_csv;
use offgrid_sizer::sizing::SizingReport;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Parsed CLI arguments.
#[derive(Debug)]
struct CliArgs {
    config_path: Option<PathBuf>,
    preset: Option<String>,
    panel_watts: Option<f64>,
    breakdown_out: Option<PathBuf>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("offgrid-sizer: daily load and solar panel sizing for off-grid homes");
    eprintln!();
    eprintln!("Usage: offgrid-sizer [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>          Load system from TOML config file");
    eprintln!(
        "  --preset <name>          Use a built-in household ({})",
        SystemConfig::PRESETS.join(", ")
    );
    eprintln!("  --panel-watts <W>        Override panel wattage");
    eprintln!("  --breakdown-out <path>   Export per-appliance load breakdown to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server after sizing");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --config or --preset is given, the cabin preset is used.");
    eprintln!("Log verbosity follows RUST_LOG (default: info).");
}

/// Parses arguments (without the program name). `Ok(None)` means help was
/// requested.
fn parse_args_from(args: &[String]) -> Result<Option<CliArgs>, String> {
    let mut cli = CliArgs {
        config_path: None,
        preset: None,
        panel_watts: None,
        breakdown_out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => return Ok(None),
            "--config" => {
                i += 1;
                let path = args
                    .get(i)
                    .ok_or("--config requires a path argument")?;
                cli.config_path = Some(PathBuf::from(path));
            }
            "--preset" => {
                i += 1;
                let name = args.get(i).ok_or("--preset requires a name argument")?;
                cli.preset = Some(name.clone());
            }
            "--panel-watts" => {
                i += 1;
                let raw = args
                    .get(i)
                    .ok_or("--panel-watts requires a numeric argument")?;
                let watts = raw
                    .parse::<f64>()
                    .map_err(|_| format!("--panel-watts value \"{raw}\" is not a number"))?;
                cli.panel_watts = Some(watts);
            }
            "--breakdown-out" => {
                i += 1;
                let path = args
                    .get(i)
                    .ok_or("--breakdown-out requires a path argument")?;
                cli.breakdown_out = Some(PathBuf::from(path));
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                let raw = args.get(i).ok_or("--port requires a u16 argument")?;
                cli.port = raw
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
            }
            other => return Err(format!("unknown argument \"{other}\"")),
        }
        i += 1;
    }

    if cli.config_path.is_some() && cli.preset.is_some() {
        return Err("--config and --preset are mutually exclusive".to_string());
    }

    Ok(Some(cli))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &CliArgs) -> Result<SystemConfig, String> {
    let mut cfg = if let Some(ref path) = cli.config_path {
        info!(path = %path.display(), "loading config file");
        SystemConfig::from_toml_file(path).map_err(|e| e.to_string())?
    } else {
        let name = cli.preset.as_deref().unwrap_or("cabin");
        info!(preset = name, "using built-in household");
        SystemConfig::from_preset(name).map_err(|e| e.to_string())?
    };

    if let Some(watts) = cli.panel_watts {
        cfg.solar.panel_wattage = watts;
    }

    let errors = cfg.validate();
    if !errors.is_empty() {
        let joined: Vec<String> = errors.iter().map(ToString::to_string).collect();
        return Err(joined.join("\n"));
    }
    Ok(cfg)
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match parse_args_from(&args) {
        Ok(Some(cli)) => cli,
        Ok(None) => {
            print_help();
            process::exit(0);
        }
        Err(e) => {
            eprintln!("error: {e}");
            print_help();
            process::exit(1);
        }
    };

    let cfg = match load_config(&cli) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let system = cfg.system();
    let report = match SizingReport::build(&cfg.appliances, &system) {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "sizing failed");
            process::exit(1);
        }
    };

    for a in &cfg.appliances {
        let wh = match a.watt_hours() {
            Ok(wh) => wh,
            Err(e) => {
                error!(appliance = %a.name, error = %e, "sizing failed");
                process::exit(1);
            }
        };
        println!(
            "{:<20} {:>8.1} W x {:>5.2} h = {:>8.1} Wh",
            a.name, a.watts, a.hours_per_day, wh
        );
    }
    println!("\n{report}");

    if let Some(ref path) = cli.breakdown_out {
        if let Err(e) = export_breakdown_csv(&cfg.appliances, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        info!(path = %path.display(), "load breakdown written");
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(offgrid_sizer::api::AppState { system });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(offgrid_sizer::api::serve(state, addr)) {
            error!(error = %e, "API server stopped");
            process::exit(1);
        }
    }
}
