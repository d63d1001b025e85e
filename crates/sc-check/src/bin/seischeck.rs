#![forbid(unsafe_code)]

use sc_check::{CheckConfig, run_check, scenario};
use sc_core::{DerivativeRequest, Parameter};
use sc_engine::{ClosedFormEngine, Timing};

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = std::env::args().skip(1).collect::<Vec<_>>();
    if args.is_empty() {
        return Err(usage());
    }

    let command = args.remove(0);
    match command.as_str() {
        "check" => cmd_check(args),
        _ => Err(usage()),
    }
}

fn cmd_check(args: Vec<String>) -> Result<(), String> {
    let step = optional_f64_flag(&args, "--step")?.unwrap_or(1e-4);
    let tolerance = optional_f64_flag(&args, "--tolerance")?.unwrap_or(1e-4);
    let request = match optional_string_flag(&args, "--params")? {
        Some(list) => parse_params(&list)?,
        None => DerivativeRequest::all(),
    };
    let is_static = has_flag(&args, "--static");
    let use_profile = has_flag(&args, "--profile");
    let emit_json = has_flag(&args, "--json");

    let config = CheckConfig {
        step,
        tolerance,
        ..CheckConfig::default()
    };
    let timing = if is_static {
        Timing::static_query()
    } else {
        scenario::reference_timing()
    };
    let receivers = if use_profile {
        scenario::reference_profile()
    } else {
        scenario::reference_grid()
    };

    let mut engine = ClosedFormEngine::new();
    let report = run_check(
        &mut engine,
        &scenario::five_layer_model(),
        &scenario::reference_source(),
        &receivers,
        &timing,
        &request,
        None,
        &config,
    )
    .map_err(|err| err.to_string())?;

    if emit_json {
        let encoded = serde_json::to_string_pretty(&report).map_err(|err| err.to_string())?;
        println!("{encoded}");
    } else {
        print!("{}", report.render());
    }

    if report.is_agreement() {
        Ok(())
    } else {
        Err("derivative mismatch detected".to_owned())
    }
}

fn parse_params(list: &str) -> Result<DerivativeRequest, String> {
    let mut radius = false;
    let mut azimuth = false;
    let mut depth = false;
    for name in list.split(',') {
        match name.trim() {
            name if name == Parameter::Radius.as_str() => radius = true,
            name if name == Parameter::Azimuth.as_str() => azimuth = true,
            name if name == Parameter::Depth.as_str() => depth = true,
            other => return Err(format!("unknown derivative parameter '{other}'")),
        }
    }
    DerivativeRequest::new(radius, azimuth, depth).map_err(|err| err.to_string())
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|arg| arg == flag)
}

fn optional_f64_flag(args: &[String], flag: &str) -> Result<Option<f64>, String> {
    optional_string_flag(args, flag)?
        .map(|value| {
            value
                .parse::<f64>()
                .map_err(|err| format!("invalid {flag}: {err}"))
        })
        .transpose()
}

fn optional_string_flag(args: &[String], flag: &str) -> Result<Option<String>, String> {
    for idx in 0..args.len() {
        if args[idx] == flag {
            if let Some(value) = args.get(idx + 1) {
                return Ok(Some(value.clone()));
            }
            return Err(format!("missing value for {flag}"));
        }
    }
    Ok(None)
}

fn usage() -> String {
    [
        "usage:",
        "  seischeck check [--static] [--profile] [--step <f64>] [--tolerance <f64>] [--params r,phi,depth] [--json]",
    ]
    .join("\n")
}
