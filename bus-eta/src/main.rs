use std::process::ExitCode;

use chrono::Utc;

use bus_eta::api::{EtaClient, EtaClientConfig};
use bus_eta::domain::{RouteCode, StopId};
use bus_eta::session::Session;

struct CliArgs {
    route: String,
    stop: Option<String>,
    company: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs, String> {
    let mut route = None;
    let mut stop = None;
    let mut company = None;

    while let Some(arg) = args.next() {
        if arg == "--company" {
            company = Some(
                args.next()
                    .ok_or_else(|| "--company requires a value".to_string())?,
            );
        } else if let Some(value) = arg.strip_prefix("--company=") {
            company = Some(value.to_string());
        } else if arg.starts_with('-') {
            return Err(format!("unknown option: {arg}"));
        } else if route.is_none() {
            route = Some(arg);
        } else if stop.is_none() {
            stop = Some(arg);
        } else {
            return Err(format!("unexpected argument: {arg}"));
        }
    }

    Ok(CliArgs {
        route: route.ok_or_else(|| "missing route argument".to_string())?,
        stop,
        company,
    })
}

fn print_usage() {
    eprintln!("Usage: bus-eta [--company CODE] <ROUTE> [STOP_ID]");
    eprintln!("  bus-eta 1                list the stops of route 1");
    eprintln!("  bus-eta 1 002403         also show arrivals at stop 002403");
    eprintln!("  bus-eta --company nwfb 2 query another operator's route 2");
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bus_eta=info")),
        )
        .init();

    let cli = match parse_args(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{e}");
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    let route = match RouteCode::parse(&cli.route) {
        Ok(route) => route,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut config = EtaClientConfig::new();
    if let Some(company) = cli.company {
        config = config.with_company(company.to_ascii_uppercase());
    }

    let client = match EtaClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("failed to create HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };
    let session = Session::new(client);

    let resolved = match session.resolve_route(&route, None).await {
        Ok(lookup) => lookup.value,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "Route {}: {} → {}",
        resolved.route.code, resolved.route.origin, resolved.route.destination
    );
    for stop in &resolved.stops {
        println!(
            "  {:>3}. [{}] {}  ({})",
            stop.sequence,
            stop.direction.code(),
            stop.name,
            stop.stop
        );
    }

    let Some(stop_arg) = cli.stop else {
        return ExitCode::SUCCESS;
    };

    let stop = match StopId::parse(&stop_arg) {
        Ok(stop) => stop,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let board = match session.arrival_board(&stop, &route).await {
        Ok(lookup) => lookup.value,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    println!();
    if board.is_empty() {
        println!("No upcoming buses found.");
        return ExitCode::SUCCESS;
    }

    let now = Utc::now();
    for group in &board.groups {
        println!("To {}", group.destination);
        for arrival in &group.arrivals {
            match arrival.eta {
                Some(eta) => println!("  {}  ({})", arrival.display(now), eta.format("%H:%M")),
                None => println!("  {}", arrival.display(now)),
            }
        }
    }

    ExitCode::SUCCESS
}
