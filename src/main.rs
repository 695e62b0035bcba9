// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Yellowlab CLI - Minimal HTTP/JSONP Client
//!
//! Sends one request from the command line and prints the decoded reply.

use std::env;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use serde_json::Value;

use yellowlab::{ClientConfig, Method, ParamValue, Promise, QuerySerializer, YellowLab};

/// How long to wait for a reply before giving up
const WAIT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("yellowlab=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "get" | "post" | "jsonp" => {
            if args.len() < 3 {
                eprintln!("Usage: yellowlab {} <url> [--data JSON] [--namespace NS]", args[1]);
                return ExitCode::from(1);
            }
            let method = Method::parse(&args[1].to_uppercase());
            run(send(method, &args[2], &args[3..]).await)
        }
        "request" => {
            if args.len() < 4 {
                eprintln!("Usage: yellowlab request <METHOD> <url> [--data JSON] [--namespace NS]");
                return ExitCode::from(1);
            }
            run(send(Method::parse(&args[2]), &args[3], &args[4..]).await)
        }
        "query" => {
            if args.len() < 3 {
                eprintln!("Usage: yellowlab query <JSON> [--namespace NS]");
                return ExitCode::from(1);
            }
            run(print_query(&args[2], &args[3..]))
        }
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("yellowlab {}", yellowlab::VERSION);
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"Yellowlab - Minimal HTTP/JSONP Client

USAGE:
    yellowlab <COMMAND> [OPTIONS]

COMMANDS:
    get <url>                 Send a GET request
    post <url>                Send a POST request
    jsonp <url>               Load a JSONP script and wait for its callback
    request <METHOD> <url>    Send a request with any method
    query <JSON>              Print the query string for a JSON object
    help                      Show this help message
    version                   Show version information

OPTIONS:
    --data <JSON>             Request parameters as a JSON object
    --namespace <NS>          Namespace for nested keys (default: data)

EXAMPLES:
    yellowlab get https://example.com/api --data '{{"q":"rust"}}'
    yellowlab post https://example.com/save --data '{{"person":{{"age":50}}}}'
    yellowlab query '{{"a":{{"b":1}}}}' --namespace filter
"#
    );
}

fn run(result: anyhow::Result<bool>) -> ExitCode {
    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

/// Options shared by all commands
#[derive(Debug)]
struct Options {
    data: ParamValue,
    namespace: Option<String>,
}

fn parse_options(args: &[String]) -> anyhow::Result<Options> {
    let mut options = Options {
        data: ParamValue::map(),
        namespace: None,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--data" | "-d" => {
                let raw = iter.next().ok_or_else(|| anyhow!("--data needs a value"))?;
                options.data = parse_data(raw)?;
            }
            "--namespace" | "-n" => {
                let ns = iter.next().ok_or_else(|| anyhow!("--namespace needs a value"))?;
                options.namespace = Some(ns.clone());
            }
            other => bail!("unexpected argument: {}", other),
        }
    }

    Ok(options)
}

fn parse_data(raw: &str) -> anyhow::Result<ParamValue> {
    let value: Value = serde_json::from_str(raw).context("parameters are not valid JSON")?;
    Ok(ParamValue::from(value))
}

async fn send(method: Method, url: &str, args: &[String]) -> anyhow::Result<bool> {
    let options = parse_options(args)?;

    let mut config = ClientConfig::default();
    if let Some(ns) = options.namespace {
        config = config.namespace(ns);
    }

    let client = YellowLab::network(config)?;
    let request = client.new_request(url, options.data, method)?;
    tracing::debug!(query = %request.query_string(), "Sending");

    let (promise, resolve, reject) = Promise::channel();
    request.handle(resolve, reject)?;

    match tokio::time::timeout(WAIT, promise).await {
        Ok(Ok(body)) => {
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(true)
        }
        Ok(Err(body)) => {
            eprintln!("Rejected: {}", serde_json::to_string_pretty(&body)?);
            Ok(false)
        }
        Err(_) => bail!("no reply within {}s", WAIT.as_secs()),
    }
}

fn print_query(raw: &str, args: &[String]) -> anyhow::Result<bool> {
    let options = parse_options(args)?;
    let serializer = match options.namespace {
        Some(ns) => QuerySerializer::new(ns),
        None => QuerySerializer::default(),
    };

    println!("{}", serializer.serialize(&parse_data(raw)?));
    Ok(true)
}
