use clap::{Parser, ValueEnum};
use ip_subnet_calc::config::{log_config_from_env, Settings};
use ip_subnet_calc::models::{ClassSuggestion, MaskMode, SubnetResult};
use ip_subnet_calc::output::{
    batch_csv_rows, print_hosts_csv, print_json, print_result, render_report, to_json,
};
use ip_subnet_calc::processing::{read_batch_file, run_batch};
use ip_subnet_calc::{Calculator, SubnetRequest};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use serde::Serialize;
use std::error::Error;
use std::path::Path;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
    Copy,
}

#[derive(Parser)]
#[command(name = "ip-subnet-calc")]
#[command(about = "IPv4/IPv6 subnet calculator", long_about = None, version)]
struct Cli {
    /// Address, optionally with /mask (e.g. "192.168.1.10/24", "2001:db8::1/32")
    address: Option<String>,

    /// Prefix length or dotted mask, when not given after a slash
    mask: Option<String>,

    /// Read the mask as a dotted subnet mask
    #[arg(long, conflicts_with = "cidr")]
    dotted: bool,

    /// Read the mask as a prefix length
    #[arg(long)]
    cidr: bool,

    /// Start from an example private network of class A, B or C
    #[arg(long, value_name = "CLASS")]
    suggest: Option<ClassSuggestion>,

    /// List every address of an IPv4 subnet
    #[arg(long)]
    hosts: bool,

    /// Largest subnet whose addresses are listed
    #[arg(long)]
    limit: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// JSON file with a list of requests
    #[arg(long, value_name = "FILE", conflicts_with_all = ["address", "suggest"])]
    batch: Option<String>,
}

#[derive(Serialize)]
struct BatchEntry<'a> {
    request: &'a SubnetRequest,
    result: &'a SubnetResult,
}

fn init_logging(config_file: &str) -> Result<(), Box<dyn Error>> {
    if Path::new(config_file).exists() {
        log4rs::init_file(config_file, Default::default())
            .map_err(|e| format!("Error initializing log4rs from {config_file}: {e}"))?;
        return Ok(());
    }
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn))?;
    log4rs::init_config(config)?;
    Ok(())
}

fn mask_mode(cli: &Cli, mask: &str) -> MaskMode {
    if cli.dotted {
        MaskMode::Dotted
    } else if cli.cidr {
        MaskMode::Cidr
    } else {
        MaskMode::detect(mask)
    }
}

fn emit(result: &SubnetResult, format: OutputFormat, show_hosts: bool) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Text => print_result(result, show_hosts),
        OutputFormat::Json => print_json(result)?,
        OutputFormat::Copy => print!(
            "{}",
            render_report(result, show_hosts, Some(chrono::Utc::now()))
        ),
        OutputFormat::Csv => match result.ipv4() {
            Some(info) => print_hosts_csv(info)?,
            None if result.is_invalid() => print_result(result, false),
            None => return Err("CSV output lists IPv4 addresses only".into()),
        },
    }
    Ok(())
}

fn run_batch_file(batch_file: &str, cli: &Cli, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let requests = read_batch_file(batch_file)?;
    let results = run_batch(requests, settings.host_list_limit);
    let invalid = results.iter().filter(|(_, r)| r.is_invalid()).count();

    match cli.format {
        OutputFormat::Json => {
            let entries: Vec<BatchEntry> = results
                .iter()
                .map(|(request, result)| BatchEntry { request, result })
                .collect();
            println!("{}", to_json(&entries)?);
        }
        OutputFormat::Csv => {
            for row in batch_csv_rows(&results) {
                println!("{row}");
            }
        }
        _ => {
            for (request, result) in &results {
                println!("## {request}");
                emit(result, cli.format, cli.hosts)?;
            }
        }
    }

    log::info!(
        "Batch done: {} request(s), {invalid} invalid",
        results.len()
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    let cli = Cli::parse();
    init_logging(&log_config_from_env())?;
    log::info!("#Start main()");

    let mut settings = Settings::from_env();
    if let Some(limit) = cli.limit {
        settings.set_host_list_limit(limit);
    }

    if let Some(batch_file) = &cli.batch {
        return run_batch_file(batch_file, &cli, &settings);
    }

    let mut calc = Calculator::new(&settings);
    if cli.dotted {
        calc.set_mode(MaskMode::Dotted);
    }
    if let Some(suggestion) = cli.suggest {
        calc.apply_suggestion(suggestion);
    }
    if let Some(input) = &cli.address {
        let request = SubnetRequest::parse(input);
        let mask = cli.mask.clone().unwrap_or(request.mask);
        calc.set_mode(mask_mode(&cli, &mask));
        calc.set_mask(&mask);
        calc.set_address(&request.address);
    }
    calc.set_host_list(cli.hosts || cli.format == OutputFormat::Csv);

    let result = calc
        .result()
        .ok_or("No address given, pass an address or --suggest")?;
    emit(result, cli.format, calc.show_hosts())?;

    if result.is_invalid() {
        return Err("Invalid input".into());
    }
    Ok(())
}
