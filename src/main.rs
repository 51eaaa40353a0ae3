use clap::{Arg, ArgMatches, Command};
use log::LevelFilter;
use std::io::{self, BufRead, Write};
use std::process;
use trusttext::annotator::{DisplayStyle, WordAnnotation};
use trusttext::classifier::{Status, Verdict};
use trusttext::config::{self, Config};
use trusttext::engine::{Analysis, Analyzer, Assessment};
use trusttext::history::History;
use trusttext::lexicon::Lexicon;
use trusttext::remote::{assess_configured, setup_scorer, ScorerSetup};

const DEFAULT_CONFIG_PATH: &str = "trusttext.yaml";
const EMPTY_INPUT_MESSAGE: &str = "Please enter a message to analyze";

struct Session {
    analyzer: Analyzer,
    history: History,
    remote: Option<ScorerSetup>,
    annotate: bool,
    json: bool,
}

#[tokio::main]
async fn main() {
    let matches = Command::new("trusttext")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Check text messages for signs of scams and fraud")
        .long_about("TrustText - offline message risk checker:\n\
                    • Keyword detection against suspicious and dangerous phrase lists\n\
                    • Link extraction with a trusted-domain allowlist\n\
                    • SAFE / SUSPICIOUS / DANGEROUS verdicts with explanations\n\
                    • Optional remote scoring service")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value(DEFAULT_CONFIG_PATH),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("message")
                .short('m')
                .long("message")
                .value_name("TEXT")
                .help("Analyze a single message")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .help("Analyze every non-empty line of a file")
                .action(clap::ArgAction::Set)
                .conflicts_with("message"),
        )
        .arg(
            Arg::new("annotate")
                .long("annotate")
                .help("Show per-word highlighting")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print results as JSON")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("remote")
                .long("remote")
                .help("Also ask the remote scoring service")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("lexicon")
                .long("lexicon")
                .help("Print the phrase lists and trusted domains in use")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");

    // The builder lets everything through; the global max level does the
    // filtering so the config file can adjust it after loading.
    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Trace)
        .init();
    log::set_max_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        generate_default_config(generate_path);
        return;
    }

    let config_path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or(DEFAULT_CONFIG_PATH);

    let config = match config::load_config_or_default(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e:#}");
            process::exit(1);
        }
    };

    if !verbose {
        log::set_max_level(config.logging.level_filter());
    }

    let lexicon = match load_lexicon(&config) {
        Ok(lexicon) => lexicon,
        Err(e) => {
            eprintln!("Error loading lexicon: {e:#}");
            process::exit(1);
        }
    };

    let analyzer = Analyzer::new(lexicon);
    if matches.get_flag("lexicon") {
        print_lexicon(analyzer.lexicon());
        return;
    }

    let session = Session {
        analyzer,
        history: History::with_capacity(config.history.capacity),
        remote: build_remote(&config, &matches),
        annotate: matches.get_flag("annotate"),
        json: matches.get_flag("json"),
    };

    if let Some(message) = matches.get_one::<String>("message") {
        check_message(&session, message).await;
    } else if let Some(path) = matches.get_one::<String>("file") {
        check_file(&session, path).await;
    } else {
        interactive(&session).await;
    }
}

fn generate_default_config(path: &str) {
    match config::save_config(&Config::default(), path) {
        Ok(()) => {
            println!("Default configuration written to: {path}");
            println!("Please edit the configuration file to suit your needs.");
        }
        Err(e) => {
            eprintln!("Error writing configuration file: {e:#}");
            process::exit(1);
        }
    }
}

fn load_lexicon(config: &Config) -> anyhow::Result<Lexicon> {
    match &config.lexicon.path {
        Some(path) => Lexicon::load_from_file(path),
        None => {
            log::debug!("Using built-in lexicon");
            Ok(Lexicon::default())
        }
    }
}

fn build_remote(config: &Config, matches: &ArgMatches) -> Option<ScorerSetup> {
    if !(config.remote.enabled || matches.get_flag("remote")) {
        return None;
    }
    Some(setup_scorer(&config.remote))
}

fn print_lexicon(lexicon: &Lexicon) {
    println!("Suspicious phrases ({}):", lexicon.suspicious.len());
    for phrase in &lexicon.suspicious {
        println!("   {phrase}");
    }
    println!("Dangerous phrases ({}):", lexicon.dangerous.len());
    for phrase in &lexicon.dangerous {
        println!("   {phrase}");
    }
    println!("Trusted domains ({}):", lexicon.trusted_domains.len());
    for domain in &lexicon.trusted_domains {
        println!("   {domain}");
    }
}

async fn check_file(session: &Session, path: &str) {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("❌ Error reading message file {path}: {e}");
            process::exit(1);
        }
    };

    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        check_message(session, line).await;
    }
}

async fn interactive(session: &Session) {
    println!("{}", Status::Waiting.headline());
    println!("Type a message and press Enter. Commands: :history, :quit");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        if let Err(e) = io::stdout().flush() {
            log::warn!("Failed to flush stdout: {e}");
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                log::error!("Failed to read input: {e}");
                break;
            }
            None => break,
        };

        match line.trim() {
            ":quit" | ":q" => break,
            ":history" => print_history(&session.history),
            _ => check_message(session, &line).await,
        }
    }
}

async fn check_message(session: &Session, text: &str) {
    if text.trim().is_empty() {
        println!("{} ({})", EMPTY_INPUT_MESSAGE, Status::Waiting.label());
        return;
    }

    let analysis = session
        .analyzer
        .analyze_and_record(text, &session.history);
    let annotations = session
        .annotate
        .then(|| session.analyzer.annotate(text));

    // Local result is complete before the network is touched.
    if !session.json {
        print_analysis(text, &analysis);
        if let Some(annotations) = &annotations {
            print_annotations(annotations);
        }
    }

    let remote = match &session.remote {
        Some(setup) => Some(assess_configured(setup, text).await),
        None => None,
    };

    if session.json {
        let output = serde_json::json!({
            "input": text,
            "status": Status::from(analysis.verdict).label(),
            "analysis": analysis,
            "annotations": annotations,
            "remote": remote,
        });
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize result: {e}"),
        }
    } else if let Some(remote) = &remote {
        print_remote(remote);
    }
}

fn verdict_badge(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Safe => "🟢",
        Verdict::Suspicious => "🟡",
        Verdict::Dangerous => "🔴",
    }
}

fn print_analysis(text: &str, analysis: &Analysis) {
    println!();
    println!("📱 Message: {}", truncate_string(text, 80));
    println!(
        "{} {} - {}",
        verdict_badge(analysis.verdict),
        analysis.verdict,
        Status::from(analysis.verdict).headline()
    );
    for reason in &analysis.reasons {
        println!("   • {reason}");
    }
}

fn print_annotations(annotations: &[WordAnnotation]) {
    let rendered: Vec<String> = annotations
        .iter()
        .map(|a| match a.display_style {
            DisplayStyle::Plain => a.rendered_text.clone(),
            DisplayStyle::Suspicious => format!("[?{}]", a.rendered_text),
            DisplayStyle::Dangerous => format!("[!{}]", a.rendered_text),
            DisplayStyle::Url => format!("<{}>", a.rendered_text),
        })
        .collect();
    println!("   🔍 {}", rendered.join(" "));
}

fn print_remote(assessment: &Assessment) {
    let score = assessment
        .score
        .map(|s| format!(" (score {s})"))
        .unwrap_or_default();
    println!(
        "   🌐 Remote: {} {}{}",
        verdict_badge(assessment.verdict),
        assessment.verdict,
        score
    );
    for reason in &assessment.reasons {
        println!("      • {reason}");
    }
}

fn print_history(history: &History) {
    let entries = history.entries();
    if entries.is_empty() {
        println!("No messages checked yet.");
        return;
    }

    let limit = history
        .capacity()
        .map(|c| format!(", keeping at most {c}"))
        .unwrap_or_default();
    println!(
        "📜 History ({} entries{}, most recent first):",
        entries.len(),
        limit
    );
    for entry in entries {
        println!(
            "   {} {} {:<10} {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            verdict_badge(entry.verdict),
            entry.verdict.to_string(),
            truncate_string(&entry.input_text, 60)
        );
    }
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len).collect();
        format!("{truncated}...")
    }
}
