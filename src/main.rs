use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::{
    env,
    fs::File,
    io::BufReader,
    path::PathBuf,
};

use manuscript_words::{
    output::{save_report, save_summary_json, save_word_table},
    transcription::{
        builder::parse_transcription,
        report::{summarize, RunSummary, DEFAULT_TOP_TOKENS},
    },
};

const DEFAULT_INPUT_PATH: &str = "data/takeshi.txt";
const DEFAULT_CSV_PATH: &str = "data/takeshi_parsed_words.csv";
const DEFAULT_LOG_PATH: &str = "logs/takeshi_preprocessing_log.txt";

struct Args {
    input_path: PathBuf,
    csv_path: PathBuf,
    log_path: PathBuf,
    json_path: Option<PathBuf>,
    top_tokens: usize,
}

fn get_args() -> Result<Option<Args>> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut opts = getopts::Options::new();
    opts.optopt("o", "csv", "word-level table output", "PATH");
    opts.optopt("l", "log", "preprocessing log output", "PATH");
    opts.optopt("j", "json", "JSON summary output", "PATH");
    opts.optopt("n", "top", "number of top unified tokens in the log", "N");
    opts.optflag("h", "help", "print this help");

    let matches = match opts.parse(&args) {
        Ok(m) => m,
        Err(f) => bail!(f),
    };

    if matches.opt_present("h") {
        print!(
            "{}",
            opts.usage("Usage: manuscript-words [INPUT] [options]")
        );
        return Ok(None);
    }

    let input_path = PathBuf::from(
        matches
            .free
            .get(0)
            .map(String::as_str)
            .unwrap_or(DEFAULT_INPUT_PATH),
    );
    let csv_path = PathBuf::from(
        matches
            .opt_str("o")
            .unwrap_or_else(|| DEFAULT_CSV_PATH.to_owned()),
    );
    let log_path = PathBuf::from(
        matches
            .opt_str("l")
            .unwrap_or_else(|| DEFAULT_LOG_PATH.to_owned()),
    );
    let json_path = matches.opt_str("j").map(PathBuf::from);
    let top_tokens = match matches.opt_str("n") {
        Some(n) => n
            .parse()
            .with_context(|| format!("Invalid number of top tokens: {:?}", n))?,
        None => DEFAULT_TOP_TOKENS,
    };

    Ok(Some(Args {
        input_path,
        csv_path,
        log_path,
        json_path,
        top_tokens,
    }))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = match get_args()? {
        Some(args) => args,
        None => return Ok(()),
    };

    // 入力が無ければ何も書かずに終わる
    if !args.input_path.exists() {
        println!("Input file not found: {}", args.input_path.display());
        return Ok(());
    }

    println!("Processing {}...", args.input_path.display());

    let parsed = {
        let file = File::open(&args.input_path)
            .with_context(|| format!("Failed to open {}", args.input_path.display()))?;
        let len = file.metadata().map(|m| m.len()).unwrap_or(0);

        let pb = create_progress_bar(len);
        let parsed = parse_transcription(BufReader::new(pb.wrap_read(file)))
            .with_context(|| format!("Failed to read {}", args.input_path.display()))?;
        pb.finish_and_clear();

        parsed
    };

    save_word_table(&args.csv_path, &parsed.records)?;

    let log = summarize(&args.input_path, &parsed, args.top_tokens);
    save_report(&args.log_path, &log)?;

    if let Some(json_path) = &args.json_path {
        let summary = RunSummary::new(&args.input_path, &parsed, args.top_tokens);
        save_summary_json(json_path, &summary)?;
    }

    println!("Done.");
    println!("Word-level CSV: {}", args.csv_path.display());
    println!("Preprocessing log: {}", args.log_path.display());
    if let Some(json_path) = &args.json_path {
        println!("Summary JSON: {}", json_path.display());
    }
    println!("Rows written: {}", parsed.records.len());

    Ok(())
}

fn create_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "{percent:>3}% [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} [{elapsed_precise} < {eta_precise}]",
        )
        .unwrap()
        .progress_chars("#-"),
    );
    pb
}
