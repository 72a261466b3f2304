use clap::Parser;
use color_eyre::Result;
use std::io::{Read, Write};
use std::path::PathBuf;

use bulk_select::config::{self, OutputFormat};
use bulk_select::output::{render_json, render_text};
use bulk_select::script::{ScriptRunner, parse_script};

/// Replay bulk selection scripts
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Replay bulk selection scripts against a selection manager"
)]
struct Args {
    /// Script file with one JSON command per line (if not provided, reads from stdin)
    script: Option<PathBuf>,

    /// Print one JSON object per step instead of text
    #[arg(long)]
    json: bool,

    /// Do not print change notifications
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Writes to /tmp/bulk-select-debug.log at DEBUG level
    #[cfg(debug_assertions)]
    {
        if let Ok(log_file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/bulk-select-debug.log")
        {
            env_logger::Builder::new()
                .filter_level(log::LevelFilter::Debug)
                .target(env_logger::Target::Pipe(Box::new(log_file)))
                .format(|buf, record| {
                    use std::time::SystemTime;
                    let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
                    writeln!(
                        buf,
                        "[{}] [{}] {}",
                        datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                        record.level(),
                        record.args()
                    )
                })
                .init();
        }

        log::debug!("=== BULK-SELECT DEBUG SESSION STARTED ===");
    }

    color_eyre::install()?;

    let config_result = config::load_config();
    if let Some(warning) = &config_result.warning {
        eprintln!("warning: {}", warning);
    }
    let config = config_result.config;

    let args = Args::parse();

    let input = match &args.script {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let lines = parse_script(&input)?;
    let format = if args.json {
        OutputFormat::Json
    } else {
        config.output.format
    };

    let mut runner = ScriptRunner::new(&config.selection);
    let mut stdout = std::io::stdout().lock();
    for line in &lines {
        // Steps before a failing command are still printed
        let report = runner.step(line)?;
        match format {
            OutputFormat::Text => writeln!(stdout, "{}", render_text(&report, args.quiet))?,
            OutputFormat::Json => writeln!(stdout, "{}", render_json(&report)?)?,
        }
    }

    #[cfg(debug_assertions)]
    log::debug!("=== BULK-SELECT DEBUG SESSION ENDED ===");

    Ok(())
}
