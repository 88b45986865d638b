use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use tenet_audit::rules::types::generate_json_schema;
use tenet_audit::{AuditEngine, AuditOptions};
use tenet_core::config::{AuditConfig, AuditMode, CliOverrides, Strictness};
use tenet_core::errors::TenetErrorCode;

mod args;
mod output;

fn main() {
    tenet_core::tracing::init_tracing();
    let cli = args::Cli::parse();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("tenet: {e:#}");
            1
        }
    };
    std::process::exit(code);
}

fn run(cli: args::Cli) -> Result<i32> {
    match cli.command {
        Some(args::Command::Audit(audit)) => run_audit(audit),
        Some(args::Command::Schema) => {
            let schema = generate_json_schema();
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(0)
        }
        None => {
            // Host integrations set engine.auto_audit_on_start to audit the
            // working directory when a session opens.
            let config = match AuditConfig::load(Path::new("."), None) {
                Ok(config) => config,
                Err(_) => AuditConfig::default(),
            };
            if config.engine.auto_audit_on_start.unwrap_or(false) {
                run_audit(default_audit_args())
            } else {
                eprintln!("nothing to do; try `tenet audit` (see --help)");
                Ok(0)
            }
        }
    }
}

fn default_audit_args() -> args::AuditArgs {
    args::AuditArgs {
        path: ".".into(),
        quick: true,
        ecosystem: None,
        enable: Vec::new(),
        advisory: false,
        deadline_ms: None,
        threads: None,
        format: args::OutputFormat::Console,
        out: None,
        fixes: false,
        verbose: false,
    }
}

fn run_audit(args: args::AuditArgs) -> Result<i32> {
    let root = args
        .path
        .canonicalize()
        .with_context(|| format!("cannot resolve {}", args.path.display()))?;

    let overrides = CliOverrides {
        enabled_ecosystems: args.enable.clone(),
        ecosystem_override: args.ecosystem.clone(),
        strictness: args.advisory.then_some(Strictness::Advisory),
        deadline_ms: args.deadline_ms,
        threads: args.threads,
    };

    let config = match AuditConfig::load(&root, Some(&overrides)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("tenet: {}", e.coded_string());
            return Ok(1);
        }
    };

    let engine = AuditEngine::new(&root, config.clone());
    let mut options = AuditOptions::from_config(&config);
    if args.quick {
        options.mode = AuditMode::Quick;
    }

    let result = if args.verbose {
        engine.audit_with_events(&root, &options, &output::ProgressHandler)
    } else {
        engine.audit(&root, &options)
    };
    let report = match result {
        Ok(report) => report,
        Err(e) => {
            eprintln!("tenet: {}", e.coded_string());
            return Ok(e.exit_code());
        }
    };

    let mut rendered = match args.format {
        args::OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        args::OutputFormat::Console => output::render_console(&report),
    };

    if args.fixes && args.format == args::OutputFormat::Console {
        match engine.suggest_fixes(&report) {
            Ok(suggestions) if !suggestions.is_empty() => {
                rendered.push_str(&output::render_fixes(&suggestions));
            }
            Ok(_) => {}
            Err(e) => eprintln!("tenet: {}", e.coded_string()),
        }
    }

    match args.out {
        Some(path) => std::fs::write(&path, &rendered)
            .with_context(|| format!("cannot write {}", path.display()))?,
        None => print!("{rendered}"),
    }

    Ok(if report.stats.timed_out { 3 } else { 0 })
}
