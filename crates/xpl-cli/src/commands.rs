use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use serde::Serialize;
use xpl_gate::{AdvancementGate, GuardResult};
use xpl_grants::{audit_catalog, GrantSelections, GrantValidator};
use xpl_ledger::{HistoryValidator, Ledger, ProjectionBuilder, ReplayEngine};
use xpl_sdk::catalog::parse_careers;
use xpl_sdk::{CharacterDraft, InMemoryCatalog};

use crate::cli::*;
use crate::config::XplConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    let config = XplConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::New(args) => cmd_new(args, format),
        Command::Replay(args) => cmd_replay(args, format),
        Command::History(args) => cmd_history(args, format),
        Command::Verify(args) => cmd_verify(args, format),
        Command::Audit(args) => cmd_audit(args, format),
        Command::Guard(args) => cmd_guard(args, &config, format),
        Command::Purchase(args) => cmd_purchase(args, &config, format),
        Command::Grants(args) => cmd_grants(args, &config, format),
    }
}

// ---------------------------------------------------------------------------
// File helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn load_draft(path: &Path) -> anyhow::Result<CharacterDraft> {
    let json = read_file(path)?;
    CharacterDraft::from_json(&json).with_context(|| format!("loading draft {}", path.display()))
}

fn save_draft(path: &Path, draft: &CharacterDraft) -> anyhow::Result<()> {
    std::fs::write(path, draft.to_json()?)
        .with_context(|| format!("writing {}", path.display()))
}

/// A ledger file is a bare JSON array; anything else is read as a draft.
fn load_ledger(path: &Path) -> anyhow::Result<Ledger> {
    let json = read_file(path)?;
    if json.trim_start().starts_with('[') {
        Ledger::from_json(&json).with_context(|| format!("loading ledger {}", path.display()))
    } else {
        Ok(load_draft(path)?.ledger().clone())
    }
}

fn load_catalog(path: &Path) -> anyhow::Result<InMemoryCatalog> {
    let json = read_file(path)?;
    InMemoryCatalog::from_json(&json).with_context(|| format!("loading catalog {}", path.display()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_new(args: NewArgs, format: OutputFormat) -> anyhow::Result<()> {
    if args.draft.exists() && !args.force {
        bail!("{} already exists (use --force to overwrite)", args.draft.display());
    }

    let mut draft = CharacterDraft::default();
    if let Some(name) = args.name {
        draft.set_name(name);
    }
    if let Some(career) = args.career {
        draft.set_career(career);
    }
    draft.set_xp_total(args.xp);
    save_draft(&args.draft, &draft)?;

    match format {
        OutputFormat::Json => print_json(&draft)?,
        OutputFormat::Text => {
            println!(
                "{} Created {} ({}) at {}",
                "✓".green().bold(),
                draft.name().bold(),
                draft.id(),
                args.draft.display()
            );
        }
    }
    Ok(())
}

fn cmd_replay(args: LedgerArgs, format: OutputFormat) -> anyhow::Result<()> {
    let ledger = load_ledger(&args.ledger)?;
    let state = ReplayEngine::replay(ledger.entries());

    match format {
        OutputFormat::Json => print_json(&state)?,
        OutputFormat::Text => {
            println!("{} {} entries", "Replayed".bold(), ledger.len());
            println!("  XP spent: {}", state.total_xp_spent);
            if !state.characteristic_advances.is_empty() {
                println!("  {}", "Characteristics".bold());
                for (key, count) in &state.characteristic_advances {
                    println!("    {:<20} {} advance(s)", key.as_str(), count);
                }
            }
            if !state.skill_levels.is_empty() {
                println!("  {}", "Skills".bold());
                for (skill, level) in &state.skill_levels {
                    println!("    {:<20} {}", skill, level);
                }
            }
            if !state.acquired_talents.is_empty() {
                println!("  {}", "Talents".bold());
                for talent in &state.acquired_talents {
                    println!("    {}", talent);
                }
            }
        }
    }
    Ok(())
}

fn cmd_history(args: LedgerArgs, format: OutputFormat) -> anyhow::Result<()> {
    let ledger = load_ledger(&args.ledger)?;
    let rows = ProjectionBuilder::history(ledger.entries());

    match format {
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Text => {
            if rows.is_empty() {
                println!("No purchases recorded.");
            }
            for row in &rows {
                println!(
                    "{:>4}  {}  {:<20} {:<20} {:>6} total",
                    row.index,
                    row.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    row.target.to_string().bold(),
                    row.summary,
                    row.running_total.to_string().dimmed()
                );
            }
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct VerifyOutput<'a> {
    digest: String,
    #[serde(flatten)]
    report: &'a xpl_ledger::ValidationReport,
}

fn cmd_verify(args: LedgerArgs, format: OutputFormat) -> anyhow::Result<()> {
    let ledger = load_ledger(&args.ledger)?;
    let report = HistoryValidator::validate(ledger.entries());
    let digest = ledger.digest_hex()?;

    match format {
        OutputFormat::Json => print_json(&VerifyOutput { digest, report: &report })?,
        OutputFormat::Text => {
            println!("Entries: {}", report.entry_count);
            println!("Digest:  {}", digest);
            for violation in &report.violations {
                println!(
                    "  {} entry {}: {}",
                    "✗".red().bold(),
                    violation.index,
                    violation.description
                );
            }
            if report.is_valid() {
                println!("{} Ledger is valid", "✓".green().bold());
            }
        }
    }

    if !report.is_valid() {
        bail!("ledger has {} violation(s)", report.violations.len());
    }
    Ok(())
}

fn cmd_audit(args: AuditArgs, format: OutputFormat) -> anyhow::Result<()> {
    let json = read_file(&args.catalog)?;
    let careers = parse_careers(&json)
        .with_context(|| format!("loading catalog {}", args.catalog.display()))?;
    let findings = audit_catalog(&careers);

    match format {
        OutputFormat::Json => print_json(&findings)?,
        OutputFormat::Text => {
            for finding in &findings {
                println!("  {} {}", "⚠".yellow().bold(), finding);
            }
            if findings.is_empty() {
                println!(
                    "{} {} career(s), no problems found",
                    "✓".green().bold(),
                    careers.len()
                );
            }
        }
    }

    if !findings.is_empty() {
        bail!("catalog has {} problem(s)", findings.len());
    }
    Ok(())
}

fn gate_for(config: &XplConfig) -> anyhow::Result<AdvancementGate> {
    Ok(AdvancementGate::try_new(config.gate.clone())?)
}

fn cmd_guard(args: PurchaseArgs, config: &XplConfig, format: OutputFormat) -> anyhow::Result<()> {
    let draft = load_draft(&args.draft)?;
    let catalog = load_catalog(&args.catalog)?;
    let gate = gate_for(config)?;
    let request = args.target.to_request();

    let result = draft.check_purchase(&catalog, &gate, &request);
    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Text => match &result {
            GuardResult::Accepted { cost } => {
                println!(
                    "{} {} would cost {} XP ({} available)",
                    "✓".green().bold(),
                    request,
                    cost,
                    draft.xp_unspent()
                );
            }
            GuardResult::Rejected(rejection) => {
                println!("{} {}", "✗".red().bold(), rejection);
            }
        },
    }
    Ok(())
}

fn cmd_purchase(args: PurchaseArgs, config: &XplConfig, format: OutputFormat) -> anyhow::Result<()> {
    let mut draft = load_draft(&args.draft)?;
    let catalog = load_catalog(&args.catalog)?;
    let gate = gate_for(config)?;
    let request = args.target.to_request();

    let outcome = draft.purchase(&catalog, &gate, &request);
    // last_error is part of the draft, so it is saved either way.
    save_draft(&args.draft, &draft)?;

    match outcome {
        Ok(receipt) => {
            match format {
                OutputFormat::Json => print_json(&receipt)?,
                OutputFormat::Text => {
                    println!(
                        "{} {} for {} XP ({} remaining)",
                        "✓".green().bold(),
                        receipt.note.as_deref().unwrap_or("purchase recorded"),
                        receipt.cost,
                        receipt.xp_remaining
                    );
                }
            }
            Ok(())
        }
        Err(rejection) => {
            if format == OutputFormat::Json {
                print_json(&rejection)?;
            }
            bail!("purchase rejected: {}", rejection)
        }
    }
}

fn cmd_grants(args: GrantsArgs, config: &XplConfig, format: OutputFormat) -> anyhow::Result<()> {
    let mut draft = load_draft(&args.draft)?;
    let catalog = load_catalog(&args.catalog)?;
    let validator = GrantValidator::try_with_policy(config.grants.clone())?;

    if let Some(path) = &args.selections {
        let json = read_file(path)?;
        let selections = GrantSelections::from_json(&json)
            .with_context(|| format!("loading selections {}", path.display()))?;
        draft.set_entry_choices(selections);
    }

    match draft.apply_career_entry_grants(&catalog, &validator) {
        Ok(bundle) => {
            save_draft(&args.draft, &draft)?;
            match format {
                OutputFormat::Json => print_json(&bundle)?,
                OutputFormat::Text => {
                    println!("{} Granted {} item(s)", "✓".green().bold(), bundle.len());
                    for skill in &bundle.skills {
                        println!("  skill   {}", skill);
                    }
                    for talent in &bundle.talents {
                        println!("  talent  {}", talent);
                    }
                }
            }
            Ok(())
        }
        Err(issues) => {
            match format {
                OutputFormat::Json => print_json(&issues)?,
                OutputFormat::Text => {
                    for issue in &issues {
                        println!("  {} {}", "✗".red().bold(), issue);
                    }
                }
            }
            bail!("career entry grants not applied ({} issue(s))", issues.len())
        }
    }
}
