use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use xpl_gate::PurchaseRequest;
use xpl_types::{CharacteristicKey, SkillId, TalentId};

#[derive(Parser)]
#[command(
    name = "xpl",
    about = "XP Ledger: guarded, replayable character advancement",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Configuration file (defaults to ./xpl.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new character draft file
    New(NewArgs),
    /// Replay a ledger and show derived advancement state
    Replay(LedgerArgs),
    /// Show the purchase history with running XP totals
    History(LedgerArgs),
    /// Check ledger integrity and print its digest
    Verify(LedgerArgs),
    /// Audit a career catalog for unknown classes and unsatisfiable pick-groups
    Audit(AuditArgs),
    /// Dry-run a purchase against a draft
    Guard(PurchaseArgs),
    /// Guard a purchase and record it in the draft's ledger
    Purchase(PurchaseArgs),
    /// Apply career-entry grants from a selections file
    Grants(GrantsArgs),
}

#[derive(Args)]
pub struct NewArgs {
    /// Draft file to create
    pub draft: PathBuf,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub career: Option<String>,
    /// Total XP budget
    #[arg(long, default_value = "0")]
    pub xp: u32,
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct LedgerArgs {
    /// Ledger file, or an exported draft containing one
    pub ledger: PathBuf,
}

#[derive(Args)]
pub struct AuditArgs {
    /// JSON array of careers
    pub catalog: PathBuf,
}

#[derive(Args)]
pub struct PurchaseArgs {
    /// Draft file
    pub draft: PathBuf,
    #[arg(long)]
    pub catalog: PathBuf,
    #[command(subcommand)]
    pub target: PurchaseTarget,
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum PurchaseTarget {
    /// One characteristic step, e.g. `ws` or `weaponSkill`
    Characteristic {
        #[arg(value_parser = parse_characteristic)]
        key: CharacteristicKey,
    },
    /// One skill level (1 acquire, 2 +10%, 3 +20%)
    Skill {
        name: String,
        #[arg(short, long, default_value = "1")]
        level: u8,
    },
    /// A talent
    Talent { name: String },
}

impl PurchaseTarget {
    pub fn to_request(&self) -> PurchaseRequest {
        match self {
            Self::Characteristic { key } => PurchaseRequest::Characteristic(*key),
            Self::Skill { name, level } => PurchaseRequest::Skill {
                skill: SkillId::new(name.as_str()),
                target_level: *level,
            },
            Self::Talent { name } => PurchaseRequest::Talent(TalentId::new(name.as_str())),
        }
    }
}

#[derive(Args)]
pub struct GrantsArgs {
    /// Draft file
    pub draft: PathBuf,
    #[arg(long)]
    pub catalog: PathBuf,
    /// JSON selections keyed by group id; omit to apply without picks
    #[arg(long)]
    pub selections: Option<PathBuf>,
}

fn parse_characteristic(s: &str) -> Result<CharacteristicKey, String> {
    s.parse().map_err(|e: xpl_types::TypeError| e.to_string())
}
