use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use xpl_gate::{AdvancementGate, GuardContext, GuardResult, PurchaseRequest, RejectReason, Rejection};
use xpl_grants::{GrantBundle, GrantIssue, GrantSelections, GrantValidator};
use xpl_ledger::{AdvancementState, Ledger, LedgerEntry, ReplayEngine};
use xpl_types::{Career, CharacteristicKey, Choice, SkillId, TalentId};

use crate::catalog::CareerCatalog;
use crate::error::SdkResult;
use crate::purchase::PurchaseReceipt;

const DEFAULT_NAME: &str = "Unnamed Character";

/// A character under construction or advancement.
///
/// The ledger is the only record of purchases. Skill levels, advance counts,
/// and XP spent are replayed from it on demand and never stored.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CharacterDraft {
    id: Uuid,
    name: String,
    #[serde(default)]
    career_id: Option<String>,
    #[serde(default)]
    xp_total: u32,
    #[serde(default)]
    ledger: Ledger,
    #[serde(default)]
    skills: Vec<Choice>,
    #[serde(default)]
    talents: Vec<Choice>,
    #[serde(default)]
    entry_choices: GrantSelections,
    #[serde(default)]
    grants_applied: bool,
    #[serde(default)]
    last_error: Option<String>,
    created_at: DateTime<Utc>,
}

impl CharacterDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            career_id: None,
            xp_total: 0,
            ledger: Ledger::new(),
            skills: Vec::new(),
            talents: Vec::new(),
            entry_choices: GrantSelections::default(),
            grants_applied: false,
            last_error: None,
            created_at: Utc::now(),
        }
    }

    // ---- Setters ----

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Select a career. Entry choices made for the previous career are
    /// discarded.
    pub fn set_career(&mut self, career_id: impl Into<String>) {
        self.career_id = Some(career_id.into());
        self.entry_choices = GrantSelections::default();
    }

    pub fn clear_career(&mut self) {
        self.career_id = None;
        self.entry_choices = GrantSelections::default();
    }

    /// Set the total XP budget. Spending is unaffected; available XP
    /// saturates at zero if the budget drops below what was already spent.
    pub fn set_xp_total(&mut self, xp_total: u32) {
        self.xp_total = xp_total;
    }

    pub fn set_entry_choices(&mut self, choices: GrantSelections) {
        self.entry_choices = choices;
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Start over with an empty draft. This is the only way the entry-grant
    /// flag is cleared.
    pub fn reset(&mut self) {
        tracing::info!(draft = %self.id, "draft reset");
        *self = Self::new(DEFAULT_NAME);
    }

    // ---- Derived state ----

    /// Replay the ledger.
    pub fn advancement_state(&self) -> AdvancementState {
        ReplayEngine::replay(self.ledger.entries())
    }

    pub fn xp_spent(&self) -> u64 {
        self.advancement_state().total_xp_spent
    }

    pub fn xp_unspent(&self) -> u32 {
        let state = self.advancement_state();
        GuardContext::new(self.xp_total, None, &state).xp_available
    }

    /// The active career, if one is selected and the catalog knows it.
    pub fn career<'c, C>(&self, catalog: &'c C) -> Option<&'c Career>
    where
        C: CareerCatalog + ?Sized,
    {
        self.career_id.as_deref().and_then(|id| catalog.career(id))
    }

    // ---- Purchases ----

    /// Run the guard for `request` without recording anything.
    pub fn check_purchase<C>(
        &self,
        catalog: &C,
        gate: &AdvancementGate,
        request: &PurchaseRequest,
    ) -> GuardResult
    where
        C: CareerCatalog + ?Sized,
    {
        let state = self.advancement_state();
        let ctx = GuardContext::new(self.xp_total, self.career(catalog), &state);
        gate.evaluate(&ctx, request)
    }

    pub fn can_afford_characteristic(&self, gate: &AdvancementGate, key: CharacteristicKey) -> bool {
        let state = self.advancement_state();
        let ctx = GuardContext::new(self.xp_total, None, &state);
        gate.can_afford_characteristic(&ctx, key)
    }

    /// Guard `request` and, if accepted, append one ledger entry.
    ///
    /// A rejection leaves the ledger untouched and is remembered as
    /// `last_error`; an acceptance clears it.
    pub fn purchase<C>(
        &mut self,
        catalog: &C,
        gate: &AdvancementGate,
        request: &PurchaseRequest,
    ) -> Result<PurchaseReceipt, Rejection>
    where
        C: CareerCatalog + ?Sized,
    {
        let available = self.xp_unspent();
        let guarded = self
            .check_purchase(catalog, gate, request)
            .into_result()
            .and_then(|cost| {
                request
                    .advance()
                    .map(|advance| (cost, advance))
                    .ok_or_else(|| {
                        Rejection::new(RejectReason::InvalidTarget, "Skill level must be 1-3")
                    })
            });

        let (cost, advance) = match guarded {
            Ok(accepted) => accepted,
            Err(rejection) => {
                self.last_error = Some(rejection.message.clone());
                return Err(rejection);
            }
        };

        let magnitude = gate.config().costs.step_size_of(&advance);
        let note = LedgerEntry::describe(&advance, magnitude);
        let entry = LedgerEntry::record(&advance, magnitude, cost, Some(note));
        let receipt = PurchaseReceipt::for_entry(&entry, available.saturating_sub(cost));

        self.ledger.append(entry);
        self.last_error = None;
        Ok(receipt)
    }

    pub fn purchase_characteristic<C>(
        &mut self,
        catalog: &C,
        gate: &AdvancementGate,
        key: CharacteristicKey,
    ) -> Result<PurchaseReceipt, Rejection>
    where
        C: CareerCatalog + ?Sized,
    {
        self.purchase(catalog, gate, &PurchaseRequest::Characteristic(key))
    }

    pub fn purchase_skill<C>(
        &mut self,
        catalog: &C,
        gate: &AdvancementGate,
        skill: SkillId,
        target_level: u8,
    ) -> Result<PurchaseReceipt, Rejection>
    where
        C: CareerCatalog + ?Sized,
    {
        self.purchase(
            catalog,
            gate,
            &PurchaseRequest::Skill {
                skill,
                target_level,
            },
        )
    }

    pub fn purchase_talent<C>(
        &mut self,
        catalog: &C,
        gate: &AdvancementGate,
        talent: TalentId,
    ) -> Result<PurchaseReceipt, Rejection>
    where
        C: CareerCatalog + ?Sized,
    {
        self.purchase(catalog, gate, &PurchaseRequest::Talent(talent))
    }

    // ---- Career entry grants ----

    /// Grant the career's entry skills and talents exactly once.
    ///
    /// Checks run in order: already applied, no career, unknown career, no
    /// choices recorded for a career with pick-groups, then the validator.
    /// On any issue the draft is unchanged.
    pub fn apply_career_entry_grants<C>(
        &mut self,
        catalog: &C,
        validator: &GrantValidator,
    ) -> Result<GrantBundle, Vec<GrantIssue>>
    where
        C: CareerCatalog + ?Sized,
    {
        if self.grants_applied {
            return Err(vec![GrantIssue::already_applied()]);
        }
        let Some(career_id) = self.career_id.as_deref() else {
            return Err(vec![GrantIssue::no_career()]);
        };
        let Some(career) = catalog.career(career_id) else {
            return Err(vec![GrantIssue::invalid_career(career_id)]);
        };
        if career.has_pick_groups() && self.entry_choices.is_empty() {
            return Err(vec![GrantIssue::no_choices()]);
        }

        let bundle = validator.apply(career, &self.entry_choices)?;
        merge_choices(&mut self.skills, &bundle.skills);
        merge_choices(&mut self.talents, &bundle.talents);
        self.grants_applied = true;
        tracing::info!(
            draft = %self.id,
            career = %career.id,
            granted = bundle.len(),
            "career entry grants applied"
        );
        Ok(bundle)
    }

    // ---- Persistence ----

    pub fn to_json(&self) -> SdkResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load an exported draft. Ledgers written by a newer schema are refused.
    pub fn from_json(json: &str) -> SdkResult<Self> {
        let draft: Self = serde_json::from_str(json)?;
        draft.ledger.check_schema()?;
        Ok(draft)
    }

    // ---- Accessors ----

    pub fn id(&self) -> Uuid { self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn career_id(&self) -> Option<&str> { self.career_id.as_deref() }
    pub fn xp_total(&self) -> u32 { self.xp_total }
    pub fn ledger(&self) -> &Ledger { &self.ledger }
    pub fn skills(&self) -> &[Choice] { &self.skills }
    pub fn talents(&self) -> &[Choice] { &self.talents }
    pub fn entry_choices(&self) -> &GrantSelections { &self.entry_choices }
    pub fn grants_applied(&self) -> bool { self.grants_applied }
    pub fn last_error(&self) -> Option<&str> { self.last_error.as_deref() }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
}

impl Default for CharacterDraft {
    fn default() -> Self {
        Self::new(DEFAULT_NAME)
    }
}

/// Merge `add` into `current` keyed by normalized name and specialization.
/// A matching entry is replaced in place; new entries are appended.
/// Append each choice not already held, compared by normalized key. Held
/// entries keep their spelling.
fn merge_choices(current: &mut Vec<Choice>, add: &[Choice]) {
    for choice in add {
        if !current.iter().any(|c| c.matches(choice)) {
            current.push(choice.clone());
        }
    }
}
