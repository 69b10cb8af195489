use xpl_ledger::AdvancementState;
use xpl_types::Career;

/// Read-only snapshot handed to every guard.
#[derive(Clone, Copy, Debug)]
pub struct GuardContext<'a> {
    /// Budget minus XP already spent.
    pub xp_available: u32,
    /// Active career, if one is selected.
    pub career: Option<&'a Career>,
    /// State replayed from the ledger.
    pub state: &'a AdvancementState,
}

impl<'a> GuardContext<'a> {
    /// Build a context from the XP budget and a replayed state.
    ///
    /// Available XP saturates at zero if the history already spent more than
    /// the budget.
    pub fn new(xp_budget: u32, career: Option<&'a Career>, state: &'a AdvancementState) -> Self {
        let available = u64::from(xp_budget).saturating_sub(state.total_xp_spent);
        Self {
            xp_available: u32::try_from(available).unwrap_or(u32::MAX),
            career,
            state,
        }
    }
}
