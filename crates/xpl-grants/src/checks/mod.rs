//! Built-in grant checks.

pub mod choice;
pub mod count;
pub mod cross_group;
pub mod duplicate;
pub mod non_stackable;

pub use choice::ChoiceCheck;
pub use count::CountCheck;
pub use cross_group::CrossGroupCheck;
pub use duplicate::DuplicateCheck;
pub use non_stackable::NonStackableCheck;

#[cfg(test)]
pub(crate) mod fixtures {
    use xpl_types::{Career, Choice, PickGroup};

    /// Soldier-like career with one skill group (pick 2) and one talent
    /// group (pick 1).
    pub fn mercenary() -> Career {
        let mut career = Career::new("mercenary", "Mercenary");
        career.skills.required = vec![Choice::new("Dodge Blow"), Choice::new("Gamble")];
        career.skills.groups = vec![PickGroup::new(
            "mercenary_skills",
            2,
            vec![
                Choice::new("Drive"),
                Choice::new("Ride"),
                Choice::new("Swim"),
                Choice::with_spec("Speak Language", "Tilean"),
            ],
        )];
        career.talents.required = vec![Choice::new("Strike Mighty Blow")];
        career.talents.groups = vec![PickGroup::new(
            "mercenary_talents",
            1,
            vec![
                Choice::new("Disarm"),
                Choice::new("Quick Draw"),
                Choice::new("Strike Mighty Blow"),
            ],
        )];
        career
    }
}
