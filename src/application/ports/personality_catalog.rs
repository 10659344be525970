use crate::domain::{PersonalityId, PersonalityProfile};

/// Read-only source of caption voices.
pub trait PersonalityCatalog: Send + Sync {
    fn profile(&self, id: PersonalityId) -> Option<PersonalityProfile>;

    /// Every configured profile, in a stable order.
    fn profiles(&self) -> Vec<PersonalityProfile>;

    fn ids(&self) -> Vec<PersonalityId> {
        self.profiles().into_iter().map(|p| p.id).collect()
    }
}
