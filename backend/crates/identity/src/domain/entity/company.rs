use crate::domain::value_object::{email::Email, identity_key::IdentityKey, non_blank::NonBlank};

/// Company entity, keyed by its tax ID (RIF)
#[derive(Debug, Clone)]
pub struct Company {
    pub rif: IdentityKey,
    pub name: NonBlank,
    pub email: Email,
    pub address: Option<NonBlank>,
    /// Independent from the paired credential's flag
    pub active: bool,
}

impl Company {
    pub const NAME_MAX_LENGTH: usize = 150;
    pub const ADDRESS_MAX_LENGTH: usize = 255;

    pub fn new(rif: IdentityKey, name: NonBlank, email: Email, address: Option<NonBlank>) -> Self {
        Self {
            rif,
            name,
            email,
            address,
            active: true,
        }
    }
}
