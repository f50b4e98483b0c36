//! sea-orm entities for the identity service tables.

pub mod access_codes;
pub mod accounts;
