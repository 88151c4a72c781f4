pub mod contact;
pub mod tenant;

pub use contact::{format_contacts, Contact, ContactsPayload};
pub use tenant::TenantId;
