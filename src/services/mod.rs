pub mod hubspot;

pub use hubspot::HubSpotClient;
