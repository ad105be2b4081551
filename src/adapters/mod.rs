// Adapters layer: concrete clients for the external systems behind the domain ports.

pub mod amadeus;
pub mod curated;
pub mod whatsapp;
