// Adapters layer: concrete stand-ins for the collaborators around the resolver.

pub mod formatter;
pub mod menu_store;
