mod static_personality_catalog;

pub use static_personality_catalog::StaticPersonalityCatalog;
