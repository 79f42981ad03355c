use serde::{Deserialize, Serialize};

/// Descriptive strings the host shows for this plugin, plus the executable
/// it attaches to. Fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    /// Short name; the host also prefixes published contexts with it.
    pub name: String,
    pub description: String,
    pub long_description: String,
    pub process_name: String,
}

impl PluginDescriptor {
    /// World of Warcraft 3.3.5a (x86).
    pub fn wow_3_3_5a() -> Self {
        Self {
            name: "World of Warcraft 3.3.5a".to_string(),
            description: "World of Warcraft (x86) version 3.3.5a.12340".to_string(),
            long_description: "Supports World of Warcraft (x86) with identity support."
                .to_string(),
            process_name: "Wow.exe".to_string(),
        }
    }
}

impl Default for PluginDescriptor {
    fn default() -> Self {
        Self::wow_3_3_5a()
    }
}
