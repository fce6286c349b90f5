use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolversConfig {
    /// Line-delimited resolver list, read when `servers` is empty.
    #[serde(default = "default_resolver_file")]
    pub file: String,

    /// Inline resolver hostnames; take precedence over `file`.
    #[serde(default)]
    pub servers: Vec<String>,
}

impl Default for ResolversConfig {
    fn default() -> Self {
        Self {
            file: default_resolver_file(),
            servers: Vec::new(),
        }
    }
}

fn default_resolver_file() -> String {
    "server_list.txt".to_string()
}
