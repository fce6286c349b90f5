use crate::DohProtocol;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryConfig {
    #[serde(default)]
    pub protocol: DohProtocol,

    #[serde(default = "default_record_type")]
    pub record_type: String,

    /// EDNS Client Subnet hint sent with wire-format queries.
    #[serde(default)]
    pub ecs: Option<String>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            protocol: DohProtocol::default(),
            record_type: default_record_type(),
            ecs: None,
        }
    }
}

fn default_record_type() -> String {
    "A".to_string()
}
