use serde_json::{Map, Value};

use crate::error::{Error, Result};

// the flow every vended client uses
pub const FLOW_VISION: &str = "xtls-rprx-vision";

/// The whole persisted server document. Only the roster-bearing inbound is
/// interpreted; every other key rides along through the flattened maps and
/// is rewritten untouched.
#[derive(Debug, Serialize, Deserialize)]
pub struct ServerDocument {
    pub inbounds: Vec<Inbound>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Inbound {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<InboundSettings>,
    #[serde(rename = "streamSettings", skip_serializing_if = "Option::is_none")]
    pub stream_settings: Option<StreamSettings>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InboundSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clients: Option<Vec<ClientRecord>>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    pub email: String,
    // connection credential, UUIDv4, never reused
    pub id: String,
    #[serde(default = "default_enable")]
    pub enable: bool,
    #[serde(default)]
    pub expiry_time: i64,
    #[serde(default)]
    pub flow: String,
    #[serde(default)]
    pub limit_ip: i64,
    #[serde(default)]
    pub reset: i64,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

fn default_enable() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StreamSettings {
    #[serde(rename = "realitySettings", skip_serializing_if = "Option::is_none")]
    pub reality_settings: Option<RealitySettings>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealitySettings {
    #[serde(default)]
    pub private_key: String,
    #[serde(default)]
    pub short_ids: Vec<String>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl ServerDocument {
    /// The identity-carrying inbound is whichever one has a client list,
    /// wherever it sits in the sequence.
    pub fn roster_inbound(&self) -> Result<&Inbound> {
        self.inbounds
            .iter()
            .find(|ib| {
                ib.settings
                    .as_ref()
                    .map_or(false, |s| s.clients.is_some())
            })
            .ok_or_else(|| Error::ConfigShape("no inbound carries a client roster".to_string()))
    }

    pub fn roster_inbound_mut(&mut self) -> Result<&mut Inbound> {
        self.inbounds
            .iter_mut()
            .find(|ib| {
                ib.settings
                    .as_ref()
                    .map_or(false, |s| s.clients.is_some())
            })
            .ok_or_else(|| Error::ConfigShape("no inbound carries a client roster".to_string()))
    }

    pub fn clients(&self) -> Result<&Vec<ClientRecord>> {
        self.roster_inbound().map(|ib| {
            ib.settings
                .as_ref()
                .and_then(|s| s.clients.as_ref())
                .expect("roster inbound selected on clients presence")
        })
    }

    pub fn clients_mut(&mut self) -> Result<&mut Vec<ClientRecord>> {
        self.roster_inbound_mut().map(|ib| {
            ib.settings
                .as_mut()
                .and_then(|s| s.clients.as_mut())
                .expect("roster inbound selected on clients presence")
        })
    }

    /// Reality parameters of the roster inbound.
    pub fn reality(&self) -> Result<&RealitySettings> {
        self.roster_inbound()?
            .stream_settings
            .as_ref()
            .and_then(|ss| ss.reality_settings.as_ref())
            .ok_or_else(|| {
                Error::ConfigShape("roster inbound lacks streamSettings.realitySettings".to_string())
            })
    }
}
