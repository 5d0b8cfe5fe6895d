use figment::{
    Figment,
    providers::{Env, Format, Toml},
    value::Value,
};
use serde::Deserialize;

use crate::error::UtilResult;

/// Property naming the TSID node id, honoured as a raw environment variable.
pub const NODE_PROPERTY: &str = "org.tquadrat.util.tsid.node";

/// Width of the node field of a TSID.
pub const NODE_BITS: u32 = 10;

/// Number of distinct node ids.
pub const MAX_NODES: u16 = 1 << NODE_BITS;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UtilConfig {
    #[serde(default)]
    pub tsid: TsidConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TsidConfig {
    /// Node id for generators built from this config, as written. Any value
    /// is accepted here; see [`TsidConfig::node_id`].
    #[serde(default)]
    pub node: Option<Value>,
    /// Fail instead of waiting when a millisecond runs out of sequence numbers.
    #[serde(default)]
    pub non_blocking: bool,
}

impl TsidConfig {
    /// The configured node id, if it is an integer (or integer text) within
    /// `[0, MAX_NODES)`. Anything else is logged and yields `None`.
    pub fn node_id(&self) -> Option<u16> {
        let raw = self.node.as_ref()?;
        let parsed = match raw {
            Value::Num(_, num) => num
                .to_i128()
                .or_else(|| num.to_u128().and_then(|n| i128::try_from(n).ok())),
            Value::String(_, s) => s.trim().parse::<i128>().ok(),
            _ => None,
        };
        match parsed.and_then(|n| u16::try_from(n).ok()) {
            Some(n) if n < MAX_NODES => Some(n),
            _ => {
                tracing::warn!(
                    "ignoring invalid TSID node ({}), expected an integer in 0..{MAX_NODES}",
                    raw.to_actual()
                );
                None
            }
        }
    }
}

impl UtilConfig {
    /// Load from a TOML file, overridden by `TQUTIL_*` variables and the raw
    /// node property. A missing file is not an error.
    pub fn load(path: &str) -> UtilResult<Self> {
        Ok(Self::figment(Figment::new().merge(Toml::file(path))).extract()?)
    }

    /// Load from the environment only.
    pub fn from_env() -> UtilResult<Self> {
        Ok(Self::figment(Figment::new()).extract()?)
    }

    fn figment(base: Figment) -> Figment {
        base.merge(Env::prefixed("TQUTIL_").split("__"))
            .merge(Env::raw().filter_map(|key| {
                if key.as_str().eq_ignore_ascii_case(NODE_PROPERTY) {
                    Some("tsid.node".into())
                } else {
                    None
                }
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn from_toml(toml: &str) -> UtilConfig {
        Figment::new().merge(Toml::string(toml)).extract().unwrap()
    }

    #[test]
    fn defaults_when_empty() {
        let config = from_toml("");
        assert!(config.tsid.node.is_none());
        assert!(!config.tsid.non_blocking);
        assert_eq!(config.tsid.node_id(), None);
    }

    #[test]
    fn numeric_node_in_range() {
        let config = from_toml("[tsid]\nnode = 42\nnon_blocking = true");
        assert_eq!(config.tsid.node_id(), Some(42));
        assert!(config.tsid.non_blocking);
    }

    #[test]
    fn textual_node_is_parsed() {
        let config = from_toml("[tsid]\nnode = \" 1023 \"");
        assert_eq!(config.tsid.node_id(), Some(1023));
    }

    #[test]
    fn out_of_range_node_is_ignored() {
        assert_eq!(from_toml("[tsid]\nnode = 1024").tsid.node_id(), None);
        assert_eq!(from_toml("[tsid]\nnode = -1").tsid.node_id(), None);
        assert_eq!(from_toml("[tsid]\nnode = \"abc\"").tsid.node_id(), None);
    }

    #[test]
    fn wrongly_typed_node_keeps_rest_of_config() {
        for node in ["1.5", "true", "[1]", "{ id = 1 }"] {
            let config = from_toml(&format!("[tsid]\nnode = {node}\nnon_blocking = true"));
            assert_eq!(config.tsid.node_id(), None, "node = {node}");
            assert!(config.tsid.non_blocking, "node = {node}");
        }
    }

    #[test]
    fn node_bits_and_max_nodes_agree() {
        assert_eq!(MAX_NODES, 1 << NODE_BITS);
        assert_eq!(MAX_NODES, 1024);
    }

    #[test]
    fn env_node_property_is_honoured() {
        figment::Jail::expect_with(|jail| {
            jail.set_env(NODE_PROPERTY, "5");
            assert_eq!(UtilConfig::from_env().map_err(|e| e.to_string())?.tsid.node_id(), Some(5));
            Ok(())
        });
    }

    #[test]
    fn env_node_property_ignores_case() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("ORG.TQUADRAT.UTIL.TSID.NODE", "17");
            assert_eq!(UtilConfig::from_env().map_err(|e| e.to_string())?.tsid.node_id(), Some(17));
            Ok(())
        });
    }

    #[test]
    fn env_prefixed_keys_are_honoured() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("TQUTIL_TSID__NODE", "7");
            jail.set_env("TQUTIL_TSID__NON_BLOCKING", "true");
            let config = UtilConfig::from_env().map_err(|e| e.to_string())?;
            assert_eq!(config.tsid.node_id(), Some(7));
            assert!(config.tsid.non_blocking);
            Ok(())
        });
    }

    #[test]
    fn env_invalid_node_does_not_fail_extraction() {
        figment::Jail::expect_with(|jail| {
            jail.set_env(NODE_PROPERTY, "1.5");
            jail.set_env("TQUTIL_TSID__NON_BLOCKING", "true");
            let config = UtilConfig::from_env().map_err(|e| e.to_string())?;
            assert_eq!(config.tsid.node_id(), None);
            assert!(config.tsid.non_blocking);

            jail.set_env(NODE_PROPERTY, "5000");
            assert_eq!(UtilConfig::from_env().map_err(|e| e.to_string())?.tsid.node_id(), None);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("tqutil.toml", "[tsid]\nnode = 3\nnon_blocking = true")?;
            jail.set_env(NODE_PROPERTY, "9");
            let config = UtilConfig::load("tqutil.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.tsid.node_id(), Some(9));
            assert!(config.tsid.non_blocking);
            Ok(())
        });
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[tsid]\nnode = 7").unwrap();
        let config = UtilConfig::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.tsid.node_id(), Some(7));
    }

    #[test]
    fn load_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = UtilConfig::load(path.to_str().unwrap()).unwrap();
        assert!(!config.tsid.non_blocking);
    }
}
