//! Serializable predictor configuration.
//!
//! A [PredictorConfig] names a predictor variant and its widths. It can be
//! written by hand as JSON and turned into a boxed [BranchPredictor] with
//! [PredictorConfig::build].

use log::debug;
use serde::{ Deserialize, Serialize };
use std::path::Path;
use std::str::FromStr;

use crate::error::{ Error, Result };
use crate::logic::HashMode;
use crate::predictor::*;

/// The available predictor variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredictorKind {
    #[serde(rename = "gag")]
    GAg,
    #[serde(rename = "gas")]
    GAs,
    #[serde(rename = "taken")]
    Taken,
    #[serde(rename = "not-taken")]
    NotTaken,
    #[serde(rename = "random")]
    Random,
}

impl FromStr for PredictorKind {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "gag" => Ok(Self::GAg),
            "gas" => Ok(Self::GAs),
            "taken" => Ok(Self::Taken),
            "not-taken" | "nottaken" => Ok(Self::NotTaken),
            "random" => Ok(Self::Random),
            _ => Err(Error::InvalidConfig(format!("unknown predictor '{}'", s))),
        }
    }
}

/// Configuration for building a [BranchPredictor].
///
/// `address_width` and `hash_width` are only used by [PredictorKind::GAs],
/// and `seed` only by [PredictorKind::Random].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    pub kind: PredictorKind,

    /// Width of the branch history register
    pub bhr_width: usize,

    /// Width of each saturating counter
    pub sc_width: usize,

    /// Width of a branch address
    pub address_width: Option<usize>,

    /// Number of hashed address bits selecting a PHT set
    pub hash_width: Option<usize>,

    pub hash_mode: HashMode,

    pub seed: u64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self::gag(GAg::DEFAULT_BHR_WIDTH, GAg::DEFAULT_SC_WIDTH)
    }
}

impl PredictorConfig {
    pub fn gag(bhr_width: usize, sc_width: usize) -> Self {
        Self {
            kind: PredictorKind::GAg,
            bhr_width,
            sc_width,
            address_width: None,
            hash_width: None,
            hash_mode: HashMode::Xor,
            seed: 0,
        }
    }

    pub fn gas(bhr_width: usize, sc_width: usize, address_width: usize,
        hash_width: usize, hash_mode: HashMode) -> Self
    {
        Self {
            kind: PredictorKind::GAs,
            bhr_width,
            sc_width,
            address_width: Some(address_width),
            hash_width: Some(hash_width),
            hash_mode,
            seed: 0,
        }
    }

    /// A GAs configuration with the conventional default widths.
    pub fn gas_default() -> Self {
        Self::gas(GAs::DEFAULT_BHR_WIDTH, GAs::DEFAULT_SC_WIDTH,
            GAs::DEFAULT_ADDRESS_WIDTH, GAs::DEFAULT_HASH_WIDTH, HashMode::Xor)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Width of the PHT key for this configuration, or 0 for predictors
    /// without a table.
    pub fn key_width(&self) -> Result<usize> {
        match self.kind {
            PredictorKind::GAg => Ok(self.bhr_width),
            PredictorKind::GAs => {
                let k = self.hash_width
                    .ok_or(Error::UnconfiguredComponent("GAs hash width"))?;
                k.checked_add(self.bhr_width).ok_or_else(|| Error::InvalidConfig(
                    format!("key width {} + {} overflows", k, self.bhr_width)
                ))
            },
            _ => Ok(0),
        }
    }

    /// Use this configuration to create a new predictor.
    pub fn build(&self) -> Result<Box<dyn BranchPredictor>> {
        debug!("Building predictor from {:?}", self);
        let res: Box<dyn BranchPredictor> = match self.kind {
            PredictorKind::GAg => {
                Box::new(GAg::new(self.bhr_width, self.sc_width)?)
            },
            PredictorKind::GAs => {
                let address_width = self.address_width
                    .ok_or(Error::UnconfiguredComponent("GAs address width"))?;
                let hash_width = self.hash_width
                    .ok_or(Error::UnconfiguredComponent("GAs hash width"))?;
                Box::new(GAs::new(self.bhr_width, self.sc_width,
                    address_width, hash_width, self.hash_mode)?)
            },
            PredictorKind::Taken => Box::new(TakenPredictor),
            PredictorKind::NotTaken => Box::new(NotTakenPredictor),
            PredictorKind::Random => Box::new(RandomPredictor::new(self.seed)),
        };
        Ok(res)
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[test]
    fn defaults() {
        let cfg = PredictorConfig::default();
        assert_eq!(cfg.kind, PredictorKind::GAg);
        assert_eq!((cfg.bhr_width, cfg.sc_width), (4, 2));
        assert_eq!(cfg.build().unwrap().name(), "GAg");

        let cfg = PredictorConfig::gas_default();
        assert_eq!(cfg.key_width().unwrap(), 8);
        assert_eq!(cfg.build().unwrap().name(), "GAs");
    }

    #[test]
    fn parse_json() {
        let cfg = PredictorConfig::from_json_str(r#"{
            "kind": "gas", "bhr_width": 6, "sc_width": 3,
            "address_width": 16, "hash_width": 2
        }"#).unwrap();
        assert_eq!(cfg, PredictorConfig::gas(6, 3, 16, 2, HashMode::Xor));

        let back = PredictorConfig::from_json_str(&cfg.to_json().unwrap()).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn missing_gas_fields() {
        let cfg = PredictorConfig::from_json_str(r#"{"kind": "gas"}"#).unwrap();
        assert!(matches!(cfg.build(),
            Err(Error::UnconfiguredComponent("GAs address width"))));

        let cfg = PredictorConfig { address_width: Some(8), ..cfg };
        assert!(matches!(cfg.build(),
            Err(Error::UnconfiguredComponent("GAs hash width"))));
        assert!(cfg.key_width().is_err());
    }

    #[test]
    fn invalid_values() {
        let cfg = PredictorConfig::gas(4, 2, 8, 4, HashMode::Mod);
        assert!(matches!(cfg.build(), Err(Error::UnsupportedHashMode(HashMode::Mod))));
        assert!(PredictorConfig::gag(0, 2).build().is_err());
        assert!(PredictorConfig::gag(40, 2).build().is_err());
        assert!(matches!(PredictorConfig::from_json_str(r#"{"kind": "tage"}"#),
            Err(Error::Json(_))));
    }

    #[test]
    fn oversized_widths_are_errors() {
        let cfg = PredictorConfig::from_json_str(
            r#"{"kind": "gag", "bhr_width": 4, "sc_width": 18446744073709551615}"#
        ).unwrap();
        assert!(matches!(cfg.build(), Err(Error::InvalidConfig(_))));

        let cfg = PredictorConfig::from_json_str(r#"{
            "kind": "gas", "bhr_width": 4,
            "address_width": 18446744073709551615,
            "hash_width": 18446744073709551615
        }"#).unwrap();
        assert!(matches!(cfg.build(), Err(Error::InvalidConfig(_))));
        assert!(matches!(cfg.key_width(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"kind": "random", "seed": 9}}"#).unwrap();
        let cfg = PredictorConfig::from_file(f.path()).unwrap();
        assert_eq!(cfg.kind, PredictorKind::Random);
        assert_eq!(cfg.seed, 9);
        assert_eq!(cfg.bhr_width, 4);
    }

    #[rstest]
    #[case("gag", PredictorKind::GAg)]
    #[case("GAs", PredictorKind::GAs)]
    #[case("not-taken", PredictorKind::NotTaken)]
    #[case("random", PredictorKind::Random)]
    fn kind_from_str(#[case] s: &str, #[case] kind: PredictorKind) {
        assert_eq!(s.parse::<PredictorKind>().unwrap(), kind);
    }
}
