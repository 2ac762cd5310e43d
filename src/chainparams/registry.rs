//! Active-network selection
//!
//! The registry owns one validated parameter set per variant. Selection needs
//! `&mut self`, so it can only happen while the host still exclusively owns
//! the registry during startup; afterwards it is shared read-only.

use rand::Rng;
use std::sync::Arc;
use tracing::info;
use crate::config::ConfigError;
use super::{derive_regtest, derive_testnet, NetworkParameters, NetworkVariant, ParamsError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamsRegistry {
    main: NetworkParameters,
    testnet: NetworkParameters,
    regtest: NetworkParameters,
    active: NetworkVariant,
}

impl ParamsRegistry {
    /// Build and validate all variants. Main is active until `select` is called.
    pub fn build() -> Result<Self, ParamsError> {
        Self::build_at(chrono::Utc::now().timestamp(), &mut rand::thread_rng())
    }

    /// Build with an explicit clock and randomness source
    pub fn build_at<R: Rng + ?Sized>(now: i64, rng: &mut R) -> Result<Self, ParamsError> {
        let main = NetworkParameters::for_variant_at(NetworkVariant::Main, now, rng)?;
        let testnet = derive_testnet(&main, now, rng)?;
        testnet.validate()?;
        let regtest = derive_regtest(&testnet)?;
        regtest.validate()?;

        Ok(Self {
            main,
            testnet,
            regtest,
            active: NetworkVariant::Main,
        })
    }

    /// Make `variant` the active network. Only meaningful during startup;
    /// once selection is done, call [`ParamsRegistry::into_shared`].
    pub fn select(&mut self, variant: NetworkVariant) {
        self.active = variant;
        let params = self.active();
        info!(
            network = %variant,
            genesis = %params.genesis_hash(),
            port = params.default_port,
            "selected network parameters"
        );
    }

    /// Select from the `testnet` / `regtest` startup flags
    pub fn select_from_config(&mut self, is_testnet: bool, is_regtest: bool) -> Result<(), ConfigError> {
        let variant = NetworkVariant::from_flags(is_testnet, is_regtest)?;
        self.select(variant);
        Ok(())
    }

    /// End of startup: the selection is frozen and the registry can only be
    /// read from here on.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn active(&self) -> &NetworkParameters {
        self.get(self.active)
    }

    pub fn active_variant(&self) -> NetworkVariant {
        self.active
    }

    pub fn get(&self, variant: NetworkVariant) -> &NetworkParameters {
        match variant {
            NetworkVariant::Main => &self.main,
            NetworkVariant::Testnet => &self.testnet,
            NetworkVariant::Regtest => &self.regtest,
        }
    }
}
