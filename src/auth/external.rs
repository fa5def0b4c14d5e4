// rust-sasl
// Copyright (c) 2014 Florian Zeitz
//
// This project is MIT licensed.
// Please see the COPYING file for more information.

//! The EXTERNAL mechanism. Credentials come from the transport (typically a
//! TLS client certificate); the client only states whom it wants to act as.

use super::{Mechanism, MechanismDescriptor, MechanismHandle};
use crate::config::{ExternalConfig, MechanismConfig};
use crate::error::{Error, Result};

pub const NAME: &str = "EXTERNAL";

pub(crate) static INTERFACE: MechanismDescriptor = MechanismDescriptor {
    name: NAME,
    create,
    destroy: super::destroy,
    get_init_bytes: super::get_init_bytes,
    get_mechanism_name: super::get_mechanism_name,
    challenge: super::challenge,
};

pub fn get_interface() -> &'static MechanismDescriptor {
    &INTERFACE
}

fn create(config: Option<&MechanismConfig>) -> Result<MechanismHandle> {
    match config {
        Some(MechanismConfig::External(config)) => Ok(Box::new(ExternalAuth::new(config)?)),
        Some(_) => Err(Error::InvalidArgument("EXTERNAL needs an EXTERNAL configuration")),
        None => Err(Error::InvalidArgument("no configuration")),
    }
}

#[derive(Debug)]
pub struct ExternalAuth {
    authzid: Vec<u8>,
}

impl ExternalAuth {
    pub fn new(config: &ExternalConfig) -> Result<ExternalAuth> {
        let authzid = config.authzid.as_deref().unwrap_or_default();
        let mut data = Vec::new();
        data.try_reserve_exact(authzid.len())?;
        data.extend_from_slice(authzid);

        tracing::debug!(with_authzid = !data.is_empty(), "Created EXTERNAL mechanism");
        Ok(ExternalAuth { authzid: data })
    }
}

impl Mechanism for ExternalAuth {
    fn name(&self) -> &'static str {
        NAME
    }

    fn initial(&self) -> &[u8] {
        &self.authzid
    }
}
