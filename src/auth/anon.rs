// rust-sasl
// Copyright (c) 2014 Florian Zeitz
// Copyright (c) 2016 Astro
//
// This project is MIT licensed.
// Please see the COPYING file for more information.

//! The ANONYMOUS mechanism, [RFC 4505](https://tools.ietf.org/html/rfc4505).

use super::{Mechanism, MechanismDescriptor, MechanismHandle};
use crate::config::{AnonymousConfig, MechanismConfig};
use crate::error::{Error, Result};

pub const NAME: &str = "ANONYMOUS";

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
        Some(MechanismConfig::Anonymous(config)) => Ok(Box::new(AnonAuth::new(config)?)),
        Some(_) => Err(Error::InvalidArgument("ANONYMOUS needs an ANONYMOUS configuration")),
        None => Err(Error::InvalidArgument("no configuration")),
    }
}

#[derive(Debug)]
pub struct AnonAuth {
    trace: Vec<u8>,
}

impl AnonAuth {
    pub fn new(config: &AnonymousConfig) -> Result<AnonAuth> {
        let trace = config.trace.as_deref().unwrap_or_default();
        let mut data = Vec::new();
        data.try_reserve_exact(trace.len())?;
        data.extend_from_slice(trace);

        tracing::debug!(trace_len = data.len(), "Created ANONYMOUS mechanism");
        Ok(AnonAuth { trace: data })
    }
}

impl Mechanism for AnonAuth {
    fn name(&self) -> &'static str {
        NAME
    }

    fn initial(&self) -> &[u8] {
        &self.trace
    }
}
