// rust-sasl
// Copyright (c) 2014 Florian Zeitz
//
// This project is MIT licensed.
// Please see the COPYING file for more information.

//! The PLAIN mechanism, [RFC 4616](https://tools.ietf.org/html/rfc4616).
//!
//! The whole exchange is a single initial response:
//!
//! ```text
//! message = [authzid] NUL authcid NUL passwd
//! ```

use std::fmt;

use super::{Mechanism, MechanismDescriptor, MechanismHandle};
use crate::config::{MechanismConfig, PlainConfig};
use crate::error::{Error, Result};

pub const NAME: &str = "PLAIN";

pub(crate) static INTERFACE: MechanismDescriptor = MechanismDescriptor {
    name: NAME,
    create,
    destroy: super::destroy,
    get_init_bytes: super::get_init_bytes,
    get_mechanism_name: super::get_mechanism_name,
    challenge: super::challenge,
};

/// The descriptor for PLAIN.
pub fn get_interface() -> &'static MechanismDescriptor {
    &INTERFACE
}

fn create(config: Option<&MechanismConfig>) -> Result<MechanismHandle> {
    match config {
        Some(MechanismConfig::Plain(config)) => Ok(Box::new(PlainAuth::new(config)?)),
        Some(_) => Err(Error::InvalidArgument("PLAIN needs a PLAIN configuration")),
        None => Err(Error::InvalidArgument("no configuration")),
    }
}

pub struct PlainAuth {
    init_bytes: Vec<u8>,
}

impl PlainAuth {
    /// Encode the credentials into the initial response.
    ///
    /// Fails if `authcid` or `passwd` is missing. A missing `authzid` is sent
    /// as an empty field.
    pub fn new(config: &PlainConfig) -> Result<PlainAuth> {
        let authcid = config
            .authcid
            .as_deref()
            .ok_or(Error::MissingCredential("authcid"))?;
        let passwd = config
            .passwd
            .as_deref()
            .ok_or(Error::MissingCredential("passwd"))?;
        let authzid = config.authzid.as_deref().unwrap_or_default();

        let length = authzid.len() + authcid.len() + passwd.len() + 2;
        let mut data: Vec<u8> = Vec::new();
        data.try_reserve_exact(length).map_err(|e| {
            tracing::error!(length, "Could not allocate PLAIN initial response");
            Error::from(e)
        })?;

        data.extend_from_slice(authzid);
        data.push(0);
        data.extend_from_slice(authcid);
        data.push(0);
        data.extend_from_slice(passwd);

        tracing::debug!(
            length,
            with_authzid = !authzid.is_empty(),
            "Created PLAIN mechanism"
        );

        Ok(PlainAuth { init_bytes: data })
    }
}

impl Mechanism for PlainAuth {
    fn name(&self) -> &'static str {
        NAME
    }

    fn initial(&self) -> &[u8] {
        &self.init_bytes
    }

    fn challenge(&mut self, challenge: Option<&[u8]>) -> Result<Vec<u8>> {
        // PLAIN defines no server challenge; whatever arrives is ignored.
        tracing::trace!(
            challenge_len = challenge.map_or(0, <[u8]>::len),
            "PLAIN has no challenge step"
        );
        Ok(Vec::new())
    }
}

impl fmt::Debug for PlainAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlainAuth")
            .field("init_bytes_length", &self.init_bytes.len())
            .finish()
    }
}
