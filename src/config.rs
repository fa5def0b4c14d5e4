// rust-sasl
// Copyright (c) 2014 Florian Zeitz
//
// This project is MIT licensed.
// Please see the COPYING file for more information.

//! Caller supplied configuration for each mechanism.
//!
//! All credential fields are opaque byte strings. Nothing here checks or
//! normalizes their text encoding; callers hand over bytes already encoded
//! the way the server expects them.

use std::fmt;

/// Credentials for the PLAIN mechanism.
///
/// `authcid` and `passwd` are required by the mechanism but optional here so
/// that a partially filled configuration (e.g. one read from a settings file)
/// is reported as a missing credential instead of failing to deserialize.
#[derive(Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlainConfig {
    pub authzid: Option<Vec<u8>>,
    pub authcid: Option<Vec<u8>>,
    pub passwd: Option<Vec<u8>>,
}

impl PlainConfig {
    pub fn new<C: Into<Vec<u8>>, P: Into<Vec<u8>>>(authcid: C, passwd: P) -> PlainConfig {
        PlainConfig::default().with_authcid(authcid).with_passwd(passwd)
    }

    pub fn with_authzid<Z: Into<Vec<u8>>>(mut self, authzid: Z) -> PlainConfig {
        self.authzid = Some(authzid.into());
        self
    }

    pub fn with_authcid<C: Into<Vec<u8>>>(mut self, authcid: C) -> PlainConfig {
        self.authcid = Some(authcid.into());
        self
    }

    pub fn with_passwd<P: Into<Vec<u8>>>(mut self, passwd: P) -> PlainConfig {
        self.passwd = Some(passwd.into());
        self
    }
}

impl fmt::Debug for PlainConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlainConfig")
            .field("authzid", &self.authzid.as_deref().map(String::from_utf8_lossy))
            .field("authcid", &self.authcid.as_deref().map(String::from_utf8_lossy))
            .finish_non_exhaustive()
    }
}

/// Optional trace information for ANONYMOUS (RFC 4505).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnonymousConfig {
    pub trace: Option<Vec<u8>>,
}

impl AnonymousConfig {
    pub fn with_trace<T: Into<Vec<u8>>>(mut self, trace: T) -> AnonymousConfig {
        self.trace = Some(trace.into());
        self
    }
}

/// Optional authorization identity for EXTERNAL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExternalConfig {
    pub authzid: Option<Vec<u8>>,
}

impl ExternalConfig {
    pub fn with_authzid<Z: Into<Vec<u8>>>(mut self, authzid: Z) -> ExternalConfig {
        self.authzid = Some(authzid.into());
        self
    }
}

/// The configuration value handed to a descriptor's `create` operation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mechanism", rename_all = "UPPERCASE"))]
pub enum MechanismConfig {
    Plain(PlainConfig),
    Anonymous(AnonymousConfig),
    External(ExternalConfig),
}

impl MechanismConfig {
    /// Name of the mechanism this configuration is meant for.
    pub fn mechanism(&self) -> &'static str {
        match *self {
            MechanismConfig::Plain(_) => crate::auth::plain::NAME,
            MechanismConfig::Anonymous(_) => crate::auth::anon::NAME,
            MechanismConfig::External(_) => crate::auth::external::NAME,
        }
    }
}

impl From<PlainConfig> for MechanismConfig {
    fn from(config: PlainConfig) -> Self {
        MechanismConfig::Plain(config)
    }
}

impl From<AnonymousConfig> for MechanismConfig {
    fn from(config: AnonymousConfig) -> Self {
        MechanismConfig::Anonymous(config)
    }
}

impl From<ExternalConfig> for MechanismConfig {
    fn from(config: ExternalConfig) -> Self {
        MechanismConfig::External(config)
    }
}
