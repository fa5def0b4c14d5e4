// rust-sasl
// Copyright (c) 2014 Florian Zeitz
//
// This project is MIT licensed.
// Please see the COPYING file for more information.

//! The contract every SASL mechanism fulfils, and the mechanisms shipped
//! with this crate.

pub use self::anon::AnonAuth;
pub use self::external::ExternalAuth;
pub use self::plain::PlainAuth;

pub mod anon;
pub mod external;
pub mod plain;

use crate::config::MechanismConfig;
use crate::error::{Error, Result};

pub trait Mechanism: Send + Sync {
    /// The token advertised during mechanism selection, e.g. `"PLAIN"`.
    fn name(&self) -> &'static str;

    /// The initial response, sent right after the mechanism is selected.
    fn initial(&self) -> &[u8];

    /// Answer a server challenge. An empty response with `Ok` means the
    /// mechanism has nothing more to say.
    fn challenge(&mut self, _challenge: Option<&[u8]>) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }
}

/// An owned, type-erased mechanism instance.
pub type MechanismHandle = Box<dyn Mechanism>;

/// The operation table the negotiation layer drives a mechanism through.
///
/// One immutable instance exists per mechanism type; it is `'static` and can
/// be shared freely between threads.
pub struct MechanismDescriptor {
    pub name: &'static str,
    pub create: fn(Option<&MechanismConfig>) -> Result<MechanismHandle>,
    pub destroy: fn(Option<MechanismHandle>),
    pub get_init_bytes: for<'a> fn(Option<&'a (dyn Mechanism + 'static)>) -> Result<&'a [u8]>,
    pub get_mechanism_name: fn(Option<&(dyn Mechanism + 'static)>) -> Option<&'static str>,
    pub challenge: fn(Option<&mut (dyn Mechanism + 'static)>, Option<&[u8]>) -> Result<Vec<u8>>,
}

impl std::fmt::Debug for MechanismDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MechanismDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

fn destroy(handle: Option<MechanismHandle>) {
    if let Some(handle) = handle {
        tracing::debug!(mechanism = handle.name(), "Destroying mechanism");
    }
}

fn get_init_bytes<'a>(handle: Option<&'a (dyn Mechanism + 'static)>) -> Result<&'a [u8]> {
    handle
        .map(|mech| mech.initial())
        .ok_or(Error::InvalidArgument("no mechanism handle"))
}

fn get_mechanism_name(handle: Option<&(dyn Mechanism + 'static)>) -> Option<&'static str> {
    handle.map(|mech| mech.name())
}

fn challenge(
    handle: Option<&mut (dyn Mechanism + 'static)>,
    challenge: Option<&[u8]>,
) -> Result<Vec<u8>> {
    match handle {
        Some(mech) => mech.challenge(challenge),
        None => Err(Error::InvalidArgument("no mechanism handle")),
    }
}

// Client preference order, strongest first.
static MECHANISMS: [&MechanismDescriptor; 3] = [
    &external::INTERFACE,
    &plain::INTERFACE,
    &anon::INTERFACE,
];

/// All mechanisms known to this crate, in the order a client prefers them.
pub fn mechanisms() -> &'static [&'static MechanismDescriptor] {
    &MECHANISMS
}

/// Look up a mechanism by the name a server advertised.
pub fn find(name: &str) -> Option<&'static MechanismDescriptor> {
    let name = name.trim();
    MECHANISMS
        .iter()
        .copied()
        .find(|desc| desc.name.eq_ignore_ascii_case(name))
}
