// rust-sasl
// Copyright (c) 2014 Florian Zeitz
//
// This project is MIT licensed.
// Please see the COPYING file for more information.

use std::fmt;

use crate::auth::{MechanismDescriptor, MechanismHandle};
use crate::config::MechanismConfig;
use crate::error::{Error, Result};

/// A live mechanism instance, driven through its descriptor.
///
/// The instance is released through the descriptor's `destroy` operation
/// when this value is dropped.
pub struct SaslMechanism {
    descriptor: &'static MechanismDescriptor,
    // Only `None` while being dropped.
    handle: Option<MechanismHandle>,
}

impl SaslMechanism {
    pub fn create(
        descriptor: Option<&'static MechanismDescriptor>,
        config: Option<&MechanismConfig>,
    ) -> Result<SaslMechanism> {
        let descriptor = descriptor.ok_or(Error::InvalidArgument("no mechanism descriptor"))?;
        let handle = (descriptor.create)(config).map_err(|e| {
            tracing::warn!(mechanism = descriptor.name, err = %e, "Could not create mechanism");
            e
        })?;

        Ok(SaslMechanism {
            descriptor,
            handle: Some(handle),
        })
    }

    pub fn descriptor(&self) -> &'static MechanismDescriptor {
        self.descriptor
    }

    pub fn name(&self) -> &'static str {
        (self.descriptor.get_mechanism_name)(self.handle.as_deref()).unwrap_or(self.descriptor.name)
    }

    pub fn init_bytes(&self) -> Result<&[u8]> {
        (self.descriptor.get_init_bytes)(self.handle.as_deref())
    }

    pub fn challenge(&mut self, challenge: Option<&[u8]>) -> Result<Vec<u8>> {
        (self.descriptor.challenge)(self.handle.as_deref_mut(), challenge)
    }
}

impl Drop for SaslMechanism {
    fn drop(&mut self) {
        (self.descriptor.destroy)(self.handle.take());
    }
}

impl fmt::Debug for SaslMechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaslMechanism")
            .field("mechanism", &self.descriptor.name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::auth::{self, Mechanism};
    use crate::config::PlainConfig;

    #[test]
    fn plain_scenario() {
        let config = MechanismConfig::Plain(PlainConfig::new("alice", "secret").with_authzid("admin"));
        let mut mech = SaslMechanism::create(Some(auth::plain::get_interface()), Some(&config)).unwrap();

        assert_eq!(mech.name(), "PLAIN");
        assert_eq!(mech.init_bytes().unwrap(), b"admin\0alice\0secret");
        assert_eq!(mech.challenge(Some(&b"whatever"[..])).unwrap(), b"");
        assert_eq!(mech.challenge(None).unwrap(), b"");
    }

    #[test]
    fn missing_descriptor_or_config() {
        let config = MechanismConfig::Plain(PlainConfig::new("bob", "pw"));
        assert!(matches!(
            SaslMechanism::create(None, Some(&config)),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            SaslMechanism::create(Some(auth::plain::get_interface()), None),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn missing_authcid() {
        let config = MechanismConfig::Plain(PlainConfig::default().with_passwd("pw"));
        assert!(matches!(
            SaslMechanism::create(Some(auth::plain::get_interface()), Some(&config)),
            Err(Error::MissingCredential("authcid"))
        ));
    }

    static DESTROYED: AtomicUsize = AtomicUsize::new(0);

    struct Counted;

    impl Mechanism for Counted {
        fn name(&self) -> &'static str {
            "X-COUNTED"
        }

        fn initial(&self) -> &[u8] {
            b"counted"
        }
    }

    fn create_counted(_: Option<&MechanismConfig>) -> Result<MechanismHandle> {
        Ok(Box::new(Counted))
    }

    fn destroy_counted(handle: Option<MechanismHandle>) {
        if handle.is_some() {
            DESTROYED.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn counted_init_bytes<'a>(handle: Option<&'a (dyn Mechanism + 'static)>) -> Result<&'a [u8]> {
        handle
            .map(|mech| mech.initial())
            .ok_or(Error::InvalidArgument("no mechanism handle"))
    }

    fn counted_name(handle: Option<&(dyn Mechanism + 'static)>) -> Option<&'static str> {
        handle.map(|mech| mech.name())
    }

    fn counted_challenge(
        _: Option<&mut (dyn Mechanism + 'static)>,
        _: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }

    static COUNTED: MechanismDescriptor = MechanismDescriptor {
        name: "X-COUNTED",
        create: create_counted,
        destroy: destroy_counted,
        get_init_bytes: counted_init_bytes,
        get_mechanism_name: counted_name,
        challenge: counted_challenge,
    };

    #[test]
    fn destroyed_exactly_once() {
        let mech = SaslMechanism::create(Some(&COUNTED), None).unwrap();
        assert_eq!(mech.name(), "X-COUNTED");
        assert_eq!(mech.init_bytes().unwrap(), b"counted");

        drop(mech);
        assert_eq!(DESTROYED.load(Ordering::SeqCst), 1);
    }
}
