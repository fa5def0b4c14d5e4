// rust-sasl
// Copyright (c) 2014-2015 Florian Zeitz
//
// This project is MIT licensed.
// Please see the COPYING file for more information.

//! Client side SASL mechanisms behind a common operation table.
//!
//! ```
//! use sasl::auth;
//! use sasl::{MechanismConfig, PlainConfig, SaslMechanism};
//!
//! let config = MechanismConfig::Plain(PlainConfig::new("bob", "pw"));
//! let mut mech = SaslMechanism::create(Some(auth::plain::get_interface()), Some(&config)).unwrap();
//!
//! assert_eq!(mech.name(), "PLAIN");
//! assert_eq!(mech.init_bytes().unwrap(), b"\0bob\0pw");
//! assert!(mech.challenge(None).unwrap().is_empty());
//! ```

pub use auth::{AnonAuth, ExternalAuth, PlainAuth};
pub use auth::{Mechanism, MechanismDescriptor, MechanismHandle};
pub use config::{AnonymousConfig, ExternalConfig, MechanismConfig, PlainConfig};
pub use error::{Error, Result};
pub use mechanism::SaslMechanism;
pub use negotiation::{AuthResponse, AuthStart, Negotiation, State};

pub mod auth;
pub mod config;
mod error;
pub mod mechanism;
pub mod negotiation;
