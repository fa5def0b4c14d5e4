// rust-sasl
// Copyright (c) 2015 Florian Zeitz
//
// This project is MIT licensed.
// Please see the COPYING file for more information.

//! Client side of a SASL exchange, without any I/O.
//!
//! Payloads travel base64 encoded, as in XMPP, IMAP and SMTP. An empty
//! payload is written as `=` so it can be told apart from an absent one.

use std::fmt;

use crate::auth;
use crate::config::MechanismConfig;
use crate::error::{Error, Result};
use crate::mechanism::SaslMechanism;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthStart {
    pub mechanism: &'static str,
    pub data: String,
}

impl fmt::Display for AuthStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.mechanism, self.data)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    pub data: String,
}

impl fmt::Display for AuthResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    InProgress,
    Succeeded,
    Failed,
}

pub fn encode(data: &[u8]) -> String {
    if data.is_empty() {
        "=".to_string()
    } else {
        base64::encode(data)
    }
}

pub fn decode(data: &str) -> Result<Vec<u8>> {
    match data.trim() {
        "" | "=" => Ok(Vec::new()),
        data => Ok(base64::decode(data)?),
    }
}

#[derive(Debug)]
pub struct Negotiation {
    mechanism: SaslMechanism,
    state: State,
}

impl Negotiation {
    /// Select a mechanism and produce the message that opens the exchange.
    ///
    /// Candidates are tried in the client's preference order, restricted to
    /// those the server offered and for which a configuration was given.
    /// A candidate whose creation fails is skipped.
    pub fn start<'a, I>(offered: I, configs: &[MechanismConfig]) -> Result<(Negotiation, AuthStart)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let offered: Vec<&str> = offered.into_iter().map(str::trim).collect();
        let mut last_err = None;

        for desc in auth::mechanisms().iter().copied() {
            if !offered.iter().any(|m| m.eq_ignore_ascii_case(desc.name)) {
                continue;
            }
            let config = match configs.iter().find(|c| c.mechanism() == desc.name) {
                Some(config) => config,
                None => continue,
            };

            let mechanism = match SaslMechanism::create(Some(desc), Some(config)) {
                Ok(mechanism) => mechanism,
                Err(e) => {
                    last_err = Some(e);
                    continue;
                }
            };

            let start = AuthStart {
                mechanism: mechanism.name(),
                data: encode(mechanism.init_bytes()?),
            };
            tracing::debug!(mechanism = start.mechanism, "Starting SASL exchange");

            let negotiation = Negotiation {
                mechanism,
                state: State::InProgress,
            };
            return Ok((negotiation, start));
        }

        tracing::error!(offered = ?offered, "No usable SASL mechanism");
        Err(last_err.unwrap_or(Error::NoCommonMechanism))
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn mechanism(&self) -> &SaslMechanism {
        &self.mechanism
    }

    pub fn on_challenge(&mut self, data: &str) -> Result<AuthResponse> {
        if self.state != State::InProgress {
            return Err(Error::InvalidState("exchange already finished"));
        }

        let result = decode(data)
            .and_then(|challenge| self.mechanism.challenge(Some(challenge.as_slice())));
        match result {
            Ok(response) => {
                tracing::trace!(
                    mechanism = self.mechanism.name(),
                    complete = response.is_empty(),
                    "Answered challenge"
                );
                Ok(AuthResponse {
                    data: encode(&response),
                })
            }
            Err(e) => {
                tracing::warn!(mechanism = self.mechanism.name(), err = %e, "Challenge failed");
                self.state = State::Failed;
                Err(e)
            }
        }
    }

    /// The server reported success, possibly with additional data.
    pub fn on_success(&mut self, data: Option<&str>) -> Result<()> {
        if self.state != State::InProgress {
            return Err(Error::InvalidState("exchange already finished"));
        }

        if let Some(data) = data {
            if let Err(e) = self.finish_with(data) {
                tracing::warn!(mechanism = self.mechanism.name(), err = %e, "Success data rejected");
                self.state = State::Failed;
                return Err(e);
            }
        }

        tracing::debug!(mechanism = self.mechanism.name(), "SASL exchange succeeded");
        self.state = State::Succeeded;
        Ok(())
    }

    fn finish_with(&mut self, data: &str) -> Result<()> {
        let additional = decode(data)?;
        if additional.is_empty() {
            return Ok(());
        }

        let response = self.mechanism.challenge(Some(additional.as_slice()))?;
        if !response.is_empty() {
            return Err(Error::UnexpectedChallenge(
                "mechanism did not finish with the server's success",
            ));
        }
        Ok(())
    }

    pub fn on_failure(&mut self) {
        tracing::warn!(mechanism = self.mechanism.name(), "SASL exchange failed");
        self.state = State::Failed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnonymousConfig, ExternalConfig, PlainConfig};

    fn plain() -> MechanismConfig {
        PlainConfig::new("alice", "secret").with_authzid("admin").into()
    }

    #[test]
    fn picks_plain() {
        let (negotiation, start) =
            Negotiation::start(["SCRAM-SHA-1", "PLAIN"], &[plain()]).unwrap();

        assert_eq!(start.mechanism, "PLAIN");
        assert_eq!(start.data, "YWRtaW4AYWxpY2UAc2VjcmV0");
        assert_eq!(start.to_string(), "PLAIN YWRtaW4AYWxpY2UAc2VjcmV0");
        assert_eq!(negotiation.state(), State::InProgress);
    }

    #[test]
    fn follows_client_preference() {
        let configs = [
            AnonymousConfig::default().into(),
            plain(),
            ExternalConfig::default().into(),
        ];
        let (_, start) =
            Negotiation::start(["ANONYMOUS", "PLAIN", "EXTERNAL"], &configs).unwrap();
        assert_eq!(start.mechanism, "EXTERNAL");
        assert_eq!(start.data, "=");

        let (_, start) = Negotiation::start(["anonymous", "plain"], &configs).unwrap();
        assert_eq!(start.mechanism, "PLAIN");
    }

    #[test]
    fn nothing_in_common() {
        let err = Negotiation::start(["SCRAM-SHA-256"], &[plain()]).unwrap_err();
        assert!(matches!(err, Error::NoCommonMechanism));

        let err = Negotiation::start(["PLAIN"], &[]).unwrap_err();
        assert!(matches!(err, Error::NoCommonMechanism));
    }

    #[test]
    fn reports_creation_failure() {
        let broken: MechanismConfig = PlainConfig::default().with_authcid("bob").into();
        let err = Negotiation::start(["PLAIN"], &[broken]).unwrap_err();
        assert!(matches!(err, Error::MissingCredential("passwd")));
    }

    #[test]
    fn falls_back_after_creation_failure() {
        let configs: [MechanismConfig; 2] = [
            PlainConfig::default().with_authcid("bob").into(),
            AnonymousConfig::default().with_trace("guest").into(),
        ];
        let (_, start) = Negotiation::start(["PLAIN", "ANONYMOUS"], &configs).unwrap();
        assert_eq!(start.mechanism, "ANONYMOUS");
        assert_eq!(decode(&start.data).unwrap(), b"guest");
    }

    #[test]
    fn empty_challenge_completes() {
        let (mut negotiation, _) = Negotiation::start(["PLAIN"], &[plain()]).unwrap();

        let response = negotiation.on_challenge("=").unwrap();
        assert_eq!(response.data, "=");
        let response = negotiation.on_challenge("Zm9v").unwrap();
        assert_eq!(response.data, "=");

        negotiation.on_success(None).unwrap();
        assert_eq!(negotiation.state(), State::Succeeded);
        assert!(matches!(
            negotiation.on_challenge("="),
            Err(Error::InvalidState(_))
        ));
        assert!(matches!(
            negotiation.on_success(None),
            Err(Error::InvalidState(_))
        ));
    }

    #[test]
    fn success_with_data() {
        let (mut negotiation, _) = Negotiation::start(["PLAIN"], &[plain()]).unwrap();
        negotiation.on_success(Some("Zm9v")).unwrap();
        assert_eq!(negotiation.state(), State::Succeeded);
    }

    #[test]
    fn success_with_invalid_data_fails_exchange() {
        let (mut negotiation, _) = Negotiation::start(["PLAIN"], &[plain()]).unwrap();
        assert!(matches!(negotiation.on_success(Some("!!!")), Err(Error::Decode(_))));
        assert_eq!(negotiation.state(), State::Failed);
        assert!(matches!(
            negotiation.on_success(None),
            Err(Error::InvalidState(_))
        ));
    }

    #[test]
    fn invalid_base64_fails_exchange() {
        let (mut negotiation, _) = Negotiation::start(["PLAIN"], &[plain()]).unwrap();
        assert!(matches!(negotiation.on_challenge("!!!"), Err(Error::Decode(_))));
        assert_eq!(negotiation.state(), State::Failed);
    }

    #[test]
    fn failure() {
        let (mut negotiation, _) = Negotiation::start(["PLAIN"], &[plain()]).unwrap();
        negotiation.on_failure();
        assert_eq!(negotiation.state(), State::Failed);
        assert!(negotiation.on_success(None).is_err());
    }

    #[test]
    fn codec() {
        assert_eq!(encode(b""), "=");
        assert_eq!(encode(b"\0bob\0pw"), "AGJvYgBwdw==");
        assert_eq!(decode("AGJvYgBwdw==").unwrap(), b"\0bob\0pw");
        assert_eq!(decode("").unwrap(), b"");
        assert_eq!(decode("=").unwrap(), b"");
    }
}
