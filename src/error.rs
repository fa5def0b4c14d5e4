// rust-sasl
// Copyright (c) 2014 Florian Zeitz
//
// This project is MIT licensed.
// Please see the COPYING file for more information.

use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A required argument (configuration, handle, descriptor) was absent or
    /// of the wrong kind for the mechanism.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("could not allocate mechanism buffer: {0}")]
    AllocationFailure(#[from] TryReserveError),

    #[error("unexpected server data: {0}")]
    UnexpectedChallenge(&'static str),

    #[error("invalid exchange state: {0}")]
    InvalidState(&'static str),

    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("no mutually supported mechanism")]
    NoCommonMechanism,
}

pub type Result<T> = std::result::Result<T, Error>;
