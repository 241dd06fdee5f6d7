//! Inbound request attributes consumed by the gatekeeper

use crate::constants::UNKNOWN_CLIENT;
use std::borrow::Cow;
use std::net::IpAddr;

/// The parts of an inbound request that rate limiting looks at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateRequest<'a> {
    /// Request path, without query string
    pub path: &'a str,
    /// Value of the forwarded-for header, if present
    pub forwarded_for: Option<&'a str>,
    /// Direct connection origin
    pub peer: Option<IpAddr>,
    /// Value of the bypass header, if present
    pub bypass_token: Option<&'a str>,
}

impl<'a> GateRequest<'a> {
    /// Request for `path` with no other attributes
    pub fn new(path: &'a str) -> Self {
        Self {
            path,
            ..Self::default()
        }
    }

    /// Set the forwarded-for header value
    #[must_use]
    pub fn with_forwarded_for(mut self, value: &'a str) -> Self {
        self.forwarded_for = Some(value);
        self
    }

    /// Set the direct connection origin
    #[must_use]
    pub fn with_peer(mut self, peer: IpAddr) -> Self {
        self.peer = Some(peer);
        self
    }

    /// Set the bypass header value
    #[must_use]
    pub fn with_bypass_token(mut self, token: &'a str) -> Self {
        self.bypass_token = Some(token);
        self
    }

    /// Client origin: forwarded-for header, else peer address, else `unknown`
    ///
    /// The header is used verbatim (trimmed), proxy chains included.
    pub fn client_origin(&self) -> Cow<'a, str> {
        match (self.forwarded_for.map(str::trim), self.peer) {
            (Some(forwarded), _) if !forwarded.is_empty() => Cow::Borrowed(forwarded),
            (_, Some(peer)) => Cow::Owned(peer.to_string()),
            _ => Cow::Borrowed(UNKNOWN_CLIENT),
        }
    }

    /// Rate-limit identifier: origin and path, so each path is limited separately
    pub fn identifier(&self) -> String {
        format!("{}:{}", self.client_origin(), self.path)
    }
}
