//! The session token value.
//!
//! A token is either built by resolving missing identity fields against the
//! package registry ([`TokenBuilder::build`]) or restored verbatim from a
//! [`TransferRecord`] ([`SessionToken::from_record`]).  Once built it never
//! changes.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use mt_domain::error::{Error, Result};
use mt_domain::trace::TraceEvent;

use crate::context::TokenContext;
use crate::handle::SessionHandle;
use crate::record::TransferRecord;
use crate::registry::session_id_from_component;
use crate::token_type::TokenType;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Token
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Immutable identity of a media session or of a service providing one.
#[derive(Debug, Clone)]
pub struct SessionToken {
    owner_id: u32,
    token_type: TokenType,
    package_name: String,
    service_name: Option<String>,
    session_id: String,
    /// Non-owning view of the remote endpoint; never closed by the token.
    handle: Option<Arc<dyn SessionHandle>>,
}

impl SessionToken {
    /// Start building a token of `token_type` for `package_name`.
    pub fn builder(token_type: TokenType, package_name: impl Into<String>) -> TokenBuilder {
        TokenBuilder {
            token_type,
            package_name: package_name.into(),
            owner_id: None,
            service_name: None,
            session_id: None,
            handle: None,
        }
    }

    pub fn owner_id(&self) -> u32 {
        self.owner_id
    }

    pub fn token_type(&self) -> TokenType {
        self.token_type
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn service_name(&self) -> Option<&str> {
        self.service_name.as_deref()
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn handle(&self) -> Option<&Arc<dyn SessionHandle>> {
        self.handle.as_ref()
    }

    /// Pack the token into a record for another process.  The session
    /// binder is left out when the handle is a local-only stub.
    pub fn to_record(&self) -> TransferRecord {
        TransferRecord {
            uid: Some(self.owner_id),
            token_type: Some(self.token_type.as_i32()),
            package_name: Some(self.package_name.clone()),
            service_name: self.service_name.clone(),
            id: Some(self.session_id.clone()),
            session_binder: self.handle.as_ref().and_then(|h| h.raw_handle()),
        }
    }

    /// Restore a token from a record received from a peer.
    ///
    /// An absent record yields `Ok(None)`.  The registry is never consulted:
    /// the record's fields are taken as-is once they pass validation.  A
    /// session binder, if present, is wrapped through `ctx.adapter`.
    pub fn from_record(
        record: Option<&TransferRecord>,
        ctx: &TokenContext,
    ) -> Result<Option<Self>> {
        let Some(record) = record else {
            return Ok(None);
        };

        let token_type = match record.token_type.map(TokenType::try_from) {
            Some(Ok(ty)) => ty,
            _ => return Err(reject("invalid type")),
        };

        match token_type {
            TokenType::Session => {
                if record.session_binder.is_none() {
                    return Err(reject("session token requires a session binder"));
                }
            }
            TokenType::SessionService | TokenType::LibraryService => {
                if record.service_name.as_deref().map_or(true, str::is_empty) {
                    return Err(reject("session service needs service name"));
                }
            }
        }

        let (Some(package_name), Some(session_id)) = (
            record.package_name.as_ref().filter(|p| !p.is_empty()),
            record.id.as_ref(),
        ) else {
            return Err(reject("package name and id must be present"));
        };

        let handle = record.session_binder.map(|raw| ctx.adapter.wrap(raw));

        TraceEvent::TokenRestored {
            package_name: package_name.clone(),
            token_type: token_type.to_string(),
            has_handle: handle.is_some(),
        }
        .emit();

        Ok(Some(Self {
            owner_id: record.uid.unwrap_or(0),
            token_type,
            package_name: package_name.clone(),
            service_name: record.service_name.clone(),
            session_id: session_id.clone(),
            handle,
        }))
    }

    /// Hash over every identity field, combined with multiplier 31 so the
    /// value is stable across processes.  The handle contributes its
    /// endpoint identity, not its address.
    pub fn identity_hash(&self) -> u64 {
        const PRIME: u64 = 31;

        let parts = [
            self.service_name.as_deref().map_or(0, string_hash),
            string_hash(&self.session_id),
            string_hash(&self.package_name),
            u64::from(self.owner_id),
            self.token_type as u64,
        ];
        let seed = self.handle.as_ref().map_or(0, |h| h.endpoint().0);
        parts
            .into_iter()
            .fold(seed, |acc, part| part.wrapping_add(PRIME.wrapping_mul(acc)))
    }
}

impl PartialEq for SessionToken {
    fn eq(&self, other: &Self) -> bool {
        self.owner_id == other.owner_id
            && self.package_name == other.package_name
            && self.service_name == other.service_name
            && self.session_id == other.session_id
            && self.token_type == other.token_type
            && same_endpoint(self.handle.as_ref(), other.handle.as_ref())
    }
}

impl Eq for SessionToken {}

impl Hash for SessionToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.identity_hash());
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SessionToken {{pkg={} id={} type={} service={} binder=",
            self.package_name,
            self.session_id,
            self.token_type,
            self.service_name.as_deref().unwrap_or("null"),
        )?;
        match &self.handle {
            Some(handle) => write!(f, "{handle:?}}}"),
            None => f.write_str("null}"),
        }
    }
}

fn same_endpoint(a: Option<&Arc<dyn SessionHandle>>, b: Option<&Arc<dyn SessionHandle>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Arc::ptr_eq(a, b) || a.endpoint() == b.endpoint(),
        _ => false,
    }
}

fn string_hash(s: &str) -> u64 {
    s.chars()
        .fold(0u64, |h, c| h.wrapping_mul(31).wrapping_add(u64::from(c)))
}

fn reject(msg: impl Into<String>) -> Error {
    let msg = msg.into();
    tracing::warn!(reason = %msg, "token rejected");
    Error::InvalidArgument(msg)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Builder
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Collects the known identity fields of a token.  Anything left unset is
/// resolved through the registry in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct TokenBuilder {
    token_type: TokenType,
    package_name: String,
    owner_id: Option<u32>,
    service_name: Option<String>,
    session_id: Option<String>,
    handle: Option<Arc<dyn SessionHandle>>,
}

impl TokenBuilder {
    /// Owning user id.  When unset it is looked up by package name.
    pub fn owner_id(mut self, owner_id: u32) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn service_name(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = Some(service_name.into());
        self
    }

    /// Session id.  When unset on a service token it is read from the
    /// service component's metadata.
    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Handle to the live session.  Stored verbatim.
    pub fn handle(mut self, handle: Arc<dyn SessionHandle>) -> Self {
        self.handle = Some(handle);
        self
    }

    /// Resolve the missing fields and build the token.
    ///
    /// Blocks on the registry when the owner id or session id has to be
    /// looked up.  Fails with [`Error::InvalidArgument`] when the package
    /// is unknown, a service token has no service name, the service
    /// component cannot be found, or no session id can be determined.
    pub fn build(self, ctx: &TokenContext) -> Result<SessionToken> {
        if self.package_name.is_empty() {
            return Err(reject("package name must not be empty"));
        }
        let missing_service = self.service_name.as_deref().map_or(true, str::is_empty);
        if self.token_type.is_service() && missing_service {
            return Err(reject("session service needs service name"));
        }

        let owner_id = match self.owner_id {
            Some(id) => id,
            None => {
                let id = ctx
                    .registry
                    .resolve_owner_id(&self.package_name)
                    .ok_or_else(|| {
                        reject(format!("invalid owner id for package {}", self.package_name))
                    })?;
                TraceEvent::OwnerResolved {
                    package_name: self.package_name.clone(),
                    owner_id: id,
                }
                .emit();
                id
            }
        };

        let session_id = match (self.session_id, self.service_name.as_deref()) {
            (Some(id), _) => id,
            (None, Some(service)) if !service.is_empty() => {
                resolve_session_id(ctx, self.token_type, &self.package_name, service)?
            }
            (None, _) => return Err(reject("ID shouldn't be null")),
        };

        Ok(SessionToken {
            owner_id,
            token_type: self.token_type,
            package_name: self.package_name,
            service_name: self.service_name,
            session_id,
            handle: self.handle,
        })
    }
}

/// Look up the session id a service component declares in its metadata.
fn resolve_session_id(
    ctx: &TokenContext,
    token_type: TokenType,
    package_name: &str,
    service_name: &str,
) -> Result<String> {
    let action = token_type
        .service_action(&ctx.resolution)
        .map_err(|_| reject("invalid type"))?;

    let component = ctx.registry.find_component(action, package_name, service_name);
    let session_id =
        session_id_from_component(component.as_ref(), &ctx.resolution.metadata_key)
            .ok_or_else(|| {
                reject(format!("service {service_name} doesn't implement {action}"))
            })?;

    TraceEvent::SessionIdResolved {
        package_name: package_name.to_owned(),
        service_name: service_name.to_owned(),
        action: action.to_owned(),
        session_id: session_id.clone(),
    }
    .emit();

    Ok(session_id)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
