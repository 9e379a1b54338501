//! End-to-end: resolve tokens against a config-driven registry, ship them
//! as JSON records, and restore them on the "other side".

use std::collections::HashSet;
use std::sync::Arc;

use mt_domain::config::Config;
use mt_domain::Error;
use mt_token::{
    EndpointId, HandleAdapter, HandleTable, RawHandle, SessionHandle, SessionToken, TokenContext,
    TokenType, TransferRecord,
};

const CONFIG: &str = r#"
[resolution]
metadata_key = "media.session.id"

[[registry.packages]]
name = "com.example.player"
uid = 10042

[[registry.packages.services]]
name = "PlaybackService"
actions = ["media.session.SessionService"]
metadata = { "media.session.id" = "playback" }

[[registry.packages.services]]
name = "LibraryService"
actions = ["media.session.LibraryService"]
"#;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

fn context() -> TokenContext {
    init_tracing();
    let config = Config::from_toml_str(CONFIG).unwrap();
    assert!(config.validate().is_empty());
    TokenContext::from_config(&config)
}

#[derive(Debug)]
struct LocalSession {
    raw: u64,
}

impl SessionHandle for LocalSession {
    fn endpoint(&self) -> EndpointId {
        EndpointId(self.raw)
    }

    fn raw_handle(&self) -> Option<RawHandle> {
        Some(RawHandle(self.raw))
    }
}

fn ship(token: &SessionToken) -> TransferRecord {
    let json = token.to_record().to_json().unwrap();
    TransferRecord::from_json(&json).unwrap()
}

#[test]
fn session_service_resolves_owner_and_id() {
    let ctx = context();
    let token = SessionToken::builder(TokenType::SessionService, "com.example.player")
        .service_name("PlaybackService")
        .build(&ctx)
        .unwrap();
    assert_eq!(token.owner_id(), 10042);
    assert_eq!(token.session_id(), "playback");
    assert!(token.handle().is_none());
}

#[test]
fn library_service_without_metadata_has_empty_id() {
    let ctx = context();
    let token = SessionToken::builder(TokenType::LibraryService, "com.example.player")
        .service_name("LibraryService")
        .build(&ctx)
        .unwrap();
    assert_eq!(token.session_id(), "");
}

#[test]
fn service_under_wrong_action_is_rejected() {
    let ctx = context();
    let err = SessionToken::builder(TokenType::LibraryService, "com.example.player")
        .service_name("PlaybackService")
        .build(&ctx)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn unknown_package_is_rejected() {
    let ctx = context();
    let err = SessionToken::builder(TokenType::Session, "com.example.ghost")
        .session_id("main")
        .build(&ctx)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn service_token_survives_json_transfer() {
    let ctx = context();
    let token = SessionToken::builder(TokenType::SessionService, "com.example.player")
        .service_name("PlaybackService")
        .build(&ctx)
        .unwrap();
    let restored = SessionToken::from_record(Some(&ship(&token)), &ctx)
        .unwrap()
        .unwrap();
    assert_eq!(restored, token);
    assert_eq!(restored.identity_hash(), token.identity_hash());
    assert_eq!(restored.service_name(), Some("PlaybackService"));
}

#[test]
fn remote_session_restores_as_equal_proxy() {
    let ctx = context();
    let local: Arc<dyn SessionHandle> = Arc::new(LocalSession { raw: 0xbeef });
    let token = SessionToken::builder(TokenType::Session, "com.example.player")
        .session_id("main")
        .handle(local.clone())
        .build(&ctx)
        .unwrap();

    let restored = SessionToken::from_record(Some(&ship(&token)), &ctx)
        .unwrap()
        .unwrap();
    assert!(!Arc::ptr_eq(restored.handle().unwrap(), &local));
    assert_eq!(restored, token);

    let set: HashSet<SessionToken> = [token, restored].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn local_session_restores_identical_handle() {
    let table = Arc::new(HandleTable::new());
    let local: Arc<dyn SessionHandle> = Arc::new(LocalSession { raw: 31 });
    table.publish(RawHandle(31), local.clone());

    let mut ctx = context();
    ctx.adapter = table.clone() as Arc<dyn HandleAdapter>;

    let token = SessionToken::builder(TokenType::Session, "com.example.player")
        .owner_id(10042)
        .session_id("main")
        .handle(local.clone())
        .build(&ctx)
        .unwrap();
    let restored = SessionToken::from_record(Some(&token.to_record()), &ctx)
        .unwrap()
        .unwrap();
    assert!(Arc::ptr_eq(restored.handle().unwrap(), &local));
    assert_eq!(restored, token);

    table.withdraw(RawHandle(31));
    let proxied = SessionToken::from_record(Some(&token.to_record()), &ctx)
        .unwrap()
        .unwrap();
    assert!(!Arc::ptr_eq(proxied.handle().unwrap(), &local));
    assert_eq!(proxied, token);
}

#[test]
fn session_record_without_binder_is_rejected() {
    let ctx = context();
    let record = TransferRecord::from_json(
        r#"{"uid":10042,"type":0,"package_name":"com.example.player","id":"main"}"#,
    )
    .unwrap();
    let err = SessionToken::from_record(Some(&record), &ctx).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn library_record_with_empty_service_is_rejected() {
    let ctx = context();
    let record = TransferRecord::from_json(
        r#"{"type":2,"package_name":"com.example.player","service_name":"","id":""}"#,
    )
    .unwrap();
    let err = SessionToken::from_record(Some(&record), &ctx).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn absent_record_is_not_an_error() {
    let ctx = context();
    assert!(SessionToken::from_record(None, &ctx).unwrap().is_none());
}
