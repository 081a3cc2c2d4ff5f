//! Common Test Utilities
//!
//! Recording fakes for every monitor collaborator, plus a harness that
//! wires them into a `SessionMonitor` with test-sized thresholds.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use parking_lot::Mutex;
use tokio::sync::mpsc;

use session_monitor::application::SessionMonitor;
use session_monitor::config::{AbsoluteSettings, ActivitySettings, InactivitySettings, Settings};
use session_monitor::domain::{
    ActivityEvent, ActivitySource, ConfirmationPrompt, CredentialStore, Navigator, SessionGateway,
    SessionInfo, WarningKind,
};
use session_monitor::shared::error::MonitorError;

/// Activity source whose events the test emits by hand.
#[derive(Default)]
pub struct FakeActivitySource {
    feed: Mutex<Option<mpsc::UnboundedSender<ActivityEvent>>>,
}

impl FakeActivitySource {
    pub fn emit(&self, event: ActivityEvent) {
        if let Some(tx) = self.feed.lock().as_ref() {
            let _ = tx.send(event);
        }
    }

    /// Whether the monitor still holds a live subscription.
    pub fn subscribed(&self) -> bool {
        self.feed
            .lock()
            .as_ref()
            .map(|tx| !tx.is_closed())
            .unwrap_or(false)
    }
}

impl ActivitySource for FakeActivitySource {
    fn subscribe(&self) -> mpsc::UnboundedReceiver<ActivityEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        *self.feed.lock() = Some(tx);
        rx
    }
}

/// Gateway returning a scripted session-info response and counting logouts.
pub struct FakeGateway {
    /// Milliseconds from "now" to the reported expiration; None scripts a
    /// fetch failure
    expires_in_ms: Option<i64>,
    pub logout_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
}

impl FakeGateway {
    pub fn expiring_in_ms(ms: i64) -> Self {
        Self {
            expires_in_ms: Some(ms),
            logout_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            expires_in_ms: None,
            logout_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    pub fn logouts(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionGateway for FakeGateway {
    async fn fetch_session_info(&self) -> Result<SessionInfo, MonitorError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        match self.expires_in_ms {
            Some(ms) => {
                let now = Utc::now();
                Ok(SessionInfo::new(
                    now - ChronoDuration::minutes(5),
                    now + ChronoDuration::milliseconds(ms),
                ))
            }
            None => Err(MonitorError::Gateway("session-info endpoint down".into())),
        }
    }

    async fn logout(&self) -> Result<(), MonitorError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Credential store seeded with a decodable token; records clears.
pub struct FakeCredentialStore {
    token: Mutex<Option<String>>,
    pub clear_calls: AtomicUsize,
}

impl FakeCredentialStore {
    pub fn with_valid_token() -> Self {
        Self {
            token: Mutex::new(Some(make_token(3600))),
            clear_calls: AtomicUsize::new(0),
        }
    }

    pub fn clears(&self) -> usize {
        self.clear_calls.load(Ordering::SeqCst)
    }

    /// Simulate a fresh login.
    pub fn set_token(&self, token: String) {
        *self.token.lock() = Some(token);
    }
}

impl CredentialStore for FakeCredentialStore {
    fn access_token(&self) -> Option<String> {
        self.token.lock().clone()
    }

    fn clear_session(&self) {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        *self.token.lock() = None;
    }
}

/// Navigation recorder.
#[derive(Default)]
pub struct FakeNavigator {
    pub redirect_calls: AtomicUsize,
}

impl FakeNavigator {
    pub fn redirects(&self) -> usize {
        self.redirect_calls.load(Ordering::SeqCst)
    }
}

impl Navigator for FakeNavigator {
    fn redirect_to_entry(&self) {
        self.redirect_calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// Scripted warning-dialog behavior.
#[derive(Clone, Copy)]
pub enum PromptScript {
    /// Dialog never answered; the countdown decides
    Never,
    /// Answer "stay active" after the given delay
    StayAfter(Duration),
    /// Answer "log out now" immediately
    LogoutNow,
}

pub struct FakePrompt {
    script: PromptScript,
    pub calls: AtomicUsize,
}

impl FakePrompt {
    pub fn new(script: PromptScript) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn shown(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfirmationPrompt for FakePrompt {
    async fn confirm_stay_active(&self, _kind: WarningKind) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.script {
            PromptScript::Never => std::future::pending().await,
            PromptScript::StayAfter(delay) => {
                tokio::time::sleep(delay).await;
                true
            }
            PromptScript::LogoutNow => false,
        }
    }
}

/// Millisecond-resolution settings for fast deterministic tests. The
/// config structs use whole seconds like production; tests scale up.
pub fn test_settings(
    warning_after_secs: u64,
    response_window_secs: u64,
    warning_lead_secs: u64,
) -> Settings {
    Settings {
        activity: ActivitySettings { debounce_ms: 100 },
        inactivity: InactivitySettings {
            warning_after_secs,
            response_window_secs,
        },
        absolute: AbsoluteSettings { warning_lead_secs },
        environment: "test".into(),
    }
}

/// Encode a decodable (unsigned-trusted) access token expiring in `secs`.
pub fn make_token(secs: i64) -> String {
    #[derive(serde::Serialize)]
    struct Claims {
        sub: String,
        exp: i64,
        iat: i64,
    }
    let now = Utc::now().timestamp();
    encode(
        &Header::default(),
        &Claims {
            sub: "viewer-1".into(),
            exp: now + secs,
            iat: now,
        },
        &EncodingKey::from_secret(b"test-secret"),
    )
    .unwrap()
}

/// Fully wired monitor plus handles on every fake.
pub struct Harness {
    pub monitor: SessionMonitor,
    pub source: Arc<FakeActivitySource>,
    pub gateway: Arc<FakeGateway>,
    pub credentials: Arc<FakeCredentialStore>,
    pub navigator: Arc<FakeNavigator>,
    pub prompt: Arc<FakePrompt>,
}

impl Harness {
    pub fn new(settings: Settings, gateway: FakeGateway, script: PromptScript) -> Self {
        let source = Arc::new(FakeActivitySource::default());
        let gateway = Arc::new(gateway);
        let credentials = Arc::new(FakeCredentialStore::with_valid_token());
        let navigator = Arc::new(FakeNavigator::default());
        let prompt = Arc::new(FakePrompt::new(script));

        let monitor = SessionMonitor::new(
            settings,
            source.clone(),
            gateway.clone(),
            prompt.clone(),
            credentials.clone(),
            navigator.clone(),
        );

        Self {
            monitor,
            source,
            gateway,
            credentials,
            navigator,
            prompt,
        }
    }

    /// Teardown happened exactly once across both subsystems.
    pub fn assert_torn_down_once(&self) {
        assert_eq!(self.gateway.logouts(), 1, "logout call count");
        assert_eq!(self.credentials.clears(), 1, "storage clear count");
        assert_eq!(self.navigator.redirects(), 1, "redirect count");
        assert!(!self.monitor.is_monitoring());
    }

    /// No teardown side effect has occurred.
    pub fn assert_not_torn_down(&self) {
        assert_eq!(self.gateway.logouts(), 0, "logout call count");
        assert_eq!(self.credentials.clears(), 0, "storage clear count");
        assert_eq!(self.navigator.redirects(), 0, "redirect count");
    }
}
