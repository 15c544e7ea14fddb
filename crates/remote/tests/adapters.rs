//! Adapter tests against a scripted in-process transport.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use common::{CallContext, TRACEPARENT, telemetry};
use discovery::StaticResolver;
use domain::{Banner, BannerSlide, Seo};
use prost::Message;
use remote::proto::banner::UpdateBannerMsg;
use remote::proto::seo::SeoMsg;
use remote::proto::sso::{BoolMsg, UserMsg};
use remote::proto::{Empty, ObjectRef};
use remote::{
    BannerClient, BannerPublisher, DialError, Dialer, IdentityProvider, RemoteCaller,
    RemoteError, RpcChannel, SeoClient, SeoPublisher, SsoClient,
};
use tracing::Instrument;
use tracing_subscriber::layer::SubscriberExt;

#[derive(Clone)]
enum Reply {
    Message(Vec<u8>),
    Status(tonic::Code, &'static str),
}

#[derive(Default)]
struct Journal {
    dials: AtomicUsize,
    closes: AtomicUsize,
    addresses: Mutex<Vec<String>>,
    paths: Mutex<Vec<String>>,
    bodies: Mutex<Vec<Vec<u8>>>,
    traceparents: Mutex<Vec<String>>,
    active_spans: Mutex<Vec<Option<String>>>,
}

impl Journal {
    fn dials(&self) -> usize {
        self.dials.load(Ordering::SeqCst)
    }

    fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    fn last_body(&self) -> Vec<u8> {
        self.bodies.lock().unwrap().last().cloned().unwrap()
    }

    fn last_path(&self) -> String {
        self.paths.lock().unwrap().last().cloned().unwrap()
    }
}

#[derive(Clone)]
struct FakeDialer {
    journal: Arc<Journal>,
    reply: Reply,
    refuse: bool,
}

impl FakeDialer {
    fn replying(reply: Reply) -> Self {
        Self {
            journal: Arc::default(),
            reply,
            refuse: false,
        }
    }

    fn refusing() -> Self {
        Self {
            journal: Arc::default(),
            reply: Reply::Message(Vec::new()),
            refuse: true,
        }
    }
}

struct FakeChannel {
    journal: Arc<Journal>,
    reply: Reply,
}

#[async_trait]
impl Dialer for FakeDialer {
    type Channel = FakeChannel;

    async fn dial(&self, address: &str) -> Result<FakeChannel, DialError> {
        self.journal.dials.fetch_add(1, Ordering::SeqCst);
        self.journal
            .addresses
            .lock()
            .unwrap()
            .push(address.to_string());
        if self.refuse {
            return Err("connection refused".into());
        }
        Ok(FakeChannel {
            journal: self.journal.clone(),
            reply: self.reply.clone(),
        })
    }
}

#[async_trait]
impl RpcChannel for FakeChannel {
    async fn unary<Req, Resp>(
        &mut self,
        path: &'static str,
        request: tonic::Request<Req>,
    ) -> Result<Resp, tonic::Status>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        self.journal.paths.lock().unwrap().push(path.to_string());
        if let Some(value) = request.metadata().get(TRACEPARENT) {
            self.journal
                .traceparents
                .lock()
                .unwrap()
                .push(value.to_str().unwrap().to_string());
        }
        self.journal
            .active_spans
            .lock()
            .unwrap()
            .push(telemetry::traceparent(&tracing::Span::current()));
        self.journal
            .bodies
            .lock()
            .unwrap()
            .push(request.get_ref().encode_to_vec());

        match &self.reply {
            Reply::Message(bytes) => Resp::decode(bytes.as_slice())
                .map_err(|e| tonic::Status::internal(e.to_string())),
            Reply::Status(code, message) => Err(tonic::Status::new(*code, *message)),
        }
    }

    fn close(self) {
        self.journal.closes.fetch_add(1, Ordering::SeqCst);
    }
}

fn registry() -> StaticResolver {
    StaticResolver::from_slice(&[
        ("sso", "10.0.0.1:50051"),
        ("seo", "10.0.0.2:50052"),
        ("banner", "10.0.0.3:50053"),
    ])
}

fn sso(dialer: FakeDialer) -> SsoClient<StaticResolver, FakeDialer> {
    SsoClient::new(RemoteCaller::new(registry(), dialer), "sso")
}

#[tokio::test]
async fn resolve_token_opens_and_closes_one_transport() {
    let user = UserMsg {
        id: "6f1c9a52-6d0e-4c59-9a4e-0f4e7c1d2b3a".to_string(),
    };
    let dialer = FakeDialer::replying(Reply::Message(user.encode_to_vec()));
    let journal = dialer.journal.clone();

    let id = sso(dialer)
        .resolve_token(&CallContext::background(), "tok")
        .await
        .unwrap();

    assert_eq!(id, user.id);
    assert_eq!(journal.dials(), 1);
    assert_eq!(journal.closes(), 1);
    assert_eq!(journal.addresses.lock().unwrap().as_slice(), ["10.0.0.1:50051"]);
    assert_eq!(journal.last_path(), "/sso.SSO/GetUserByToken");
}

#[tokio::test]
async fn validate_token_reads_the_flag() {
    let dialer = FakeDialer::replying(Reply::Message(BoolMsg { valid: true }.encode_to_vec()));
    let journal = dialer.journal.clone();

    let valid = sso(dialer)
        .validate_token(&CallContext::background(), "tok")
        .await
        .unwrap();

    assert!(valid);
    assert_eq!(journal.last_path(), "/sso.SSO/ValidateToken");
}

#[tokio::test]
async fn remote_status_still_closes_the_transport() {
    let dialer = FakeDialer::replying(Reply::Status(tonic::Code::Unauthenticated, "token expired"));
    let journal = dialer.journal.clone();

    let err = sso(dialer)
        .resolve_token(&CallContext::background(), "tok")
        .await
        .unwrap_err();

    assert!(matches!(err, RemoteError::Remote(_)));
    assert_eq!(err.to_string(), "token expired");
    assert_eq!(journal.dials(), 1);
    assert_eq!(journal.closes(), 1);
}

#[tokio::test]
async fn unresolvable_service_never_dials() {
    let dialer = FakeDialer::replying(Reply::Message(Vec::new()));
    let journal = dialer.journal.clone();
    let client = SsoClient::new(RemoteCaller::new(StaticResolver::default(), dialer), "sso");

    let err = client
        .resolve_token(&CallContext::background(), "tok")
        .await
        .unwrap_err();

    assert!(matches!(err, RemoteError::NotFoundSvc { ref service } if service == "sso"));
    assert_eq!(journal.dials(), 0);
    assert_eq!(journal.closes(), 0);
}

#[tokio::test]
async fn refused_dial_is_create_client() {
    let dialer = FakeDialer::refusing();
    let journal = dialer.journal.clone();

    let err = sso(dialer)
        .resolve_token(&CallContext::background(), "tok")
        .await
        .unwrap_err();

    assert!(matches!(err, RemoteError::CreateClient { ref service, .. } if service == "sso"));
    assert_eq!(journal.dials(), 1);
    assert_eq!(journal.closes(), 0);
    assert!(journal.paths.lock().unwrap().is_empty());
}

#[tokio::test]
async fn outbound_calls_carry_the_adapter_span() {
    let subscriber = tracing_subscriber::registry().with(telemetry::layer("remote-test"));
    let _guard = tracing::subscriber::set_default(subscriber);
    let dialer = FakeDialer::replying(Reply::Message(Vec::new()));
    let journal = dialer.journal.clone();
    let request_span = tracing::info_span!("http.request");
    let request_traceparent = telemetry::traceparent(&request_span).unwrap();

    let client = sso(dialer);
    async { client.resolve_token(&CallContext::background(), "tok").await }
        .instrument(request_span)
        .await
        .unwrap();

    let sent = journal.traceparents.lock().unwrap()[0].clone();
    let adapter = journal.active_spans.lock().unwrap()[0].clone();
    assert_eq!(Some(sent.clone()), adapter);
    assert_ne!(sent, request_traceparent);
    // same trace id, new span id
    assert_eq!(sent[..35], request_traceparent[..35]);
}

#[tokio::test]
async fn outbound_calls_without_span_context_send_no_traceparent() {
    let dialer = FakeDialer::replying(Reply::Message(Vec::new()));
    let journal = dialer.journal.clone();

    sso(dialer)
        .resolve_token(&CallContext::background(), "tok")
        .await
        .unwrap();

    assert!(journal.traceparents.lock().unwrap().is_empty());
}

#[tokio::test]
async fn seo_create_attaches_the_object_reference() {
    let dialer = FakeDialer::replying(Reply::Message(Empty {}.encode_to_vec()));
    let journal = dialer.journal.clone();
    let client = SeoClient::new(RemoteCaller::new(registry(), dialer), "seo");
    let seo = Seo {
        title: "Kitchen".to_string(),
        keywords: "pans, pots".to_string(),
        ..Seo::default()
    };

    client
        .create(&CallContext::background(), "category", "kitchen", seo)
        .await
        .unwrap();

    assert_eq!(journal.last_path(), "/seo.SEO/CreateSEO");
    let sent = SeoMsg::decode(journal.last_body().as_slice()).unwrap();
    assert_eq!(sent.title, "Kitchen");
    assert_eq!(sent.keywords, "pans, pots");
    assert_eq!(sent.obj_name, "category");
    assert_eq!(sent.obj_pk, "kitchen");
    assert_eq!(journal.closes(), 1);
}

#[tokio::test]
async fn seo_delete_sends_name_and_pk() {
    let dialer = FakeDialer::replying(Reply::Message(Vec::new()));
    let journal = dialer.journal.clone();
    let client = SeoClient::new(RemoteCaller::new(registry(), dialer), "seo");

    client
        .delete(&CallContext::background(), "item", "42")
        .await
        .unwrap();

    assert_eq!(journal.last_path(), "/seo.SEO/DeleteSEO");
    let sent = ObjectRef::decode(journal.last_body().as_slice()).unwrap();
    assert_eq!(sent.name, "item");
    assert_eq!(sent.pk, "42");
}

#[tokio::test]
async fn banner_update_wraps_the_banner() {
    let dialer = FakeDialer::replying(Reply::Message(Vec::new()));
    let journal = dialer.journal.clone();
    let client = BannerClient::new(RemoteCaller::new(registry(), dialer), "banner");
    let at = Utc.timestamp_opt(1_700_000_000, 500).unwrap();
    let banner = Banner {
        slides: vec![BannerSlide {
            id: 1,
            title: "Sale".to_string(),
            description: String::new(),
            src: "sale.png".to_string(),
            alt: String::new(),
            button_text: String::new(),
            button_href: String::new(),
            banner_id: 9,
            created_at: at,
            updated_at: at,
        }],
    };

    client
        .update(&CallContext::background(), "promotion", "spring", banner)
        .await
        .unwrap();

    assert_eq!(journal.addresses.lock().unwrap().as_slice(), ["10.0.0.3:50053"]);
    assert_eq!(journal.last_path(), "/banner.Banner/UpdateBanner");
    let sent = UpdateBannerMsg::decode(journal.last_body().as_slice()).unwrap();
    assert_eq!(sent.name, "promotion");
    assert_eq!(sent.pk, "spring");
    let inner = sent.banner.unwrap();
    assert_eq!(inner.slides.len(), 1);
    assert_eq!(inner.slides[0].src, "sale.png");
    assert_eq!(inner.slides[0].created_at.as_ref().unwrap().nanos, 500);
}
