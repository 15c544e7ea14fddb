//! Outbound adapters for the catalog's sibling services.
//!
//! Every call resolves the target through the service registry, opens a
//! fresh gRPC transport, performs one typed unary call, and closes the
//! transport again:
//! - SSO: bearer token validation and token → user id
//! - SEO: records attached to catalog entities
//! - Banner: banners and their slides

pub mod banner;
pub mod call;
pub mod error;
pub mod identity;
pub mod proto;
pub mod seo;
pub mod transport;

pub use banner::{BannerClient, BannerPublisher, InMemoryBannerPublisher};
pub use call::RemoteCaller;
pub use error::RemoteError;
pub use identity::{IdentityProvider, InMemoryIdentity, SsoClient};
pub use seo::{InMemorySeoPublisher, SeoClient, SeoPublisher};
pub use transport::{DialError, Dialer, GrpcChannel, GrpcDialer, RpcChannel};
