//! Wire messages and method paths of the sibling services.
//!
//! Field tags match the services' `.proto` definitions.

use prost_types::Timestamp;

/// A unary method: fully-qualified gRPC path plus the span/metric name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Method {
    pub path: &'static str,
    pub operation: &'static str,
}

pub mod sso {
    use super::Method;

    pub const VALIDATE_TOKEN: Method = Method {
        path: "/sso.SSO/ValidateToken",
        operation: "sso.validate_token.adapter",
    };
    pub const GET_USER_BY_TOKEN: Method = Method {
        path: "/sso.SSO/GetUserByToken",
        operation: "sso.get_user_by_token.adapter",
    };

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct StringMsg {
        #[prost(string, tag = "1")]
        pub string: String,
    }

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct BoolMsg {
        #[prost(bool, tag = "1")]
        pub valid: bool,
    }

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct UserMsg {
        #[prost(string, tag = "1")]
        pub id: String,
    }
}

pub mod seo {
    use super::{Method, ObjectRef};

    pub const CREATE: Method = Method {
        path: "/seo.SEO/CreateSEO",
        operation: "seo.create.adapter",
    };
    pub const UPDATE: Method = Method {
        path: "/seo.SEO/UpdateSEO",
        operation: "seo.update.adapter",
    };
    pub const DELETE: Method = Method {
        path: "/seo.SEO/DeleteSEO",
        operation: "seo.delete.adapter",
    };

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct SeoMsg {
        #[prost(string, tag = "1")]
        pub title: String,
        #[prost(string, tag = "2")]
        pub description: String,
        #[prost(string, tag = "3")]
        pub keywords: String,
        #[prost(string, tag = "4")]
        pub og_title: String,
        #[prost(string, tag = "5")]
        pub og_description: String,
        #[prost(string, tag = "6")]
        pub og_image: String,
        #[prost(string, tag = "7")]
        pub obj_name: String,
        #[prost(string, tag = "8")]
        pub obj_pk: String,
    }

    pub type DeleteSeoMsg = ObjectRef;
}

pub mod banner {
    use super::{Method, ObjectRef, Timestamp};

    pub const CREATE: Method = Method {
        path: "/banner.Banner/CreateBanner",
        operation: "banner.create.adapter",
    };
    pub const UPDATE: Method = Method {
        path: "/banner.Banner/UpdateBanner",
        operation: "banner.update.adapter",
    };
    pub const DELETE: Method = Method {
        path: "/banner.Banner/DeleteBanner",
        operation: "banner.delete.adapter",
    };

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct SlideMsg {
        #[prost(int64, tag = "1")]
        pub id: i64,
        #[prost(string, tag = "2")]
        pub title: String,
        #[prost(string, tag = "3")]
        pub description: String,
        #[prost(string, tag = "4")]
        pub src: String,
        #[prost(string, tag = "5")]
        pub alt: String,
        #[prost(string, tag = "6")]
        pub button_text: String,
        #[prost(string, tag = "7")]
        pub button_href: String,
        #[prost(int64, tag = "8")]
        pub banner_id: i64,
        #[prost(message, optional, tag = "9")]
        pub created_at: Option<Timestamp>,
        #[prost(message, optional, tag = "10")]
        pub updated_at: Option<Timestamp>,
    }

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct BannerMsg {
        #[prost(string, tag = "1")]
        pub obj_name: String,
        #[prost(string, tag = "2")]
        pub obj_pk: String,
        #[prost(message, repeated, tag = "3")]
        pub slides: Vec<SlideMsg>,
    }

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct UpdateBannerMsg {
        #[prost(string, tag = "1")]
        pub name: String,
        #[prost(string, tag = "2")]
        pub pk: String,
        #[prost(message, optional, tag = "3")]
        pub banner: Option<BannerMsg>,
    }

    pub type DeleteBannerMsg = ObjectRef;
}

/// `(name, pk)` pair identifying the entity a record is attached to.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ObjectRef {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub pk: String,
}

/// Response bodies the catalog does not read.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Empty {}
