//! 网络构建错误

use crate::rip::RouterId;

use super::id::LinkId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetError {
    #[error("unknown node {0}")]
    UnknownNode(RouterId),

    #[error("unknown link {0:?}")]
    UnknownLink(LinkId),

    #[error("duplicate node name {0:?}")]
    DuplicateName(String),

    #[error("a link from {0} to itself is not allowed")]
    SelfLink(RouterId),

    #[error("{0} and {1} are already connected")]
    DuplicateLink(RouterId, RouterId),

    #[error("host {0} already has a link")]
    HostAlreadyConnected(RouterId),

    #[error("a ring needs at least 2 routers, got {0}")]
    RingTooSmall(usize),
}
