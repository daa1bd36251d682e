use congregate_core::UserId;

/// Identity of the caller as seen by the gating engine.
///
/// A `Viewer` states only *who* is asking, never what they may do; roles and
/// capabilities are resolved per organization downstream. This is an
/// immutable value attached to the request context, never a global.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    Authenticated { user_id: UserId },
}

impl Viewer {
    pub fn authenticated(user_id: UserId) -> Self {
        Self::Authenticated { user_id }
    }

    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Viewer::Anonymous => None,
            Viewer::Authenticated { user_id } => Some(*user_id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Viewer::Authenticated { .. })
    }
}
