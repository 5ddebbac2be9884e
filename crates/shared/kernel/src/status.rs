use std::fmt;

/// Unit status reported by a component or a whole charm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Active,
    Waiting(String),
    Blocked(String),
    Maintenance(String),
    Error(String),
}

impl Status {
    pub fn waiting(message: impl Into<String>) -> Self {
        Self::Waiting(message.into())
    }

    pub fn blocked(message: impl Into<String>) -> Self {
        Self::Blocked(message.into())
    }

    pub fn maintenance(message: impl Into<String>) -> Self {
        Self::Maintenance(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Higher wins when several components report at once.
    #[must_use]
    pub const fn priority(&self) -> u8 {
        match self {
            Self::Active => 0,
            Self::Waiting(_) => 1,
            Self::Maintenance(_) => 2,
            Self::Blocked(_) => 3,
            Self::Error(_) => 4,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Waiting(_) => "waiting",
            Self::Blocked(_) => "blocked",
            Self::Maintenance(_) => "maintenance",
            Self::Error(_) => "error",
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Active => "",
            Self::Waiting(m) | Self::Blocked(m) | Self::Maintenance(m) | Self::Error(m) => m,
        }
    }

    /// The highest-priority status, or [`Status::Active`] when empty.
    /// Ties keep the first one seen.
    pub fn worst<'a>(statuses: impl IntoIterator<Item = &'a Self>) -> Self {
        statuses
            .into_iter()
            .fold(None::<&Self>, |worst, s| match worst {
                Some(w) if w.priority() >= s.priority() => Some(w),
                _ => Some(s),
            })
            .cloned()
            .unwrap_or(Self::Active)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            _ => write!(f, "{}: {}", self.name(), self.message()),
        }
    }
}
