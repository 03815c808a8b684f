use acommon::BoxFuture;

use crate::{UserStats, WellbeingEntry, WellbeingError};

pub trait WellbeingStore: Send + Sync {
    fn stats<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, Result<UserStats, WellbeingError>>;

    fn record<'a>(&'a self, entry: WellbeingEntry) -> BoxFuture<'a, Result<(), WellbeingError>>;
}

/// Which backend served a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Api,
    Local,
}

impl DataSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Local => "local",
        }
    }
}
