// Load state + stale-result guard shared by the list and dashboard views.

use crate::client::FetchError;

/// Identifies one fetch. Only the most recently issued ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(v) => Some(v),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct Fetcher<T> {
    state: LoadState<T>,
    latest: u64,
    error_prefix: &'static str,
}

impl<T> Fetcher<T> {
    pub fn new(error_prefix: &'static str) -> Self {
        Fetcher {
            state: LoadState::Loading,
            latest: 0,
            error_prefix,
        }
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    /// Start a fetch; any ticket handed out earlier becomes stale.
    pub fn begin(&mut self) -> FetchTicket {
        self.latest += 1;
        self.state = LoadState::Loading;
        FetchTicket(self.latest)
    }

    /// Apply a finished fetch. Returns `false` (and changes nothing) when the
    /// ticket has been superseded.
    pub fn finish(&mut self, ticket: FetchTicket, result: Result<T, FetchError>) -> bool {
        if ticket.0 != self.latest {
            tracing::debug!(stale = ticket.0, latest = self.latest, "dropping stale fetch result");
            return false;
        }

        self.state = match result {
            Ok(value) => LoadState::Loaded(value),
            Err(e) => {
                tracing::warn!(error = %e, "{}", self.error_prefix);
                LoadState::Failed(format!("{}: {}", self.error_prefix, e))
            }
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_loading() {
        let fetcher: Fetcher<u32> = Fetcher::new("Failed");
        assert!(fetcher.state().is_loading());
    }

    #[test]
    fn test_stale_result_ignored() {
        let mut fetcher = Fetcher::new("Failed");
        let old = fetcher.begin();
        let new = fetcher.begin();

        assert!(fetcher.finish(new, Ok(2)));
        assert!(!fetcher.finish(old, Ok(1)));
        assert_eq!(fetcher.state().loaded(), Some(&2));
    }

    #[test]
    fn test_stale_failure_does_not_clobber() {
        let mut fetcher = Fetcher::new("Failed");
        let old = fetcher.begin();
        let new = fetcher.begin();

        assert!(!fetcher.finish(old, Err(FetchError::Network("down".into()))));
        assert!(fetcher.state().is_loading());
        assert!(fetcher.finish(new, Ok(7)));
        assert_eq!(fetcher.state().loaded(), Some(&7));
    }

    #[test]
    fn test_failure_message_visible() {
        let mut fetcher: Fetcher<u32> = Fetcher::new("Failed to load vendors");
        let ticket = fetcher.begin();

        fetcher.finish(ticket, Err(FetchError::Network("connection refused".into())));

        assert_eq!(
            fetcher.state().error(),
            Some("Failed to load vendors: network error: connection refused")
        );
    }
}
