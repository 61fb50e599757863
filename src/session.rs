//! User action handling
//!
//! A [`Session`] owns the current [`CityDataset`] and the list of cities the
//! user asked to track. Each [`Action`] maps to one dataset operation and
//! yields the notices to show to the user. Errors never end the session.

use std::fmt;

use tracing::{info, instrument, warn};

use crate::WetBulbError;
use crate::dataset::CityDataset;
use crate::weather::WeatherSource;

/// A user request against the tracked cities
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add(String),
    Remove(String),
    /// Re-fetch every tracked city
    Refresh,
}

/// User-visible outcome of an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Info(String),
    Warning(String),
    Error(String),
}

impl Notice {
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Info(m) | Notice::Warning(m) | Notice::Error(m) => m,
        }
    }
}

impl From<&WetBulbError> for Notice {
    fn from(err: &WetBulbError) -> Self {
        match err {
            WetBulbError::AlreadyPresent { .. }
            | WetBulbError::NotPresent { .. }
            | WetBulbError::Validation { .. } => Notice::Warning(err.user_message()),
            _ => Notice::Error(err.user_message()),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Success(m) => write!(f, "✅ {m}"),
            Notice::Info(m) => write!(f, "ℹ️  {m}"),
            Notice::Warning(m) => write!(f, "⚠️  {m}"),
            Notice::Error(m) => write!(f, "❌ {m}"),
        }
    }
}

/// Tracked cities and their latest snapshot
pub struct Session<S> {
    source: S,
    tracked: Vec<String>,
    dataset: CityDataset,
}

impl<S: WeatherSource> Session<S> {
    /// Load `names` and start a session; failed cities are reported but stay tracked
    pub fn start<N: AsRef<str>>(source: S, names: &[N]) -> (Self, Vec<Notice>) {
        let mut tracked: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            if !tracked.iter().any(|t| t == name) {
                tracked.push(name.to_string());
            }
        }

        let report = CityDataset::initialize(&source, &tracked);
        let notices = report.failures.iter().map(Notice::from).collect();

        let session = Self {
            source,
            tracked,
            dataset: report.dataset,
        };
        (session, notices)
    }

    #[must_use]
    pub fn dataset(&self) -> &CityDataset {
        &self.dataset
    }

    /// Cities the user asked for, including those whose last fetch failed
    #[must_use]
    pub fn tracked(&self) -> &[String] {
        &self.tracked
    }

    /// Apply one action and return the notices it produced
    #[instrument(skip(self))]
    pub fn apply(&mut self, action: Action) -> Vec<Notice> {
        let notices = match action {
            Action::Add(name) => vec![self.add(&name)],
            Action::Remove(name) => vec![self.remove(&name)],
            Action::Refresh => self.refresh(),
        };

        for notice in &notices {
            if notice.is_error() {
                warn!("{}", notice.message());
            } else {
                info!("{}", notice.message());
            }
        }
        notices
    }

    fn add(&mut self, name: &str) -> Notice {
        if name.trim().is_empty() {
            return Notice::from(&WetBulbError::validation("city name cannot be empty"));
        }

        match self.dataset.add(&self.source, name) {
            Ok(wet_bulb) => {
                if !self.tracked.iter().any(|t| t == name) {
                    self.tracked.push(name.to_string());
                }
                Notice::Success(format!(
                    "Added {name} to the graph! Wet-bulb temperature: {wet_bulb:.1}°C"
                ))
            }
            Err(e) => Notice::from(&e),
        }
    }

    fn remove(&mut self, name: &str) -> Notice {
        let was_tracked = self.tracked.iter().any(|t| t == name);
        self.tracked.retain(|t| t != name);

        match self.dataset.remove(name) {
            Ok(()) => Notice::Info(format!("Removed {name} from the graph.")),
            Err(_) if was_tracked => {
                Notice::Info(format!("Removed {name} from the tracked cities."))
            }
            Err(e) => Notice::from(&e),
        }
    }

    fn refresh(&mut self) -> Vec<Notice> {
        let failures = self.dataset.refresh(&self.source, &self.tracked);

        let mut notices: Vec<Notice> = failures.iter().map(Notice::from).collect();
        notices.push(Notice::Info(format!(
            "Refreshed {} of {} cities.",
            self.dataset.len(),
            self.tracked.len()
        )));
        notices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;
    use crate::models::Observation;
    use chrono::Utc;
    use std::cell::Cell;

    /// Knows a fixed set of cities; `Goa` is unreachable until `goa_online` is set
    struct CoastSource {
        goa_online: Cell<bool>,
    }

    impl CoastSource {
        fn new() -> Self {
            Self {
                goa_online: Cell::new(false),
            }
        }
    }

    impl WeatherSource for CoastSource {
        fn fetch(&self, city: &str) -> Result<Observation> {
            let (t, rh) = match city {
                "Mumbai" => (30.0, 70.0),
                "Chennai" => (35.0, 90.0),
                "Kolkata" => (20.0, 50.0),
                "Goa" if self.goa_online.get() => (31.0, 75.0),
                _ => return Err(WetBulbError::fetch_failed(city, "city not found")),
            };
            Observation::new(t, rh, Utc::now())
        }
    }

    fn start(names: &[&str]) -> (Session<CoastSource>, Vec<Notice>) {
        Session::start(CoastSource::new(), names)
    }

    #[test]
    fn test_start_reports_failures_and_keeps_tracking() {
        let (session, notices) = start(&["Mumbai", "Goa", "Kolkata"]);
        assert_eq!(session.dataset().names(), vec!["Mumbai", "Kolkata"]);
        assert_eq!(session.tracked(), ["Mumbai", "Goa", "Kolkata"]);
        assert_eq!(notices.len(), 1);
        assert!(notices[0].is_error());
        assert!(notices[0].message().contains("Goa"));
    }

    #[test]
    fn test_add_success() {
        let (mut session, _) = start(&["Mumbai"]);
        let notices = session.apply(Action::Add("Chennai".into()));
        assert!(matches!(&notices[0], Notice::Success(m) if m.contains("Added Chennai")));
        assert_eq!(session.tracked(), ["Mumbai", "Chennai"]);
    }

    #[test]
    fn test_add_duplicate_warns() {
        let (mut session, _) = start(&["Mumbai"]);
        let notices = session.apply(Action::Add("Mumbai".into()));
        assert_eq!(
            notices,
            vec![Notice::Warning("Mumbai is already in the graph.".into())]
        );
        assert_eq!(session.dataset().len(), 1);
    }

    #[test]
    fn test_add_unknown_city_errors_and_is_not_tracked() {
        let (mut session, _) = start(&["Mumbai"]);
        let notices = session.apply(Action::Add("Atlantis".into()));
        assert!(notices[0].is_error());
        assert_eq!(session.tracked(), ["Mumbai"]);
    }

    #[test]
    fn test_add_blank_name_warns() {
        let (mut session, _) = start(&["Mumbai"]);
        let notices = session.apply(Action::Add("  ".into()));
        assert!(matches!(notices[0], Notice::Warning(_)));
    }

    #[test]
    fn test_remove_present_and_absent() {
        let (mut session, _) = start(&["Mumbai", "Kolkata"]);
        let notices = session.apply(Action::Remove("Mumbai".into()));
        assert_eq!(
            notices,
            vec![Notice::Info("Removed Mumbai from the graph.".into())]
        );
        assert_eq!(session.dataset().names(), vec!["Kolkata"]);

        let notices = session.apply(Action::Remove("Delhi".into()));
        assert!(matches!(&notices[0], Notice::Warning(m) if m.contains("not in the graph")));
        assert_eq!(session.dataset().names(), vec!["Kolkata"]);
    }

    #[test]
    fn test_remove_unresolved_tracked_city() {
        let (mut session, _) = start(&["Mumbai", "Goa"]);
        let notices = session.apply(Action::Remove("Goa".into()));
        assert!(matches!(notices[0], Notice::Info(_)));
        assert_eq!(session.tracked(), ["Mumbai"]);
    }

    #[test]
    fn test_refresh_picks_up_recovered_city() {
        let (mut session, _) = start(&["Mumbai", "Goa", "Chennai"]);
        assert_eq!(session.dataset().len(), 2);

        let notices = session.apply(Action::Refresh);
        assert_eq!(notices.len(), 2);
        assert!(notices[0].is_error());
        assert_eq!(session.dataset().names(), vec!["Mumbai", "Chennai"]);

        session.source.goa_online.set(true);
        let notices = session.apply(Action::Refresh);
        assert_eq!(
            notices,
            vec![Notice::Info("Refreshed 3 of 3 cities.".into())]
        );
        assert_eq!(session.dataset().names(), vec!["Mumbai", "Goa", "Chennai"]);
    }

    #[test]
    fn test_notice_display() {
        assert_eq!(Notice::Success("ok".into()).to_string(), "✅ ok");
        assert_eq!(Notice::Error("bad".into()).to_string(), "❌ bad");
    }
}
