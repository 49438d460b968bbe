//! Test utilities for the authgate crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`). Only
//! compiled for tests or with the `test-support` feature.

pub mod keys {
    //! RSA fixture keys checked in under `tests/fixtures/keys/`.
    //!
    //! `SIGNING_*` is the pair the test servers trust. `FOREIGN_*` is an
    //! unrelated pair used to forge tokens.

    pub const SIGNING_PRIVATE_PEM: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/keys/signing-private.pem"
    ));
    pub const SIGNING_PUBLIC_PEM: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/keys/signing-public.pem"
    ));
    pub const FOREIGN_PRIVATE_PEM: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/keys/foreign-private.pem"
    ));
    pub const FOREIGN_PUBLIC_PEM: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/keys/foreign-public.pem"
    ));
}

pub mod clock {
    //! Deterministic clocks.

    use std::sync::{Arc, Mutex, PoisonError};

    use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
    use mockable::Clock;

    /// Fixed instant most fixtures are anchored on.
    pub fn fixture_timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0)
            .single()
            .unwrap_or_default()
    }

    /// Clock frozen at an instant that tests may move forward.
    #[derive(Debug)]
    pub struct FixtureClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl FixtureClock {
        /// Freeze the clock at `now`.
        pub fn at(now: DateTime<Utc>) -> Arc<Self> {
            Arc::new(Self {
                now: Mutex::new(now),
            })
        }

        /// Move the clock forward by `delta`.
        pub fn advance(&self, delta: TimeDelta) {
            let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
            *now += delta;
        }
    }

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }
}
