//! CheckoutService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use stars_types::{
        AppError, CatalogError, CheckoutRequest, GatewayError, NewCheckoutSession, PaymentGateway,
        ProviderSession, Trip, TripCatalog, TripId,
    };

    use crate::service::{
        INVALID_DEPARTURE_DATE, MISSING_FIELDS, SESSION_WITHOUT_URL, TRIP_LOOKUP_FAILED,
        TRIP_NOT_FOUND, Timeouts,
    };
    use crate::CheckoutService;

    pub fn lunar_getaway() -> Trip {
        Trip {
            id: TripId::new("t1"),
            title: "Lunar Getaway".into(),
            description: "A week in lunar orbit".into(),
            duration: "7 days".into(),
            price: 250000,
            image_url: "https://images.example.com/moon.jpg".into(),
            available_seats: 12,
            departure_dates: vec!["2025-06-01".into(), "2025-07-01".into()],
            created_at: None,
        }
    }

    /// In-memory catalog for testing the service layer.
    pub struct MockCatalog {
        trips: Mutex<HashMap<TripId, Trip>>,
        failing: bool,
        delay: Option<Duration>,
        reads: AtomicUsize,
    }

    impl MockCatalog {
        pub fn new() -> Self {
            Self {
                trips: Mutex::new(HashMap::new()),
                failing: false,
                delay: None,
                reads: AtomicUsize::new(0),
            }
        }

        pub fn with_trip(self, trip: Trip) -> Self {
            self.trips.lock().unwrap().insert(trip.id.clone(), trip);
            self
        }

        pub fn failing() -> Self {
            Self {
                failing: true,
                ..Self::new()
            }
        }

        pub fn slow(delay: Duration) -> Self {
            Self {
                delay: Some(delay),
                ..Self::new()
            }
        }

        pub fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TripCatalog for MockCatalog {
        async fn get_trip(&self, id: &TripId) -> Result<Option<Trip>, CatalogError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.failing {
                return Err(CatalogError::Transport("connection refused".into()));
            }
            Ok(self.trips.lock().unwrap().get(id).cloned())
        }

        async fn list_trips(&self) -> Result<Vec<Trip>, CatalogError> {
            if self.failing {
                return Err(CatalogError::Transport("connection refused".into()));
            }
            let mut trips: Vec<Trip> = self.trips.lock().unwrap().values().cloned().collect();
            trips.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            Ok(trips)
        }
    }

    enum GatewayBehaviour {
        Succeed,
        NoUrl,
        Fail(String),
        Hang,
    }

    /// Gateway that records every request and issues a fresh URL per call.
    pub struct MockGateway {
        behaviour: GatewayBehaviour,
        requests: Mutex<Vec<NewCheckoutSession>>,
        counter: AtomicUsize,
    }

    impl MockGateway {
        fn with(behaviour: GatewayBehaviour) -> Self {
            Self {
                behaviour,
                requests: Mutex::new(Vec::new()),
                counter: AtomicUsize::new(0),
            }
        }

        pub fn new() -> Self {
            Self::with(GatewayBehaviour::Succeed)
        }

        pub fn requests(&self) -> Vec<NewCheckoutSession> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PaymentGateway for MockGateway {
        async fn create_checkout_session(
            &self,
            session: &NewCheckoutSession,
        ) -> Result<ProviderSession, GatewayError> {
            self.requests.lock().unwrap().push(session.clone());
            let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
            let id = format!("cs_test_{}", n);
            match &self.behaviour {
                GatewayBehaviour::Succeed => Ok(ProviderSession {
                    url: Some(format!("https://checkout.stripe.com/c/pay/{}", id)),
                    id,
                }),
                GatewayBehaviour::NoUrl => Ok(ProviderSession { id, url: None }),
                GatewayBehaviour::Fail(message) => Err(GatewayError::Api {
                    status: 402,
                    message: message.clone(),
                }),
                GatewayBehaviour::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    unreachable!("provider call should have timed out")
                }
            }
        }
    }

    fn service() -> CheckoutService<MockCatalog, MockGateway> {
        CheckoutService::new(MockCatalog::new().with_trip(lunar_getaway()), MockGateway::new())
    }

    fn short_timeouts() -> Timeouts {
        Timeouts {
            catalog: Duration::from_millis(50),
            provider: Duration::from_millis(50),
        }
    }

    #[tokio::test]
    async fn test_valid_request_returns_url() {
        let service = service();

        let resp = service
            .create_checkout_session(CheckoutRequest::new("t1", "2025-06-01"), None)
            .await
            .unwrap();

        assert!(!resp.url.is_empty());
        assert_eq!(service.catalog().reads(), 1);
        assert_eq!(service.gateway().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_unit_price_matches_trip_exactly() {
        let service = service();

        service
            .create_checkout_session(
                CheckoutRequest::new("t1", "2025-07-01"),
                Some("https://stars.example"),
            )
            .await
            .unwrap();

        let sent = &service.gateway().requests()[0];
        assert_eq!(sent.line_items[0].unit_amount, 250000);
        assert_eq!(sent.line_items[0].quantity, 1);
        assert_eq!(
            sent.success_url,
            "https://stars.example/success?session_id={CHECKOUT_SESSION_ID}"
        );
        assert_eq!(sent.cancel_url, "https://stars.example/");
        assert_eq!(sent.metadata["tripId"], "t1");
        assert_eq!(sent.metadata["departureDate"], "2025-07-01");
    }

    #[tokio::test]
    async fn test_missing_origin_gives_relative_redirects() {
        let service = service();

        service
            .create_checkout_session(CheckoutRequest::new("t1", "2025-06-01"), None)
            .await
            .unwrap();

        let sent = &service.gateway().requests()[0];
        assert_eq!(sent.cancel_url, "/");
    }

    #[tokio::test]
    async fn test_repeated_requests_are_not_deduplicated() {
        let service = service();

        let first = service
            .create_checkout_session(CheckoutRequest::new("t1", "2025-06-01"), None)
            .await
            .unwrap();
        let second = service
            .create_checkout_session(CheckoutRequest::new("t1", "2025-06-01"), None)
            .await
            .unwrap();

        assert_ne!(first.url, second.url);
        assert_eq!(service.gateway().requests().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_fields_is_bad_request() {
        let service = service();

        let cases = [
            CheckoutRequest::default(),
            CheckoutRequest {
                trip_id: Some("t1".into()),
                departure_date: None,
            },
            CheckoutRequest {
                trip_id: None,
                departure_date: Some("2025-06-01".into()),
            },
            CheckoutRequest::new("", "2025-06-01"),
            CheckoutRequest::new("t1", ""),
        ];

        for req in cases {
            let result = service.create_checkout_session(req, None).await;
            assert_eq!(result, Err(AppError::BadRequest(MISSING_FIELDS.into())));
        }

        assert_eq!(service.catalog().reads(), 0);
        assert!(service.gateway().requests().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_trip_is_not_found() {
        let service = service();

        let result = service
            .create_checkout_session(CheckoutRequest::new("missing", "2025-06-01"), None)
            .await;

        assert_eq!(result, Err(AppError::NotFound(TRIP_NOT_FOUND.into())));
        assert!(service.gateway().requests().is_empty());
    }

    #[tokio::test]
    async fn test_date_not_offered_is_bad_request() {
        let service = service();

        let result = service
            .create_checkout_session(CheckoutRequest::new("t1", "2025-08-01"), None)
            .await;

        assert_eq!(
            result,
            Err(AppError::BadRequest(INVALID_DEPARTURE_DATE.into()))
        );
        assert!(service.gateway().requests().is_empty());
    }

    #[tokio::test]
    async fn test_catalog_failure_is_lookup_failed() {
        let service = CheckoutService::new(MockCatalog::failing(), MockGateway::new());

        let result = service
            .create_checkout_session(CheckoutRequest::new("t1", "2025-06-01"), None)
            .await;

        assert_eq!(result, Err(AppError::LookupFailed(TRIP_LOOKUP_FAILED.into())));
    }

    #[tokio::test]
    async fn test_catalog_timeout_is_lookup_failed() {
        let service = CheckoutService::with_timeouts(
            MockCatalog::slow(Duration::from_secs(5)),
            MockGateway::new(),
            short_timeouts(),
        );

        let result = service
            .create_checkout_session(CheckoutRequest::new("t1", "2025-06-01"), None)
            .await;

        assert_eq!(result, Err(AppError::LookupFailed(TRIP_LOOKUP_FAILED.into())));
        assert!(service.gateway().requests().is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_surfaces_message() {
        let service = CheckoutService::new(
            MockCatalog::new().with_trip(lunar_getaway()),
            MockGateway::with(GatewayBehaviour::Fail("Your card was declined.".into())),
        );

        let result = service
            .create_checkout_session(CheckoutRequest::new("t1", "2025-06-01"), None)
            .await;

        assert_eq!(
            result,
            Err(AppError::ProviderError("Your card was declined.".into()))
        );
    }

    #[tokio::test]
    async fn test_session_without_url_is_provider_error() {
        let service = CheckoutService::new(
            MockCatalog::new().with_trip(lunar_getaway()),
            MockGateway::with(GatewayBehaviour::NoUrl),
        );

        let result = service
            .create_checkout_session(CheckoutRequest::new("t1", "2025-06-01"), None)
            .await;

        assert_eq!(
            result,
            Err(AppError::ProviderError(SESSION_WITHOUT_URL.into()))
        );
    }

    #[tokio::test]
    async fn test_provider_timeout_is_provider_error() {
        let service = CheckoutService::with_timeouts(
            MockCatalog::new().with_trip(lunar_getaway()),
            MockGateway::with(GatewayBehaviour::Hang),
            short_timeouts(),
        );

        let result = service
            .create_checkout_session(CheckoutRequest::new("t1", "2025-06-01"), None)
            .await;

        assert!(matches!(result, Err(AppError::ProviderError(_))));
    }

    #[tokio::test]
    async fn test_get_trip() {
        let service = service();

        let trip = service.get_trip(&TripId::new("t1")).await.unwrap();
        assert_eq!(trip.title, "Lunar Getaway");

        let missing = service.get_trip(&TripId::new("nope")).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_trips_failure_is_lookup_failed() {
        let service = CheckoutService::new(MockCatalog::failing(), MockGateway::new());

        let result = service.list_trips().await;

        assert!(matches!(result, Err(AppError::LookupFailed(_))));
    }
}
