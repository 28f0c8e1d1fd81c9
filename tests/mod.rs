mod calendar_session;

// This file organizes the integration tests into a cohesive test suite.
// Each module tests a specific aspect of the application:
// - smoke_tests: Startup wiring, widgets and settings working together
// - calendar_session: The calendar connection lifecycle against the mock provider
// - email_transport: The EmailJS request and the dispatcher against a mock HTTP server
