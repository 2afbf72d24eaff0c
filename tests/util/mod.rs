//! Fakes for the injectable seams and wiring helpers shared by integration tests.
