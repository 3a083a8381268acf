//! End-to-end tests over exported VENUE reports
//!
//! Fixtures live in `fixtures/`: VENUE 4.x (S3L-X, Profile) and D-Show 3.x
//! exports in both the Patch List and System Info layouts.

#[cfg(test)]
mod report_integration;
