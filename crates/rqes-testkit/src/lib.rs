//! RQES UI Testing Infrastructure
//!
//! Fakes for the collaborators the flow core consumes (router, presentation
//! host, signing service) plus sample records and proptest strategies.
//!
//! # Usage
//!
//! Add this to your crate's `Cargo.toml` dev-dependencies:
//! ```toml
//! [dev-dependencies]
//! rqes-testkit = { workspace = true }
//! ```
//!
//! Then in your tests:
//! ```rust,ignore
//! use rqes_testkit::*;
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let (ui, host) = test_ui();
//!     ui.start(sample_document(), host.clone(), true).await.unwrap();
//! }
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod factories;
pub mod mocks;
pub mod strategies;

pub use factories::*;
pub use mocks::*;
