//! Property-based tests for springdex
//!
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Test Modules
//!
//! - `view_props`: Tests for record decoding and card formatting
//!   - Decoding any JSON value yields a record
//!   - View construction is total and every display field is non-empty
//!   - Portrait URLs always point at the CDN with the requested size
//!   - The preferred quote is the first short enough phrase
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable:
//!
//! ```sh
//! PROPTEST_CASES=1000 cargo test property --release
//! ```

mod view_props;
