//! Numeric helpers shared by the Chequemate crates.
//!
//! Everything here is a small pure function over slices or iterators, so the feature
//! extractor and the scoring engine agree on one definition of each operation.
//!
//! # Modules
//!
//! - [`vector`]: Dot product, Euclidean norm, cosine similarity, count normalization
//! - [`frequency`]: Occurrence counting and count-to-fraction conversion
//!
//! # Examples
//!
//! ## Comparing two histograms
//!
//! ```
//! use chequemate_stats::vector;
//!
//! let a = [1.0, 0.0, 1.0];
//! let b = [1.0, 0.0, 1.0];
//! assert!((vector::cosine_similarity(&a, &b) - 1.0).abs() < 1e-12);
//! assert_eq!(vector::cosine_similarity(&a, &[0.0; 3]), 0.0);
//! ```
//!
//! ## Turning labels into fractions
//!
//! ```
//! use chequemate_stats::frequency;
//!
//! let fractions = frequency::fractions(["600", "600", "180", "600"]);
//! assert_eq!(fractions["600"], 0.75);
//! assert_eq!(fractions["180"], 0.25);
//! ```

pub mod frequency;
pub mod vector;
