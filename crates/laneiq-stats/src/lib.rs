//! Statistical helpers shared by the laneiq analysis crates.
//!
//! This crate provides two small groups of tools:
//!
//! - **Descriptive statistics**: mean, variance, standard deviation and coefficient
//!   of variation of a plain dataset
//! - **Weighted statistics**: weighted mean and variance for datasets where each
//!   value carries its own weight (e.g. recency-weighted match history)
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`weighted`]: Weighted mean/variance accumulation
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use laneiq_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Computing a weighted mean
//!
//! ```
//! use laneiq_stats::weighted::WeightedStats;
//!
//! let stats = WeightedStats::new([(10.0, 3.0), (20.0, 1.0)]).unwrap();
//! assert_eq!(stats.mean, 12.5);
//! ```

pub mod descriptive;
pub mod weighted;
