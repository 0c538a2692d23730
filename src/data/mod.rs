//! Data layer: core types, loading, cleaning, filtering, statistics.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → ListingTable (raw)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  clean    │  repair rate + cost columns → ListingTable (normalized)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  apply criteria → filtered rows
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ summary   │  counts, means, online share, top-10 tables
//!   └──────────┘
//! ```
//!
//! Everything below `loader` is pure: the normalized table is read-only,
//! filtering and summarizing allocate fresh results, and identical inputs
//! always produce identical outputs. Callers may therefore memoize freely.

pub mod clean;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
