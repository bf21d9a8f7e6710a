// src/lib.rs

// 1. Data Structures (The "Nouns")
// explicit 'pub' makes them available to main.rs
pub mod models;

// 2. Failure Taxonomy (The "Contract")
pub mod error;

// 3. Upstream Adapter (The "Plumbing")
pub mod provider;

// 4. Coin Resolution (The "Catalog" lookup)
pub mod resolver;

// 5. Validation & Merge (The "Brains")
pub mod aggregator;

// 6. Per-Request Orchestration (The "Orchestrator")
pub mod service;

// 7. HTTP Surface
pub mod server;

// 8. Configuration
pub mod config;
