//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing_subscriber` formatter filtered by
//! `RUST_LOG`. Module paths are hidden (`with_target(false)`); actor events carry
//! an `entity_type` field instead.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: `Actor started`, `Shutdown` with the final store size
//! - **Entity operations**: `Created`, `Updated`, `Deleted`, `Action ok`, refusals
//! - **Production**: product stock moves, each ingredient deduction, and a `warn!`
//!   for every missing ingredient or stock shortfall
//! - **Imports**: a `warn!` per failed item or dropped recipe line, then a summary
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=debug cargo run
//! RUST_LOG=pos_inventory::costing=debug cargo run
//! ```
//!
//! With `RUST_LOG=info`, producing ten loaves with too little flour reads:
//!
//! ```text
//! INFO produce: Updated entity_type="Product" id=product_7
//! INFO produce: Product stock moved delta=10 kind=entry
//! WARN produce: Not enough stock, deducting what is left ingredient_id=product_1 required=2000 applied=400
//! INFO produce: Production recorded ingredients=2 notes=1
//! ```

/// Installs the global subscriber. Later calls leave the first one in place.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type is enough
        .compact()
        .try_init();
}
