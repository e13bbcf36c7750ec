//! Command handlers. Each one turns parsed arguments into calls on
//! `kiln-core` and renders the outcome.

pub mod scaffold;
