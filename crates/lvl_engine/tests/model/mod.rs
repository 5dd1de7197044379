//! Tests for the level model invariants.

mod layer_tests;
