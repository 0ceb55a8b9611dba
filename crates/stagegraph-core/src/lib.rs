//! Stagegraph Core Types and Definitions
//!
//! This crate provides the foundational types shared by the stagegraph
//! engine and its front ends:
//!
//! - **Identifiers**: String-interned identifiers ([`identifier::Id`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Stages**: Sources, transforms, and destinations ([`stage`] module)

pub mod geometry;
pub mod identifier;
pub mod stage;
