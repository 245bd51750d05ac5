//! Toasty Core
//!
//! Foundational primitives shared by the Toasty crates:
//!
//! - **Geometry**: points and 2D affine transforms used for view transforms
//! - **State Machines**: the `StateTransitions` trait used to gate lifecycle changes
//!
//! # Example
//!
//! ```rust
//! use toasty_core::Affine2D;
//!
//! let hidden = Affine2D::translation(0.0, -100.0).then(&Affine2D::scale(0.9, 0.9));
//! assert_eq!(hidden.ty(), -100.0);
//! assert_eq!(hidden.scale_factors(), (0.9, 0.9));
//! ```

pub mod fsm;
pub mod geometry;

pub use fsm::StateTransitions;
pub use geometry::{Affine2D, Point};
