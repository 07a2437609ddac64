//! Procedural animation of hierarchical rigid-body skeletons.
//!
//! Segments form a tree in [`SegmentRegistry`], each child's base point is
//! derived from its parent every frame. Joints in [`JointSystem`] swing
//! segment directions with sinusoidal oscillators and carry their rotation
//! into dependent joints.

pub mod clocks;
pub mod config;
pub mod driver;
pub mod error;
pub mod frame_timer;
pub mod joint;
pub mod math;
pub mod pose;
pub mod rig;
pub mod segment;
pub mod system;

pub use self::{
    clocks::{ClockIndex, Clocks},
    config::{JointDef, RigConfig, SegmentDef},
    driver::{FrameContext, FrameDriver, Render, Scheduler},
    error::RigError,
    joint::{Joint, JointConfig},
    rig::Rig,
    segment::{AttachVertex, Outcome, Segment, SegmentId, SegmentRegistry, Taper},
    system::{FrameReport, JointSystem, TopologyIssue},
};
