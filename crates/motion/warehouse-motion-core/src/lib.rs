//! Warehouse Motion Core (renderer-agnostic)
//!
//! Routes boxes between the receiving dock and storage slots and animates them
//! frame by frame: fixed trunk-and-branch paths, eased shelf placement, and a
//! shrink-and-fade retirement. The host owns the renderer; it feeds scans in,
//! calls `Engine::update` once per frame and applies the returned `Outputs`.

pub mod animator;
pub mod assign;
pub mod config;
pub mod engine;
pub mod error;
pub mod highlight;
pub mod ids;
pub mod layout;
pub mod lifecycle;
pub mod math;
pub mod outputs;
pub mod planner;
pub mod registry;
pub mod scan;
pub mod scene;

// Re-exports for consumers (adapters)
pub use animator::{segment_progress, Pose, TravelState, TravelTask};
pub use assign::{DemandZoneAssigner, FallbackAssigner, LocationAssigner};
pub use config::{Config, LifecycleConfig, MotionConfig, RouteConfig};
pub use engine::{Engine, Entity, Task};
pub use error::MotionError;
pub use highlight::HighlightController;
pub use ids::EntityId;
pub use layout::ComplexLayout;
pub use lifecycle::FadeTask;
pub use math::Vec3;
pub use outputs::{ArrivalStatus, Change, MotionEvent, Outputs};
pub use planner::{Direction, Path, SegmentMotion};
pub use registry::{Location, PositionResolver, Registry};
pub use scan::{Demand, ScanItem, ScanMode};
pub use scene::{apply_outputs, SceneGraph};
