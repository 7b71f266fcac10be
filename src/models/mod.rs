//! Job-shop domain models.
//!
//! Immutable input values (`Job`, `Operation`, `Machine`) and the
//! `Schedule` produced by a scheduling run. The models own no scheduling
//! behavior.
//!
//! # Domain Mappings
//!
//! | Model | Manufacturing | Print shop | Lab |
//! |-------|---------------|------------|-----|
//! | Job | Production order | Print job | Sample |
//! | Operation | Routing step | Press / cut / bind | Assay step |
//! | Machine | Work center | Press | Instrument |
//! | Schedule | Production plan | Shop plan | Run sheet |

mod job;
mod machine;
mod operation;
mod schedule;

pub use job::Job;
pub use machine::Machine;
pub use operation::Operation;
pub use schedule::{Assignment, Schedule, Violation, ViolationType};
