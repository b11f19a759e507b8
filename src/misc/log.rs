/*!
Miscellaneous items related to [logging](log).

Calls to the log macro are made at the outer loops of the library, mostly to report
progress of a long enumeration.
Note, no log implementation is provided by the library; the binaries install
[env_logger](https://docs.rs/env_logger).
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    pub const BACKEND: &str = "backend";
    pub const CANONICAL: &str = "canonical";
    pub const ENUMERATION: &str = "enumeration";
    pub const GENERATOR: &str = "generator";
}
