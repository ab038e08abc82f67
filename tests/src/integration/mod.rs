//! Cross-crate integration flows.

mod beacons;
mod names;
mod oev;
