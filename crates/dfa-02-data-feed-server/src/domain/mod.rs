//! # Domain Layer
//!
//! Pure update and read rules over `FeedState`. Nothing here performs I/O;
//! signature checks go through the `SignatureVerifier` port.

pub mod beacon;
pub mod beacon_set;
pub mod codec;
pub mod entities;
pub mod identifiers;
pub mod invariants;
pub mod median;
pub mod names;
pub mod oev;
pub mod read;
pub mod settlement;
pub mod state;

pub use codec::{decode_fixed_point, encode_fixed_point};
pub use entities::{FeedWrite, OevUpdateRequest, SignedBeaconUpdate, SignedOevEntry};
pub use identifiers::{
    dapi_name_hash, dapi_name_setter_role, derive_beacon_id, derive_beacon_set_id, derive_role,
    derive_template_id, oev_signature_message_hash, oev_update_hash, root_role,
    signed_data_message_hash, OevUpdateContext,
};
pub use invariants::TimestampWindow;
pub use oev::Deployment;
pub use state::FeedState;
