/**
 * Open Cloud Mesh collaborator components.
 *  - Provider authorizer: allow-list of mesh providers with optional
 *    DNS verification of the requesting host
 *  - Invite manager: mint invite tokens, forward them to peers and
 *    track accepted remote users
 * Implementations are wired through a typed name-to-constructor
 *  registry from the composition root.
 */
pub mod invite;
pub mod provider;
pub mod registry;

pub use registry::{DriverError, Options, Registry};
